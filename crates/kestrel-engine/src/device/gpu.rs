//! OpenGL backend for [`GraphicsApi`] built on `glow`.
//!
//! All raw GL calls live in this file; the rest of the crate is safe code.
//! The embedding layer must make its context current on this thread before
//! constructing the device, and keep it current for the device's lifetime.
//!
//! Handles are plain ids mapped to native objects through interior
//! registries. Ids are never reused, so a stale handle can only miss; it
//! can never alias a live GPU object, and deletes release each object
//! exactly once.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use glow::HasContext;

use super::api::{
    BufferHandle, BufferKind, GraphicsApi, PixelFormat, ProgramHandle, StageHandle, StageKind,
    TextureDesc, TextureHandle, UniformLocation, VertexArrayHandle, WrapMode,
};
use crate::coords::ColorRgba;
use crate::error::RenderError;

// ── handle registry ───────────────────────────────────────────────────────

struct HandleStore<T> {
    next: Cell<u32>,
    live: RefCell<HashMap<u32, T>>,
}

impl<T: Clone> HandleStore<T> {
    fn new() -> Self {
        Self {
            next: Cell::new(1),
            live: RefCell::new(HashMap::new()),
        }
    }

    fn insert(&self, object: T) -> u32 {
        let id = self.next.get();
        self.next.set(id + 1);
        self.live.borrow_mut().insert(id, object);
        id
    }

    fn get(&self, id: u32) -> Option<T> {
        self.live.borrow().get(&id).cloned()
    }

    fn remove(&self, id: u32) -> Option<T> {
        self.live.borrow_mut().remove(&id)
    }
}

// ── device ────────────────────────────────────────────────────────────────

/// The production OpenGL device.
pub struct GlowDevice {
    gl: glow::Context,
    stages: HandleStore<glow::Shader>,
    programs: HandleStore<glow::Program>,
    textures: HandleStore<glow::Texture>,
    buffers: HandleStore<glow::Buffer>,
    vertex_arrays: HandleStore<glow::VertexArray>,
    uniforms: HandleStore<glow::UniformLocation>,
}

impl GlowDevice {
    /// Wraps an existing glow context.
    ///
    /// The context must already be current on the calling thread.
    pub fn new(gl: glow::Context) -> Self {
        Self {
            gl,
            stages: HandleStore::new(),
            programs: HandleStore::new(),
            textures: HandleStore::new(),
            buffers: HandleStore::new(),
            vertex_arrays: HandleStore::new(),
            uniforms: HandleStore::new(),
        }
    }

    /// Builds the context from the windowing layer's entry-point resolver.
    ///
    /// # Safety
    ///
    /// `loader` must return valid entry points for an OpenGL context that is
    /// current on the calling thread.
    pub unsafe fn from_loader<F>(loader: F) -> Self
    where
        F: FnMut(&str) -> *const std::ffi::c_void,
    {
        Self::new(unsafe { glow::Context::from_loader_function(loader) })
    }
}

impl GraphicsApi for GlowDevice {
    fn compile_stage(&self, kind: StageKind, source: &str) -> Result<StageHandle, RenderError> {
        let raw_kind = match kind {
            StageKind::Vertex => glow::VERTEX_SHADER,
            StageKind::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe {
            let shader = self.gl.create_shader(raw_kind).map_err(RenderError::Device)?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            if !self.gl.get_shader_compile_status(shader) {
                let log = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                log::error!("{kind} stage failed to compile:\n{log}");
                return Err(RenderError::Compile { stage: kind, log });
            }
            Ok(StageHandle(self.stages.insert(shader)))
        }
    }

    fn link_program(
        &self,
        vertex: StageHandle,
        fragment: StageHandle,
    ) -> Result<ProgramHandle, RenderError> {
        let (Some(vs), Some(fs)) = (self.stages.get(vertex.0), self.stages.get(fragment.0)) else {
            return Err(RenderError::Usage(
                "link_program called with a stale stage handle".into(),
            ));
        };
        unsafe {
            let program = self.gl.create_program().map_err(RenderError::Device)?;
            self.gl.attach_shader(program, vs);
            self.gl.attach_shader(program, fs);
            self.gl.link_program(program);
            if !self.gl.get_program_link_status(program) {
                let log = self.gl.get_program_info_log(program);
                self.gl.delete_program(program);
                log::error!("program failed to link:\n{log}");
                return Err(RenderError::Link { log });
            }
            // Detach so that deleting the stage objects actually frees them.
            self.gl.detach_shader(program, vs);
            self.gl.detach_shader(program, fs);
            Ok(ProgramHandle(self.programs.insert(program)))
        }
    }

    fn delete_stage(&self, stage: StageHandle) {
        match self.stages.remove(stage.0) {
            Some(shader) => unsafe { self.gl.delete_shader(shader) },
            None => log::warn!("delete_stage: stale handle {stage:?}"),
        }
    }

    fn delete_program(&self, program: ProgramHandle) {
        match self.programs.remove(program.0) {
            Some(native) => unsafe { self.gl.delete_program(native) },
            None => log::warn!("delete_program: stale handle {program:?}"),
        }
    }

    fn bind_program(&self, program: Option<ProgramHandle>) {
        match program {
            None => unsafe { self.gl.use_program(None) },
            Some(handle) => match self.programs.get(handle.0) {
                Some(native) => unsafe { self.gl.use_program(Some(native)) },
                None => log::warn!("bind_program: stale handle {handle:?}"),
            },
        }
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        let Some(native) = self.programs.get(program.0) else {
            log::warn!("uniform_location: stale program handle {program:?}");
            return None;
        };
        let location = unsafe { self.gl.get_uniform_location(native, name) }?;
        Some(UniformLocation(self.uniforms.insert(location)))
    }

    fn set_uniform_i32(&self, location: UniformLocation, value: i32) {
        match self.uniforms.get(location.0) {
            Some(native) => unsafe { self.gl.uniform_1_i32(Some(&native), value) },
            None => log::warn!("set_uniform_i32: stale location {location:?}"),
        }
    }

    fn set_uniform_f32(&self, location: UniformLocation, value: f32) {
        match self.uniforms.get(location.0) {
            Some(native) => unsafe { self.gl.uniform_1_f32(Some(&native), value) },
            None => log::warn!("set_uniform_f32: stale location {location:?}"),
        }
    }

    fn set_uniform_vec3(&self, location: UniformLocation, value: [f32; 3]) {
        match self.uniforms.get(location.0) {
            Some(native) => unsafe {
                self.gl.uniform_3_f32(Some(&native), value[0], value[1], value[2])
            },
            None => log::warn!("set_uniform_vec3: stale location {location:?}"),
        }
    }

    fn set_uniform_mat4(&self, location: UniformLocation, value: &[f32; 16]) {
        match self.uniforms.get(location.0) {
            Some(native) => unsafe {
                self.gl.uniform_matrix_4_f32_slice(Some(&native), false, value)
            },
            None => log::warn!("set_uniform_mat4: stale location {location:?}"),
        }
    }

    fn create_texture(&self, desc: &TextureDesc, pixels: &[u8]) -> Result<TextureHandle, RenderError> {
        let expected = desc.width as usize * desc.height as usize * desc.format.channels() as usize;
        if pixels.len() != expected {
            return Err(RenderError::Usage(format!(
                "create_texture: got {} pixel bytes for a {}x{} {:?} image (expected {expected})",
                pixels.len(),
                desc.width,
                desc.height,
                desc.format,
            )));
        }
        let format = match desc.format {
            PixelFormat::Rgb8 => glow::RGB,
            PixelFormat::Rgba8 => glow::RGBA,
        };
        let wrap = match desc.wrap {
            WrapMode::ClampToEdge => glow::CLAMP_TO_EDGE,
            WrapMode::Repeat => glow::REPEAT,
        } as i32;
        unsafe {
            let texture = self.gl.create_texture().map_err(RenderError::Device)?;
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, wrap);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, wrap);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            // Rows are tightly packed; RGB rows are not 4-byte aligned.
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                format as i32,
                desc.width as i32,
                desc.height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels)),
            );
            self.gl.bind_texture(glow::TEXTURE_2D, None);
            Ok(TextureHandle(self.textures.insert(texture)))
        }
    }

    fn bind_texture(&self, unit: u32, texture: Option<TextureHandle>) {
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) };
        match texture {
            None => unsafe { self.gl.bind_texture(glow::TEXTURE_2D, None) },
            Some(handle) => match self.textures.get(handle.0) {
                Some(native) => unsafe { self.gl.bind_texture(glow::TEXTURE_2D, Some(native)) },
                None => log::warn!("bind_texture: stale handle {handle:?}"),
            },
        }
    }

    fn delete_texture(&self, texture: TextureHandle) {
        match self.textures.remove(texture.0) {
            Some(native) => unsafe { self.gl.delete_texture(native) },
            None => log::warn!("delete_texture: stale handle {texture:?}"),
        }
    }

    fn create_vertex_array(&self) -> Result<VertexArrayHandle, RenderError> {
        let array = unsafe { self.gl.create_vertex_array() }.map_err(RenderError::Device)?;
        Ok(VertexArrayHandle(self.vertex_arrays.insert(array)))
    }

    fn bind_vertex_array(&self, array: Option<VertexArrayHandle>) {
        match array {
            None => unsafe { self.gl.bind_vertex_array(None) },
            Some(handle) => match self.vertex_arrays.get(handle.0) {
                Some(native) => unsafe { self.gl.bind_vertex_array(Some(native)) },
                None => log::warn!("bind_vertex_array: stale handle {handle:?}"),
            },
        }
    }

    fn delete_vertex_array(&self, array: VertexArrayHandle) {
        match self.vertex_arrays.remove(array.0) {
            Some(native) => unsafe { self.gl.delete_vertex_array(native) },
            None => log::warn!("delete_vertex_array: stale handle {array:?}"),
        }
    }

    fn create_buffer(&self, kind: BufferKind, data: &[u8]) -> Result<BufferHandle, RenderError> {
        let target = buffer_target(kind);
        unsafe {
            let buffer = self.gl.create_buffer().map_err(RenderError::Device)?;
            self.gl.bind_buffer(target, Some(buffer));
            self.gl.buffer_data_u8_slice(target, data, glow::STATIC_DRAW);
            Ok(BufferHandle(self.buffers.insert(buffer)))
        }
    }

    fn bind_buffer(&self, kind: BufferKind, buffer: Option<BufferHandle>) {
        let target = buffer_target(kind);
        match buffer {
            None => unsafe { self.gl.bind_buffer(target, None) },
            Some(handle) => match self.buffers.get(handle.0) {
                Some(native) => unsafe { self.gl.bind_buffer(target, Some(native)) },
                None => log::warn!("bind_buffer: stale handle {handle:?}"),
            },
        }
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        match self.buffers.remove(buffer.0) {
            Some(native) => unsafe { self.gl.delete_buffer(native) },
            None => log::warn!("delete_buffer: stale handle {buffer:?}"),
        }
    }

    fn vertex_attrib_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            self.gl.enable_vertex_attrib_array(index);
            self.gl
                .vertex_attrib_pointer_f32(index, components, glow::FLOAT, false, stride, offset);
        }
    }

    fn draw_indexed_triangles(&self, index_count: i32) {
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, index_count, glow::UNSIGNED_INT, 0)
        };
    }

    fn draw_triangles(&self, first: i32, vertex_count: i32) {
        unsafe { self.gl.draw_arrays(glow::TRIANGLES, first, vertex_count) };
    }

    fn set_alpha_blend(&self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::BLEND);
                self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            } else {
                self.gl.disable(glow::BLEND);
            }
        }
    }

    fn set_depth_test(&self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::DEPTH_TEST);
            } else {
                self.gl.disable(glow::DEPTH_TEST);
            }
        }
    }

    fn set_face_culling(&self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::CULL_FACE);
            } else {
                self.gl.disable(glow::CULL_FACE);
            }
        }
    }

    fn clear_color_buffer(&self, color: ColorRgba) {
        unsafe {
            self.gl.clear_color(color.r, color.g, color.b, color.a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn clear_depth_buffer(&self) {
        unsafe { self.gl.clear(glow::DEPTH_BUFFER_BIT) };
    }
}

fn buffer_target(kind: BufferKind) -> u32 {
    match kind {
        BufferKind::Vertex => glow::ARRAY_BUFFER,
        BufferKind::Index => glow::ELEMENT_ARRAY_BUFFER,
    }
}
