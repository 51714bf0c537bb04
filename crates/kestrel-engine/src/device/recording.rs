//! Recording double for [`GraphicsApi`] protocol tests.
//!
//! Every call is logged in order so tests can assert the bind/upload/draw
//! protocol without a GPU. Uniform names resolve by default; individual
//! names, a stage kind, or the link step can be made to fail up front.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use super::api::{
    BufferHandle, BufferKind, GraphicsApi, ProgramHandle, StageHandle, StageKind, TextureDesc,
    TextureHandle, UniformLocation, VertexArrayHandle,
};
use crate::coords::ColorRgba;
use crate::error::RenderError;

/// One recorded GPU operation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GpuCall {
    CompileStage { kind: StageKind },
    LinkProgram { vertex: StageHandle, fragment: StageHandle },
    DeleteStage(StageHandle),
    DeleteProgram(ProgramHandle),
    BindProgram(Option<ProgramHandle>),
    UniformLookup { name: String, hit: bool },
    SetUniformI32 { location: UniformLocation, value: i32 },
    SetUniformF32 { location: UniformLocation, value: f32 },
    SetUniformVec3 { location: UniformLocation, value: [f32; 3] },
    SetUniformMat4 { location: UniformLocation, value: [f32; 16] },
    CreateTexture { desc: TextureDesc, byte_len: usize },
    BindTexture { unit: u32, texture: Option<TextureHandle> },
    DeleteTexture(TextureHandle),
    CreateVertexArray,
    BindVertexArray(Option<VertexArrayHandle>),
    DeleteVertexArray(VertexArrayHandle),
    CreateBuffer { kind: BufferKind, byte_len: usize },
    BindBuffer { kind: BufferKind, buffer: Option<BufferHandle> },
    DeleteBuffer(BufferHandle),
    VertexAttrib { index: u32, components: i32, stride: i32, offset: i32 },
    DrawIndexedTriangles { index_count: i32 },
    DrawTriangles { first: i32, vertex_count: i32 },
    SetAlphaBlend(bool),
    SetDepthTest(bool),
    SetFaceCulling(bool),
    ClearColorBuffer(ColorRgba),
    ClearDepthBuffer,
}

pub(crate) struct RecordingDevice {
    next_id: Cell<u32>,
    calls: RefCell<Vec<GpuCall>>,
    unknown_uniforms: RefCell<HashSet<String>>,
    compile_failure: Cell<Option<StageKind>>,
    link_failure: Cell<bool>,
}

impl RecordingDevice {
    pub(crate) fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            calls: RefCell::new(Vec::new()),
            unknown_uniforms: RefCell::new(HashSet::new()),
            compile_failure: Cell::new(None),
            link_failure: Cell::new(false),
        }
    }

    /// Makes every lookup of `name` miss.
    pub(crate) fn mark_unknown_uniform(&self, name: &str) {
        self.unknown_uniforms.borrow_mut().insert(name.to_owned());
    }

    /// Makes every compile of `kind` fail.
    pub(crate) fn fail_compile(&self, kind: StageKind) {
        self.compile_failure.set(Some(kind));
    }

    /// Makes every link fail.
    pub(crate) fn fail_link(&self) {
        self.link_failure.set(true);
    }

    pub(crate) fn calls(&self) -> Vec<GpuCall> {
        self.calls.borrow().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub(crate) fn count(&self, matches: impl Fn(&GpuCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| matches(call)).count()
    }

    fn record(&self, call: GpuCall) {
        self.calls.borrow_mut().push(call);
    }

    fn fresh_id(&self) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl GraphicsApi for RecordingDevice {
    fn compile_stage(&self, kind: StageKind, _source: &str) -> Result<StageHandle, RenderError> {
        self.record(GpuCall::CompileStage { kind });
        if self.compile_failure.get() == Some(kind) {
            return Err(RenderError::Compile {
                stage: kind,
                log: "forced compile failure".into(),
            });
        }
        Ok(StageHandle(self.fresh_id()))
    }

    fn link_program(
        &self,
        vertex: StageHandle,
        fragment: StageHandle,
    ) -> Result<ProgramHandle, RenderError> {
        self.record(GpuCall::LinkProgram { vertex, fragment });
        if self.link_failure.get() {
            return Err(RenderError::Link {
                log: "forced link failure".into(),
            });
        }
        Ok(ProgramHandle(self.fresh_id()))
    }

    fn delete_stage(&self, stage: StageHandle) {
        self.record(GpuCall::DeleteStage(stage));
    }

    fn delete_program(&self, program: ProgramHandle) {
        self.record(GpuCall::DeleteProgram(program));
    }

    fn bind_program(&self, program: Option<ProgramHandle>) {
        self.record(GpuCall::BindProgram(program));
    }

    fn uniform_location(&self, _program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        let hit = !self.unknown_uniforms.borrow().contains(name);
        self.record(GpuCall::UniformLookup {
            name: name.to_owned(),
            hit,
        });
        hit.then(|| UniformLocation(self.fresh_id()))
    }

    fn set_uniform_i32(&self, location: UniformLocation, value: i32) {
        self.record(GpuCall::SetUniformI32 { location, value });
    }

    fn set_uniform_f32(&self, location: UniformLocation, value: f32) {
        self.record(GpuCall::SetUniformF32 { location, value });
    }

    fn set_uniform_vec3(&self, location: UniformLocation, value: [f32; 3]) {
        self.record(GpuCall::SetUniformVec3 { location, value });
    }

    fn set_uniform_mat4(&self, location: UniformLocation, value: &[f32; 16]) {
        self.record(GpuCall::SetUniformMat4 {
            location,
            value: *value,
        });
    }

    fn create_texture(&self, desc: &TextureDesc, pixels: &[u8]) -> Result<TextureHandle, RenderError> {
        self.record(GpuCall::CreateTexture {
            desc: *desc,
            byte_len: pixels.len(),
        });
        Ok(TextureHandle(self.fresh_id()))
    }

    fn bind_texture(&self, unit: u32, texture: Option<TextureHandle>) {
        self.record(GpuCall::BindTexture { unit, texture });
    }

    fn delete_texture(&self, texture: TextureHandle) {
        self.record(GpuCall::DeleteTexture(texture));
    }

    fn create_vertex_array(&self) -> Result<VertexArrayHandle, RenderError> {
        self.record(GpuCall::CreateVertexArray);
        Ok(VertexArrayHandle(self.fresh_id()))
    }

    fn bind_vertex_array(&self, array: Option<VertexArrayHandle>) {
        self.record(GpuCall::BindVertexArray(array));
    }

    fn delete_vertex_array(&self, array: VertexArrayHandle) {
        self.record(GpuCall::DeleteVertexArray(array));
    }

    fn create_buffer(&self, kind: BufferKind, data: &[u8]) -> Result<BufferHandle, RenderError> {
        self.record(GpuCall::CreateBuffer {
            kind,
            byte_len: data.len(),
        });
        Ok(BufferHandle(self.fresh_id()))
    }

    fn bind_buffer(&self, kind: BufferKind, buffer: Option<BufferHandle>) {
        self.record(GpuCall::BindBuffer { kind, buffer });
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        self.record(GpuCall::DeleteBuffer(buffer));
    }

    fn vertex_attrib_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        self.record(GpuCall::VertexAttrib {
            index,
            components,
            stride,
            offset,
        });
    }

    fn draw_indexed_triangles(&self, index_count: i32) {
        self.record(GpuCall::DrawIndexedTriangles { index_count });
    }

    fn draw_triangles(&self, first: i32, vertex_count: i32) {
        self.record(GpuCall::DrawTriangles {
            first,
            vertex_count,
        });
    }

    fn set_alpha_blend(&self, enabled: bool) {
        self.record(GpuCall::SetAlphaBlend(enabled));
    }

    fn set_depth_test(&self, enabled: bool) {
        self.record(GpuCall::SetDepthTest(enabled));
    }

    fn set_face_culling(&self, enabled: bool) {
        self.record(GpuCall::SetFaceCulling(enabled));
    }

    fn clear_color_buffer(&self, color: ColorRgba) {
        self.record(GpuCall::ClearColorBuffer(color));
    }

    fn clear_depth_buffer(&self) {
        self.record(GpuCall::ClearDepthBuffer);
    }
}
