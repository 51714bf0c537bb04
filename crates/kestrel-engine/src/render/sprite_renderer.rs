//! Layered 2-D sprite drawing.

use std::rc::Rc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::coords::{ColorRgba, Viewport};
use crate::device::{BufferHandle, BufferKind, GraphicsApi, VertexArrayHandle};
use crate::error::RenderError;

use super::shader::ShaderProgram;
use super::sprite::{Sprite, SpriteId, model_matrix};

// ── shared quad ───────────────────────────────────────────────────────────

/// Interleaved unit-quad vertex: position then UV, both in [0, 1].
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    pos: [f32; 2],
    uv: [f32; 2],
}

/// Two triangles covering the unit quad, drawn non-indexed.
const QUAD_VERTICES: [QuadVertex; 6] = [
    QuadVertex { pos: [0.0, 1.0], uv: [0.0, 1.0] },
    QuadVertex { pos: [1.0, 0.0], uv: [1.0, 0.0] },
    QuadVertex { pos: [0.0, 0.0], uv: [0.0, 0.0] },
    QuadVertex { pos: [0.0, 1.0], uv: [0.0, 1.0] },
    QuadVertex { pos: [1.0, 1.0], uv: [1.0, 1.0] },
    QuadVertex { pos: [1.0, 0.0], uv: [1.0, 0.0] },
];

// ── renderer ──────────────────────────────────────────────────────────────

/// Draws registered sprites back-to-front in registration order.
///
/// Registration order is the only layering mechanism: depth testing is off
/// for the whole 2-D pass and later sprites paint over earlier ones. The
/// collection is append-only; hide a sprite by clearing its `visible` flag
/// through [`sprite_mut`](Self::sprite_mut).
///
/// Each visible sprite is one draw call with no batching by texture, an
/// accepted ceiling for panel-sized sprite counts.
pub struct SpriteBatchRenderer {
    api: Rc<dyn GraphicsApi>,
    program: Rc<ShaderProgram>,
    sprites: Vec<Sprite>,
    viewport: Viewport,
    projection: Mat4,
    clear_color: ColorRgba,
    quad_vertex_array: VertexArrayHandle,
    quad_vertex_buffer: BufferHandle,
}

impl SpriteBatchRenderer {
    /// Builds the shared quad geometry once and fixes the 2-D render state
    /// (alpha blending on, depth testing off).
    ///
    /// The projection is a top-left-origin orthographic matrix over
    /// `viewport`; it is recomputed only by [`set_viewport`](Self::set_viewport).
    /// The program is shared with the caller, which keeps it alive and may
    /// keep setting uniforms of its own on it.
    pub fn new(
        api: &Rc<dyn GraphicsApi>,
        program: Rc<ShaderProgram>,
        viewport: Viewport,
    ) -> Result<Self, RenderError> {
        let quad_vertex_array = api.create_vertex_array()?;
        api.bind_vertex_array(Some(quad_vertex_array));
        let quad_vertex_buffer =
            match api.create_buffer(BufferKind::Vertex, bytemuck::cast_slice(&QUAD_VERTICES)) {
                Ok(buffer) => buffer,
                Err(err) => {
                    api.bind_vertex_array(None);
                    api.delete_vertex_array(quad_vertex_array);
                    return Err(err);
                }
            };
        let stride = std::mem::size_of::<QuadVertex>() as i32;
        api.vertex_attrib_f32(0, 2, stride, 0);
        api.vertex_attrib_f32(1, 2, stride, 8);
        api.bind_vertex_array(None);
        api.bind_buffer(BufferKind::Vertex, None);

        api.set_alpha_blend(true);
        api.set_depth_test(false);

        // The sampler uniform never changes; store it once up front.
        program.bind();
        program.set_int("image", 0);
        api.bind_program(None);

        Ok(Self {
            api: Rc::clone(api),
            program,
            sprites: Vec::new(),
            viewport,
            projection: viewport.projection(),
            clear_color: ColorRgba::black(),
            quad_vertex_array,
            quad_vertex_buffer,
        })
    }

    /// Registers `sprite` on top of the current stack and returns its id.
    pub fn add_sprite(&mut self, sprite: Sprite) -> SpriteId {
        self.sprites.push(sprite);
        SpriteId(self.sprites.len() - 1)
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(id.0)
    }

    /// Per-frame mutation access for the frame loop and debug overlays.
    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.get_mut(id.0)
    }

    #[inline]
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    #[inline]
    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Rebuilds the projection for a resized drawable area. Nothing watches
    /// the surface; resizes must arrive through here.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.projection = viewport.projection();
    }

    pub fn set_clear_color(&mut self, color: ColorRgba) {
        self.clear_color = color;
    }

    /// Clears the color buffer, then draws every visible sprite in
    /// registration order, one quad each.
    pub fn render(&self) {
        self.api.clear_color_buffer(self.clear_color);

        // The 3-D pass flips this state every frame; re-assert it.
        self.api.set_alpha_blend(true);
        self.api.set_depth_test(false);

        self.program.bind();
        self.api.bind_vertex_array(Some(self.quad_vertex_array));

        for sprite in &self.sprites {
            if !sprite.visible {
                continue;
            }
            let Some(texture) = sprite.texture.as_ref() else {
                continue;
            };

            let model = model_matrix(&sprite.transform);
            self.program.set_mat4("model", &model);
            self.program.set_mat4("projection", &self.projection);
            texture.bind(0);
            self.api.draw_triangles(0, QUAD_VERTICES.len() as i32);
        }

        // Leave no sprite bindings behind for the next pass.
        self.api.bind_vertex_array(None);
        self.api.bind_texture(0, None);
    }
}

impl Drop for SpriteBatchRenderer {
    fn drop(&mut self) {
        self.api.delete_vertex_array(self.quad_vertex_array);
        self.api.delete_buffer(self.quad_vertex_buffer);
    }
}
