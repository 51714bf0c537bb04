//! Renderer-facing GPU operations.
//!
//! [`GraphicsApi`] is deliberately small and stable: one method per logical
//! GPU operation the core performs, over plain id handles. The production
//! backend is [`GlowDevice`](super::GlowDevice); tests drive the same
//! protocol against a recording double. Ordering rules OpenGL enforces
//! implicitly (bind-before-use, upload-before-draw) are spelled out on the
//! methods that carry them.

use crate::coords::ColorRgba;
use crate::error::RenderError;

// ── handles ───────────────────────────────────────────────────────────────

/// A compiled-but-unlinked shader stage object.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StageHandle(pub(crate) u32);

/// A linked, executable shader program.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub(crate) u32);

/// A GPU-resident 2-D texture object.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub(crate) u32);

/// A GPU buffer object (vertex or index data).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub(crate) u32);

/// A vertex array object capturing attribute layout and the index binding.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VertexArrayHandle(pub(crate) u32);

/// A resolved uniform location within one program.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub(crate) u32);

// ── descriptors ───────────────────────────────────────────────────────────

/// One compilable unit of a shader program.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// Which binding target a buffer object serves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// Per-vertex attribute data.
    Vertex,
    /// Triangle index data. The binding is captured by the currently bound
    /// vertex array.
    Index,
}

/// 8-bit pixel layouts the core uploads.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    #[inline]
    pub const fn channels(self) -> u8 {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Sampling behavior outside [0, 1] UVs. Fixed per texture at creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WrapMode {
    ClampToEdge,
    Repeat,
}

/// Everything the backend needs to allocate and fill a 2-D texture.
///
/// Min/mag filtering is always linear; wrap mode comes from the descriptor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureDesc {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub wrap: WrapMode,
}

// ── the facade ────────────────────────────────────────────────────────────

/// GPU operations the rendering core performs.
///
/// All methods take `&self`; backends use interior mutability where they
/// need bookkeeping. Nothing here is thread-safe: every call must happen on
/// the thread owning the graphics context.
///
/// Deleting a handle that was never created, or was already deleted, is a
/// no-op plus a warning, never a fault.
pub trait GraphicsApi {
    // shader stages + programs

    /// Compiles one stage from source text.
    fn compile_stage(&self, kind: StageKind, source: &str) -> Result<StageHandle, RenderError>;

    /// Links a vertex and a fragment stage into an executable program.
    ///
    /// The stage objects stay alive and must be released separately with
    /// [`delete_stage`](Self::delete_stage) once linking is done.
    fn link_program(
        &self,
        vertex: StageHandle,
        fragment: StageHandle,
    ) -> Result<ProgramHandle, RenderError>;

    fn delete_stage(&self, stage: StageHandle);

    fn delete_program(&self, program: ProgramHandle);

    /// Makes `program` current; `None` unbinds.
    fn bind_program(&self, program: Option<ProgramHandle>);

    /// Resolves a uniform name within `program`. `None` means the name does
    /// not exist in the linked program (or was optimized out).
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;

    /// Uniform stores target the currently bound program.
    fn set_uniform_i32(&self, location: UniformLocation, value: i32);
    fn set_uniform_f32(&self, location: UniformLocation, value: f32);
    fn set_uniform_vec3(&self, location: UniformLocation, value: [f32; 3]);
    /// `value` is column-major.
    fn set_uniform_mat4(&self, location: UniformLocation, value: &[f32; 16]);

    // textures

    /// Allocates a texture and uploads `pixels` (tightly packed rows,
    /// `width * height * channels` bytes). Leaves no texture bound.
    fn create_texture(&self, desc: &TextureDesc, pixels: &[u8]) -> Result<TextureHandle, RenderError>;

    /// Activates texture unit `unit` and binds `texture` to it; `None`
    /// rebinds the unit to no texture.
    fn bind_texture(&self, unit: u32, texture: Option<TextureHandle>);

    fn delete_texture(&self, texture: TextureHandle);

    // buffers + vertex arrays

    fn create_vertex_array(&self) -> Result<VertexArrayHandle, RenderError>;

    fn bind_vertex_array(&self, array: Option<VertexArrayHandle>);

    fn delete_vertex_array(&self, array: VertexArrayHandle);

    /// Allocates a buffer, uploads `data` and leaves the buffer bound to its
    /// target, so that a bound vertex array captures the index binding and
    /// subsequent [`vertex_attrib_f32`](Self::vertex_attrib_f32) calls
    /// source the vertex binding.
    fn create_buffer(&self, kind: BufferKind, data: &[u8]) -> Result<BufferHandle, RenderError>;

    fn bind_buffer(&self, kind: BufferKind, buffer: Option<BufferHandle>);

    fn delete_buffer(&self, buffer: BufferHandle);

    /// Declares float attribute `index` over the currently bound vertex
    /// buffer: `components` floats per vertex, `stride` bytes apart,
    /// starting at `offset`. Recorded into the currently bound vertex array.
    fn vertex_attrib_f32(&self, index: u32, components: i32, stride: i32, offset: i32);

    // draws + fixed-function state

    /// One indexed triangle draw over the first `index_count` indices of the
    /// bound vertex array's index buffer (u32 indices).
    fn draw_indexed_triangles(&self, index_count: i32);

    /// One non-indexed triangle draw over the bound vertex array.
    fn draw_triangles(&self, first: i32, vertex_count: i32);

    /// Standard src-alpha / one-minus-src-alpha blending on or off.
    fn set_alpha_blend(&self, enabled: bool);

    fn set_depth_test(&self, enabled: bool);

    fn set_face_culling(&self, enabled: bool);

    fn clear_color_buffer(&self, color: ColorRgba);

    fn clear_depth_buffer(&self);
}
