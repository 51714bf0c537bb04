//! GPU entry points.
//!
//! This module is responsible for:
//! - the narrow [`GraphicsApi`] facade the renderers program against
//! - the production OpenGL backend ([`GlowDevice`])
//!
//! The graphics context itself (window, surface, swap timing) belongs to
//! the embedding layer; the backend only wraps the entry points that layer
//! resolves. Binding state (current program, texture units, buffer targets)
//! is context-global, so callers serialize all calls on the context thread
//! and rebind what they need before each use.

mod api;
mod gpu;

#[cfg(test)]
pub(crate) mod recording;

pub use api::{
    BufferHandle, BufferKind, GraphicsApi, PixelFormat, ProgramHandle, StageHandle, StageKind,
    TextureDesc, TextureHandle, UniformLocation, VertexArrayHandle, WrapMode,
};
pub use gpu::GlowDevice;
