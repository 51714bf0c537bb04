//! GPU resource types and draw-call orchestrators.
//!
//! Responsibilities:
//! - own GPU object lifetimes (programs, textures, buffer pairs) and
//!   release each exactly once on drop
//! - enforce the call-ordering protocol (compile before link, upload before
//!   draw, bind before use)
//! - keep fixed-function state asserted per pass: depth on for the 3-D
//!   mesh path, blend on / depth off for the 2-D sprite path

mod mesh_renderer;
mod shader;
mod sprite;
mod sprite_renderer;
mod texture;

pub mod shaders;

pub use mesh_renderer::StaticMeshRenderer;
pub use shader::ShaderProgram;
pub use sprite::{Sprite, SpriteId};
pub use sprite_renderer::SpriteBatchRenderer;
pub use texture::{Texture2D, TextureOptions};
