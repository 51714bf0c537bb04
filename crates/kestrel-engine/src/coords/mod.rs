//! Coordinate and color types shared by the renderers.
//!
//! Canonical CPU space for the 2-D sprite path:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! The sprite renderer converts to clip space through the orthographic
//! projection built from [`Viewport`]. Vector and matrix algebra comes from
//! `glam`.

mod color;
mod transform;
mod viewport;

pub use color::ColorRgba;
pub use transform::Transform2D;
pub use viewport::Viewport;
