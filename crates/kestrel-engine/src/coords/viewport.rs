use glam::Mat4;

/// Viewport size in logical pixels.
///
/// The sprite renderer treats this as the coordinate basis for its
/// orthographic projection: x in [0, width] left to right, y in [0, height]
/// top to bottom.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Top-left-origin orthographic projection over this viewport.
    ///
    /// (0, 0) maps to clip (-1, 1) and (width, height) to clip (1, -1), so
    /// +Y down in logical pixels stays +Y down on screen.
    #[inline]
    pub fn projection(self) -> Mat4 {
        Mat4::orthographic_rh_gl(0.0, self.width, self.height, 0.0, -1.0, 1.0)
    }
}
