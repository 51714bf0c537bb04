use glam::Vec2;

/// Per-sprite 2-D placement: position, scale and rotation in degrees.
///
/// `position` is the top-left corner of the scaled quad in logical pixels.
/// `rotation_degrees` spins the quad about its own geometric center; the
/// sprite renderer owns the matrix chain that makes that true.
///
/// Callers mutate these fields freely between frames (a frame loop driving
/// them from pitch/roll input, a debug overlay editing them in place).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2D {
    pub position: Vec2,
    pub scale: Vec2,
    pub rotation_degrees: f32,
}

impl Transform2D {
    #[inline]
    pub const fn new(position: Vec2, scale: Vec2, rotation_degrees: f32) -> Self {
        Self {
            position,
            scale,
            rotation_degrees,
        }
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation_degrees: 0.0,
        }
    }
}
