//! Sprite instances and their placement.

use std::rc::Rc;

use glam::{Mat4, Vec3};

use crate::coords::Transform2D;

use super::texture::Texture2D;

/// Identifies a sprite registered with the batch renderer.
///
/// Ids are indices into an append-only list, so they stay valid for the
/// renderer's whole lifetime and double as layer order (higher id paints
/// later, on top).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SpriteId(pub(crate) usize);

/// One textured quad in the 2-D layer stack.
///
/// The texture is shared (`Rc`), so it cannot dangle while any sprite still
/// references it. A sprite with no texture, or with `visible == false`, is
/// skipped at draw time and costs nothing.
#[derive(Clone)]
pub struct Sprite {
    pub texture: Option<Rc<Texture2D>>,
    pub transform: Transform2D,
    pub visible: bool,
}

impl Sprite {
    pub fn new(texture: Rc<Texture2D>) -> Self {
        Self {
            texture: Some(texture),
            transform: Transform2D::default(),
            visible: true,
        }
    }

    pub fn with_transform(mut self, transform: Transform2D) -> Self {
        self.transform = transform;
        self
    }
}

/// Model matrix for a sprite quad.
///
/// The chain is T(position) * T(+half) * Rz * T(-half) * S(scale), read
/// right to left against the unit quad: scale first, then rotate about the
/// scaled quad's center (the two half-extent translations move the pivot),
/// then place. Rotating before re-centering would swing the sprite around
/// its top-left corner instead.
pub(crate) fn model_matrix(transform: &Transform2D) -> Mat4 {
    let half = 0.5 * transform.scale;
    Mat4::from_translation(Vec3::new(transform.position.x, transform.position.y, 0.0))
        * Mat4::from_translation(Vec3::new(half.x, half.y, 0.0))
        * Mat4::from_rotation_z(transform.rotation_degrees.to_radians())
        * Mat4::from_translation(Vec3::new(-half.x, -half.y, 0.0))
        * Mat4::from_scale(Vec3::new(transform.scale.x, transform.scale.y, 1.0))
}
