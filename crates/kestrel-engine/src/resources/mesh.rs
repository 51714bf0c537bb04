use glam::{Vec2, Vec3};

/// Geometry decoded from a mesh file, ready for GPU upload.
///
/// `indices` reference `positions` only and are zero-based (the source
/// format's one-based indices are converted at decode time). Texture
/// coordinates and normals are kept as decoded, but the current vertex
/// layout uploads positions alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshAsset {
    pub positions: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshAsset {
    #[inline]
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// A mesh with no positions or no triangles cannot be drawn.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }

    /// Unit cube centered on the origin, positions and triangle indices
    /// only. Handy for scenes without an asset directory.
    pub fn cube() -> Self {
        let positions = vec![
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(0.5, 0.5, -0.5),
            Vec3::new(-0.5, 0.5, -0.5),
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(-0.5, 0.5, 0.5),
        ];

        let indices = vec![
            // back
            0, 2, 1, 0, 3, 2, // front
            4, 5, 6, 4, 6, 7, // left
            0, 4, 7, 0, 7, 3, // right
            1, 6, 5, 1, 2, 6, // bottom
            0, 1, 5, 0, 5, 4, // top
            3, 6, 2, 3, 7, 6,
        ];

        Self {
            positions,
            texcoords: Vec::new(),
            normals: Vec::new(),
            indices,
        }
    }
}
