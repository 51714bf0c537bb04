//! Mesh assets and the formats they are decoded from.
//!
//! Responsibilities:
//! - hold decoded geometry in CPU memory ([`MeshAsset`])
//! - dispatch file loading over a closed format set ([`load_mesh`])
//! - decode Wavefront OBJ text (the only implemented format)

mod mesh;
mod obj;

pub use mesh::MeshAsset;

use std::path::Path;

use crate::error::AssetError;

/// Closed set of mesh container formats the loader understands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// Wavefront OBJ text format.
    Obj,
    /// Reserved; requesting it yields [`AssetError::UnsupportedFormat`].
    Gltf,
}

/// Loads a mesh from `path`, decoding it as `format`.
///
/// Requesting a format without a decoder is an error, never a fault; the
/// caller decides whether to continue without the mesh.
pub fn load_mesh(path: &Path, format: MeshFormat) -> Result<MeshAsset, AssetError> {
    match format {
        MeshFormat::Obj => {
            obj::load_obj(path).inspect_err(|err| log::error!("mesh load failed: {err}"))
        }
        MeshFormat::Gltf => {
            log::warn!("mesh format {format:?} has no decoder; refusing {path:?}");
            Err(AssetError::UnsupportedFormat(format))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn unsupported_format_is_an_error_not_a_fault() {
        let result = load_mesh(Path::new("panel.gltf"), MeshFormat::Gltf);
        assert!(matches!(
            result,
            Err(AssetError::UnsupportedFormat(MeshFormat::Gltf))
        ));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let result = load_mesh(Path::new("no/such/mesh.obj"), MeshFormat::Obj);
        assert!(matches!(result, Err(AssetError::Io { .. })));
    }

    #[test]
    fn obj_file_round_trips_through_the_loader() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tri.obj");
        let mut file = std::fs::File::create(&path).expect("create");
        write!(
            file,
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n"
        )
        .expect("write");

        let mesh = load_mesh(&path, MeshFormat::Obj).expect("load");
        assert_eq!(mesh.position_count(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }
}
