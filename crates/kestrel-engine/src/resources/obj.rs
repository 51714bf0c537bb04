//! Wavefront OBJ decoding.

use std::path::Path;
use std::str::SplitWhitespace;

use glam::{Vec2, Vec3};

use super::MeshAsset;
use crate::error::AssetError;

pub(crate) fn load_obj(path: &Path) -> Result<MeshAsset, AssetError> {
    let source = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_obj(&source, path)
}

/// Decodes OBJ text line by line.
///
/// Recognized directives: `v` (position), `vt` (texture coordinate), `vn`
/// (normal), `f` (triangle face). Any other leading token is skipped, which
/// keeps unsupported directives (`o`, `s`, `mtllib`, comments) harmless.
///
/// Faces are consumed as triangles: only the first three vertex records of
/// an `f` line are read, so polygon faces are truncated, not
/// fan-triangulated. UV and normal sub-indices are validated and then
/// discarded; the index list references the position array alone.
pub(crate) fn parse_obj(source: &str, path: &Path) -> Result<MeshAsset, AssetError> {
    let mut mesh = MeshAsset::default();

    for (number, line) in source.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let parsed = match tokens.next() {
            Some("v") => parse_vec3(&mut tokens).map(|v| mesh.positions.push(v)),
            Some("vt") => parse_vec2(&mut tokens).map(|v| mesh.texcoords.push(v)),
            Some("vn") => parse_vec3(&mut tokens).map(|v| mesh.normals.push(v)),
            Some("f") => parse_face(&mut tokens, mesh.positions.len(), &mut mesh.indices),
            _ => Ok(()),
        };
        if let Err(reason) = parsed {
            return Err(AssetError::ObjParse {
                path: path.to_path_buf(),
                line: number + 1,
                reason,
            });
        }
    }

    Ok(mesh)
}

fn parse_vec3(tokens: &mut SplitWhitespace) -> Result<Vec3, String> {
    let x = parse_component(tokens)?;
    let y = parse_component(tokens)?;
    let z = parse_component(tokens)?;
    Ok(Vec3::new(x, y, z))
}

fn parse_vec2(tokens: &mut SplitWhitespace) -> Result<Vec2, String> {
    let x = parse_component(tokens)?;
    let y = parse_component(tokens)?;
    Ok(Vec2::new(x, y))
}

fn parse_component(tokens: &mut SplitWhitespace) -> Result<f32, String> {
    let token = tokens.next().ok_or_else(|| "missing component".to_owned())?;
    token
        .parse::<f32>()
        .map_err(|_| format!("invalid float `{token}`"))
}

/// Reads the first three `a/b/c` vertex records of a face line.
///
/// One-based source indices become zero-based. An empty sub-index slot is
/// unset and defaults to 0; an index that is present must be a positive
/// integer referencing an already-declared position.
fn parse_face(
    tokens: &mut SplitWhitespace,
    position_count: usize,
    indices: &mut Vec<u32>,
) -> Result<(), String> {
    for slot in 0..3 {
        let Some(record) = tokens.next() else {
            return Err(format!("face has {slot} vertex records, need 3"));
        };
        let parts: Vec<&str> = record.split('/').collect();
        if parts.len() > 3 {
            return Err(format!(
                "vertex record `{record}` has more than 3 sub-indices"
            ));
        }
        let position = parse_face_index(parts[0])?;
        // UV and normal sub-indices must parse but are not preserved.
        for sub in &parts[1..] {
            parse_face_index(sub)?;
        }
        if position as usize >= position_count {
            return Err(format!(
                "position index {} out of range ({position_count} positions defined)",
                position + 1
            ));
        }
        indices.push(position);
    }
    // Records past the third are truncated by design, not triangulated.
    Ok(())
}

fn parse_face_index(token: &str) -> Result<u32, String> {
    if token.is_empty() {
        return Ok(0);
    }
    let one_based: u32 = token
        .parse()
        .map_err(|_| format!("invalid index `{token}`"))?;
    one_based
        .checked_sub(1)
        .ok_or_else(|| format!("index `{token}` is not one-based"))
}
