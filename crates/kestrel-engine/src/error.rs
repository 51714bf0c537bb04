//! Error taxonomy for the rendering core.
//!
//! Asset and compile/link failures are terminal for the resource that
//! produced them: construction returns `Err` and no partially-initialized
//! GPU state is left behind. Usage errors cover ordering violations
//! (drawing before upload, uploading twice). Degradable problems, such as a
//! uniform name that does not resolve, are logged and ignored instead of
//! surfaced here.

use std::path::PathBuf;

use thiserror::Error;

use crate::device::StageKind;
use crate::resources::MeshFormat;

/// Failure while reading or decoding an asset file.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path:?}: {reason}")]
    ImageDecode { path: PathBuf, reason: String },

    /// Only 3-channel (RGB) and 4-channel (RGBA) images map to a GPU pixel
    /// format.
    #[error("unsupported channel count {channels} in image {path:?}")]
    UnsupportedChannelCount { path: PathBuf, channels: u8 },

    #[error("malformed OBJ data at {path:?}:{line}: {reason}")]
    ObjParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("unsupported mesh format {0:?}")]
    UnsupportedFormat(MeshFormat),
}

/// Top-level error for GPU resource construction and draw orchestration.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("{stage} stage failed to compile: {log}")]
    Compile { stage: StageKind, log: String },

    #[error("program failed to link: {log}")]
    Link { log: String },

    /// The GPU backend itself refused an allocation.
    #[error("device error: {0}")]
    Device(String),

    /// Caller violated an ordering precondition (upload-before-draw,
    /// one-shot upload).
    #[error("usage error: {0}")]
    Usage(String),
}
