//! GPU texture creation from image files and raw pixels.

use std::path::Path;
use std::rc::Rc;

use crate::device::{GraphicsApi, PixelFormat, TextureDesc, TextureHandle, WrapMode};
use crate::error::{AssetError, RenderError};

/// Load-time texture policy.
///
/// `flip_vertical` defaults to true: image files store rows top-down while
/// GL samples with a bottom-left origin, so flipping on upload keeps UV
/// (0, 0) at the conventional top-left of the picture. Mixing flipped and
/// unflipped textures in one renderer silently inverts UVs, so pick one
/// policy per scene.
///
/// `wrap` is fixed for the texture's lifetime; choose [`WrapMode::Repeat`]
/// for tiling backgrounds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TextureOptions {
    pub flip_vertical: bool,
    pub wrap: WrapMode,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            flip_vertical: true,
            wrap: WrapMode::ClampToEdge,
        }
    }
}

/// A GPU-resident 2-D texture with linear min/mag filtering.
///
/// The decoded pixel buffer is transient: it is dropped as soon as the GPU
/// copy exists. Width, height and channel count stay queryable. The GPU
/// handle is released exactly once when the value drops.
pub struct Texture2D {
    api: Rc<dyn GraphicsApi>,
    handle: TextureHandle,
    width: u32,
    height: u32,
    channels: u8,
}

impl std::fmt::Debug for Texture2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture2D")
            .field("handle", &self.handle)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .finish_non_exhaustive()
    }
}

impl Texture2D {
    /// Decodes `path` and uploads it with the default [`TextureOptions`].
    pub fn load(api: &Rc<dyn GraphicsApi>, path: &Path) -> Result<Self, RenderError> {
        Self::load_with(api, path, TextureOptions::default())
    }

    /// Decodes `path` and uploads it.
    ///
    /// The decoded channel count picks the pixel format: 3 channels map to
    /// RGB, 4 to RGBA, anything else is a decode error. On any failure the
    /// GPU is left untouched.
    pub fn load_with(
        api: &Rc<dyn GraphicsApi>,
        path: &Path,
        options: TextureOptions,
    ) -> Result<Self, RenderError> {
        let decoded = image::open(path).map_err(|err| {
            log::error!("failed to decode image {path:?}: {err}");
            AssetError::ImageDecode {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        })?;
        let channels = decoded.color().channel_count();
        let decoded = if options.flip_vertical {
            decoded.flipv()
        } else {
            decoded
        };

        match channels {
            3 => {
                let buffer = decoded.into_rgb8();
                let (width, height) = buffer.dimensions();
                Self::from_pixels(
                    api,
                    width,
                    height,
                    PixelFormat::Rgb8,
                    &buffer.into_raw(),
                    options.wrap,
                )
            }
            4 => {
                let buffer = decoded.into_rgba8();
                let (width, height) = buffer.dimensions();
                Self::from_pixels(
                    api,
                    width,
                    height,
                    PixelFormat::Rgba8,
                    &buffer.into_raw(),
                    options.wrap,
                )
            }
            other => {
                log::error!("image {path:?} has {other} channels; only RGB and RGBA upload");
                Err(AssetError::UnsupportedChannelCount {
                    path: path.to_path_buf(),
                    channels: other,
                }
                .into())
            }
        }
    }

    /// Uploads raw tightly-packed pixels (for procedural textures).
    pub fn from_pixels(
        api: &Rc<dyn GraphicsApi>,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: &[u8],
        wrap: WrapMode,
    ) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize * format.channels() as usize;
        if pixels.len() != expected {
            return Err(RenderError::Usage(format!(
                "texture pixel buffer is {} bytes, a {width}x{height} {format:?} image needs {expected}",
                pixels.len()
            )));
        }
        let handle = api.create_texture(
            &TextureDesc {
                width,
                height,
                format,
                wrap,
            },
            pixels,
        )?;
        Ok(Self {
            api: Rc::clone(api),
            handle,
            width,
            height,
            channels: format.channels(),
        })
    }

    /// Activates texture unit `unit` and binds this texture to it.
    pub fn bind(&self, unit: u32) {
        self.api.bind_texture(unit, Some(self.handle));
    }

    /// Rebinds `unit` to no texture.
    pub fn unbind(&self, unit: u32) {
        self.api.bind_texture(unit, None);
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        self.api.delete_texture(self.handle);
    }
}
