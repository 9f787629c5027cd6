use std::borrow::Cow;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::errors::{AfterimageError, Result};

/// A 1x1 fully transparent PNG.
pub const TRANSPARENT_PIXEL_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAAC0lEQVR42mNgAAIAAAUAAen63NgAAAAASUVORK5CYII=";

const IMAGE_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];

/// Decoded RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageData {
    /// 1x1 transparent image used in place of textures that fail to load.
    #[must_use]
    pub fn transparent_placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![0, 0, 0, 0],
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
        })
    }

    /// Decodes a `data:<mime>;base64,<payload>` URI.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| AfterimageError::DataUriError("missing 'data:' scheme".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| AfterimageError::DataUriError("missing ',' separator".into()))?;
        if !header.ends_with(";base64") {
            return Err(AfterimageError::DataUriError(format!("unsupported encoding in '{header}'")));
        }
        let bytes = STANDARD.decode(payload)?;
        Self::from_bytes(&bytes)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AfterimageError::AssetNotFound(path.display().to_string()));
        }
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.pixels.chunks_exact(4).all(|px| px[3] == 0)
    }
}

/// True for URLs that name an image file by extension.
#[must_use]
pub fn is_image_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    let path = lower.split(['?', '#']).next().unwrap_or_default();
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// URL modifier for model loading: texture references are replaced with the
/// transparent pixel so models whose textures are missing still load.
#[must_use]
pub fn substitute_texture_url(url: &str) -> Cow<'_, str> {
    if is_image_url(url) {
        Cow::Borrowed(TRANSPARENT_PIXEL_DATA_URI)
    } else {
        Cow::Borrowed(url)
    }
}

/// Loads a texture from disk, substituting the placeholder on any failure.
#[must_use]
pub fn load_texture_or_placeholder(path: impl AsRef<Path>) -> ImageData {
    let path = path.as_ref();
    match ImageData::open(path) {
        Ok(image) => image,
        Err(err) => {
            log::warn!("Texture '{}' unavailable ({err}), using placeholder", path.display());
            ImageData::transparent_placeholder()
        }
    }
}
