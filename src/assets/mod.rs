//! Asset helpers
//!
//! Texture loading that never fails: anything that cannot be read or decoded
//! is replaced by a 1x1 transparent image.

pub mod texture;

pub use texture::{
    ImageData, TRANSPARENT_PIXEL_DATA_URI, is_image_url, load_texture_or_placeholder, substitute_texture_url,
};
