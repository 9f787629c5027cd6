//! Asset Loading Tests
//!
//! Tests for:
//! - Transparent placeholder and its data URI
//! - Data URI parsing errors
//! - Texture URL substitution for model loading
//! - Loading from disk with placeholder fallback

use std::path::PathBuf;

use afterimage::assets::{
    ImageData, TRANSPARENT_PIXEL_DATA_URI, is_image_url, load_texture_or_placeholder, substitute_texture_url,
};
use afterimage::errors::AfterimageError;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("afterimage-{}-{name}", std::process::id()))
}

// ============================================================================
// Placeholder
// ============================================================================

#[test]
fn placeholder_data_uri_decodes_to_transparent_pixel() {
    let image = ImageData::from_data_uri(TRANSPARENT_PIXEL_DATA_URI).unwrap();
    assert_eq!((image.width, image.height), (1, 1));
    assert!(image.is_transparent());
}

#[test]
fn placeholder_matches_data_uri() {
    let decoded = ImageData::from_data_uri(TRANSPARENT_PIXEL_DATA_URI).unwrap();
    let placeholder = ImageData::transparent_placeholder();
    assert_eq!(decoded.width, placeholder.width);
    assert_eq!(decoded.pixels[3], placeholder.pixels[3]);
}

// ============================================================================
// Data URIs
// ============================================================================

#[test]
fn data_uri_without_scheme_is_rejected() {
    let result = ImageData::from_data_uri("image/png;base64,AAAA");
    assert!(matches!(result, Err(AfterimageError::DataUriError(_))));
}

#[test]
fn data_uri_without_base64_is_rejected() {
    let result = ImageData::from_data_uri("data:image/png,AAAA");
    assert!(matches!(result, Err(AfterimageError::DataUriError(_))));
}

#[test]
fn data_uri_with_bad_payload_is_rejected() {
    let result = ImageData::from_data_uri("data:image/png;base64,!!!");
    assert!(matches!(result, Err(AfterimageError::Base64Error(_))));
}

#[test]
fn data_uri_with_non_image_payload_is_rejected() {
    // "hello" in base64
    let result = ImageData::from_data_uri("data:image/png;base64,aGVsbG8=");
    assert!(matches!(result, Err(AfterimageError::ImageDecodeError(_))));
}

// ============================================================================
// URL Substitution
// ============================================================================

#[test]
fn image_urls_are_detected_by_extension() {
    assert!(is_image_url("textures/skin.png"));
    assert!(is_image_url("textures/SKIN.JPG"));
    assert!(is_image_url("https://cdn.example.com/a.jpeg?v=3"));
    assert!(!is_image_url("models/dancer.fbx"));
    assert!(!is_image_url("music/1.mp3"));
}

#[test]
fn texture_urls_are_substituted() {
    assert_eq!(substitute_texture_url("skin_diffuse.png"), TRANSPARENT_PIXEL_DATA_URI);
    assert_eq!(substitute_texture_url("models/dancer.fbx"), "models/dancer.fbx");
}

// ============================================================================
// Loading From Disk
// ============================================================================

#[test]
fn load_existing_texture() -> anyhow::Result<()> {
    let path = temp_path("red.png");
    image::RgbaImage::from_pixel(2, 3, image::Rgba([255, 0, 0, 255])).save(&path)?;

    let image = load_texture_or_placeholder(&path);
    assert_eq!((image.width, image.height), (2, 3));
    assert_eq!(&image.pixels[..4], &[255, 0, 0, 255]);
    assert!(!image.is_transparent());

    std::fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn missing_texture_reports_not_found() {
    let result = ImageData::open(temp_path("nope.png"));
    assert!(matches!(result, Err(AfterimageError::AssetNotFound(_))));
}

#[test]
fn missing_texture_falls_back_to_placeholder() {
    let image = load_texture_or_placeholder(temp_path("also-missing.png"));
    assert_eq!(image, ImageData::transparent_placeholder());
}

#[test]
fn corrupt_texture_falls_back_to_placeholder() -> anyhow::Result<()> {
    let path = temp_path("corrupt.png");
    std::fs::write(&path, b"definitely not a png")?;

    let image = load_texture_or_placeholder(&path);
    assert!(image.is_transparent());

    std::fs::remove_file(&path)?;
    Ok(())
}
