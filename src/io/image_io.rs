//! # Image Loading and Saving
//!
//! The codec works on in-memory RGB buffers only. This module is the bridge
//! to files and encoded image bytes:
//!
//! - any format the `image` crate can read is accepted as a carrier and
//!   converted to RGB8 (alpha is dropped)
//! - encoded images are always written as PNG, since lossy formats would
//!   destroy the hidden bits

use anyhow::{Context, Result};
use image::{ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::codec;
use crate::common::config::OutputConfig;

/// Open an image file and convert it to RGB8.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbImage> {
    let path = path.as_ref();
    let img = image::open(path)
        .with_context(|| format!("failed to load image {}", path.display()))?;
    Ok(img.to_rgb8())
}

/// Decode image bytes (any supported format) and convert to RGB8.
pub fn load_rgb_from_memory(image_bytes: &[u8]) -> Result<RgbImage> {
    let img = image::load_from_memory(image_bytes)?;
    Ok(img.to_rgb8())
}

/// Write `image` as PNG, whatever extension `path` has.
///
/// Missing parent directories are created first.
pub fn save_png(image: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to save image {}", path.display()))?;
    Ok(())
}

/// Encode `image` to PNG bytes.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut output_bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)?;
    Ok(output_bytes)
}

/// Build the default output path for an encoded image.
///
/// `photos/cat.jpg` with suffix `_stego` becomes `photos/cat_stego.png`, or
/// `<directory>/cat_stego.png` when an output directory is configured.
pub fn default_output_path(input: &Path, output: &OutputConfig) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let file_name = format!("{}{}.png", stem, output.suffix);

    match &output.directory {
        Some(directory) => directory.join(file_name),
        None => input
            .parent()
            .map(|parent| parent.join(&file_name))
            .unwrap_or_else(|| PathBuf::from(&file_name)),
    }
}

/// Embed text into encoded image bytes, returning PNG bytes.
///
/// # Arguments
/// - `image_bytes`: Raw bytes of the input image (any format supported by `image` crate)
/// - `text`: UTF-8 text to embed into the image
/// - `password`: Optional password selecting the pixel order
///
/// # Errors
/// - Image format is invalid
/// - Image is too small to hold the text ([`codec::StegoError::Capacity`])
/// - Encoding to PNG fails
///
/// # Example
/// ```ignore
/// let image_data = std::fs::read("input.jpg")?;
/// let stego = embed_text_bytes(&image_data, "Secret message", Some("pw"))?;
/// std::fs::write("output.png", stego)?;
/// ```
pub fn embed_text_bytes(image_bytes: &[u8], text: &str, password: Option<&str>) -> Result<Vec<u8>> {
    let mut img = load_rgb_from_memory(image_bytes)?;
    codec::encode_in_place(&mut img, text.as_bytes(), password)?;
    encode_png(&img)
}

/// Extract text hidden in encoded image bytes.
///
/// # Returns
/// - `Ok(Some(text))`: a hidden message was found
/// - `Ok(None)`: the image carries no message for this password
/// - `Err`: the bytes are not a readable image
pub fn extract_text_bytes(image_bytes: &[u8], password: Option<&str>) -> Result<Option<String>> {
    let img = load_rgb_from_memory(image_bytes)?;
    Ok(codec::decode(&img, password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbaImage};

    fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 128]));
        encode_png(&img).unwrap()
    }

    #[test]
    fn test_default_output_path_next_to_input() {
        let path = default_output_path(Path::new("photos/cat.jpg"), &OutputConfig::default());
        assert_eq!(path, PathBuf::from("photos/cat_stego.png"));
    }

    #[test]
    fn test_default_output_path_in_configured_directory() {
        let output = OutputConfig {
            suffix: "_x".to_string(),
            directory: Some(PathBuf::from("out")),
        };
        let path = default_output_path(Path::new("photos/cat.jpeg"), &output);
        assert_eq!(path, PathBuf::from("out/cat_x.png"));
    }

    #[test]
    fn test_bytes_round_trip() {
        let stego = embed_text_bytes(&sample_png(40, 40), "username:alice,views:5", Some("pw")).unwrap();
        assert_eq!(
            extract_text_bytes(&stego, Some("pw")).unwrap(),
            Some("username:alice,views:5".to_string())
        );
    }

    #[test]
    fn test_alpha_is_dropped() {
        let rgba = RgbaImage::from_pixel(12, 12, image::Rgba([10, 20, 30, 0]));
        let mut bytes = Vec::new();
        rgba.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let rgb = load_rgb_from_memory(&bytes).unwrap();
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_too_small_image_is_error() {
        let err = embed_text_bytes(&sample_png(2, 2), "hello", None).unwrap_err();
        assert!(err.downcast_ref::<codec::StegoError>().is_some());
    }

    #[test]
    fn test_save_png_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user-data").join("outputs").join("saved.png");

        let img = RgbImage::from_pixel(3, 3, Rgb([1, 2, 3]));
        save_png(&img, &path).unwrap();

        assert_eq!(load_rgb(&path).unwrap(), img);
    }

    #[test]
    fn test_garbage_bytes_are_error() {
        assert!(extract_text_bytes(b"not an image", None).is_err());
    }
}
