//! Recipe photo handling
//!
//! Recipes carry their photo as an encoded byte payload (PNG, JPEG, ...).
//! This module turns that payload back into pixels for display. A payload
//! that does not decode is not an error: callers get a neutral placeholder.
use image::{imageops::FilterType, DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::Path;

use crate::error::Result;

/// Default edge length of card thumbnails (square)
pub const THUMBNAIL_SIZE: u32 = 256;

/// Edge length of the placeholder image
const PLACEHOLDER_SIZE: u32 = 256;

/// Light gray used for the placeholder, matches an empty photo slot
const PLACEHOLDER_COLOR: [u8; 3] = [229, 229, 229];

/// Decode a photo payload, falling back to the placeholder if it is
/// empty or corrupt.
pub fn decode_or_placeholder(bytes: &[u8]) -> DynamicImage {
    try_decode(bytes).unwrap_or_else(placeholder)
}

/// Decode a photo payload, `None` if it is not a readable image
pub fn try_decode(bytes: &[u8]) -> Option<DynamicImage> {
    if bytes.is_empty() {
        return None;
    }

    match image::load_from_memory(bytes) {
        Ok(img) => Some(img),
        Err(e) => {
            tracing::debug!("Photo payload did not decode ({} bytes): {}", bytes.len(), e);
            None
        }
    }
}

/// The image shown when a recipe photo is missing or unreadable
pub fn placeholder() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(
        PLACEHOLDER_SIZE,
        PLACEHOLDER_SIZE,
        Rgb(PLACEHOLDER_COLOR),
    ))
}

/// Resize a photo payload to fit in a `size` x `size` box.
/// Aspect ratio is preserved; undecodable payloads give a resized placeholder.
pub fn thumbnail(bytes: &[u8], size: u32) -> DynamicImage {
    decode_or_placeholder(bytes).resize(size, size, FilterType::Lanczos3)
}

/// Encode an image as PNG bytes
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Solid-color PNG payload, used for the bundled seed recipes
pub fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Result<Vec<u8>> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)));
    encode_png(&img)
}

/// Read a photo from disk as a raw payload.
///
/// The bytes are checked to be a decodable image so the authoring flow
/// can reject a bad file up front instead of storing a placeholder.
pub fn read_photo(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path)?;
    image::load_from_memory(&bytes)?;
    Ok(bytes)
}
