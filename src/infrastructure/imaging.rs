//! JPEG encoding of incoming photos

use crate::error::Result;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

/// Fixed lossy quality for stored photos (0.8 on a 0..1 scale)
pub const JPEG_QUALITY: u8 = 80;

/// Decode any supported image buffer and re-encode it as JPEG at [`JPEG_QUALITY`].
///
/// JPEG has no alpha channel, so transparent input is flattened to RGB.
pub fn encode_jpeg(raw: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(raw)?;
    let rgb = decoded.to_rgb8();

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY).encode_image(&rgb)?;
    Ok(out)
}

/// Decode a stored payload back into an image
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}
