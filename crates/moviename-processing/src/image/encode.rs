use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

/// Encode an RGB pixel buffer as a baseline JPEG.
///
/// `quality` is clamped to 1..=100.
pub fn encode_jpeg(pixels: &RgbImage, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100));
    encoder.encode_image(pixels)?;
    Ok(out)
}
