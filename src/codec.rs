//! Image encoding and decoding
//!
//! Thin layer over the `image` crate covering the two encodings the helpers
//! write: JPEG with an explicit quality, and PNG.

use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageError};

/// JPEG quality for images written to the private cache
pub const CACHE_JPEG_QUALITY: u8 = 100;

/// JPEG quality for [`crate::storage::save_bitmap_to_sd`]
pub const SD_JPEG_QUALITY: u8 = 80;

/// Supported output encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    Jpeg { quality: u8 },
    Png,
}

impl ImageEncoding {
    /// Picks an encoding from the filename suffix.
    ///
    /// Only the exact suffixes `.jpg`, `.JPG`, `.png` and `.PNG` are recognised.
    pub fn from_filename(filename: &str) -> Option<Self> {
        if filename.ends_with(".jpg") || filename.ends_with(".JPG") {
            Some(ImageEncoding::Jpeg {
                quality: CACHE_JPEG_QUALITY,
            })
        } else if filename.ends_with(".png") || filename.ends_with(".PNG") {
            Some(ImageEncoding::Png)
        } else {
            None
        }
    }

    /// Encode `image` into `writer`.
    pub fn encode<W: Write>(&self, image: &DynamicImage, writer: W) -> Result<(), ImageError> {
        match *self {
            ImageEncoding::Jpeg { quality } => {
                // JPEG carries no alpha channel
                let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
                rgb.write_with_encoder(JpegEncoder::new_with_quality(writer, quality.min(100)))
            }
            ImageEncoding::Png => match image {
                DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
                    DynamicImage::ImageRgba16(image.to_rgba16())
                        .write_with_encoder(PngEncoder::new(writer))
                }
                _ => image.write_with_encoder(PngEncoder::new(writer)),
            },
        }
    }
}

/// Decode an in-memory buffer in any format the `image` crate recognises.
pub fn decode(data: &[u8]) -> Result<DynamicImage, ImageError> {
    image::load_from_memory(data)
}
