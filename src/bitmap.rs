//! 1-bit barcode bitmaps and their compressed wire form.
//!
//! A [`BitImage`] is a row-major grid of black/white pixels. [`pack`]
//! serializes it as a 4-byte big-endian dimension header followed by the
//! pixels packed eight per byte, MSB first and continuous across row
//! boundaries, then compresses the whole buffer with zlib. [`unpack`]
//! reverses the process and validates the result against the header.

use flate2::read::{ZlibDecoder, ZlibEncoder};
use flate2::Compression;
use image::{GrayImage, Luma};
use std::io::Read;
use thiserror::Error;

/// Errors that can occur while packing or unpacking bitmaps.
#[derive(Error, Debug)]
pub enum PackError {
    #[error("Image dimensions {width}x{height} exceed the 16-bit header limit")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("Compression failed: {0}")]
    CompressionFailed(String),

    #[error("Corrupt bitmap blob: {0}")]
    CorruptBlob(String),
}

/// A black-and-white image, one byte per pixel holding `0` or `1`.
///
/// `1` is white, `0` is black. Pixels are stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct BitImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl BitImage {
    /// Creates an image from raw pixel values.
    ///
    /// `pixels.len()` must equal `width * height`; every value must be
    /// `0` or `1`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Thresholds an 8-bit grayscale image into black and white.
    ///
    /// Values of 128 and above become white.
    pub fn from_luma(image: &GrayImage) -> Self {
        let pixels = image.pixels().map(|p| u8::from(p.0[0] >= 128)).collect();
        Self {
            width: image.width(),
            height: image.height(),
            pixels,
        }
    }

    /// Renders the image back to 8-bit grayscale, white as 255.
    pub fn to_luma(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            let idx = y as usize * self.width as usize + x as usize;
            Luma([self.pixels[idx] * 255])
        })
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the raw pixel values, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl std::fmt::Debug for BitImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Serializes and compresses a bitmap.
///
/// The uncompressed layout is `width: u16 BE`, `height: u16 BE`, then
/// `ceil(width * height / 8)` bytes of packed pixels. The final byte is
/// zero-padded in its low bits when the pixel count is not a multiple of
/// eight.
pub fn pack(image: &BitImage) -> Result<Vec<u8>, PackError> {
    let width = u16::try_from(image.width()).map_err(|_| PackError::DimensionsTooLarge {
        width: image.width(),
        height: image.height(),
    })?;
    let height = u16::try_from(image.height()).map_err(|_| PackError::DimensionsTooLarge {
        width: image.width(),
        height: image.height(),
    })?;

    let pixels = image.pixels();
    let mut raw = Vec::with_capacity(4 + pixels.len().div_ceil(8));
    raw.extend_from_slice(&width.to_be_bytes());
    raw.extend_from_slice(&height.to_be_bytes());

    for chunk in pixels.chunks(8) {
        let mut byte = 0u8;
        for (offset, &pixel) in chunk.iter().enumerate() {
            byte |= (pixel & 1) << (7 - offset);
        }
        raw.push(byte);
    }

    let mut encoder = ZlibEncoder::new(&raw[..], Compression::default());
    let mut compressed = Vec::new();
    encoder
        .read_to_end(&mut compressed)
        .map_err(|e| PackError::CompressionFailed(e.to_string()))?;

    Ok(compressed)
}

/// Decompresses and deserializes a bitmap produced by [`pack`].
///
/// Bytes after the end of the zlib stream are ignored, so a blob recovered
/// from an over-read bit channel unpacks cleanly. The decompressed length
/// must match the header dimensions exactly.
pub fn unpack(blob: &[u8]) -> Result<BitImage, PackError> {
    let mut decoder = ZlibDecoder::new(blob);
    let mut raw = Vec::new();
    decoder
        .read_to_end(&mut raw)
        .map_err(|e| PackError::CorruptBlob(format!("decompression failed: {e}")))?;

    if raw.len() < 4 {
        return Err(PackError::CorruptBlob(format!(
            "decompressed to {} bytes, header needs 4",
            raw.len()
        )));
    }

    let width = u32::from(u16::from_be_bytes([raw[0], raw[1]]));
    let height = u32::from(u16::from_be_bytes([raw[2], raw[3]]));
    let pixel_count = width as usize * height as usize;

    let expected = 4 + pixel_count.div_ceil(8);
    if raw.len() != expected {
        return Err(PackError::CorruptBlob(format!(
            "{width}x{height} needs {expected} bytes, got {}",
            raw.len()
        )));
    }

    let mut pixels = Vec::with_capacity(pixel_count);
    for index in 0..pixel_count {
        let byte = raw[4 + index / 8];
        pixels.push((byte >> (7 - index % 8)) & 1);
    }

    Ok(BitImage::new(width, height, pixels))
}
