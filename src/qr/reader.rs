//! QR code reading and payload decoding.

use image::GrayImage;
use rqrr::PreparedImage;
use std::path::Path;

use super::{decode_hex, QrError};

/// Scans an image for a QR symbol and returns the decoded binary payload.
///
/// Every detected grid is tried in order; the first one that decodes wins.
/// Fails with [`QrError::SymbolNotFound`] when no grid decodes, and with
/// [`QrError::MalformedPayload`] when a symbol decodes to text that is not
/// valid hexadecimal.
pub fn read_qr(image: &GrayImage) -> Result<Vec<u8>, QrError> {
    let mut prepared = PreparedImage::prepare(image.clone());
    let grids = prepared.detect_grids();

    for grid in &grids {
        if let Ok((_, content)) = grid.decode() {
            return decode_hex(&content);
        }
    }

    Err(QrError::SymbolNotFound)
}

/// Reads a QR code from an image file.
pub fn read_qr_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, QrError> {
    let image = image::open(path).map_err(|e| QrError::ImageLoadError(e.to_string()))?;

    read_qr(&image.to_luma8())
}
