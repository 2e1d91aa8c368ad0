//! QR code generation from ciphertext bytes.
//!
//! The payload is hex-encoded, the smallest QR version that holds it at
//! the configured error-correction level is chosen automatically, and the
//! symbol is rendered black-on-white as an 8-bit grayscale raster.

use image::{GrayImage, Luma};
use qrcode::types::QrError as QrCodeError;
use qrcode::{EcLevel, QrCode};
use std::path::Path;
use thiserror::Error;

use super::encode_hex;

/// Errors that can occur during QR code operations.
#[derive(Error, Debug)]
pub enum QrError {
    #[error("Data too large for a QR symbol: {chars} payload characters")]
    DataOverflow { chars: usize },

    #[error("QR code generation failed: {0}")]
    QrGenerationError(String),

    #[error("Image save error: {0}")]
    ImageSaveError(String),

    #[error("Image load error: {0}")]
    ImageLoadError(String),

    #[error("No QR code found in image")]
    SymbolNotFound,

    #[error("QR payload is not valid hexadecimal: {0}")]
    MalformedPayload(String),
}

/// Configuration for QR code generation.
#[derive(Debug, Clone)]
pub struct QrConfig {
    /// Error correction level (default: High)
    pub ec_level: EcLevel,
    /// Module size in pixels (default: 8)
    pub module_size: u32,
    /// Whether to draw the 4-module quiet zone (default: true)
    pub quiet_zone: bool,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::H,
            module_size: 8,
            quiet_zone: true,
        }
    }
}

/// Generates a QR code image from binary data.
///
/// The data is hex-encoded first, so a 256-byte ciphertext becomes a
/// 512-character payload. Fails with [`QrError::DataOverflow`] when the
/// payload exceeds what any QR version can hold at the configured
/// error-correction level.
pub fn generate_qr(data: &[u8], config: &QrConfig) -> Result<GrayImage, QrError> {
    let payload = encode_hex(data);

    let qr = QrCode::with_error_correction_level(payload.as_bytes(), config.ec_level)
        .map_err(|e| match e {
            QrCodeError::DataTooLong => QrError::DataOverflow {
                chars: payload.len(),
            },
            other => QrError::QrGenerationError(other.to_string()),
        })?;

    let image = qr
        .render::<Luma<u8>>()
        .quiet_zone(config.quiet_zone)
        .module_dimensions(config.module_size, config.module_size)
        .build();

    Ok(image)
}

/// Generates a QR code and saves it as an image file.
///
/// The format is inferred from the path extension, so callers typically
/// pass a `.png` path.
pub fn generate_qr_to_file<P: AsRef<Path>>(
    data: &[u8],
    path: P,
    config: &QrConfig,
) -> Result<(), QrError> {
    let image = generate_qr(data, config)?;
    image
        .save(path)
        .map_err(|e| QrError::ImageSaveError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_qr_small() {
        let image = generate_qr(b"Hi", &QrConfig::default()).unwrap();

        assert!(image.width() > 0);
        assert_eq!(image.width(), image.height());
    }

    #[test]
    fn test_generate_qr_ciphertext_sized() {
        // A 256-byte payload hex-encodes to 512 characters.
        let data: Vec<u8> = (0..256).map(|i| (i * 31) as u8).collect();
        let image = generate_qr(&data, &QrConfig::default()).unwrap();

        // Square, and byte-aligned rows at the default 8px module size.
        assert_eq!(image.width(), image.height());
        assert_eq!(image.width() % 8, 0);
    }

    #[test]
    fn test_pixels_are_black_or_white() {
        let image = generate_qr(b"contrast", &QrConfig::default()).unwrap();
        assert!(image.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn test_quiet_zone_is_white() {
        let image = generate_qr(b"border", &QrConfig::default()).unwrap();

        for x in 0..image.width() {
            assert_eq!(image.get_pixel(x, 0).0[0], 255);
            assert_eq!(image.get_pixel(x, image.height() - 1).0[0], 255);
        }
    }

    #[test]
    fn test_module_size_scales_output() {
        let small = generate_qr(
            b"scale",
            &QrConfig {
                module_size: 4,
                ..Default::default()
            },
        )
        .unwrap();
        let large = generate_qr(
            b"scale",
            &QrConfig {
                module_size: 8,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(large.width(), small.width() * 2);
    }

    #[test]
    fn test_data_overflow() {
        // 1300 bytes hex-encode to 2600 characters, beyond any QR version.
        let data = vec![0u8; 1300];
        let result = generate_qr(&data, &QrConfig::default());

        assert!(matches!(result, Err(QrError::DataOverflow { chars: 2600 })));
    }
}
