//! Message decoding pipeline.
//!
//! This module orchestrates the decode path, the exact inverse of the
//! encoder:
//! 1. Extract LSBs from the stego signal's wavelet detail coefficients
//! 2. Reassemble bytes and unpack the compressed barcode blob
//! 3. Scan the reconstructed barcode for its hex payload
//! 4. Decrypt the recovered ciphertext with the RSA private key
//!
//! Extraction itself never fails; a carrier with nothing embedded simply
//! yields noise that the unpack or barcode stage rejects.

use rsa::RsaPrivateKey;
use thiserror::Error;

use crate::bitmap::{self, BitImage, PackError};
use crate::crypto::asymmetric::{self, AsymmetricError};
use crate::qr::{read_qr, QrError};
use crate::stego::audio::AudioSignal;
use crate::stego::bits;
use crate::stego::channel;

/// Errors that can occur during decoding.
#[derive(Error, Debug)]
pub enum DecoderError {
    #[error("Unpacking error: {0}")]
    PackError(#[from] PackError),

    #[error("Barcode error: {0}")]
    QrError(#[from] QrError),

    #[error("Decryption error: {0}")]
    AsymmetricError(#[from] AsymmetricError),
}

/// Result of decoding a stego signal.
#[derive(Debug)]
pub struct DecodedMessage {
    /// The recovered plaintext.
    pub message: String,
    /// The barcode reconstructed from the extracted bits.
    pub barcode: BitImage,
}

/// Configuration for the decoder.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Whether to output verbose information.
    pub verbose: bool,
    /// Ceiling on how many bits to extract; `None` reads every coefficient.
    ///
    /// The bitstream has no length framing, so this is a caller-supplied
    /// budget. Bits beyond the true payload are garbage and get discarded
    /// by the byte reassembly and blob decompression.
    pub bit_budget: Option<usize>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            bit_budget: None,
        }
    }
}

/// Decodes a message from a stego signal.
///
/// # Arguments
/// * `stego` - The audio carrying an embedded payload
/// * `private_key` - Recipient's private key
///
/// # Returns
/// A [`DecodedMessage`] with the plaintext and the reconstructed barcode.
pub fn decode(
    stego: &AudioSignal,
    private_key: &RsaPrivateKey,
) -> Result<DecodedMessage, DecoderError> {
    decode_with_config(stego, private_key, &DecoderConfig::default())
}

/// Decodes a message with custom configuration.
pub fn decode_with_config(
    stego: &AudioSignal,
    private_key: &RsaPrivateKey,
    config: &DecoderConfig,
) -> Result<DecodedMessage, DecoderError> {
    // Step 1: Extract bits
    let extracted = channel::extract(stego, config.bit_budget);

    if config.verbose {
        eprintln!("Extracted {} bits from carrier", extracted.len());
    }

    // Step 2: Reassemble bytes and unpack
    let blob = bits::bits_to_bytes(&extracted);
    let barcode = bitmap::unpack(&blob)?;

    if config.verbose {
        eprintln!(
            "Unpacked {}x{} barcode from {} bytes",
            barcode.width(),
            barcode.height(),
            blob.len()
        );
    }

    // Step 3: Scan the barcode
    let ciphertext = read_qr(&barcode.to_luma())?;

    if config.verbose {
        eprintln!("Barcode decoded to {} ciphertext bytes", ciphertext.len());
    }

    // Step 4: Decrypt
    let message = asymmetric::decrypt(private_key, &ciphertext)?;

    Ok(DecodedMessage { message, barcode })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;
    use crate::encoder::encode;

    fn sine_carrier(frames: usize) -> AudioSignal {
        let samples: Vec<f64> = (0..frames)
            .map(|i| f64::sin(2.0 * std::f64::consts::PI * 440.0 * i as f64 / 44100.0) * 0.5)
            .collect();
        AudioSignal::new(samples, 1, 44100)
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let keypair = KeyPair::generate().unwrap();
        let carrier = sine_carrier(220500);

        let encoded = encode("wavelets carry secrets", keypair.public_key(), &carrier).unwrap();
        let decoded = decode(&encoded.stego, keypair.private_key()).unwrap();

        assert_eq!(decoded.message, "wavelets carry secrets");
        assert_eq!(decoded.barcode.width(), encoded.barcode.width());
    }

    #[test]
    fn test_decode_with_tight_bit_budget() {
        let keypair = KeyPair::generate().unwrap();
        let carrier = sine_carrier(220500);

        let encoded = encode("Hi", keypair.public_key(), &carrier).unwrap();

        // A budget that just covers the payload still decodes.
        let config = DecoderConfig {
            bit_budget: Some(encoded.bits_embedded),
            ..Default::default()
        };
        let decoded = decode_with_config(&encoded.stego, keypair.private_key(), &config).unwrap();

        assert_eq!(decoded.message, "Hi");
    }

    #[test]
    fn test_wrong_key_fails() {
        let keypair = KeyPair::generate().unwrap();
        let other = KeyPair::generate().unwrap();
        let carrier = sine_carrier(220500);

        let encoded = encode("Hi", keypair.public_key(), &carrier).unwrap();
        let result = decode(&encoded.stego, other.private_key());

        assert!(matches!(
            result,
            Err(DecoderError::AsymmetricError(
                AsymmetricError::DecryptionFailed(_)
            ))
        ));
    }

    #[test]
    fn test_non_stego_carrier_fails_downstream() {
        let keypair = KeyPair::generate().unwrap();
        let carrier = sine_carrier(220500);

        // Nothing embedded: the noise bits fail at unpack or barcode stage.
        let result = decode(&carrier, keypair.private_key());
        assert!(result.is_err());
    }
}
