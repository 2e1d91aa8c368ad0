//! Message encoding pipeline.
//!
//! This module orchestrates the encode path:
//! 1. Encrypt the message with the recipient's RSA public key (OAEP)
//! 2. Render the ciphertext as a QR barcode (hex payload)
//! 3. Pack the barcode into a compressed 1-bpp blob
//! 4. Embed the blob's bits into the carrier's wavelet detail coefficients
//!
//! Every arrow is a gate: a failure at any stage aborts the whole call and
//! nothing is written.

use rsa::RsaPublicKey;
use thiserror::Error;

use crate::bitmap::{self, BitImage, PackError};
use crate::crypto::asymmetric::{self, AsymmetricError};
use crate::qr::{generate_qr, QrConfig, QrError};
use crate::stego::audio::AudioSignal;
use crate::stego::bits;
use crate::stego::channel::{self, EmbedError};

/// Errors that can occur during encoding.
#[derive(Error, Debug)]
pub enum EncoderError {
    #[error("Encryption error: {0}")]
    AsymmetricError(#[from] AsymmetricError),

    #[error("Barcode error: {0}")]
    QrError(#[from] QrError),

    #[error("Packing error: {0}")]
    PackError(#[from] PackError),

    #[error("Embedding error: {0}")]
    EmbedError(#[from] EmbedError),
}

/// Result of encoding a message into a carrier.
#[derive(Debug)]
pub struct EncodedAudio {
    /// The stego signal, ready to be written as a WAV file.
    pub stego: AudioSignal,
    /// The barcode that was embedded (for inspection or saving).
    pub barcode: BitImage,
    /// Ciphertext size in bytes (256 for RSA-2048).
    pub ciphertext_len: usize,
    /// Compressed blob size in bytes.
    pub blob_len: usize,
    /// Number of detail coefficients that were modified.
    pub bits_embedded: usize,
}

/// Configuration for the encoder.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Whether to output verbose information.
    pub verbose: bool,
    /// Barcode rendering options.
    pub qr: QrConfig,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            qr: QrConfig::default(),
        }
    }
}

/// Encodes a message into a carrier signal.
///
/// # Arguments
/// * `message` - The secret message (UTF-8, at most 190 bytes for RSA-2048)
/// * `public_key` - Recipient's public key
/// * `carrier` - The audio that will hide the payload
///
/// # Returns
/// An [`EncodedAudio`] holding the stego signal and the embedded barcode.
pub fn encode(
    message: &str,
    public_key: &RsaPublicKey,
    carrier: &AudioSignal,
) -> Result<EncodedAudio, EncoderError> {
    encode_with_config(message, public_key, carrier, &EncoderConfig::default())
}

/// Encodes a message with custom configuration.
pub fn encode_with_config(
    message: &str,
    public_key: &RsaPublicKey,
    carrier: &AudioSignal,
    config: &EncoderConfig,
) -> Result<EncodedAudio, EncoderError> {
    // Step 1: Encrypt
    let ciphertext = asymmetric::encrypt(public_key, message)?;

    if config.verbose {
        eprintln!("Encrypted message to {} bytes", ciphertext.len());
    }

    // Step 2: Fixed ciphertext width gate
    let expected = asymmetric::ciphertext_len(public_key);
    if ciphertext.len() != expected {
        return Err(AsymmetricError::InvalidCiphertextLength {
            got: ciphertext.len(),
            expected,
        }
        .into());
    }

    // Step 3: Barcode
    let rendered = generate_qr(&ciphertext, &config.qr)?;
    let barcode = BitImage::from_luma(&rendered);

    if config.verbose {
        eprintln!("Rendered {}x{} barcode", barcode.width(), barcode.height());
    }

    // Step 4: Pack into a compressed blob and spread into bits
    let blob = bitmap::pack(&barcode)?;
    let payload_bits = bits::bytes_to_bits(&blob);

    if config.verbose {
        eprintln!(
            "Packed barcode into {} bytes, {} bits to embed",
            blob.len(),
            payload_bits.len()
        );
    }

    // Step 5: Embed
    let stego = channel::embed(carrier, &payload_bits)?;

    if config.verbose {
        eprintln!(
            "Embedded {} bits into {} available coefficients",
            payload_bits.len(),
            channel::capacity_bits(carrier)
        );
    }

    Ok(EncodedAudio {
        stego,
        barcode,
        ciphertext_len: ciphertext.len(),
        blob_len: blob.len(),
        bits_embedded: payload_bits.len(),
    })
}
