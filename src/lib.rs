//! # Undertone - hide RSA-encrypted messages inside WAV audio
//!
//! Undertone embeds short messages in audio carriers using wavelet-domain
//! LSB steganography, with the payload armored as a QR barcode.
//!
//! ## Pipeline
//!
//! Encoding runs four stages, each gated on the previous one:
//! 1. **Encrypt**: RSA-2048 OAEP (SHA-256) turns the message into a
//!    256-byte ciphertext
//! 2. **Barcode**: the ciphertext is hex-encoded and rendered as a QR
//!    symbol with high error correction
//! 3. **Pack**: the 1-bpp barcode raster is serialized with a dimension
//!    header and zlib-compressed
//! 4. **Embed**: the blob's bits replace the least significant bits of the
//!    carrier's 1-level Haar detail coefficients (quantized at 1/1000)
//!
//! Decoding is the exact inverse. The bitstream carries no length framing:
//! the extractor over-reads and the blob/barcode stages discard trailing
//! garbage, so a non-stego carrier surfaces as an unpack or barcode error
//! rather than a dedicated detection failure.
//!
//! ## Example Usage
//!
//! ```rust
//! use undertone::crypto::KeyPair;
//! use undertone::stego::AudioSignal;
//! use undertone::{decode, encode};
//!
//! let recipient_keys = KeyPair::generate().unwrap();
//!
//! // Any audio works as a carrier; silence is the degenerate case.
//! let carrier = AudioSignal::silence(5.0, 44100);
//!
//! let encoded = encode("Hi", recipient_keys.public_key(), &carrier).unwrap();
//!
//! // encoded.stego is the WAV-ready artifact to transmit.
//! let decoded = decode(&encoded.stego, recipient_keys.private_key()).unwrap();
//! assert_eq!(decoded.message, "Hi");
//! ```
//!
//! ## Modules
//!
//! - [`crypto`]: RSA key management and OAEP encryption
//! - [`qr`]: barcode generation and scanning
//! - [`bitmap`]: 1-bpp bitmap packing and compression
//! - [`stego`]: audio I/O and the wavelet bit channel
//! - [`encoder`] / [`decoder`]: the two pipeline orchestrators

pub mod bitmap;
pub mod crypto;
pub mod decoder;
pub mod encoder;
pub mod qr;
pub mod stego;

// Re-export commonly used types at the crate root
pub use bitmap::{pack, unpack, BitImage, PackError};
pub use crypto::{KeyError, KeyPair};
pub use decoder::{decode, decode_with_config, DecodedMessage, DecoderConfig, DecoderError};
pub use encoder::{encode, encode_with_config, EncodedAudio, EncoderConfig, EncoderError};
pub use qr::{generate_qr, read_qr, QrConfig, QrError};
pub use stego::{capacity_bits, AudioError, AudioSignal, EmbedError};
