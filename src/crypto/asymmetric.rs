//! Asymmetric encryption using RSA-2048 with OAEP padding.
//!
//! OAEP uses SHA-256 for both the label hash and the mask generation
//! function, which caps the plaintext at 190 bytes for a 2048-bit modulus;
//! we enforce the bound explicitly so callers get a size error instead of
//! an opaque padding failure. Ciphertexts are always exactly one modulus
//! wide (256 bytes).

use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use thiserror::Error;

/// RSA modulus size in bits.
pub const KEY_BITS: usize = 2048;

/// SHA-256 digest width, which drives the OAEP overhead.
const HASH_BYTES: usize = 32;

/// Errors that can occur during asymmetric encryption operations.
#[derive(Error, Debug)]
pub enum AsymmetricError {
    #[error("Plaintext too large for OAEP: {size} bytes, maximum is {max}")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Invalid ciphertext length: got {got} bytes, expected {expected}")]
    InvalidCiphertextLength { got: usize, expected: usize },

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),
}

/// Returns the largest plaintext, in bytes, this key can encrypt.
///
/// OAEP overhead is `2 * hash_len + 2` bytes: 190 for RSA-2048 with
/// SHA-256.
pub fn max_payload_bytes(public_key: &RsaPublicKey) -> usize {
    public_key.size() - 2 * HASH_BYTES - 2
}

/// Returns the ciphertext width for this key, in bytes.
pub fn ciphertext_len(public_key: &RsaPublicKey) -> usize {
    public_key.size()
}

/// Encrypts a UTF-8 message under the recipient's public key.
///
/// Padding is randomized, so encrypting the same message twice yields
/// unrelated ciphertexts.
pub fn encrypt(public_key: &RsaPublicKey, plaintext: &str) -> Result<Vec<u8>, AsymmetricError> {
    let data = plaintext.as_bytes();
    let max = max_payload_bytes(public_key);
    if data.len() > max {
        return Err(AsymmetricError::PayloadTooLarge {
            size: data.len(),
            max,
        });
    }

    public_key
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), data)
        .map_err(|e| AsymmetricError::EncryptionFailed(e.to_string()))
}

/// Decrypts a ciphertext and interprets the result as UTF-8.
///
/// The ciphertext must be exactly one modulus wide; anything else is
/// rejected before touching the key.
pub fn decrypt(private_key: &RsaPrivateKey, ciphertext: &[u8]) -> Result<String, AsymmetricError> {
    let expected = private_key.size();
    if ciphertext.len() != expected {
        return Err(AsymmetricError::InvalidCiphertextLength {
            got: ciphertext.len(),
            expected,
        });
    }

    let plaintext = private_key
        .decrypt(Oaep::new::<Sha256>(), ciphertext)
        .map_err(|e| AsymmetricError::DecryptionFailed(e.to_string()))?;

    String::from_utf8(plaintext)
        .map_err(|_| AsymmetricError::DecryptionFailed("plaintext is not valid UTF-8".to_string()))
}
