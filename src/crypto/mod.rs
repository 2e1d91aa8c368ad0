//! Cryptographic operations.
//!
//! This module provides:
//! - RSA-2048 key generation and PEM persistence
//! - OAEP (SHA-256) encryption and decryption of short messages

pub mod asymmetric;
pub mod keys;

pub use asymmetric::{
    ciphertext_len, decrypt, encrypt, max_payload_bytes, AsymmetricError, KEY_BITS,
};
pub use keys::{
    decode_private_key_pem, decode_public_key_pem, encode_private_key_pem, encode_public_key_pem,
    load_private_key, load_public_key, KeyError, KeyPair,
};
