//! QR code generation and reading for ciphertext payloads.
//!
//! Payloads travel as lowercase hexadecimal text rather than raw bytes, so
//! any standard QR scanner can recover them. Hex costs 2x the space of a
//! binary encoding; that trade is part of the wire format and both sides
//! of the pipeline rely on it.

mod generator;
mod reader;

pub use generator::{generate_qr, generate_qr_to_file, QrConfig, QrError};
pub use reader::{read_qr, read_qr_from_file};

/// Encodes binary data as lowercase hexadecimal payload text.
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Decodes payload text back to binary data.
///
/// Fails on odd-length input or any non-hex character.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, QrError> {
    hex::decode(text).map_err(|e| QrError::MalformedPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let data = b"Hello, barcode!";
        let encoded = encode_hex(data);
        let decoded = decode_hex(&encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_hex_is_lowercase() {
        let encoded = encode_hex(&[0xAB, 0xCD, 0xEF]);
        assert_eq!(encoded, "abcdef");
    }

    #[test]
    fn test_hex_two_chars_per_byte() {
        let data: Vec<u8> = (0..=255).collect();
        assert_eq!(encode_hex(&data).len(), 512);
    }

    #[test]
    fn test_odd_length_rejected() {
        let result = decode_hex("abc");
        assert!(matches!(result, Err(QrError::MalformedPayload(_))));
    }

    #[test]
    fn test_non_hex_rejected() {
        let result = decode_hex("zz");
        assert!(matches!(result, Err(QrError::MalformedPayload(_))));
    }
}
