//! Byte/bit conversion for the embedding channel.
//!
//! Bits travel most-significant-bit first, one `u8` per bit (`0` or `1`).

/// Expands bytes into a bit vector, MSB first within each byte.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }
    bits
}

/// Reassembles bits into bytes, MSB first.
///
/// A trailing group of fewer than eight bits is discarded, so over-reading
/// the channel by a few bits never corrupts the byte stream.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | (bit & 1)))
        .collect()
}
