//! Steganography module: hiding bitstreams in audio carriers.
//!
//! The pipeline is wavelet-domain LSB: decompose the carrier, stamp payload
//! bits into the detail coefficients, reconstruct.

pub mod audio;
pub mod bits;
pub mod channel;
pub mod wavelet;

pub use audio::{AudioError, AudioSignal};
pub use channel::{capacity_bits, embed, extract, EmbedError, SCALE_FACTOR};
