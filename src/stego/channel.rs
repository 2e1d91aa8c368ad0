//! LSB embedding in wavelet detail coefficients.
//!
//! The carrier is collapsed to mono and run through a single-level Haar
//! decomposition. Each detail coefficient is scaled by 1000, rounded to the
//! nearest integer, and has its least significant bit overwritten with one
//! payload bit. Reconstruction from the modified coefficients yields the
//! stego signal; the same decomposition recovers the bits because the
//! quantized values sit more than half a step away from any neighbour.

use thiserror::Error;

use super::audio::AudioSignal;
use super::wavelet;

/// Fixed-point scale applied to detail coefficients before rounding.
pub const SCALE_FACTOR: f64 = 1000.0;

/// Errors that can occur while embedding payload bits.
#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("Carrier too short: need {needed} detail coefficients, have {available}")]
    CapacityExceeded { needed: usize, available: usize },
}

/// Returns how many payload bits a carrier can hold.
///
/// One bit per detail coefficient: `(frames + 1) / 2` after the mono
/// collapse.
pub fn capacity_bits(carrier: &AudioSignal) -> usize {
    carrier.frame_count().div_ceil(2)
}

/// Embeds `bits` into the carrier, returning a new mono stego signal.
///
/// The capacity check runs before any coefficient is touched, so a failed
/// call leaves nothing partially written. Every value in `bits` must be
/// `0` or `1`. The stego signal always has an even frame count; an
/// odd-length carrier comes back one frame longer, because truncating the
/// reconstruction would zero the final detail coefficient on the next
/// decomposition.
pub fn embed(carrier: &AudioSignal, bits: &[u8]) -> Result<AudioSignal, EmbedError> {
    let mono = carrier.to_mono();
    let (approx, mut detail) = wavelet::decompose(&mono);

    if bits.len() > detail.len() {
        return Err(EmbedError::CapacityExceeded {
            needed: bits.len(),
            available: detail.len(),
        });
    }

    for (coeff, &bit) in detail.iter_mut().zip(bits) {
        let quantized = (*coeff * SCALE_FACTOR).round() as i64;
        let stamped = (quantized & !1) | i64::from(bit & 1);
        *coeff = stamped as f64 / SCALE_FACTOR;
    }

    let samples = wavelet::reconstruct(&approx, &detail);

    Ok(AudioSignal::new(samples, 1, carrier.sample_rate()))
}

/// Reads LSBs back out of the detail coefficients.
///
/// `max_bits` caps how many coefficients are visited; `None` reads them
/// all. Extraction cannot fail: a signal that carries nothing still yields
/// bits, they just decode to noise downstream.
pub fn extract(stego: &AudioSignal, max_bits: Option<usize>) -> Vec<u8> {
    let mono = stego.to_mono();
    let (_, detail) = wavelet::decompose(&mono);

    let budget = max_bits.unwrap_or(detail.len()).min(detail.len());

    detail[..budget]
        .iter()
        .map(|&coeff| ((coeff * SCALE_FACTOR).round() as i64 & 1) as u8)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_carrier(frames: usize) -> AudioSignal {
        let samples: Vec<f64> = (0..frames)
            .map(|i| f64::sin(2.0 * std::f64::consts::PI * 440.0 * i as f64 / 44100.0) * 0.5)
            .collect();
        AudioSignal::new(samples, 1, 44100)
    }

    fn pattern_bits(count: usize) -> Vec<u8> {
        (0..count).map(|i| ((i * 7 + i / 3) % 2) as u8).collect()
    }

    #[test]
    fn test_embed_extract_roundtrip() {
        let carrier = sine_carrier(10000);
        let bits = pattern_bits(4000);

        let stego = embed(&carrier, &bits).unwrap();
        let recovered = extract(&stego, Some(bits.len()));

        assert_eq!(recovered, bits);
    }

    #[test]
    fn test_roundtrip_through_16_bit_wav() {
        let carrier = sine_carrier(10000);
        let bits = pattern_bits(4000);

        let stego = embed(&carrier, &bits).unwrap();
        let wav = stego.to_wav_bytes().unwrap();
        let reloaded = AudioSignal::from_bytes(&wav).unwrap();
        let recovered = extract(&reloaded, Some(bits.len()));

        assert_eq!(recovered, bits);
    }

    #[test]
    fn test_capacity_matches_detail_count() {
        assert_eq!(capacity_bits(&sine_carrier(220500)), 110250);
        assert_eq!(capacity_bits(&sine_carrier(7)), 4);
        assert_eq!(capacity_bits(&AudioSignal::new(vec![], 1, 44100)), 0);
    }

    #[test]
    fn test_odd_carrier_roundtrip_at_full_capacity() {
        // The last bit lands in the detail coefficient the repeat-extension
        // created; it only survives if the extra reconstructed frame is kept.
        let carrier = sine_carrier(9);
        let bits = vec![1u8, 0, 1, 0, 1];
        assert_eq!(capacity_bits(&carrier), bits.len());

        let stego = embed(&carrier, &bits).unwrap();
        assert_eq!(stego.frame_count(), 10);
        assert_eq!(extract(&stego, Some(bits.len())), bits);
    }

    #[test]
    fn test_capacity_exceeded_before_any_write() {
        let carrier = sine_carrier(10);
        let bits = vec![1u8; 6];

        let result = embed(&carrier, &bits);
        assert!(matches!(
            result,
            Err(EmbedError::CapacityExceeded {
                needed: 6,
                available: 5,
            })
        ));
    }

    #[test]
    fn test_embed_is_idempotent_per_coefficient() {
        let carrier = sine_carrier(2000);
        let bits = pattern_bits(900);

        let once = embed(&carrier, &bits).unwrap();
        let twice = embed(&once, &bits).unwrap();

        for (a, b) in once.samples().iter().zip(twice.samples()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_extract_never_fails_on_clean_carrier() {
        let carrier = sine_carrier(64);
        let bits = extract(&carrier, None);
        assert_eq!(bits.len(), 32);
        assert!(bits.iter().all(|&b| b <= 1));
    }

    #[test]
    fn test_extract_budget_is_clamped() {
        let carrier = sine_carrier(100);
        let bits = extract(&carrier, Some(1_000_000));
        assert_eq!(bits.len(), 50);
    }

    #[test]
    fn test_stereo_carrier_collapses_before_embedding() {
        let samples: Vec<f64> = (0..5000)
            .map(|i| f64::sin(i as f64 * 0.013) * 0.4)
            .collect();
        let carrier = AudioSignal::new(samples, 2, 44100);
        let bits = pattern_bits(1000);

        let stego = embed(&carrier, &bits).unwrap();
        assert_eq!(stego.channels(), 1);
        assert_eq!(stego.frame_count(), 2500);
        assert_eq!(extract(&stego, Some(bits.len())), bits);
    }

    #[test]
    fn test_negative_coefficients_carry_bits() {
        // Rising sample pairs make every detail coefficient negative.
        let samples: Vec<f64> = (0..2000)
            .map(|i| if i % 2 == 0 { -0.5 } else { 0.5 })
            .collect();
        let carrier = AudioSignal::new(samples, 1, 44100);
        let bits = pattern_bits(800);

        let stego = embed(&carrier, &bits).unwrap();
        assert_eq!(extract(&stego, Some(bits.len())), bits);
    }
}
