//! Single-level Haar wavelet transform.
//!
//! Splits a signal into half-length approximation (low-pass) and detail
//! (high-pass) coefficient vectors using the orthonormal Haar filter pair,
//! and reconstructs the signal exactly from the two vectors.

use std::f64::consts::FRAC_1_SQRT_2;

/// Decomposes a signal into `(approximation, detail)` coefficients.
///
/// Each input pair `(x[2k], x[2k+1])` produces one coefficient in each
/// output: `approx[k] = (x[2k] + x[2k+1]) / sqrt(2)` and
/// `detail[k] = (x[2k] - x[2k+1]) / sqrt(2)`.
///
/// Odd-length signals are extended by repeating the final sample, so both
/// outputs always have `(len + 1) / 2` entries. [`reconstruct`] then yields
/// the extended even length, one sample longer than the odd original.
pub fn decompose(signal: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let half = signal.len().div_ceil(2);
    let mut approx = Vec::with_capacity(half);
    let mut detail = Vec::with_capacity(half);

    for pair in signal.chunks(2) {
        let first = pair[0];
        let second = if pair.len() == 2 { pair[1] } else { pair[0] };
        approx.push((first + second) * FRAC_1_SQRT_2);
        detail.push((first - second) * FRAC_1_SQRT_2);
    }

    (approx, detail)
}

/// Inverse of [`decompose`]: rebuilds the signal from coefficient pairs.
///
/// Always returns `2 * approx.len()` samples, one more than an odd-length
/// original. Both slices must have equal length.
pub fn reconstruct(approx: &[f64], detail: &[f64]) -> Vec<f64> {
    debug_assert_eq!(approx.len(), detail.len());

    let mut signal = Vec::with_capacity(approx.len() * 2);
    for (a, d) in approx.iter().zip(detail) {
        signal.push((a + d) * FRAC_1_SQRT_2);
        signal.push((a - d) * FRAC_1_SQRT_2);
    }
    signal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decompose_known_values() {
        let (approx, detail) = decompose(&[1.0, 2.0, 3.0, 4.0]);

        assert_eq!(approx.len(), 2);
        assert_eq!(detail.len(), 2);
        assert!((approx[0] - 3.0 * FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((approx[1] - 7.0 * FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((detail[0] + FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((detail[1] + FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn perfect_reconstruction_even_length() {
        let signal: Vec<f64> = (0..1024)
            .map(|i| (i as f64 * 0.071).sin() * 0.8)
            .collect();

        let (approx, detail) = decompose(&signal);
        let rebuilt = reconstruct(&approx, &detail);

        assert_eq!(rebuilt.len(), signal.len());
        for (orig, new) in signal.iter().zip(&rebuilt) {
            assert!((orig - new).abs() < 1e-12);
        }
    }

    #[test]
    fn odd_length_extends_last_sample() {
        let signal = [1.0, 2.0, 3.0];
        let (approx, detail) = decompose(&signal);

        assert_eq!(approx.len(), 2);
        // The extended pair (3, 3) has zero detail.
        assert!((detail[1]).abs() < 1e-12);

        let mut rebuilt = reconstruct(&approx, &detail);
        assert_eq!(rebuilt.len(), 4);
        rebuilt.truncate(signal.len());
        for (orig, new) in signal.iter().zip(&rebuilt) {
            assert!((orig - new).abs() < 1e-12);
        }
    }

    #[test]
    fn coefficient_counts() {
        assert_eq!(decompose(&[]).1.len(), 0);
        assert_eq!(decompose(&[0.5]).1.len(), 1);
        assert_eq!(decompose(&vec![0.0; 220500]).1.len(), 110250);
    }

    #[test]
    fn modified_detail_survives_reconstruction() {
        let signal: Vec<f64> = (0..256).map(|i| (i as f64 * 0.3).cos()).collect();
        let (approx, mut detail) = decompose(&signal);
        detail[7] = 0.123;

        let rebuilt = reconstruct(&approx, &detail);
        let (_, detail_again) = decompose(&rebuilt);

        assert!((detail_again[7] - 0.123).abs() < 1e-12);
    }
}
