//! Mel-frequency cepstral coefficients
//!
//! dB-scaled mel power frames passed through an orthonormal DCT-II, keeping
//! the first `n_mfcc` coefficients per frame.

use std::f32::consts::PI;

/// Number of cepstral coefficients kept by the feature pipeline
pub const N_MFCC: usize = 20;

const AMIN: f32 = 1e-10;
const TOP_DB: f32 = 80.0;

/// Compute MFCC frames from mel power frames (time-major in, time-major out)
pub fn mfcc(mel_power_frames: &[Vec<f32>], n_mfcc: usize) -> Vec<Vec<f32>> {
    let db_frames = power_to_db(mel_power_frames);
    db_frames
        .iter()
        .map(|frame| dct_ii_ortho(frame, n_mfcc))
        .collect()
}

/// Convert power values to decibels, clamped to `TOP_DB` below the peak
fn power_to_db(frames: &[Vec<f32>]) -> Vec<Vec<f32>> {
    let mut db: Vec<Vec<f32>> = frames
        .iter()
        .map(|frame| frame.iter().map(|&p| 10.0 * p.max(AMIN).log10()).collect())
        .collect();

    let peak = db
        .iter()
        .flatten()
        .cloned()
        .fold(f32::NEG_INFINITY, f32::max);
    if peak.is_finite() {
        let floor = peak - TOP_DB;
        for frame in &mut db {
            for v in frame.iter_mut() {
                *v = v.max(floor);
            }
        }
    }
    db
}

/// Orthonormal DCT-II, truncated to the first `n_out` coefficients
fn dct_ii_ortho(input: &[f32], n_out: usize) -> Vec<f32> {
    let n = input.len();
    if n == 0 {
        return vec![0.0; n_out];
    }
    let scale0 = (1.0 / n as f32).sqrt();
    let scale = (2.0 / n as f32).sqrt();

    (0..n_out)
        .map(|k| {
            let sum: f32 = input
                .iter()
                .enumerate()
                .map(|(i, &x)| x * (PI * k as f32 * (2 * i + 1) as f32 / (2 * n) as f32).cos())
                .sum();
            sum * if k == 0 { scale0 } else { scale }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dct_constant_input() {
        // A constant signal has all of its energy in coefficient 0
        let out = dct_ii_ortho(&[1.0; 8], 4);
        assert!((out[0] - (8.0f32).sqrt()).abs() < 1e-5);
        for &c in &out[1..] {
            assert!(c.abs() < 1e-5);
        }
    }

    #[test]
    fn test_dct_output_length() {
        let out = dct_ii_ortho(&[0.5; 128], 20);
        assert_eq!(out.len(), 20);
    }

    #[test]
    fn test_power_to_db_clamps_range() {
        let frames = vec![vec![1.0, 1e-20]];
        let db = power_to_db(&frames);
        assert!((db[0][0] - 0.0).abs() < 1e-5);
        // Tiny power is clamped to TOP_DB below the peak
        assert!((db[0][1] - (-80.0)).abs() < 1e-4);
    }

    #[test]
    fn test_mfcc_shape() {
        let frames = vec![vec![0.1f32; 128]; 5];
        let out = mfcc(&frames, N_MFCC);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0].len(), 20);
    }

    #[test]
    fn test_mfcc_deterministic() {
        let frames: Vec<Vec<f32>> = (0..4)
            .map(|t| (0..128).map(|i| ((t * 128 + i) % 17) as f32 * 0.01).collect())
            .collect();
        assert_eq!(mfcc(&frames, N_MFCC), mfcc(&frames, N_MFCC));
    }
}
