//! Signal-processing primitives for the feature pipeline
//!
//! Frame-level transforms over mono PCM. All analysis uses the same frame
//! geometry (2048-sample Hann window, 512-sample hop, centered frames) so
//! the five sub-features of the pipeline line up on the same time axis.

pub mod chroma;
pub mod mel;
pub mod mfcc;
pub mod stft;
pub mod temporal;

/// Analysis window size in samples
pub const N_FFT: usize = 2048;

/// Hop between analysis frames in samples
pub const HOP_LENGTH: usize = 512;

/// Per-column mean across frames: `frames` is time-major (one inner vec per
/// frame), the result has `width` entries.
pub fn column_means(frames: &[Vec<f32>], width: usize) -> Vec<f32> {
    if frames.is_empty() {
        return vec![0.0; width];
    }
    let mut means = vec![0.0f64; width];
    for frame in frames {
        for (acc, &v) in means.iter_mut().zip(frame.iter()) {
            *acc += v as f64;
        }
    }
    let n = frames.len() as f64;
    means.iter().map(|&s| (s / n) as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_means() {
        let frames = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert_eq!(column_means(&frames, 2), vec![2.0, 3.0]);
    }

    #[test]
    fn test_column_means_empty() {
        assert_eq!(column_means(&[], 3), vec![0.0, 0.0, 0.0]);
    }
}
