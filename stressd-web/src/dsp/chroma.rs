//! Chroma projection
//!
//! Folds the magnitude spectrum onto the 12 semitone pitch classes
//! (A440 reference tuning). Each FFT bin contributes its energy to the
//! pitch class of its nearest equal-tempered semitone; frames are then
//! max-normalized. This is a coarse projection without per-octave
//! weighting, which is sufficient for summary statistics.

/// Number of pitch classes
pub const N_CHROMA: usize = 12;

/// Precomputed bin → pitch-class assignment
pub struct ChromaFilterbank {
    /// Pitch class per FFT bin; `None` for bins below the audible mapping (DC)
    bin_classes: Vec<Option<usize>>,
}

impl ChromaFilterbank {
    pub fn new(sample_rate: u32, n_fft: usize) -> Self {
        let n_freqs = n_fft / 2 + 1;
        let bin_classes = (0..n_freqs)
            .map(|k| {
                if k == 0 {
                    return None;
                }
                let freq = k as f32 * sample_rate as f32 / n_fft as f32;
                let midi = 69.0 + 12.0 * (freq / 440.0).log2();
                let class = (midi.round() as i64).rem_euclid(12) as usize;
                Some(class)
            })
            .collect();
        Self { bin_classes }
    }

    /// Project magnitude frames onto pitch classes, max-normalized per frame.
    ///
    /// Time-major in, time-major out; each output frame has `N_CHROMA`
    /// entries in `[0, 1]`.
    pub fn apply(&self, mag_frames: &[Vec<f32>]) -> Vec<Vec<f32>> {
        mag_frames
            .iter()
            .map(|frame| {
                let mut classes = vec![0.0f32; N_CHROMA];
                for (&mag, class) in frame.iter().zip(self.bin_classes.iter()) {
                    if let Some(c) = class {
                        classes[*c] += mag;
                    }
                }
                let peak = classes.iter().cloned().fold(0.0f32, f32::max);
                if peak > 0.0 {
                    for v in &mut classes {
                        *v /= peak;
                    }
                }
                classes
            })
            .collect()
    }
}
