//! Short-time Fourier transform
//!
//! Hann-windowed, reflect-padded STFT over mono PCM using rustfft. Frames
//! are centered: the signal is padded by `n_fft / 2` on each side so frame
//! `t` is centered on sample `t * hop_length`.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

/// Short-time Fourier transform with a precomputed plan and window
pub struct Stft {
    n_fft: usize,
    hop_length: usize,
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
}

impl Stft {
    pub fn new(n_fft: usize, hop_length: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(n_fft);
        Self {
            n_fft,
            hop_length,
            window: hann_window(n_fft),
            fft,
        }
    }

    /// Number of frequency bins per frame (`n_fft / 2 + 1`)
    pub fn n_freqs(&self) -> usize {
        self.n_fft / 2 + 1
    }

    /// Magnitude spectrogram, time-major: one `n_freqs()`-element vec per frame
    pub fn magnitude(&self, samples: &[f32]) -> Vec<Vec<f32>> {
        let padded = reflect_pad(samples, self.n_fft / 2);
        if padded.len() < self.n_fft {
            return Vec::new();
        }

        let n_frames = (padded.len() - self.n_fft) / self.hop_length + 1;
        let n_freqs = self.n_freqs();
        let mut frames = Vec::with_capacity(n_frames);
        let mut buffer = vec![Complex::new(0.0f32, 0.0f32); self.n_fft];

        for t in 0..n_frames {
            let start = t * self.hop_length;
            for (j, slot) in buffer.iter_mut().enumerate() {
                *slot = Complex::new(padded[start + j] * self.window[j], 0.0);
            }
            self.fft.process(&mut buffer);

            // Positive frequencies only
            let frame: Vec<f32> = buffer.iter().take(n_freqs).map(|c| c.norm()).collect();
            frames.push(frame);
        }

        frames
    }
}

/// Hann window of the given length
pub fn hann_window(length: usize) -> Vec<f32> {
    (0..length)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / length as f32).cos()))
        .collect()
}

/// Pad a signal by `pad` samples of reflection on each side.
///
/// Reflection bounces off the boundaries without repeating the edge sample;
/// signals shorter than the pad length fall back to clamping at the edges.
fn reflect_pad(samples: &[f32], pad: usize) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }
    let len = samples.len() as isize;
    let mut padded = Vec::with_capacity(samples.len() + 2 * pad);
    for i in -(pad as isize)..(len + pad as isize) {
        padded.push(samples[reflect_index(i, len)]);
    }
    padded
}

fn reflect_index(i: isize, len: isize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let mut j = i.rem_euclid(period);
    if j >= len {
        j = period - j;
    }
    j as usize
}
