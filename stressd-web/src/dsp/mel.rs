//! Mel filterbank
//!
//! Triangular filterbank on the Slaney mel scale (linear below 1000 Hz,
//! logarithmic above) with Slaney area-normalization, applied to power
//! spectrogram frames.

/// Number of mel bands used by the feature pipeline
pub const N_MELS: usize = 128;

/// Precomputed triangular mel filterbank
pub struct MelFilterbank {
    filters: Vec<Vec<f32>>,
    n_mels: usize,
}

impl MelFilterbank {
    /// Build a filterbank spanning 0 Hz to Nyquist for the given rate
    pub fn new(sample_rate: u32, n_fft: usize, n_mels: usize) -> Self {
        let fmax = sample_rate as f32 / 2.0;
        Self {
            filters: create_mel_filters(sample_rate, n_fft, n_mels, 0.0, fmax),
            n_mels,
        }
    }

    pub fn n_mels(&self) -> usize {
        self.n_mels
    }

    /// Project power spectrogram frames onto the mel bands.
    ///
    /// Input and output are time-major; each output frame has `n_mels`
    /// entries.
    pub fn apply(&self, power_frames: &[Vec<f32>]) -> Vec<Vec<f32>> {
        power_frames
            .iter()
            .map(|frame| {
                self.filters
                    .iter()
                    .map(|filter| filter.iter().zip(frame.iter()).map(|(f, p)| f * p).sum())
                    .collect()
            })
            .collect()
    }
}

/// Convert frequency in Hz to mel scale (Slaney / O'Shaughnessy)
fn hz_to_mel(f: f32) -> f32 {
    const F_SP: f32 = 200.0 / 3.0;
    const MIN_LOG_HZ: f32 = 1000.0;
    const MIN_LOG_MEL: f32 = MIN_LOG_HZ / F_SP;
    const LOGSTEP: f32 = 0.068_751_74; // ln(6.4) / 27

    if f < MIN_LOG_HZ {
        f / F_SP
    } else {
        MIN_LOG_MEL + (f / MIN_LOG_HZ).ln() / LOGSTEP
    }
}

/// Convert mel value to Hz (Slaney / O'Shaughnessy)
fn mel_to_hz(m: f32) -> f32 {
    const F_SP: f32 = 200.0 / 3.0;
    const MIN_LOG_HZ: f32 = 1000.0;
    const MIN_LOG_MEL: f32 = MIN_LOG_HZ / F_SP;
    const LOGSTEP: f32 = 0.068_751_74; // ln(6.4) / 27

    if m < MIN_LOG_MEL {
        m * F_SP
    } else {
        MIN_LOG_HZ * ((m - MIN_LOG_MEL) * LOGSTEP).exp()
    }
}

fn create_mel_filters(
    sample_rate: u32,
    n_fft: usize,
    n_mels: usize,
    fmin: f32,
    fmax: f32,
) -> Vec<Vec<f32>> {
    let n_freqs = n_fft / 2 + 1;

    // Band edges: n_mels + 2 points evenly spaced on the mel scale
    let mel_min = hz_to_mel(fmin);
    let mel_max = hz_to_mel(fmax);
    let hz_points: Vec<f32> = (0..=n_mels + 1)
        .map(|i| mel_min + (mel_max - mel_min) * i as f32 / (n_mels + 1) as f32)
        .map(mel_to_hz)
        .collect();

    let fft_freqs: Vec<f32> = (0..n_freqs)
        .map(|i| i as f32 * sample_rate as f32 / n_fft as f32)
        .collect();

    let mut filterbank = vec![vec![0.0f32; n_freqs]; n_mels];

    for i in 0..n_mels {
        let f_lower = hz_points[i];
        let f_center = hz_points[i + 1];
        let f_upper = hz_points[i + 2];

        for (j, &freq) in fft_freqs.iter().enumerate() {
            if freq >= f_lower && freq <= f_center && f_center > f_lower {
                filterbank[i][j] = (freq - f_lower) / (f_center - f_lower);
            } else if freq > f_center && freq <= f_upper && f_upper > f_center {
                filterbank[i][j] = (f_upper - freq) / (f_upper - f_center);
            }
        }

        // Slaney area-normalization: approximately constant energy per band
        let band_width = f_upper - f_lower;
        if band_width > 0.0 {
            let enorm = 2.0 / band_width;
            for val in &mut filterbank[i] {
                *val *= enorm;
            }
        }
    }

    filterbank
}
