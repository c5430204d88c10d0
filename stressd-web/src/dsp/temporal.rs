//! Framed time-domain features: zero-crossing rate and RMS energy

/// Per-frame zero-crossing rate.
///
/// Frames are centered via edge padding; each frame's rate is the share of
/// adjacent sample pairs whose signs differ.
pub fn zero_crossing_rate(samples: &[f32], frame_length: usize, hop_length: usize) -> Vec<f32> {
    framed(samples, frame_length, hop_length, PadMode::Edge, |frame| {
        if frame.len() < 2 {
            return 0.0;
        }
        let crossings = frame
            .windows(2)
            .filter(|w| (w[0] >= 0.0 && w[1] < 0.0) || (w[0] < 0.0 && w[1] >= 0.0))
            .count();
        crossings as f32 / frame.len() as f32
    })
}

/// Per-frame RMS energy, with zero-padded centered frames
pub fn rms_energy(samples: &[f32], frame_length: usize, hop_length: usize) -> Vec<f32> {
    framed(samples, frame_length, hop_length, PadMode::Zero, |frame| {
        let sum_squares: f64 = frame.iter().map(|&s| (s as f64).powi(2)).sum();
        (sum_squares / frame.len() as f64).sqrt() as f32
    })
}

enum PadMode {
    Zero,
    Edge,
}

fn framed<F>(
    samples: &[f32],
    frame_length: usize,
    hop_length: usize,
    pad_mode: PadMode,
    f: F,
) -> Vec<f32>
where
    F: Fn(&[f32]) -> f32,
{
    if samples.is_empty() {
        return Vec::new();
    }

    let pad = frame_length / 2;
    let mut padded = Vec::with_capacity(samples.len() + 2 * pad);
    match pad_mode {
        PadMode::Zero => {
            padded.extend(std::iter::repeat(0.0).take(pad));
            padded.extend_from_slice(samples);
            padded.extend(std::iter::repeat(0.0).take(pad));
        }
        PadMode::Edge => {
            padded.extend(std::iter::repeat(samples[0]).take(pad));
            padded.extend_from_slice(samples);
            padded.extend(std::iter::repeat(*samples.last().unwrap()).take(pad));
        }
    }

    let n_frames = (padded.len().saturating_sub(frame_length)) / hop_length + 1;
    (0..n_frames)
        .map(|t| {
            let start = t * hop_length;
            let end = (start + frame_length).min(padded.len());
            f(&padded[start..end])
        })
        .collect()
}
