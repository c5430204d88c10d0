//! Audio feature extraction
//!
//! Computes the fixed-length feature vector the classifier was fitted on:
//! five summary statistics over spectral/temporal transforms of a mono
//! waveform, concatenated in fixed order:
//!
//! 1. zero-crossing-rate mean          (1)
//! 2. chroma means                     (12)
//! 3. MFCC means                       (20)
//! 4. RMS energy mean                  (1)
//! 5. mel-spectrogram means            (128)
//!
//! The order and inclusion set are part of the contract with the scaler and
//! classifier artifacts; changing either is a breaking change.

use crate::dsp::chroma::{ChromaFilterbank, N_CHROMA};
use crate::dsp::mel::{MelFilterbank, N_MELS};
use crate::dsp::mfcc::{mfcc, N_MFCC};
use crate::dsp::stft::Stft;
use crate::dsp::{column_means, temporal, HOP_LENGTH, N_FFT};
use crate::services::audio_loader::Waveform;
use stressd_common::{Error, Result};
use tracing::debug;

/// Total feature vector length: 1 + 12 + 20 + 1 + 128
pub const FEATURE_VECTOR_LEN: usize = 1 + N_CHROMA + N_MFCC + 1 + N_MELS;

/// Feature extractor with filterbanks precomputed for one sample rate
pub struct FeatureExtractor {
    sample_rate: u32,
    stft: Stft,
    mel: MelFilterbank,
    chroma: ChromaFilterbank,
}

impl FeatureExtractor {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            stft: Stft::new(N_FFT, HOP_LENGTH),
            mel: MelFilterbank::new(sample_rate, N_FFT, N_MELS),
            chroma: ChromaFilterbank::new(sample_rate, N_FFT),
        }
    }

    /// Extract the feature vector from a waveform.
    ///
    /// Pure function of the waveform contents; repeated invocation yields a
    /// bit-identical result.
    pub fn extract(&self, waveform: &Waveform) -> Result<Vec<f32>> {
        if waveform.samples.is_empty() {
            return Err(Error::Extraction("Empty sample buffer".to_string()));
        }
        if waveform.sample_rate != self.sample_rate {
            return Err(Error::Extraction(format!(
                "Waveform sample rate {} does not match extractor rate {}",
                waveform.sample_rate, self.sample_rate
            )));
        }

        let samples = &waveform.samples;

        let zcr = temporal::zero_crossing_rate(samples, N_FFT, HOP_LENGTH);
        let zcr_mean = zcr.iter().sum::<f32>() / zcr.len() as f32;

        let mag_frames = self.stft.magnitude(samples);
        let power_frames: Vec<Vec<f32>> = mag_frames
            .iter()
            .map(|frame| frame.iter().map(|&m| m * m).collect())
            .collect();

        let chroma_means = column_means(&self.chroma.apply(&mag_frames), N_CHROMA);

        let mel_frames = self.mel.apply(&power_frames);
        let mfcc_means = column_means(&mfcc(&mel_frames, N_MFCC), N_MFCC);

        let rms = temporal::rms_energy(samples, N_FFT, HOP_LENGTH);
        let rms_mean = rms.iter().sum::<f32>() / rms.len() as f32;

        let mel_means = column_means(&mel_frames, N_MELS);

        let mut features = Vec::with_capacity(FEATURE_VECTOR_LEN);
        features.push(zcr_mean);
        features.extend(chroma_means);
        features.extend(mfcc_means);
        features.push(rms_mean);
        features.extend(mel_means);

        debug_assert_eq!(features.len(), FEATURE_VECTOR_LEN);
        debug!(
            zcr = zcr_mean,
            rms = rms_mean,
            frames = mag_frames.len(),
            "Extracted feature vector"
        );

        Ok(features)
    }
}
