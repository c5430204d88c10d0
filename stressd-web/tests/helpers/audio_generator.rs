//! Audio test fixture generator
//!
//! Builds in-memory WAV payloads with hound for upload tests.

use std::io::Cursor;

/// Configuration for generated audio
#[derive(Debug, Clone)]
pub struct AudioConfig {
    pub duration_seconds: f64,
    pub sample_rate: u32,
    pub channels: u16,
    pub frequency: f32,
    pub amplitude: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            duration_seconds: 4.0,
            sample_rate: 22050,
            channels: 1,
            frequency: 440.0,
            amplitude: 0.3,
        }
    }
}

/// Generate a WAV byte buffer with the specified configuration
pub fn generate_wav_bytes(config: &AudioConfig) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: config.channels,
        sample_rate: config.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        let total_samples = (config.duration_seconds * config.sample_rate as f64) as usize;
        for i in 0..total_samples {
            let t = i as f32 / config.sample_rate as f32;
            let sample = (config.amplitude
                * (2.0 * std::f32::consts::PI * config.frequency * t).sin()
                * i16::MAX as f32) as i16;
            for _ in 0..config.channels {
                writer.write_sample(sample).unwrap();
            }
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

/// WAV payload padded with trailing bytes to reach an exact total size.
///
/// The padding lives after the RIFF payload, so decoders still read the
/// audio while the upload weighs in at `target_bytes`.
pub fn generate_wav_bytes_of_size(config: &AudioConfig, target_bytes: usize) -> Vec<u8> {
    let mut bytes = generate_wav_bytes(config);
    assert!(
        bytes.len() <= target_bytes,
        "generated WAV ({} bytes) already exceeds target {}",
        bytes.len(),
        target_bytes
    );
    bytes.resize(target_bytes, 0);
    bytes
}
