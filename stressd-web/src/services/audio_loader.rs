//! Audio decoding for the feature pipeline
//!
//! Decodes a fixed window of a stored audio file into a mono waveform at the
//! pipeline sample rate using symphonia, resampling with rubato when the
//! source rate differs.

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use std::path::Path;
use stressd_common::{Error, Result};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

/// Sample rate every waveform is brought to before feature extraction
pub const PIPELINE_SAMPLE_RATE: u32 = 22_050;

/// Seconds skipped from the start of the stored file
pub const WINDOW_OFFSET_SECS: f64 = 0.6;

/// Seconds of audio decoded for analysis
pub const WINDOW_DURATION_SECS: f64 = 2.5;

/// Mono waveform with its sample rate
#[derive(Debug, Clone)]
pub struct Waveform {
    /// Mono PCM samples, normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl Waveform {
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Decoder producing mono waveforms at a fixed target rate
pub struct AudioLoader {
    target_sample_rate: u32,
}

impl Default for AudioLoader {
    fn default() -> Self {
        Self {
            target_sample_rate: PIPELINE_SAMPLE_RATE,
        }
    }
}

impl AudioLoader {
    pub fn new(target_sample_rate: u32) -> Self {
        Self { target_sample_rate }
    }

    /// Decode `duration_secs` of audio starting `offset_secs` into the file.
    ///
    /// Source audio shorter than the requested window yields a shorter
    /// waveform. Multi-channel audio is downmixed to mono by averaging.
    pub fn load_window<P: AsRef<Path>>(
        &self,
        path: P,
        offset_secs: f64,
        duration_secs: f64,
    ) -> Result<Waveform> {
        let path = path.as_ref();
        debug!(
            "Decoding {} [{:.2}s - {:.2}s]",
            path.display(),
            offset_secs,
            offset_secs + duration_secs
        );

        let file = std::fs::File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| Error::Decode(format!("Failed to probe audio format: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| Error::Decode("No audio tracks found in file".to_string()))?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();
        let native_rate = codec_params
            .sample_rate
            .ok_or_else(|| Error::Decode("Sample rate not specified in codec params".to_string()))?;

        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| Error::Decode(format!("Failed to create decoder: {}", e)))?;

        let start_frame = (offset_secs * native_rate as f64).round() as u64;
        let end_frame = start_frame + (duration_secs * native_rate as f64).round() as u64;

        let mut mono = Vec::new();
        let mut sample_buf: Option<SampleBuffer<f32>> = None;
        let mut position = 0u64;

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(symphonia::core::errors::Error::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => return Err(Error::Decode(format!("Failed to read packet: {}", e))),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = decoder
                .decode(&packet)
                .map_err(|e| Error::Decode(format!("Failed to decode packet: {}", e)))?;

            let spec = *decoded.spec();
            let channels = spec.channels.count().max(1);

            let buf = sample_buf.get_or_insert_with(|| {
                SampleBuffer::<f32>::new(decoded.capacity() as u64, spec)
            });
            buf.copy_interleaved_ref(decoded);

            let frames = buf.samples().len() / channels;
            let packet_start = position;
            let packet_end = position + frames as u64;

            if packet_end > start_frame && packet_start < end_frame {
                let from = (packet_start.max(start_frame) - packet_start) as usize;
                let to = (packet_end.min(end_frame) - packet_start) as usize;
                let interleaved = &buf.samples()[from * channels..to * channels];
                for frame in interleaved.chunks_exact(channels) {
                    mono.push(frame.iter().sum::<f32>() / channels as f32);
                }
            }

            position = packet_end;
            if position >= end_frame {
                break;
            }
        }

        debug!(
            "Decoded {} mono samples at {} Hz",
            mono.len(),
            native_rate
        );

        let samples = if native_rate != self.target_sample_rate {
            resample_mono(mono, native_rate, self.target_sample_rate)?
        } else {
            mono
        };

        Ok(Waveform {
            samples,
            sample_rate: self.target_sample_rate,
        })
    }
}

/// Resample a mono signal with sinc interpolation (BlackmanHarris2 window)
fn resample_mono(samples: Vec<f32>, source_rate: u32, target_rate: u32) -> Result<Vec<f32>> {
    if samples.is_empty() {
        return Ok(samples);
    }

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = target_rate as f64 / source_rate as f64;
    let chunk = samples.len();

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, chunk, 1)
        .map_err(|e| Error::Decode(format!("Failed to create resampler: {}", e)))?;

    let output = resampler
        .process(&[samples], None)
        .map_err(|e| Error::Decode(format!("Resampling failed: {}", e)))?;

    debug!(
        "Resampled {} Hz -> {} Hz ({} samples out)",
        source_rate,
        target_rate,
        output[0].len()
    );

    Ok(output.into_iter().next().unwrap_or_default())
}
