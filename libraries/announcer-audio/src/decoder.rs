/// Audio decoder implementation using Symphonia
use crate::error::{AudioError, Result};
use announcer_core::{WaveFormat, Waveform, WaveformDecoder};
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

/// Extensions handed to the decoder
const SUPPORTED_EXTENSIONS: [&str; 4] = ["wav", "mp3", "flac", "ogg"];

/// Audio decoder using Symphonia
///
/// Supports: WAV, MP3, FLAC, OGG
///
/// Unlike a playback decoder this keeps the source layout: the waveform has
/// the file's own sample rate and channel count, interleaved, so it can be
/// written back in the same shape.
#[derive(Debug, Default, Clone, Copy)]
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode a whole file into memory
    fn decode_file(path: &Path) -> Result<Waveform> {
        // Check if file exists
        if !path.exists() {
            return Err(AudioError::FileNotFound(path.display().to_string()));
        }

        let file = std::fs::File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // Create a hint to help the format registry guess the format
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
            .map_err(|e| match e {
                SymphoniaError::Unsupported(what) => AudioError::UnsupportedFormat(format!(
                    "{}: {}",
                    path.display(),
                    what
                )),
                other => AudioError::Symphonia(format!("Failed to probe file: {}", other)),
            })?;

        let mut format = probed.format;

        // Find the first audio track
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| AudioError::DecodeError("No audio tracks found".to_string()))?;

        let track_id = track.id;
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| AudioError::DecodeError("Unknown sample rate".to_string()))?;
        let channels = track
            .codec_params
            .channels
            .ok_or_else(|| AudioError::DecodeError("Unknown channel layout".to_string()))?
            .count();
        let channels = u16::try_from(channels)
            .map_err(|_| AudioError::DecodeError(format!("Too many channels: {}", channels)))?;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| AudioError::Symphonia(format!("Failed to create decoder: {}", e)))?;

        // Decode all packets and collect into single buffer
        let mut samples = Vec::new();
        let mut sample_buf: Option<SampleBuffer<f32>> = None;

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => {
                    return Err(AudioError::Symphonia(format!(
                        "Error reading packet: {}",
                        e
                    )));
                }
            };

            // Skip packets that are not for the selected track
            if packet.track_id() != track_id {
                continue;
            }

            // A bad packet fails the whole file; normalizing partial audio
            // would shift every later window.
            let decoded = decoder
                .decode(&packet)
                .map_err(|e| AudioError::DecodeError(e.to_string()))?;

            // Packets never exceed the decoder's max frame count
            let buf = sample_buf.get_or_insert_with(|| {
                SampleBuffer::new(decoded.capacity() as u64, *decoded.spec())
            });
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }

        debug!(
            path = %path.display(),
            samples = samples.len(),
            sample_rate,
            channels,
            "Decoded audio file"
        );

        let format = WaveFormat::new(sample_rate.into(), channels);
        Waveform::new(samples, format).map_err(|e| AudioError::DecodeError(e.to_string()))
    }
}

impl WaveformDecoder for SymphoniaDecoder {
    fn decode(&mut self, path: &Path) -> announcer_core::Result<Waveform> {
        Ok(Self::decode_file(path)?)
    }

    fn supports_format(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|supported| ext.eq_ignore_ascii_case(supported))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supports_known_extensions() {
        let decoder = SymphoniaDecoder::new();
        assert!(decoder.supports_format(Path::new("AgentDie.wav")));
        assert!(decoder.supports_format(Path::new("voice.MP3")));
        assert!(decoder.supports_format(Path::new("take.flac")));
        assert!(!decoder.supports_format(Path::new("notes.txt")));
        assert!(!decoder.supports_format(Path::new("no_extension")));
    }

    #[test]
    fn missing_file_is_reported() {
        let mut decoder = SymphoniaDecoder::new();
        let err = decoder
            .decode(Path::new("/definitely/not/here.wav"))
            .unwrap_err();
        assert!(err.is_decode_failure());
        assert!(matches!(err, announcer_core::AnnouncerError::FileNotFound(_)));
    }
}
