//! End-to-end tests for file normalization
//!
//! These tests validate that:
//! 1. Decoding keeps the source sample rate and channel layout
//! 2. Normalized audio lands in a new file and the source is untouched
//! 3. Silent sources pass through without writing anything
//! 4. Decode and encode failures surface as errors, and the fallback
//!    returns the original path

use announcer_audio::{
    normalize_file_to, normalize_or_original_to, NormalizedFile, SymphoniaDecoder, WavEncoder,
};
use announcer_core::{CompressionLevel, WaveFormat, Waveform, WaveformDecoder, WaveformEncoder};
use announcer_loudness::PassThroughReason;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a 16-bit test WAV file
fn create_test_wav(
    path: &Path,
    duration_secs: f32,
    frequency: f32,
    amplitude: f32,
    sample_rate: u32,
    channels: u16,
) -> std::io::Result<()> {
    use hound::{WavSpec, WavWriter};

    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(std::io::Error::other)?;

    let num_frames = (sample_rate as f32 * duration_secs) as usize;
    for i in 0..num_frames {
        let t = i as f32 / sample_rate as f32;
        let sample = (t * frequency * 2.0 * std::f32::consts::PI).sin();
        let value = (i16::MAX as f32 * amplitude * sample) as i16;
        for _ in 0..channels {
            writer.write_sample(value).map_err(std::io::Error::other)?;
        }
    }

    writer.finalize().map_err(std::io::Error::other)?;
    Ok(())
}

fn decode(path: &Path) -> Waveform {
    SymphoniaDecoder::new().decode(path).expect("decodable WAV")
}

fn rms(samples: &[f32]) -> f32 {
    let sum: f64 = samples.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    (sum / samples.len() as f64).sqrt() as f32
}

fn files_in(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[test]
fn decoder_keeps_source_layout() {
    let temp_dir = TempDir::new().unwrap();
    let wav_path = temp_dir.path().join("stereo_44k.wav");
    create_test_wav(&wav_path, 0.5, 440.0, 0.5, 44_100, 2).unwrap();

    let waveform = decode(&wav_path);

    assert_eq!(waveform.sample_rate(), 44_100);
    assert_eq!(waveform.channels(), 2);
    assert_eq!(waveform.frames(), 22_050);
    assert!((rms(waveform.samples()) - 0.5 / 2.0_f32.sqrt()).abs() < 0.01);
}

#[test]
fn float_wav_round_trip_is_exact() {
    let temp_dir = TempDir::new().unwrap();
    let wav_path = temp_dir.path().join("nested").join("float.wav");

    let samples: Vec<f32> = (0..3_200).map(|i| ((i % 200) as f32 / 100.0) - 1.0).collect();
    let original = Waveform::new(samples, WaveFormat::new(16_000.into(), 2)).unwrap();

    WavEncoder::new().encode(&original, &wav_path).unwrap();
    let decoded = decode(&wav_path);

    assert_eq!(decoded, original);
}

#[test]
fn normalizes_into_new_file() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("AgentDie.wav");
    create_test_wav(&source, 1.0, 440.0, 0.5, 48_000, 1).unwrap();
    let source_bytes = std::fs::read(&source).unwrap();

    let result = normalize_file_to(&source, temp_dir.path(), CompressionLevel::MIN).unwrap();

    let NormalizedFile::Processed(output_path) = result else {
        panic!("expected a processed file, got {result:?}");
    };
    assert_ne!(output_path, source);
    assert!(output_path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("normalized_") && n.ends_with(".wav")));

    // Source untouched
    assert_eq!(std::fs::read(&source).unwrap(), source_bytes);

    let input = decode(&source);
    let output = decode(&output_path);
    assert_eq!(output.format(), input.format());
    assert_eq!(output.len(), input.len());
    assert!((rms(output.samples()) - 0.22).abs() < 0.005);
}

#[test]
fn compression_lowers_level_of_loud_source() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("shout.wav");
    create_test_wav(&source, 1.0, 220.0, 0.9, 22_050, 2).unwrap();

    let light = normalize_file_to(&source, temp_dir.path(), CompressionLevel::MIN).unwrap();
    let heavy = normalize_file_to(&source, temp_dir.path(), CompressionLevel::MAX).unwrap();

    let light = decode(light.path());
    let heavy = decode(heavy.path());

    assert!(rms(heavy.samples()) < rms(light.samples()));
    assert!(heavy.samples().iter().all(|s| s.abs() <= 0.95));
}

#[test]
fn silent_source_passes_through() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("silence.wav");
    create_test_wav(&source, 0.5, 440.0, 0.0, 44_100, 2).unwrap();

    let result = normalize_file_to(&source, temp_dir.path(), CompressionLevel::MAX).unwrap();

    assert_eq!(
        result,
        NormalizedFile::PassThrough {
            source: source.clone(),
            reason: PassThroughReason::Silent,
        }
    );
    assert_eq!(result.path(), source);
    assert_eq!(files_in(temp_dir.path()), 1);
}

#[test]
fn corrupt_source_is_a_decode_failure() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("broken.wav");
    std::fs::write(&source, b"RIFF this is not really audio").unwrap();

    let err = normalize_file_to(&source, temp_dir.path(), CompressionLevel::default()).unwrap_err();
    assert!(err.is_decode_failure(), "unexpected error: {err}");
    assert_eq!(files_in(temp_dir.path()), 1);

    // Caller fallback
    let path = normalize_or_original_to(&source, temp_dir.path(), CompressionLevel::default());
    assert_eq!(path, source);
}

#[test]
fn unwritable_destination_is_an_encode_failure() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("voice.wav");
    create_test_wav(&source, 0.5, 440.0, 0.5, 44_100, 1).unwrap();

    // A regular file where the output directory should be
    let blocker = temp_dir.path().join("out");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let err = normalize_file_to(&source, &blocker, CompressionLevel::default()).unwrap_err();
    assert!(err.is_encode_failure(), "unexpected error: {err}");

    let path = normalize_or_original_to(&source, &blocker, CompressionLevel::default());
    assert_eq!(path, source);
}
