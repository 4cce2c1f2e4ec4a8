//! Domain types: waveforms, their format, and the compression knob

mod audio;
mod compression;

pub use audio::{SampleRate, WaveFormat, Waveform};
pub use compression::CompressionLevel;
