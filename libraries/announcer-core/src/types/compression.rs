//! Compression level knob

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Amount of dynamic-range compression, 0 (normalize only) to 100 (heavy)
///
/// Construction clamps into range, so every value held by this type is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompressionLevel(u8);

impl CompressionLevel {
    /// Lowest level: pure loudness normalization
    pub const MIN: Self = Self(0);
    /// Highest level: 6:1 compression
    pub const MAX: Self = Self(100);

    /// Create a level, clamping into `0..=100`
    pub fn new(level: i64) -> Self {
        Self(level.clamp(0, 100) as u8)
    }

    /// Level as an integer percentage
    pub fn value(self) -> u8 {
        self.0
    }

    /// Level as a fraction in `[0.0, 1.0]`
    pub fn amount(self) -> f32 {
        f32::from(self.0) / 100.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self(50)
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl From<u8> for CompressionLevel {
    fn from(level: u8) -> Self {
        Self::new(i64::from(level))
    }
}

impl Serialize for CompressionLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for CompressionLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}
