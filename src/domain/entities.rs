use crate::domain::errors::SamplerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Full-scale value of 16-bit PCM; real-file segments are divided by it.
pub const MAX_WAV_VALUE: f32 = 32768.0;

/// Seed applied to the random source before the file list is shuffled.
pub const SHUFFLE_SEED: u64 = 1234;

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Segment {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Segment { samples, sample_rate }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0_f32, |acc, &s| acc.max(s.abs()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SanityCheck {
    #[default]
    None,
    Sine,
}

impl FromStr for SanityCheck {
    type Err = SamplerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(SanityCheck::None),
            "sine" => Ok(SanityCheck::Sine),
            other => Err(SamplerError::Config(format!("unknown sanity_check mode '{}'", other))),
        }
    }
}

impl fmt::Display for SanityCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanityCheck::None => write!(f, "none"),
            SanityCheck::Sine => write!(f, "sine"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerConfig {
    pub segment_length: usize,
    pub sampling_rate: u32,
    #[serde(default)]
    pub sanity_check: SanityCheck,
}

impl SamplerConfig {
    pub fn new(segment_length: usize, sampling_rate: u32, sanity_check: SanityCheck) -> Self {
        SamplerConfig { segment_length, sampling_rate, sanity_check }
    }

    pub fn validate(&self) -> Result<(), SamplerError> {
        if self.segment_length == 0 {
            return Err(SamplerError::Config("segment_length must be positive".to_string()));
        }
        if self.sampling_rate == 0 {
            return Err(SamplerError::Config("sampling_rate must be positive".to_string()));
        }
        Ok(())
    }
}

/// Which decoder produced a waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePath {
    Native,
    Resampled,
}

/// How a segment was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SegmentOrigin {
    Synthetic,
    Cropped { start: usize, decoded_len: usize, path: DecodePath },
    Padded { decoded_len: usize, path: DecodePath },
}
