//! Fixed-length audio segments for training loops.
//!
//! A [`SegmentSampler`] reads a manifest of audio paths, shuffles it once
//! with a fixed seed and serves one normalized segment per index.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod preprocessing;
#[cfg(feature = "tch")]
pub mod tensor;

pub use config::Config;
pub use domain::entities::{MAX_WAV_VALUE, SamplerConfig, SanityCheck, Segment, SegmentOrigin};
pub use domain::errors::{DecodeError, SamplerError};
pub use infrastructure::decoder::{FileDecoder, WaveformDecoder};
pub use infrastructure::random::{RandomSource, SeededRandom};
pub use preprocessing::sampler::SegmentSampler;
