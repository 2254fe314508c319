use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("failed to read manifest {}: {source}", .path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {reason}")]
    Decode {
        path: String,
        #[source]
        reason: DecodeError,
    },
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("index {index} out of range for dataset of {len} files")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
    #[error("container/codec error: {0}")]
    Symphonia(#[from] symphonia::core::errors::Error),
    #[error("resampler setup error: {0}")]
    ResamplerSetup(#[from] rubato::ResamplerConstructionError),
    #[error("resampling error: {0}")]
    Resample(#[from] rubato::ResampleError),
    #[error("expected mono audio, found {0} channels")]
    Channels(u16),
    #[error("no decodable audio track")]
    NoTrack,
}
