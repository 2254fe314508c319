use crate::domain::entities::{DecodePath, MAX_WAV_VALUE};
use crate::domain::errors::DecodeError;
use log::debug;
use rubato::{Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Source of raw waveforms, at integer PCM scale.
pub trait WaveformDecoder {
    /// Reads the file as stored and reports its own sample rate. Never resamples.
    fn decode_native(&self, path: &Path) -> Result<(u32, Vec<f32>), DecodeError>;

    /// Decodes any supported format to mono at `target_rate`, scaled by [`MAX_WAV_VALUE`].
    fn decode_resampled(&self, path: &Path, target_rate: u32) -> Result<Vec<f32>, DecodeError>;
}

/// Outcome of the strict first decode step.
#[derive(Debug)]
pub enum NativeAttempt {
    Accepted(Vec<f32>),
    RateMismatch { found: u32 },
    Failed(DecodeError),
}

impl NativeAttempt {
    pub fn run<D: WaveformDecoder + ?Sized>(decoder: &D, path: &Path, rate: u32) -> Self {
        match decoder.decode_native(path) {
            Ok((found, samples)) if found == rate => NativeAttempt::Accepted(samples),
            Ok((found, _)) => NativeAttempt::RateMismatch { found },
            Err(e) => NativeAttempt::Failed(e),
        }
    }
}

/// Native read first; resampling read when the native rate differs or the native read fails.
pub fn decode_at_rate<D: WaveformDecoder + ?Sized>(
    decoder: &D,
    path: &Path,
    rate: u32,
) -> Result<(DecodePath, Vec<f32>), DecodeError> {
    match NativeAttempt::run(decoder, path, rate) {
        NativeAttempt::Accepted(samples) => Ok((DecodePath::Native, samples)),
        NativeAttempt::RateMismatch { found } => {
            debug!("{}: native rate {} Hz, resampling to {} Hz", path.display(), found, rate);
            let samples = decoder.decode_resampled(path, rate)?;
            Ok((DecodePath::Resampled, samples))
        }
        NativeAttempt::Failed(e) => {
            debug!("{}: native read failed ({}), trying resampling decoder", path.display(), e);
            let samples = decoder.decode_resampled(path, rate)?;
            Ok((DecodePath::Resampled, samples))
        }
    }
}

/// Decodes files from disk: `hound` for the native WAV read, `symphonia` + `rubato` for the rest.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileDecoder;

impl WaveformDecoder for FileDecoder {
    fn decode_native(&self, path: &Path) -> Result<(u32, Vec<f32>), DecodeError> {
        let reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        if spec.channels != 1 {
            return Err(DecodeError::Channels(spec.channels));
        }

        let samples = match spec.sample_format {
            hound::SampleFormat::Float => reader.into_samples::<f32>().collect::<Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32))
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok((spec.sample_rate, samples))
    }

    fn decode_resampled(&self, path: &Path, target_rate: u32) -> Result<Vec<f32>, DecodeError> {
        let (source_rate, samples) = decode_mono(path)?;
        let mut resampled = resample(samples, source_rate, target_rate)?;
        resampled.iter_mut().for_each(|s| *s *= MAX_WAV_VALUE);
        Ok(resampled)
    }
}

fn decode_mono(path: &Path) -> Result<(u32, Vec<f32>), DecodeError> {
    let src = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let (track_id, codec_params) = {
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or(DecodeError::NoTrack)?;
        (track.id, track.codec_params.clone())
    };
    let mut decoder = symphonia::default::get_codecs().make(&codec_params, &DecoderOptions::default())?;

    let mut source_rate = codec_params.sample_rate;
    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        };
        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                source_rate.get_or_insert(spec.rate);
                let channels = spec.channels.count().max(1);

                let mut buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buf.copy_interleaved_ref(decoded);
                for frame in buf.samples().chunks(channels) {
                    samples.push(frame.iter().sum::<f32>() / channels as f32);
                }
            }
            Err(SymphoniaError::DecodeError(msg)) => {
                debug!("{}: skipping undecodable packet: {}", path.display(), msg);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let rate = source_rate.ok_or(DecodeError::NoTrack)?;
    Ok((rate, samples))
}

/// Windowed-sinc conversion tuned for speed over stopband depth.
fn resample(samples: Vec<f32>, from_sr: u32, to_sr: u32) -> Result<Vec<f32>, DecodeError> {
    if from_sr == to_sr || samples.is_empty() {
        return Ok(samples);
    }

    let ratio = to_sr as f64 / from_sr as f64;
    let expected = (samples.len() as f64 * ratio).ceil() as usize;

    let params = SincInterpolationParameters {
        sinc_len: 64,
        f_cutoff: 0.85,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 128,
        window: WindowFunction::Blackman2,
    };
    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, samples.len(), 1)?;
    let delay = resampler.output_delay();

    let waves_in = vec![samples];
    let mut output = resampler.process(&waves_in, None)?.swap_remove(0);
    // Short inputs need several flushes before the filter delay is drained.
    while output.len() < delay + expected {
        let tail = resampler.process_partial(None::<&[Vec<f32>]>, None)?.swap_remove(0);
        if tail.is_empty() {
            break;
        }
        output.extend(tail);
    }

    let mut output = output.split_off(delay.min(output.len()));
    output.truncate(expected);
    Ok(output)
}
