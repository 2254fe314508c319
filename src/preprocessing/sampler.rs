use crate::domain::entities::{
    DecodePath, MAX_WAV_VALUE, SHUFFLE_SEED, SamplerConfig, SanityCheck, Segment, SegmentOrigin,
};
use crate::domain::errors::SamplerError;
use crate::infrastructure::decoder::{FileDecoder, WaveformDecoder, decode_at_rate};
use crate::infrastructure::manifest::read_manifest;
use crate::infrastructure::random::{RandomSource, SeededRandom};
use crate::preprocessing::synthetic::sine_segment;
use log::info;
use std::path::Path;

/// Fixed-length, amplitude-normalized segments drawn from a manifest of audio files.
///
/// The file order is shuffled once with seed 1234 and never changes. Each
/// [`get`](Self::get) decodes its file afresh; only the crop offset draws
/// on the shared random source, which is why retrieval takes `&mut self`.
pub struct SegmentSampler<D = FileDecoder, R = SeededRandom> {
    config: SamplerConfig,
    audio_files: Vec<String>,
    decoder: D,
    random: R,
}

impl SegmentSampler<FileDecoder, SeededRandom> {
    pub fn new(manifest: impl AsRef<Path>, config: SamplerConfig) -> Result<Self, SamplerError> {
        Self::with_parts(manifest, config, FileDecoder, SeededRandom::default())
    }
}

impl<D: WaveformDecoder, R: RandomSource> SegmentSampler<D, R> {
    pub fn with_parts(
        manifest: impl AsRef<Path>,
        config: SamplerConfig,
        decoder: D,
        random: R,
    ) -> Result<Self, SamplerError> {
        config.validate()?;
        let manifest = manifest.as_ref();
        let files = read_manifest(manifest)?;
        info!(
            "loaded {} files from {} (segment_length={}, sampling_rate={}, sanity_check={})",
            files.len(),
            manifest.display(),
            config.segment_length,
            config.sampling_rate,
            config.sanity_check
        );
        Ok(Self::shuffled(files, config, decoder, random))
    }

    /// Builds a sampler over an in-memory file list, shuffled the same way as a manifest.
    pub fn from_files(
        files: Vec<String>,
        config: SamplerConfig,
        decoder: D,
        random: R,
    ) -> Result<Self, SamplerError> {
        config.validate()?;
        Ok(Self::shuffled(files, config, decoder, random))
    }

    fn shuffled(mut files: Vec<String>, config: SamplerConfig, decoder: D, mut random: R) -> Self {
        random.seed(SHUFFLE_SEED);
        random.shuffle(&mut files);
        SegmentSampler { config, audio_files: files, decoder, random }
    }

    pub fn len(&self) -> usize {
        self.audio_files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.audio_files.is_empty()
    }

    pub fn files(&self) -> &[String] {
        &self.audio_files
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Reseeds the crop-offset stream. The file order is unaffected.
    pub fn reseed(&mut self, seed: u64) {
        self.random.seed(seed);
    }

    pub fn get(&mut self, index: usize) -> Result<Segment, SamplerError> {
        self.get_with_origin(index).map(|(segment, _)| segment)
    }

    pub fn get_with_origin(&mut self, index: usize) -> Result<(Segment, SegmentOrigin), SamplerError> {
        if index >= self.audio_files.len() {
            return Err(SamplerError::IndexOutOfRange { index, len: self.audio_files.len() });
        }

        let SamplerConfig { segment_length, sampling_rate, sanity_check } = self.config;
        if sanity_check == SanityCheck::Sine {
            let samples = sine_segment(segment_length, sampling_rate);
            return Ok((Segment::new(samples, sampling_rate), SegmentOrigin::Synthetic));
        }

        let filename = &self.audio_files[index];
        let (path, audio) = decode_at_rate(&self.decoder, Path::new(filename), sampling_rate)
            .map_err(|reason| SamplerError::Decode { path: filename.clone(), reason })?;

        let (mut samples, origin) = fit_to_length(audio, segment_length, path, &mut self.random);
        samples.iter_mut().for_each(|s| *s /= MAX_WAV_VALUE);

        Ok((Segment::new(samples, sampling_rate), origin))
    }

    /// Walks indices `0..len()` in order.
    pub fn iter(&mut self) -> Segments<'_, D, R> {
        Segments { sampler: self, next: 0 }
    }
}

/// Crops a random window from long audio, right-pads short audio with silence.
fn fit_to_length<R: RandomSource>(
    mut audio: Vec<f32>,
    segment_length: usize,
    path: DecodePath,
    random: &mut R,
) -> (Vec<f32>, SegmentOrigin) {
    let decoded_len = audio.len();
    if decoded_len >= segment_length {
        let max_audio_start = decoded_len - segment_length;
        let start = random.uniform_int(0, max_audio_start);
        let window = audio[start..start + segment_length].to_vec();
        (window, SegmentOrigin::Cropped { start, decoded_len, path })
    } else {
        audio.resize(segment_length, 0.0);
        (audio, SegmentOrigin::Padded { decoded_len, path })
    }
}

pub struct Segments<'a, D, R> {
    sampler: &'a mut SegmentSampler<D, R>,
    next: usize,
}

impl<D: WaveformDecoder, R: RandomSource> Iterator for Segments<'_, D, R> {
    type Item = Result<Segment, SamplerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.sampler.len() {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(self.sampler.get(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sampler.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}
