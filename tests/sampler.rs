use num_complex::Complex;
use rustfft::FftPlanner;
use segset::{SamplerConfig, SamplerError, SanityCheck, SegmentOrigin, SegmentSampler};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_wav(path: &Path, rate: u32, samples: &[i16]) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for &s in samples {
        writer.write_sample(s).unwrap();
    }
    writer.finalize().unwrap();
}

fn write_manifest(dir: &TempDir, entries: &[PathBuf]) -> PathBuf {
    let manifest = dir.path().join("files.txt");
    let body: String = entries.iter().map(|p| format!("{}\n", p.display())).collect();
    fs::write(&manifest, body).unwrap();
    manifest
}

#[test]
fn short_native_file_is_padded_with_silence() {
    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("a.wav");
    write_wav(&wav, 16000, &[1, -1]);
    let manifest = write_manifest(&dir, &[wav]);

    let mut sampler = SegmentSampler::new(&manifest, SamplerConfig::new(4, 16000, SanityCheck::None)).unwrap();
    assert_eq!(sampler.len(), 1);

    let segment = sampler.get(0).unwrap();
    assert_eq!(segment.samples, vec![1.0 / 32768.0, -1.0 / 32768.0, 0.0, 0.0]);
}

#[test]
fn long_file_yields_contiguous_window() {
    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("ramp.wav");
    let ramp: Vec<i16> = (0..2000).map(|i| i as i16).collect();
    write_wav(&wav, 16000, &ramp);
    let manifest = write_manifest(&dir, &[wav]);

    let mut sampler = SegmentSampler::new(&manifest, SamplerConfig::new(256, 16000, SanityCheck::None)).unwrap();
    for _ in 0..10 {
        let segment = sampler.get(0).unwrap();
        assert_eq!(segment.len(), 256);
        let first = (segment.samples[0] * 32768.0).round();
        for (offset, s) in segment.samples.iter().enumerate() {
            assert_eq!((s * 32768.0).round(), first + offset as f32);
        }
    }
}

#[test]
fn mismatched_rate_is_resampled_to_full_length() {
    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("8k.wav");
    write_wav(&wav, 8000, &vec![8192; 400]);
    let manifest = write_manifest(&dir, &[wav]);

    let mut sampler = SegmentSampler::new(&manifest, SamplerConfig::new(2000, 16000, SanityCheck::None)).unwrap();
    let (segment, origin) = sampler.get_with_origin(0).unwrap();
    assert_eq!(segment.len(), 2000);
    match origin {
        SegmentOrigin::Padded { decoded_len, .. } => assert_eq!(decoded_len, 800),
        other => panic!("expected padding, got {:?}", other),
    }
    assert!(segment.samples[1000..].iter().all(|&s| s == 0.0));
}

#[test]
fn same_manifest_gives_same_order() {
    let dir = tempfile::tempdir().unwrap();
    let entries: Vec<PathBuf> = (0..40).map(|i| dir.path().join(format!("{:02}.wav", i))).collect();
    let manifest = write_manifest(&dir, &entries);
    let config = SamplerConfig::new(16, 16000, SanityCheck::None);

    let a = SegmentSampler::new(&manifest, config).unwrap();
    let b = SegmentSampler::new(&manifest, config).unwrap();
    assert_eq!(a.files(), b.files());
    assert_eq!(a.len(), 40);

    let mut sorted = a.files().to_vec();
    sorted.sort();
    let expected: Vec<String> = entries.iter().map(|p| p.display().to_string()).collect();
    assert_eq!(sorted, expected);
}

#[test]
fn missing_audio_file_fails_only_that_retrieval() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.wav");
    write_wav(&good, 16000, &[5; 10]);
    let manifest = write_manifest(&dir, &[good, dir.path().join("gone.mp3")]);

    let mut sampler = SegmentSampler::new(&manifest, SamplerConfig::new(8, 16000, SanityCheck::None)).unwrap();
    let results: Vec<_> = (0..sampler.len()).map(|i| sampler.get(i)).collect();
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results.iter().any(|r| matches!(r, Err(SamplerError::Decode { .. }))));
}

#[test]
fn missing_manifest_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    let result = SegmentSampler::new(dir.path().join("absent.txt"), SamplerConfig::new(8, 16000, SanityCheck::None));
    assert!(matches!(result, Err(SamplerError::ManifestRead { .. })));
}

#[test]
fn empty_manifest_has_no_valid_index() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(&dir, &[]);

    let mut sampler = SegmentSampler::new(&manifest, SamplerConfig::new(8, 16000, SanityCheck::Sine)).unwrap();
    assert!(sampler.is_empty());
    assert!(matches!(sampler.get(0), Err(SamplerError::IndexOutOfRange { .. })));
}

#[test]
fn sine_check_is_a_440_hz_tone() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(&dir, &[dir.path().join("never_read.wav")]);
    let config = SamplerConfig::new(16000, 16000, SanityCheck::Sine);

    let mut sampler = SegmentSampler::new(&manifest, config).unwrap();
    let segment = sampler.get(0).unwrap();
    assert_eq!(segment, sampler.get(0).unwrap());
    assert!(segment.peak() <= 0.2);

    let mut buffer: Vec<Complex<f32>> = segment.samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
    FftPlanner::new().plan_fft_forward(buffer.len()).process(&mut buffer);
    let peak_bin = buffer[..buffer.len() / 2]
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.norm().total_cmp(&b.1.norm()))
        .map(|(bin, _)| bin)
        .unwrap();
    // One-second window, so bins are 1 Hz apart.
    assert_eq!(peak_bin, 440);
}
