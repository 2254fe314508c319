use std::f64::consts::PI;

pub const SINE_FREQUENCY: f32 = 440.0;
pub const SINE_AMPLITUDE: f32 = 0.2;

/// `length` samples of a 440 Hz tone at `sample_rate`, amplitude 0.2.
pub fn sine_segment(length: usize, sample_rate: u32) -> Vec<f32> {
    let rate = sample_rate as f64;
    (0..length)
        .map(|i| (2.0 * PI * SINE_FREQUENCY as f64 * i as f64 / rate).sin() as f32 * SINE_AMPLITUDE)
        .collect()
}
