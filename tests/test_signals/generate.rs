use rand::{RngExt, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f32::consts::PI;

/// Sine wave of `num_samples` samples
pub fn sine(amplitude: f32, freq_hz: f32, sample_rate: u32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| amplitude * (2.0 * PI * freq_hz * i as f32 / sample_rate as f32).sin())
        .collect()
}

pub fn constant(value: f32, num_samples: usize) -> Vec<f32> {
    vec![value; num_samples]
}

/// Seeded uniform noise in [-amplitude, amplitude]
pub fn noise(amplitude: f32, num_samples: usize, seed: u64) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..num_samples)
        .map(|_| rng.random_range(-amplitude..=amplitude))
        .collect()
}

/// Pulse with an instant attack to `amplitude` followed by an exponential decay
pub fn pulse(amplitude: f32, decay_per_sample: f32, len: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(len);
    let mut value = amplitude;
    for _ in 0..len {
        out.push(value);
        value *= decay_per_sample;
    }
    out
}

/// Peak-hold envelope with exponential release
pub fn peak_envelope(signal: &[f32], release_per_sample: f32) -> Vec<f32> {
    let mut env = 0.0f32;
    signal
        .iter()
        .map(|&s| {
            env = s.abs().max(env * release_per_sample);
            env
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_noise_reproducibility() {
        let a = noise(0.5, 1000, 12345);
        let b = noise(0.5, 1000, 12345);
        assert_eq!(a, b);
        assert_ne!(a, noise(0.5, 1000, 54321));
        assert!(a.iter().all(|x| x.abs() <= 0.5));
    }
}
