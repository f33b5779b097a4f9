use super::dynamic_lowpass::DynamicLowpass;
use crate::units::Period;

/// Attack/release envelope follower
///
/// Rectifies the input and smooths it with a [`DynamicLowpass`], picking the
/// attack coefficient while the signal rises above the envelope and the
/// release coefficient while it falls below. Provides the envelope input
/// expected by the peak and onset detectors.
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    attack_coeff: f32,
    release_coeff: f32,
    lowpass: DynamicLowpass,
}

impl EnvelopeFollower {
    /// Create an envelope follower
    ///
    /// # Arguments
    /// * `attack` - Time constant while the signal rises
    /// * `release` - Time constant while the signal falls
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(attack: Period, release: Period, sample_rate: u32) -> Self {
        Self {
            attack_coeff: Self::time_constant_to_coeff(attack, sample_rate),
            release_coeff: Self::time_constant_to_coeff(release, sample_rate),
            lowpass: DynamicLowpass::new(),
        }
    }

    fn time_constant_to_coeff(time_constant: Period, sample_rate: u32) -> f32 {
        let samples = time_constant.as_secs() * f64::from(sample_rate);
        (1.0 - (-1.0 / samples).exp()) as f32
    }

    /// Process the next sample and return the updated envelope
    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let rectified = sample.abs();
        let a = if rectified > self.lowpass.value() {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.lowpass.process(rectified, a)
    }

    /// Current envelope, without advancing
    pub fn value(&self) -> f32 {
        self.lowpass.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_tone(amplitude: f32, freq_hz: f32, sample_rate: f32, num_samples: usize) -> Vec<f32> {
        (0..num_samples)
            .map(|i| {
                amplitude * (2.0 * std::f32::consts::PI * freq_hz * i as f32 / sample_rate).sin()
            })
            .collect()
    }

    #[test]
    fn test_envelope_follows_tone_amplitude() {
        let mut env =
            EnvelopeFollower::new(Period::from_millis(1.0), Period::from_millis(200.0), 48000);

        for s in make_tone(0.5, 440.0, 48000.0, 48000) {
            env.process(s);
        }

        assert!(
            env.value() > 0.4 && env.value() <= 0.5,
            "Envelope should sit just below the peak: {}",
            env.value()
        );
    }

    #[test]
    fn test_attack_faster_than_release() {
        let sample_rate = 48000;
        let mut env = EnvelopeFollower::new(
            Period::from_millis(1.0),
            Period::from_millis(100.0),
            sample_rate,
        );

        // 10 ms of full scale: the envelope should be almost fully attacked
        for _ in 0..480 {
            env.process(1.0);
        }
        let after_attack = env.value();
        assert!(after_attack > 0.99, "after attack: {after_attack:.3}");

        // 10 ms of silence: release has barely started
        for _ in 0..480 {
            env.process(0.0);
        }
        let after_release = env.value();
        assert!(after_release > 0.85, "after release: {after_release:.3}");
    }
}
