use crate::units::{Frequency, Period};

/// Zero-crossing detector with hysteresis and a refractory period
///
/// Tracks the polarity of a signal as a two-state output (below/above). To
/// reject noise, the signal must pass `+hysteresis` to go high and
/// `-hysteresis` to go low, and after every transition the detector is
/// locked for `min_samples` calls. The lock bounds the output frequency to
/// the configured maximum.
#[derive(Debug, Clone)]
pub struct ZeroCrossingDetector {
    hysteresis: f32,
    min_samples: usize,
    state: bool,
    count: usize,
}

impl ZeroCrossingDetector {
    /// Create a detector whose output frequency is limited to `max_freq`
    ///
    /// # Arguments
    /// * `hysteresis` - Hysteresis threshold (typically 0.001-0.1)
    /// * `max_freq` - Highest crossing frequency to follow
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(hysteresis: f32, max_freq: Frequency, sample_rate: u32) -> Self {
        Self::with_min_period(hysteresis, max_freq.period(), sample_rate)
    }

    /// Create a detector with an explicit minimum time between transitions
    ///
    /// # Arguments
    /// * `hysteresis` - Hysteresis threshold (typically 0.001-0.1)
    /// * `min_period` - Refractory time after each transition
    /// * `sample_rate` - Sample rate in Hz
    pub fn with_min_period(hysteresis: f32, min_period: Period, sample_rate: u32) -> Self {
        let min_samples = min_period.samples(sample_rate);
        log::debug!(
            "Zero-crossing detector: hysteresis {}, refractory {} samples",
            hysteresis,
            min_samples
        );
        Self {
            hysteresis,
            min_samples,
            state: false,
            count: 0,
        }
    }

    /// Process the next sample and return the current polarity state
    ///
    /// Returns `true` while the signal is considered above zero.
    ///
    /// # Arguments
    /// * `sample` - The next audio sample to process
    #[inline]
    pub fn process(&mut self, sample: f32) -> bool {
        let count = self.count;
        self.count = self.count.saturating_add(1);
        if count < self.min_samples {
            return self.state;
        }

        if sample > self.hysteresis && !self.state {
            self.state = true;
            self.count = 0;
        } else if sample < -self.hysteresis && self.state {
            self.state = false;
            self.count = 0;
        }
        self.state
    }

    /// True if the last call changed state
    ///
    /// A freshly created detector also reports an edge until its first call.
    #[inline]
    pub fn edge(&self) -> bool {
        self.count == 0
    }

    pub fn state(&self) -> bool {
        self.state
    }

    /// Refractory length in samples
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }
}
