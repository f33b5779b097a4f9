use super::peak::PeakDetector;
use crate::constants::{ONSET_DROOP, ONSET_HYSTERESIS};
use crate::units::Period;

/// Onset detector with refractory gating and peak bookkeeping
///
/// Wraps a [`PeakDetector`] and turns its pulses into onsets:
///
/// - After every state change the detector is locked for `min_samples`
///   calls, independent of the inner peak detector.
/// - A new onset is accepted only if the signal exceeds the peak recorded for
///   the previous onset, so smaller secondary peaks within the same note do
///   not re-trigger.
///
/// Call [`OnsetDetector::reset`] between independently analysed segments to
/// forget the recorded peak.
#[derive(Debug, Clone)]
pub struct OnsetDetector {
    peak: PeakDetector,
    min_samples: usize,
    state: bool,
    count: usize,
    current_peak: f32,
}

impl OnsetDetector {
    /// Create an onset detector
    ///
    /// # Arguments
    /// * `min_period` - Refractory time after each state change
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(min_period: Period, sample_rate: u32) -> Self {
        let min_samples = min_period.samples(sample_rate);
        log::debug!("Onset detector: refractory {} samples", min_samples);
        Self {
            peak: PeakDetector::new(ONSET_DROOP, ONSET_HYSTERESIS),
            min_samples,
            state: false,
            count: 0,
            current_peak: 0.0,
        }
    }

    /// Process the next sample against its envelope
    ///
    /// Returns `true` while an onset is active.
    ///
    /// # Arguments
    /// * `sample` - The next audio sample to process
    /// * `envelope` - Externally tracked envelope of the same signal
    pub fn process(&mut self, sample: f32, envelope: f32) -> bool {
        let count = self.count;
        self.count = self.count.saturating_add(1);
        if count < self.min_samples {
            return self.state;
        }

        let pk = self.peak.process(sample, envelope);
        if !self.state && pk {
            if self.current_peak < sample {
                self.current_peak = sample;
                self.state = true;
                self.count = 0;
            }
        } else if self.state && !pk {
            self.state = false;
            self.count = 0;
        }
        self.state
    }

    /// Signal value recorded at the most recent onset
    pub fn peak_value(&self) -> f32 {
        self.current_peak
    }

    /// Forget the recorded peak
    ///
    /// The onset state and refractory counter are left untouched.
    pub fn reset(&mut self) {
        self.current_peak = 0.0;
    }

    pub fn state(&self) -> bool {
        self.state
    }

    /// Refractory length in samples
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }
}
