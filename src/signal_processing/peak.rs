use super::comparator::{Comparator, SchmittTrigger};

/// Peak detector driven by an envelope
///
/// Generates pulses that coincide with the peaks of a waveform by comparing
/// the signal against a slightly attenuated copy of its envelope. Because
/// the attenuated envelope sits just below the true peaks, the comparator
/// output goes high only near the top of each peak.
///
/// The comparator is pluggable; [`PeakDetector::new`] uses a
/// [`SchmittTrigger`].
#[derive(Debug, Clone)]
pub struct PeakDetector<C = SchmittTrigger> {
    droop: f32,
    comparator: C,
}

impl PeakDetector<SchmittTrigger> {
    /// Create a peak detector with a Schmitt trigger comparator
    ///
    /// # Arguments
    /// * `droop` - Envelope attenuation factor (0-1)
    /// * `hysteresis` - Schmitt trigger hysteresis amount
    pub fn new(droop: f32, hysteresis: f32) -> Self {
        Self::with_comparator(droop, SchmittTrigger::new(hysteresis))
    }
}

impl<C: Comparator> PeakDetector<C> {
    /// Create a peak detector around an arbitrary comparator
    pub fn with_comparator(droop: f32, comparator: C) -> Self {
        Self { droop, comparator }
    }

    /// Process the next sample against its envelope
    ///
    /// # Arguments
    /// * `sample` - The next audio sample to process
    /// * `envelope` - Externally tracked envelope of the same signal
    #[inline]
    pub fn process(&mut self, sample: f32, envelope: f32) -> bool {
        self.comparator.compare(sample, envelope * self.droop)
    }

    pub fn droop(&self) -> f32 {
        self.droop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every comparison and reports a fixed answer
    struct Recorder {
        calls: Vec<(f32, f32)>,
        answer: bool,
    }

    impl Comparator for Recorder {
        fn compare(&mut self, value: f32, threshold: f32) -> bool {
            self.calls.push((value, threshold));
            self.answer
        }
    }

    #[test]
    fn test_envelope_is_attenuated_by_droop() {
        let mut recorder = Recorder {
            calls: Vec::new(),
            answer: true,
        };
        let mut detector = PeakDetector::with_comparator(0.5, &mut recorder);

        assert!(detector.process(0.3, 0.8));
        assert!(detector.process(-0.1, 0.2));
        drop(detector);

        assert_eq!(recorder.calls, vec![(0.3, 0.4), (-0.1, 0.1)]);
    }

    #[test]
    fn test_peak_detection_on_sine() {
        let mut detector = PeakDetector::new(0.8, 0.005);

        // Constant envelope of 1.0: the threshold is 0.8
        let signal: Vec<f32> = (0..400)
            .map(|i| (2.0 * std::f32::consts::PI * i as f32 / 100.0).sin())
            .collect();

        let mut rising = Vec::new();
        let mut prev = false;
        for (i, &s) in signal.iter().enumerate() {
            let pk = detector.process(s, 1.0);
            if pk && !prev {
                rising.push(i);
            }
            prev = pk;
        }

        // One pulse per period, each starting before the crest at 25 + 100n
        assert_eq!(rising.len(), 4, "pulses at {:?}", rising);
        for (n, &i) in rising.iter().enumerate() {
            let crest = 25 + 100 * n;
            assert!(i < crest && crest - i < 25, "pulse {} at {}", n, i);
        }
    }

    #[test]
    fn test_below_envelope_never_fires() {
        let mut detector = PeakDetector::new(0.9, 0.01);
        for i in 0..100 {
            let s = 0.5 * (i as f32 * 0.3).sin();
            assert!(!detector.process(s, 1.0));
        }
        assert_eq!(detector.droop(), 0.9);
    }
}
