use std::f64::consts::PI;

use crate::constants::{DEFAULT_SENSITIVITY, MAX_COEFFICIENT, SENSITIVITY_SCALE};
use crate::units::Frequency;

/// Self-modulating two-pole smoothing filter
///
/// After "Dynamic Smoothing Using Self Modulating Filter" (Andrew Simper,
/// Cytomic, 2014). Two cascaded one-pole lowpass stages share a cutoff
/// coefficient. The difference between the stages is a bandpass signal that
/// measures how fast the input is changing; its magnitude raises the cutoff
/// so the filter tracks quickly on large moves and smooths hard when the
/// input is steady. Direction does not matter, only magnitude.
///
/// The output is the second stage value from *before* the current update,
/// giving one sample of latency.
///
/// # Preconditions
/// The base frequency must be below Nyquist (`base < sample_rate / 2`). The
/// prewarped base coefficient diverges as the base approaches Nyquist and is
/// not clamped; only the per-sample coefficient is capped at 1.
#[derive(Debug, Clone)]
pub struct DynamicSmoother {
    sensitivity: f32,
    sense: f32,
    wc: f32,
    g0: f32,
    low1: f32,
    low2: f32,
}

impl DynamicSmoother {
    /// Create a smoother with the default sensitivity (0.5)
    ///
    /// # Arguments
    /// * `base` - Cutoff frequency when the input is steady
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(base: Frequency, sample_rate: u32) -> Self {
        Self::with_sensitivity(base, DEFAULT_SENSITIVITY, sample_rate)
    }

    /// Create a smoother with an explicit sensitivity
    ///
    /// # Arguments
    /// * `base` - Cutoff frequency when the input is steady
    /// * `sensitivity` - How strongly change raises the cutoff (typically 0-1)
    /// * `sample_rate` - Sample rate in Hz
    pub fn with_sensitivity(base: Frequency, sensitivity: f32, sample_rate: u32) -> Self {
        let (wc, g0) = Self::base_coefficients(base, sample_rate);
        log::debug!(
            "Dynamic smoother: base {} @ {} sps, wc={:.6}, g0={:.6}, sensitivity={}",
            base,
            sample_rate,
            wc,
            g0,
            sensitivity
        );

        Self {
            sensitivity,
            sense: sensitivity * SENSITIVITY_SCALE,
            wc,
            g0,
            low1: 0.0,
            low2: 0.0,
        }
    }

    // Bilinear-transform prewarp of the base cutoff, evaluated in double
    // precision and narrowed afterwards.
    fn base_coefficients(base: Frequency, sample_rate: u32) -> (f32, f32) {
        let wc = (base.as_hz() / f64::from(sample_rate)) as f32;
        let gc = (PI * f64::from(wc)).tan();
        let g0 = (2.0 * gc / (1.0 + gc)) as f32;
        (wc, g0)
    }

    #[inline]
    fn coefficient(&self) -> f32 {
        let band = self.low1 - self.low2;
        (self.g0 + self.sense * band.abs()).min(MAX_COEFFICIENT)
    }

    /// Smooth the next sample
    ///
    /// Returns the second stage output from the previous call.
    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let low1z = self.low1;
        let low2z = self.low2;
        let g = self.coefficient();
        self.low1 = low1z + g * (sample - low1z);
        self.low2 = low2z + g * (self.low1 - low2z);
        low2z
    }

    /// Retune the base cutoff without disturbing the filter state
    ///
    /// Only the base coefficient is recomputed, so retuning mid-stream does
    /// not click. The same Nyquist precondition as construction applies.
    pub fn set_base_frequency(&mut self, base: Frequency, sample_rate: u32) {
        let (wc, g0) = Self::base_coefficients(base, sample_rate);
        log::trace!("Dynamic smoother retuned to {} (g0={:.6})", base, g0);
        self.wc = wc;
        self.g0 = g0;
    }

    /// Coefficient used when the input is not changing
    pub fn base_coefficient(&self) -> f32 {
        self.g0
    }

    /// Normalized base cutoff (base / sample rate)
    pub fn normalized_cutoff(&self) -> f32 {
        self.wc
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }
}
