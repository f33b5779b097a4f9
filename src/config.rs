//! Configuration for the signal conditioning primitives.
//!
//! Every section has defaults, so a configuration file only needs the values
//! it changes. Frequencies and periods accept either a bare number (Hz or
//! seconds) or a string with a unit suffix:
//!
//! ```toml
//! sample_rate = 44100
//!
//! [smoother]
//! base_frequency = "1khz"
//! sensitivity = 0.5
//!
//! [zero_cross]
//! hysteresis = 0.01
//! max_frequency = "1500hz"
//!
//! [onset]
//! min_period = "100ms"
//! ```
//!
//! Components are infallible to construct. Call [`SfxConfig::validate`]
//! before building them from untrusted input.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::constants::{DEFAULT_SENSITIVITY, ONSET_DROOP, ONSET_HYSTERESIS};
use crate::error::{Result, SfxError};
use crate::signal_processing::{
    DynamicSmoother, EnvelopeFollower, OnsetDetector, PeakDetector, ZeroCrossingDetector,
};
use crate::units::{Frequency, Period};

/// Top-level configuration
///
/// # Example
/// ```
/// use sigcond::config::SfxConfig;
///
/// let mut config = SfxConfig::default();
/// config.sample_rate = 44100;
/// config.validate().unwrap();
/// let _smoother = config.smoother();
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SfxConfig {
    /// Sample rate in Hz shared by all components
    pub sample_rate: u32,
    pub smoother: SmootherConfig,
    pub zero_cross: ZeroCrossConfig,
    pub peak: PeakConfig,
    pub onset: OnsetConfig,
    pub envelope: EnvelopeConfig,
}

/// Dynamic smoother configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmootherConfig {
    /// Cutoff when the input is steady (must be below Nyquist)
    pub base_frequency: Frequency,
    /// How strongly change raises the cutoff (0-1)
    pub sensitivity: f32,
}

/// Zero-crossing detector configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZeroCrossConfig {
    /// Hysteresis threshold around zero
    pub hysteresis: f32,
    /// Highest crossing frequency to follow; sets the refractory period
    pub max_frequency: Frequency,
}

/// Peak detector configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PeakConfig {
    /// Envelope attenuation (0-1)
    pub droop: f32,
    /// Comparator hysteresis
    pub hysteresis: f32,
}

/// Onset detector configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OnsetConfig {
    /// Refractory time after each onset state change
    pub min_period: Period,
}

/// Envelope follower configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvelopeConfig {
    pub attack: Period,
    pub release: Period,
}

impl Default for SfxConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            smoother: SmootherConfig::default(),
            zero_cross: ZeroCrossConfig::default(),
            peak: PeakConfig::default(),
            onset: OnsetConfig::default(),
            envelope: EnvelopeConfig::default(),
        }
    }
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            base_frequency: Frequency::from_hz(1000.0),
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

impl Default for ZeroCrossConfig {
    fn default() -> Self {
        Self {
            hysteresis: 0.01,
            max_frequency: Frequency::from_hz(1000.0),
        }
    }
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            droop: ONSET_DROOP,
            hysteresis: ONSET_HYSTERESIS,
        }
    }
}

impl Default for OnsetConfig {
    fn default() -> Self {
        Self {
            min_period: Period::from_secs(0.1),
        }
    }
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            attack: Period::from_secs(0.001),
            release: Period::from_secs(0.1),
        }
    }
}

fn check_frequency(freq: Frequency) -> Result<()> {
    if freq.as_hz() > 0.0 && freq.as_hz().is_finite() {
        Ok(())
    } else {
        Err(SfxError::InvalidFrequency(freq.as_hz()))
    }
}

fn check_period(period: Period) -> Result<()> {
    // Zero is allowed: it disables a refractory period
    if period.as_secs() >= 0.0 && period.as_secs().is_finite() {
        Ok(())
    } else {
        Err(SfxError::InvalidPeriod(period.as_secs()))
    }
}

fn check_unit_range(name: &str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SfxError::Config(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )))
    }
}

fn check_non_negative(name: &str, value: f32) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(SfxError::Config(format!(
            "{} must not be negative, got {}",
            name, value
        )))
    }
}

impl SfxConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// Check every documented precondition of the components
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(SfxError::InvalidSampleRate(self.sample_rate));
        }
        let nyquist = f64::from(self.sample_rate) / 2.0;

        let base = self.smoother.base_frequency;
        check_frequency(base)?;
        if base.as_hz() >= nyquist {
            return Err(SfxError::AboveNyquist {
                frequency: base.as_hz(),
                sample_rate: self.sample_rate,
            });
        }
        if base.as_hz() > nyquist / 2.0 {
            log::warn!(
                "Smoother base {} is close to Nyquist; the base coefficient will exceed 1",
                base
            );
        }
        check_unit_range("smoother.sensitivity", self.smoother.sensitivity)?;

        check_non_negative("zero_cross.hysteresis", self.zero_cross.hysteresis)?;
        check_frequency(self.zero_cross.max_frequency)?;
        if self.zero_cross.max_frequency.period().samples(self.sample_rate) == 0 {
            log::warn!(
                "Zero-crossing max frequency {} is above the sample rate; no refractory period",
                self.zero_cross.max_frequency
            );
        }

        check_unit_range("peak.droop", self.peak.droop)?;
        check_non_negative("peak.hysteresis", self.peak.hysteresis)?;

        check_period(self.onset.min_period)?;
        check_period(self.envelope.attack)?;
        check_period(self.envelope.release)?;

        Ok(())
    }

    pub fn smoother(&self) -> DynamicSmoother {
        DynamicSmoother::with_sensitivity(
            self.smoother.base_frequency,
            self.smoother.sensitivity,
            self.sample_rate,
        )
    }

    pub fn zero_crossing_detector(&self) -> ZeroCrossingDetector {
        ZeroCrossingDetector::new(
            self.zero_cross.hysteresis,
            self.zero_cross.max_frequency,
            self.sample_rate,
        )
    }

    pub fn peak_detector(&self) -> PeakDetector {
        PeakDetector::new(self.peak.droop, self.peak.hysteresis)
    }

    pub fn onset_detector(&self) -> OnsetDetector {
        OnsetDetector::new(self.onset.min_period, self.sample_rate)
    }

    pub fn envelope_follower(&self) -> EnvelopeFollower {
        EnvelopeFollower::new(self.envelope.attack, self.envelope.release, self.sample_rate)
    }
}
