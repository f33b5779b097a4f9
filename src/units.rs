//! Physical units used to configure the conditioning primitives.
//!
//! Frequencies and periods can be written with a unit suffix, which keeps
//! configuration files and command lines readable.
//!
//! # Parsing formats
//! - `440`, `440hz`, `440Hz` - frequency in Hz
//! - `1.5khz` - frequency in kHz
//! - `0.01`, `0.01s` - period in seconds
//! - `10ms` - period in milliseconds
//! - `500us` or `500μs` - period in microseconds
//!
//! # Example
//! ```
//! use sigcond::units::{Frequency, Period};
//!
//! let f: Frequency = "2khz".parse().unwrap();
//! let p: Period = "500us".parse().unwrap();
//! assert!((f.period().as_secs() - p.as_secs()).abs() < 1e-12);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Frequency in Hz
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(try_from = "UnitValue")]
pub struct Frequency(f64);

/// Duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(try_from = "UnitValue")]
pub struct Period(f64);

impl Frequency {
    pub const fn from_hz(hz: f64) -> Self {
        Self(hz)
    }

    pub fn as_hz(&self) -> f64 {
        self.0
    }

    pub fn period(&self) -> Period {
        Period(1.0 / self.0)
    }
}

impl Period {
    pub const fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    pub fn from_millis(ms: f64) -> Self {
        Self(ms / 1000.0)
    }

    pub fn from_micros(us: f64) -> Self {
        Self(us / 1_000_000.0)
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }

    pub fn frequency(&self) -> Frequency {
        Frequency(1.0 / self.0)
    }

    /// Number of whole samples spanned by this period at `sample_rate`
    ///
    /// The product is truncated toward zero.
    pub fn samples(&self, sample_rate: u32) -> usize {
        (self.0 * f64::from(sample_rate)) as usize
    }
}

impl From<Frequency> for Period {
    fn from(freq: Frequency) -> Self {
        freq.period()
    }
}

impl From<Period> for Frequency {
    fn from(period: Period) -> Self {
        period.frequency()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}hz", self.0)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}ms", self.0 * 1000.0)
    }
}

fn check_frequency(hz: f64) -> Result<f64, String> {
    if !hz.is_finite() || hz <= 0.0 {
        return Err("frequency must be positive".to_string());
    }
    Ok(hz)
}

// Zero is a valid period: it disables a refractory window
fn check_period(secs: f64) -> Result<f64, String> {
    if !secs.is_finite() || secs < 0.0 {
        return Err("period must not be negative".to_string());
    }
    Ok(secs)
}

fn parse_number(num: &str, original: &str, what: &str) -> Result<f64, String> {
    num.trim()
        .parse()
        .map_err(|_| format!("invalid {}: {}", what, original))
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();

        if let Some(num) = lower.strip_suffix("khz") {
            let khz = parse_number(num, s, "frequency")?;
            return Ok(Self(check_frequency(khz)? * 1000.0));
        }

        let num = lower.strip_suffix("hz").unwrap_or(&lower);
        Ok(Self(check_frequency(parse_number(num, s, "frequency")?)?))
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(num) = s.strip_suffix("us").or_else(|| s.strip_suffix("μs")) {
            let us = parse_number(num, s, "period")?;
            return Ok(Self::from_micros(check_period(us)?));
        }
        if let Some(num) = s.strip_suffix("ms") {
            return Ok(Self::from_millis(check_period(parse_number(num, s, "period")?)?));
        }

        let num = s.strip_suffix('s').unwrap_or(s);
        Ok(Self(check_period(parse_number(num, s, "period")?)?))
    }
}

/// Raw form accepted from configuration files: a bare number or a string
/// with a unit suffix.
#[derive(Deserialize)]
#[serde(untagged)]
enum UnitValue {
    Number(f64),
    Text(String),
}

impl TryFrom<UnitValue> for Frequency {
    type Error = String;

    fn try_from(value: UnitValue) -> Result<Self, Self::Error> {
        match value {
            UnitValue::Number(hz) => Ok(Self(check_frequency(hz)?)),
            UnitValue::Text(s) => s.parse(),
        }
    }
}

impl TryFrom<UnitValue> for Period {
    type Error = String;

    fn try_from(value: UnitValue) -> Result<Self, Self::Error> {
        match value {
            UnitValue::Number(secs) => Ok(Self(check_period(secs)?)),
            UnitValue::Text(s) => s.parse(),
        }
    }
}
