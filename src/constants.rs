//! Fixed tuning constants shared by the conditioning primitives.

/// Default dynamic smoother sensitivity when none is supplied.
pub const DEFAULT_SENSITIVITY: f32 = 0.5;

/// Linear mapping from user sensitivity (0-1) to the bandpass modulation gain.
pub const SENSITIVITY_SCALE: f32 = 4.0;

/// Upper bound of the self-modulated smoother coefficient.
/// Keeps the two-pole cascade stable regardless of the bandpass magnitude.
pub const MAX_COEFFICIENT: f32 = 1.0;

/// Envelope attenuation used by the onset detector's peak stage.
pub const ONSET_DROOP: f32 = 0.8;

/// Comparator hysteresis used by the onset detector's peak stage.
pub const ONSET_HYSTERESIS: f32 = 0.005;
