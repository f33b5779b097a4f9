/// One-pole lowpass (6dB/Oct) with the coefficient supplied per sample
///
/// Computes `y += a * (s - y)`. The caller picks `a` on every call, which
/// makes this the building block for attack/release followers and other
/// smoothers whose response changes with the signal. `a` is expected in
/// [0, 1]; values outside that range are not rejected and give an unstable
/// or inverted response.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicLowpass {
    y: f32,
}

impl DynamicLowpass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the next sample with coefficient `a` and return the new value
    #[inline]
    pub fn process(&mut self, sample: f32, a: f32) -> f32 {
        self.y += a * (sample - self.y);
        self.y
    }

    /// Current value, without advancing the filter
    #[inline]
    pub fn value(&self) -> f32 {
        self.y
    }

    /// Force the current value
    pub fn set(&mut self, y: f32) {
        self.y = y;
    }
}
