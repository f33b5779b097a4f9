use num_traits::PrimInt;

/// Fast 2:1 decimator with antialiasing
///
/// Each source sample is convolved with `{0.25, 0.5, 0.25}` before every
/// second sample is dropped. The convolution is folded into the decimation:
/// the last tap of one output and the first tap of the next share a single
/// carried value, so no history buffer is needed.
///
/// Works over any native integer sample type. Shifts follow the type's own
/// semantics (arithmetic for signed, logical for unsigned) with no rounding.
///
/// The carry starts at zero, so the first output includes a zero-valued
/// predecessor tap.
#[derive(Debug, Clone, Copy, Default)]
pub struct AntialiasDecimator<T> {
    carry: T,
}

impl<T: PrimInt> AntialiasDecimator<T> {
    pub fn new() -> Self {
        Self { carry: T::zero() }
    }

    /// Decimate the next pair of consecutive samples into one output sample
    ///
    /// Pairs must be supplied in stream order; skipping or reordering pairs
    /// corrupts the carried tap.
    ///
    /// # Arguments
    /// * `s1` - First (earlier) sample of the pair
    /// * `s2` - Second sample of the pair
    #[inline]
    pub fn process(&mut self, s1: T, s2: T) -> T {
        let out = self.carry + (s1 >> 1);
        self.carry = s2 >> 2;
        out + self.carry
    }
}
