/// Stateful two-level comparator
///
/// Returns `true` once `value` rises above `threshold` and keeps returning
/// `true` until `value` falls sufficiently below it. How far above and below
/// is up to the implementation.
pub trait Comparator {
    fn compare(&mut self, value: f32, threshold: f32) -> bool;
}

impl<C: Comparator + ?Sized> Comparator for &mut C {
    fn compare(&mut self, value: f32, threshold: f32) -> bool {
        (**self).compare(value, threshold)
    }
}

/// Schmitt trigger comparing a value against a moving threshold
///
/// Goes high when `value > threshold + hysteresis` and low when
/// `value < threshold - hysteresis`. Inside that band the previous output is
/// held.
#[derive(Debug, Clone, Copy)]
pub struct SchmittTrigger {
    hysteresis: f32,
    state: bool,
}

impl SchmittTrigger {
    /// # Arguments
    /// * `hysteresis` - Half-width of the dead band around the threshold
    pub fn new(hysteresis: f32) -> Self {
        Self {
            hysteresis,
            state: false,
        }
    }

    pub fn state(&self) -> bool {
        self.state
    }
}

impl Comparator for SchmittTrigger {
    #[inline]
    fn compare(&mut self, value: f32, threshold: f32) -> bool {
        if !self.state && value > threshold + self.hysteresis {
            self.state = true;
        } else if self.state && value < threshold - self.hysteresis {
            self.state = false;
        }
        self.state
    }
}
