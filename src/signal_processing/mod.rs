pub mod comparator;
pub mod decimator;
pub mod dynamic_lowpass;
pub mod dynamic_smoother;
pub mod envelope;
pub mod onset;
pub mod peak;
pub mod zero_crossing;

pub use comparator::{Comparator, SchmittTrigger};
pub use decimator::AntialiasDecimator;
pub use dynamic_lowpass::DynamicLowpass;
pub use dynamic_smoother::DynamicSmoother;
pub use envelope::EnvelopeFollower;
pub use onset::OnsetDetector;
pub use peak::PeakDetector;
pub use zero_crossing::ZeroCrossingDetector;
