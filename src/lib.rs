//! Per-sample signal conditioning primitives for real-time audio analysis.
//!
//! Every component is a small streaming transformer called once per input
//! sample. Calls never block, allocate or log, and results depend only on the
//! inputs and the order of previous calls.

pub mod config;
pub mod constants;
pub mod error;
pub mod signal_processing;
pub mod units;
pub mod wav;

pub use config::SfxConfig;
pub use error::{Result, SfxError};
pub use units::{Frequency, Period};
pub use wav::{read_mono, save_wav};
