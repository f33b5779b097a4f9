#![allow(dead_code)]

pub mod generate;

pub use generate::{constant, noise, peak_envelope, pulse, sine};
