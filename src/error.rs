use thiserror::Error;

#[derive(Error, Debug)]
pub enum SfxError {
    #[error("Sample rate must be positive, got {0}")]
    InvalidSampleRate(u32),

    #[error("Frequency must be positive, got {0} Hz")]
    InvalidFrequency(f64),

    #[error("Period must be positive, got {0} s")]
    InvalidPeriod(f64),

    #[error("Base frequency {frequency:.1} Hz is at or above Nyquist for {sample_rate} sps")]
    AboveNyquist { frequency: f64, sample_rate: u32 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SfxError>;
