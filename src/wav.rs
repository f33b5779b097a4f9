use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::Result;

/// Read the first channel of a WAV file as normalized `f32` samples
///
/// Integer formats are scaled to [-1, 1]. Returns the samples and the
/// file's sample rate.
pub fn read_mono<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, u32)> {
    let mut reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let interleaved = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = 2_i64.pow(u32::from(spec.bits_per_sample) - 1) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    if channels > 1 {
        log::debug!(
            "{}: using first of {} channels",
            path.as_ref().display(),
            channels
        );
    }

    let samples = interleaved.into_iter().step_by(channels).collect();
    Ok((samples, spec.sample_rate))
}

/// Write mono 32-bit float samples to a WAV file
pub fn save_wav<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;

    for &sample in samples {
        writer.write_sample(sample)?;
    }

    writer.finalize()?;
    Ok(())
}
