use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use sigcond::config::SfxConfig;
use sigcond::signal_processing::{AntialiasDecimator, DynamicLowpass};
use sigcond::units::{Frequency, Period};
use sigcond::{read_mono, save_wav};

#[derive(Parser, Debug)]
#[command(name = "sfx_render")]
#[command(about = "Run a signal conditioning primitive over a WAV file", long_about = None)]
struct Args {
    /// Input WAV file (first channel is used)
    input: PathBuf,

    /// Output WAV file for the rendered signal
    #[arg(short, long)]
    output: PathBuf,

    /// Primitive to run
    #[arg(short, long, value_enum, default_value = "smooth")]
    mode: Mode,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Summary format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Smoother base frequency (e.g., "1000", "2khz")
    #[arg(long)]
    base_frequency: Option<Frequency>,

    /// Smoother sensitivity (0-1)
    #[arg(long)]
    sensitivity: Option<f32>,

    /// Zero-crossing hysteresis
    #[arg(long)]
    hysteresis: Option<f32>,

    /// Zero-crossing maximum frequency (e.g., "1500hz")
    #[arg(long)]
    max_frequency: Option<Frequency>,

    /// Onset refractory period (e.g., "100ms")
    #[arg(long)]
    min_period: Option<Period>,

    /// Peak detector envelope droop (0-1)
    #[arg(long)]
    droop: Option<f32>,

    /// Fixed coefficient for the lowpass mode (0-1)
    #[arg(long, default_value_t = 0.01)]
    coefficient: f32,

    /// Envelope level treated as silence in onset mode; the recorded onset
    /// peak is reset while the envelope is below it (0 disables)
    #[arg(long, default_value_t = 0.001)]
    silence: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
enum Mode {
    /// Dynamic smoother
    Smooth,
    /// One-pole lowpass with a fixed coefficient
    Lowpass,
    /// Zero-crossing detector state (0/1)
    ZeroCross,
    /// Peak detector state (0/1)
    Peak,
    /// Onset detector state (0/1), peak reset whenever the envelope falls
    /// below --silence
    Onset,
    /// 2:1 antialiasing decimation through 16-bit integers
    Decimate,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct OnsetEvent {
    sample: usize,
    time_secs: f64,
    peak: f32,
}

#[derive(Debug, Serialize)]
struct Summary {
    mode: Mode,
    input: String,
    output: String,
    input_sample_rate: u32,
    output_sample_rate: u32,
    input_samples: usize,
    output_samples: usize,
    /// Number of state changes for detector modes
    #[serde(skip_serializing_if = "Option::is_none")]
    edges: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    onsets: Vec<OnsetEvent>,
}

struct Rendered {
    samples: Vec<f32>,
    sample_rate: u32,
    edges: Option<usize>,
    onsets: Vec<OnsetEvent>,
}

fn as_level(state: bool) -> f32 {
    if state { 1.0 } else { 0.0 }
}

fn count_edges(states: &[f32]) -> usize {
    states.windows(2).filter(|w| w[0] != w[1]).count()
        + usize::from(states.first().is_some_and(|&s| s != 0.0))
}

fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}

fn render(
    mode: Mode,
    input: &[f32],
    config: &SfxConfig,
    coefficient: f32,
    silence: f32,
) -> Rendered {
    let sample_rate = config.sample_rate;
    let mut onsets = Vec::new();

    let samples: Vec<f32> = match mode {
        Mode::Smooth => {
            let mut smoother = config.smoother();
            input.iter().map(|&s| smoother.process(s)).collect()
        }
        Mode::Lowpass => {
            let mut lowpass = DynamicLowpass::new();
            input.iter().map(|&s| lowpass.process(s, coefficient)).collect()
        }
        Mode::ZeroCross => {
            let mut detector = config.zero_crossing_detector();
            input.iter().map(|&s| as_level(detector.process(s))).collect()
        }
        Mode::Peak => {
            let mut envelope = config.envelope_follower();
            let mut detector = config.peak_detector();
            input
                .iter()
                .map(|&s| {
                    let env = envelope.process(s);
                    as_level(detector.process(s, env))
                })
                .collect()
        }
        Mode::Onset => {
            let mut envelope = config.envelope_follower();
            let mut detector = config.onset_detector();
            let mut prev = false;
            input
                .iter()
                .enumerate()
                .map(|(i, &s)| {
                    let env = envelope.process(s);
                    // Each note is judged against its own peak, not the loudest so far
                    if env < silence {
                        detector.reset();
                    }
                    let state = detector.process(s, env);
                    if state && !prev {
                        onsets.push(OnsetEvent {
                            sample: i,
                            time_secs: i as f64 / f64::from(sample_rate),
                            peak: detector.peak_value(),
                        });
                    }
                    prev = state;
                    as_level(state)
                })
                .collect()
        }
        Mode::Decimate => {
            let mut decimator = AntialiasDecimator::<i16>::new();
            let scale = f32::from(i16::MAX);
            input
                .chunks_exact(2)
                .map(|pair| f32::from(decimator.process(to_i16(pair[0]), to_i16(pair[1]))) / scale)
                .collect()
        }
    };

    let edges = match mode {
        Mode::ZeroCross | Mode::Peak | Mode::Onset => Some(count_edges(&samples)),
        _ => None,
    };
    let sample_rate = if mode == Mode::Decimate {
        sample_rate / 2
    } else {
        sample_rate
    };

    Rendered {
        samples,
        sample_rate,
        edges,
        onsets,
    }
}

fn print_text(summary: &Summary) {
    println!("Mode: {:?}", summary.mode);
    println!(
        "Input:  {} ({} samples @ {} Hz)",
        summary.input, summary.input_samples, summary.input_sample_rate
    );
    println!(
        "Output: {} ({} samples @ {} Hz)",
        summary.output, summary.output_samples, summary.output_sample_rate
    );
    if let Some(edges) = summary.edges {
        println!("State changes: {}", edges);
    }
    for onset in &summary.onsets {
        println!(
            "Onset at {:>8.3}s (sample {:>8}) peak {:.4}",
            onset.time_secs, onset.sample, onset.peak
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = match &args.config {
        Some(path) => SfxConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SfxConfig::default(),
    };

    let (input, sample_rate) = read_mono(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    log::info!(
        "Read {} samples at {} Hz from {}",
        input.len(),
        sample_rate,
        args.input.display()
    );

    config.sample_rate = sample_rate;
    if let Some(base) = args.base_frequency {
        config.smoother.base_frequency = base;
    }
    if let Some(sensitivity) = args.sensitivity {
        config.smoother.sensitivity = sensitivity;
    }
    if let Some(hysteresis) = args.hysteresis {
        config.zero_cross.hysteresis = hysteresis;
    }
    if let Some(max_frequency) = args.max_frequency {
        config.zero_cross.max_frequency = max_frequency;
    }
    if let Some(min_period) = args.min_period {
        config.onset.min_period = min_period;
    }
    if let Some(droop) = args.droop {
        config.peak.droop = droop;
    }
    config.validate().context("Invalid configuration")?;

    if args.mode == Mode::Lowpass && !(0.0..=1.0).contains(&args.coefficient) {
        log::warn!(
            "Lowpass coefficient {} is outside [0, 1]; output will be unstable",
            args.coefficient
        );
    }

    if args.silence < 0.0 {
        log::warn!("Negative silence level {} never resets onsets", args.silence);
    }

    let rendered = render(args.mode, &input, &config, args.coefficient, args.silence);

    save_wav(&args.output, &rendered.samples, rendered.sample_rate)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let summary = Summary {
        mode: args.mode,
        input: args.input.display().to_string(),
        output: args.output.display().to_string(),
        input_sample_rate: sample_rate,
        output_sample_rate: rendered.sample_rate,
        input_samples: input.len(),
        output_samples: rendered.samples.len(),
        edges: rendered.edges,
        onsets: rendered.onsets,
    };

    match args.format {
        OutputFormat::Text => print_text(&summary),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_at(sample_rate: u32) -> SfxConfig {
        SfxConfig {
            sample_rate,
            ..Default::default()
        }
    }

    #[test]
    fn test_count_edges() {
        assert_eq!(count_edges(&[]), 0);
        assert_eq!(count_edges(&[0.0, 0.0, 1.0, 1.0, 0.0]), 2);
        assert_eq!(count_edges(&[1.0, 1.0, 0.0]), 2);
    }

    #[test]
    fn test_decimate_halves_rate_and_length() {
        let input = vec![0.5; 101];
        let rendered = render(Mode::Decimate, &input, &config_at(48000), 0.01, 0.001);
        assert_eq!(rendered.sample_rate, 24000);
        assert_eq!(rendered.samples.len(), 50);
        assert!(rendered.edges.is_none());
    }

    #[test]
    fn test_zero_cross_render_is_binary() {
        let input: Vec<f32> = (0..4800)
            .map(|i| (2.0 * std::f32::consts::PI * 100.0 * i as f32 / 48000.0).sin())
            .collect();
        let rendered = render(Mode::ZeroCross, &input, &config_at(48000), 0.01, 0.001);

        assert!(rendered.samples.iter().all(|&s| s == 0.0 || s == 1.0));
        assert_eq!(rendered.edges, Some(20));
    }

    #[test]
    fn test_onset_render_reports_events() {
        let sample_rate = 8000;
        let mut input = vec![0.0f32; 8000];
        // Two tone bursts half a second apart
        for start in [1000usize, 5000] {
            for i in 0..800 {
                let t = i as f32 / sample_rate as f32;
                let decay = (-t * 20.0).exp();
                input[start + i] = 0.8 * decay * (2.0 * std::f32::consts::PI * 220.0 * t).sin();
            }
        }

        let rendered = render(Mode::Onset, &input, &config_at(sample_rate), 0.01, 0.001);
        assert!(!rendered.onsets.is_empty());
        assert!(rendered.onsets[0].sample >= 1000);
        assert!(rendered.onsets[0].peak > 0.0);
    }

    /// Decaying 220 Hz burst written into `input` at `start`
    fn burst(input: &mut [f32], start: usize, amplitude: f32, sample_rate: u32) {
        for i in 0..800 {
            let t = i as f32 / sample_rate as f32;
            let decay = (-t * 20.0).exp();
            input[start + i] =
                amplitude * decay * (2.0 * std::f32::consts::PI * 220.0 * t).sin();
        }
    }

    #[test]
    fn test_onset_render_resets_peak_on_silence() {
        let sample_rate = 8000;
        let mut input = vec![0.0f32; 16000];
        // A quiet note after a loud one and a long gap
        burst(&mut input, 1000, 0.8, sample_rate);
        burst(&mut input, 11000, 0.1, sample_rate);

        let config = config_at(sample_rate);
        let with_reset = render(Mode::Onset, &input, &config, 0.01, 0.001);
        let later: Vec<usize> = with_reset
            .onsets
            .iter()
            .map(|o| o.sample)
            .filter(|&i| i >= 11000)
            .collect();
        assert!(!later.is_empty(), "quiet note missed: {:?}", later);

        let without_reset = render(Mode::Onset, &input, &config, 0.01, 0.0);
        assert!(without_reset.onsets.iter().all(|o| o.sample < 11000));
    }
}
