mod test_signals;

use sigcond::config::SfxConfig;
use sigcond::signal_processing::{AntialiasDecimator, DynamicLowpass};

fn bits(samples: &[f32]) -> Vec<u32> {
    samples.iter().map(|s| s.to_bits()).collect()
}

/// Render every primitive over `input` with freshly built instances
fn render_all(config: &SfxConfig, input: &[f32]) -> Vec<Vec<u32>> {
    let mut smoother = config.smoother();
    let mut lowpass = DynamicLowpass::new();
    let mut zero_cross = config.zero_crossing_detector();
    let mut envelope = config.envelope_follower();
    let mut peak = config.peak_detector();
    let mut onset = config.onset_detector();
    let mut decimator = AntialiasDecimator::<i32>::new();

    let mut smoothed = Vec::new();
    let mut lowpassed = Vec::new();
    let mut states = Vec::new();
    let mut peaks = Vec::new();

    for &s in input {
        smoothed.push(smoother.process(s));
        lowpassed.push(lowpass.process(s, 0.05));
        let env = envelope.process(s);
        states.push(f32::from(u8::from(zero_cross.process(s))));
        states.push(f32::from(u8::from(peak.process(s, env))));
        states.push(f32::from(u8::from(onset.process(s, env))));
        peaks.push(onset.peak_value());
    }

    let decimated: Vec<f32> = input
        .chunks_exact(2)
        .map(|pair| {
            let a = (pair[0] * 1_000_000.0) as i32;
            let b = (pair[1] * 1_000_000.0) as i32;
            decimator.process(a, b) as f32
        })
        .collect();

    vec![
        bits(&smoothed),
        bits(&lowpassed),
        bits(&states),
        bits(&peaks),
        bits(&decimated),
    ]
}

#[test]
fn test_replay_is_bit_identical() {
    let config = SfxConfig {
        sample_rate: 16000,
        ..Default::default()
    };

    let mut input = test_signals::sine(0.6, 220.0, config.sample_rate, 8000);
    for (x, n) in input.iter_mut().zip(test_signals::noise(0.2, 8000, 42)) {
        *x += n;
    }

    let first = render_all(&config, &input);
    let second = render_all(&config, &input);

    assert_eq!(first, second);
}

#[test]
fn test_cloned_instance_continues_identically() {
    let config = SfxConfig::default();
    let input = test_signals::noise(0.5, 2000, 3);

    let mut original = config.smoother();
    for &s in &input[..1000] {
        original.process(s);
    }

    // Filters are plain values: a clone carries the full state
    let mut copy = original.clone();
    for &s in &input[1000..] {
        assert_eq!(original.process(s).to_bits(), copy.process(s).to_bits());
    }
}
