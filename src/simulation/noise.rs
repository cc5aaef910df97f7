use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

use crate::signal_processing::signal_power;

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct NoiseConfig {
    pub seed: Option<u64>,
    pub additive: Option<AdditiveNoiseConfig>,
    pub mains_hum: Option<MainsHumConfig>,
    pub motion: Option<MotionArtifactConfig>,
}

impl NoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_awgn(mut self, snr_db: f64) -> Self {
        self.additive = Some(AdditiveNoiseConfig { snr_db });
        self
    }

    pub fn with_mains_hum(mut self, frequency_hz: f64, amplitude: f64) -> Self {
        self.mains_hum = Some(MainsHumConfig {
            frequency_hz,
            amplitude,
        });
        self
    }

    pub fn with_motion_bursts(mut self, rate_hz: f64, amplitude: f64, duration_samples: usize) -> Self {
        self.motion = Some(MotionArtifactConfig {
            rate_hz,
            amplitude,
            duration_samples,
        });
        self
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct AdditiveNoiseConfig {
    pub snr_db: f64,
}

/// Powerline interference coupled into the capture (50 Hz in the source
/// material; 60 Hz on North American mains).
#[derive(Clone, Debug, serde::Deserialize)]
pub struct MainsHumConfig {
    pub frequency_hz: f64,
    pub amplitude: f64,
}

/// Short erratic-movement bursts at a mean rate.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct MotionArtifactConfig {
    pub rate_hz: f64,
    pub amplitude: f64,
    pub duration_samples: usize,
}

/// Apply the configured noise sources to a clean signal
///
/// Returns a noisy copy; the input is untouched. With a seed set the
/// result is fully reproducible.
pub fn apply_noise(signal: &[f64], config: &NoiseConfig, sample_rate: f64) -> Vec<f64> {
    let mut noisy = signal.to_vec();
    let mut rng = create_rng(config.seed);

    if let Some(ref additive) = config.additive {
        apply_additive_noise(&mut noisy, additive, &mut rng);
    }

    if let Some(ref hum) = config.mains_hum {
        apply_mains_hum(&mut noisy, hum, sample_rate);
    }

    if let Some(ref motion) = config.motion {
        apply_motion_bursts(&mut noisy, motion, sample_rate, &mut rng);
    }

    noisy
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

fn apply_additive_noise(signal: &mut [f64], config: &AdditiveNoiseConfig, rng: &mut ChaCha8Rng) {
    let sig_power = signal_power(signal);
    if sig_power == 0.0 {
        return;
    }

    let snr_linear = 10.0_f64.powf(config.snr_db / 10.0);
    let noise_std = (sig_power / snr_linear).sqrt();

    let normal = Normal::new(0.0, noise_std).unwrap();

    for sample in signal.iter_mut() {
        *sample += normal.sample(rng);
    }
}

fn apply_mains_hum(signal: &mut [f64], config: &MainsHumConfig, sample_rate: f64) {
    for (i, sample) in signal.iter_mut().enumerate() {
        let t = i as f64 / sample_rate;
        *sample += config.amplitude * (2.0 * PI * config.frequency_hz * t).sin();
    }
}

fn apply_motion_bursts(
    signal: &mut [f64],
    config: &MotionArtifactConfig,
    sample_rate: f64,
    rng: &mut ChaCha8Rng,
) {
    let n = signal.len();
    if n == 0 || config.rate_hz <= 0.0 {
        return;
    }

    let avg_samples_between_bursts = sample_rate / config.rate_hz;

    let mut pos = 0usize;
    loop {
        let interval = (rng.random::<f64>() * 2.0 * avg_samples_between_bursts) as usize;
        pos += interval.max(1);

        if pos >= n {
            break;
        }

        let sign = if rng.random::<bool>() { 1.0 } else { -1.0 };
        let end = (pos + config.duration_samples).min(n);

        for sample in signal[pos..end].iter_mut() {
            *sample += sign * config.amplitude;
        }
    }
}
