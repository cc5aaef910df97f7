use anyhow::{Context, Result};
use clap::Parser;
use rolling_stats::Stats;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use resprate::config::{CountingMethod, EstimatorConfig, FrequencyBand};
use resprate::rate::estimate_rate;
use resprate::simulation::{NoiseConfig, apply_noise, respiratory_signal, with_cardiac_artifact};

#[derive(Parser, Debug)]
#[command(name = "noise_sweep")]
#[command(about = "Sweep noise severity against rate-estimation accuracy")]
struct Args {
    /// TOML noise configuration file (fixed noise floor added to every trial)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Breathing rates to test, breaths per minute (comma-separated)
    #[arg(short, long, default_value = "8,12,15,20,25")]
    rates: String,

    /// Capture duration in seconds
    #[arg(short, long, default_value_t = 60.0)]
    duration: f64,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 125.0)]
    sample_rate: f64,

    /// Passband (e.g. "0.1-0.5")
    #[arg(long, default_value = "0.1-0.5")]
    band: FrequencyBand,

    /// Butterworth filter order
    #[arg(long, default_value_t = 5)]
    order: usize,

    /// Number of trials per sweep point
    #[arg(short, long, default_value_t = 10)]
    trials: u64,

    /// Base seed for reproducibility
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Cardiac artifact amplitude relative to the unit trace (0 disables)
    #[arg(long, default_value_t = 0.3)]
    cardiac_amplitude: f64,
}

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    awgn: Option<AwgnSection>,
    mains: Option<MainsSection>,
    motion: Option<MotionSection>,
}

#[derive(Debug, Deserialize)]
struct AwgnSection {
    snr_db: f64,
}

#[derive(Debug, Deserialize)]
struct MainsSection {
    frequency_hz: f64,
    amplitude: f64,
}

#[derive(Debug, Deserialize)]
struct MotionSection {
    rate_hz: f64,
    amplitude: f64,
    duration_samples: usize,
}

fn load_toml_config(path: &PathBuf) -> Result<TomlConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn base_noise_config(toml: &TomlConfig, seed: u64) -> NoiseConfig {
    let mut config = NoiseConfig::default().with_seed(seed);

    if let Some(ref awgn) = toml.awgn {
        config = config.with_awgn(awgn.snr_db);
    }
    if let Some(ref mains) = toml.mains {
        config = config.with_mains_hum(mains.frequency_hz, mains.amplitude);
    }
    if let Some(ref motion) = toml.motion {
        config = config.with_motion_bursts(motion.rate_hz, motion.amplitude, motion.duration_samples);
    }

    config
}

struct SweepPoint {
    trials: u64,
    failures: u64,
    error_bpm: Stats<f64>,
}

impl SweepPoint {
    fn new() -> Self {
        Self {
            trials: 0,
            failures: 0,
            error_bpm: Stats::new(),
        }
    }

    fn record(&mut self, estimated_hz: Result<f64, resprate::RateError>, true_bpm: f64) {
        self.trials += 1;
        match estimated_hz {
            Ok(hz) => self.error_bpm.update((hz * 60.0 - true_bpm).abs()),
            Err(_) => self.failures += 1,
        }
    }
}

fn parse_rates(s: &str) -> Result<Vec<f64>> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid rate: {}", part))
        })
        .collect()
}

fn run_point(
    args: &Args,
    rates: &[f64],
    noise: impl Fn(u64) -> NoiseConfig,
    method: CountingMethod,
) -> SweepPoint {
    let config = EstimatorConfig {
        band: args.band,
        filter_order: args.order,
        method,
    };

    let mut point = SweepPoint::new();
    for (rate_idx, &bpm) in rates.iter().enumerate() {
        let mut clean = respiratory_signal(args.duration, args.sample_rate, bpm);
        if args.cardiac_amplitude > 0.0 {
            clean = with_cardiac_artifact(&clean, args.sample_rate, 60.0, args.cardiac_amplitude);
        }

        for trial in 0..args.trials {
            let seed = args.seed + (rate_idx as u64) * 1000 + trial;
            let noisy = apply_noise(&clean, &noise(seed), args.sample_rate);
            let result = estimate_rate(&noisy, args.sample_rate, &config);
            point.record(result.map(|e| e.frequency_hz), bpm);
        }
    }
    point
}

fn print_row(sweep: &str, parameter: f64, method: CountingMethod, point: &SweepPoint) {
    let method = format!("{:?}", method).to_lowercase();
    if point.error_bpm.count > 0 {
        println!(
            "{},{},{},{},{},{:.3},{:.3}",
            sweep, parameter, method, point.trials, point.failures,
            point.error_bpm.mean, point.error_bpm.max
        );
    } else {
        println!(
            "{},{},{},{},{},,",
            sweep, parameter, method, point.trials, point.failures
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let rates = parse_rates(&args.rates)?;
    let toml_config = if let Some(ref config_path) = args.config {
        load_toml_config(config_path)?
    } else {
        TomlConfig::default()
    };

    println!("sweep,parameter,method,trials,failures,mean_err_bpm,max_err_bpm");

    // SNR sweep
    for snr_db in (0..=40).step_by(4) {
        let snr = snr_db as f64;
        for method in [CountingMethod::Threshold, CountingMethod::Adaptive] {
            let point = run_point(
                &args,
                &rates,
                |seed| base_noise_config(&toml_config, seed).with_awgn(snr),
                method,
            );
            print_row("awgn", snr, method, &point);
        }
    }

    // Mains-hum amplitude sweep
    for hum_idx in 0..=10 {
        let amplitude = hum_idx as f64 * 0.05;
        for method in [CountingMethod::Threshold, CountingMethod::Adaptive] {
            let point = run_point(
                &args,
                &rates,
                |seed| base_noise_config(&toml_config, seed).with_mains_hum(50.0, amplitude),
                method,
            );
            print_row("mains", amplitude, method, &point);
        }
    }

    // Motion-burst rate sweep
    for burst_idx in 0..=10 {
        let rate_hz = burst_idx as f64 * 0.2;
        for method in [CountingMethod::Threshold, CountingMethod::Adaptive] {
            let point = run_point(
                &args,
                &rates,
                |seed| {
                    let config = base_noise_config(&toml_config, seed);
                    if rate_hz > 0.0 {
                        config.with_motion_bursts(rate_hz, 2.0, 12)
                    } else {
                        config
                    }
                },
                method,
            );
            print_row("motion", rate_hz, method, &point);
        }
    }

    Ok(())
}
