mod noise;
mod signal;

pub use noise::{
    AdditiveNoiseConfig, MainsHumConfig, MotionArtifactConfig, NoiseConfig, apply_noise,
};
pub use signal::{respiratory_signal, sine_wave, sine_wave_with_phase, with_cardiac_artifact};

pub use crate::signal_processing::signal_power;
