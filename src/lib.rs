pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod rate;
pub mod signal_processing;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::{CountingMethod, EstimatorConfig, FrequencyBand};
pub use error::{RateError, Result};
pub use rate::{AdaptiveCycleCounter, RateEstimate, ThresholdCycleCounter, estimate_rate};
