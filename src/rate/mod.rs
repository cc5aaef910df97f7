mod adaptive_counter;
mod estimate;
mod threshold_counter;

pub use adaptive_counter::AdaptiveCycleCounter;
pub use estimate::RateEstimate;
pub use threshold_counter::ThresholdCycleCounter;

use crate::config::{CountingMethod, EstimatorConfig};
use crate::error::Result;

/// Estimate the cyclic rate of a capture with the configured method.
///
/// Convenience wrapper that designs the pre-filter, runs the selected
/// counter, and returns its estimate. Callers measuring many captures with
/// the same parameters should construct a counter once instead.
pub fn estimate_rate(
    signal: &[f64],
    sample_rate: f64,
    config: &EstimatorConfig,
) -> Result<RateEstimate> {
    match config.method {
        CountingMethod::Threshold => {
            ThresholdCycleCounter::new(config.band, sample_rate, config.filter_order)?
                .estimate(signal)
        }
        CountingMethod::Adaptive => {
            AdaptiveCycleCounter::new(config.band, sample_rate, config.filter_order)?
                .estimate(signal)
        }
    }
}
