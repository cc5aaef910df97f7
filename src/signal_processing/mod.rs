pub mod bandpass;
pub mod extrema;
pub mod quantile;

pub use bandpass::ZeroPhaseBandpass;
pub use extrema::{Extremum, find_local_maxima, find_local_minima, merge_extrema};
pub use quantile::{percentile, upper_quartile};

/// Mean power of a buffer (zero for an empty one).
pub fn signal_power(buffer: &[f64]) -> f64 {
    if buffer.is_empty() {
        return 0.0;
    }
    buffer.iter().map(|&x| x * x).sum::<f64>() / buffer.len() as f64
}
