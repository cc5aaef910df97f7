//! Numeric constants for estimation stability
//!
//! Thresholds separating real signal content from numeric dust, so the
//! counters fail explicitly instead of measuring rounding noise.

/// Minimum mean power of the filtered signal for extrema analysis.
/// A capture whose filtered power falls below this is numerically silent
/// (e.g. a constant input, which the bandpass rejects entirely) and is
/// reported as having no usable extrema.
pub const MIN_FILTERED_POWER: f64 = 1e-10;
