//! Configuration for the rate estimator.
//!
//! The frequency band is always caller-supplied; two presets cover the
//! historical choices for respiratory analysis:
//!
//! ```
//! use resprate::config::FrequencyBand;
//!
//! let narrow = FrequencyBand::respiratory_narrow(); // 0.1-0.5 Hz
//! let wide = FrequencyBand::respiratory_wide();     // 0.5-5 Hz
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{RateError, Result};

/// Passband for the zero-phase pre-filter.
///
/// # Parsing formats
/// - `0.1-0.5` - low and high cutoff in Hz
/// - `0.1-0.5hz` or `0.1-0.5Hz` - same, explicit unit
///
/// # Example
/// ```
/// use resprate::config::FrequencyBand;
///
/// let band: FrequencyBand = "0.1-0.5hz".parse().unwrap();
/// assert!((band.low_hz - 0.1).abs() < 1e-6);
/// assert!((band.high_hz - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    /// Lower cutoff frequency in Hz
    pub low_hz: f64,
    /// Upper cutoff frequency in Hz
    pub high_hz: f64,
}

impl FrequencyBand {
    pub fn new(low_hz: f64, high_hz: f64) -> Self {
        Self { low_hz, high_hz }
    }

    /// Resting-adult respiratory band, 0.1-0.5 Hz (6-30 cycles/min)
    pub fn respiratory_narrow() -> Self {
        Self::new(0.1, 0.5)
    }

    /// Wide band for faster cyclic signals, 0.5-5 Hz
    pub fn respiratory_wide() -> Self {
        Self::new(0.5, 5.0)
    }

    /// Check the band against the Nyquist limit for a sample rate
    ///
    /// # Errors
    /// Returns `RateError::InvalidBand` if `low >= high` or either cutoff
    /// lies outside (0, sample_rate / 2).
    pub fn validate(&self, sample_rate: f64) -> Result<()> {
        let nyquist_hz = sample_rate / 2.0;
        if self.low_hz <= 0.0
            || self.high_hz <= self.low_hz
            || self.high_hz >= nyquist_hz
        {
            return Err(RateError::InvalidBand {
                low_hz: self.low_hz,
                high_hz: self.high_hz,
                nyquist_hz,
            });
        }
        Ok(())
    }
}

impl Default for FrequencyBand {
    fn default() -> Self {
        Self::respiratory_narrow()
    }
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}hz", self.low_hz, self.high_hz)
    }
}

impl FromStr for FrequencyBand {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();

        let num = s
            .strip_suffix("hz")
            .or_else(|| s.strip_suffix("Hz"))
            .or_else(|| s.strip_suffix("HZ"))
            .unwrap_or(s);

        let (low, high) = num
            .split_once('-')
            .ok_or_else(|| format!("invalid band: {} (expected LOW-HIGH)", s))?;

        let low_hz: f64 = low
            .trim()
            .parse()
            .map_err(|_| format!("invalid lower cutoff: {}", low))?;
        let high_hz: f64 = high
            .trim()
            .parse()
            .map_err(|_| format!("invalid upper cutoff: {}", high))?;

        if low_hz <= 0.0 || high_hz <= low_hz {
            return Err(format!("band must satisfy 0 < low < high, got {}", s));
        }

        Ok(Self::new(low_hz, high_hz))
    }
}

/// Cycle counting method
///
/// Both methods share the filter-then-find-extrema pipeline and differ in
/// how they decide which extrema are significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CountingMethod {
    /// Static quantile thresholds on maxima/minima, one-minimum-between pairing
    Threshold,
    /// Adaptive reduction of the merged extrema sequence
    Adaptive,
}

/// Estimator configuration
///
/// # Example
/// ```
/// use resprate::config::{CountingMethod, EstimatorConfig};
///
/// let mut config = EstimatorConfig::default();
/// config.method = CountingMethod::Adaptive;
/// ```
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Passband for the zero-phase pre-filter
    pub band: FrequencyBand,
    /// Butterworth filter order (higher = steeper rolloff)
    pub filter_order: usize,
    /// Counting method to use
    pub method: CountingMethod,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            band: FrequencyBand::default(),
            filter_order: 5,
            method: CountingMethod::Threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_parse() {
        let band: FrequencyBand = "0.1-0.5".parse().unwrap();
        assert!((band.low_hz - 0.1).abs() < 1e-6);
        assert!((band.high_hz - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_band_parse_explicit_unit() {
        let band: FrequencyBand = "0.5-5hz".parse().unwrap();
        assert!((band.low_hz - 0.5).abs() < 1e-6);
        assert!((band.high_hz - 5.0).abs() < 1e-6);

        let band: FrequencyBand = "0.5-5Hz".parse().unwrap();
        assert!((band.high_hz - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_band_parse_invalid() {
        assert!("abc".parse::<FrequencyBand>().is_err());
        assert!("0.5".parse::<FrequencyBand>().is_err());
        assert!("0.5-0.1".parse::<FrequencyBand>().is_err());
        assert!("-0.1-0.5".parse::<FrequencyBand>().is_err());
    }

    #[test]
    fn test_band_validate() {
        let band = FrequencyBand::respiratory_narrow();
        assert!(band.validate(10.0).is_ok());

        // upper cutoff at or above Nyquist
        assert!(FrequencyBand::new(0.1, 5.0).validate(10.0).is_err());
        // inverted
        assert!(FrequencyBand::new(0.5, 0.1).validate(10.0).is_err());
        // non-positive lower cutoff
        assert!(FrequencyBand::new(0.0, 0.5).validate(10.0).is_err());
    }
}
