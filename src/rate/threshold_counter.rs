use crate::config::FrequencyBand;
use crate::constants::MIN_FILTERED_POWER;
use crate::error::{RateError, Result};
use crate::rate::RateEstimate;
use crate::signal_processing::{
    ZeroPhaseBandpass, find_local_maxima, find_local_minima, signal_power, upper_quartile,
};

/// Fraction of the maxima upper quartile used as the maxima cut level.
const MAXIMA_CUT_FRACTION: f64 = 0.2;

/// Cycle counter with static quantile thresholds
///
/// Classifies maxima against a fraction of their own upper quartile and
/// minima against zero, then counts a cycle for every consecutive pair of
/// qualifying maxima with exactly one qualifying minimum strictly between
/// them. The rate is the sample rate over the mean cycle span.
///
/// Filter design happens once in the constructor; [`estimate`] is a pure
/// function of its input, so one counter can serve concurrent callers.
///
/// [`estimate`]: ThresholdCycleCounter::estimate
pub struct ThresholdCycleCounter {
    bandpass: ZeroPhaseBandpass,
    sample_rate: f64,
}

impl ThresholdCycleCounter {
    /// Create a counter for the given passband and filter order
    ///
    /// # Errors
    /// Returns `RateError::InvalidBand` or `RateError::FilterDesign` when
    /// the pre-filter cannot be designed.
    pub fn new(band: FrequencyBand, sample_rate: f64, filter_order: usize) -> Result<Self> {
        Ok(Self {
            bandpass: ZeroPhaseBandpass::new(band, sample_rate, filter_order)?,
            sample_rate,
        })
    }

    /// Estimate the cyclic rate of a capture
    ///
    /// Returns the rate in cycles per second plus the qualifying maxima
    /// indices for diagnostics.
    ///
    /// # Errors
    /// - `RateError::EmptySignal` for a zero-length capture
    /// - `RateError::DegenerateExtrema` when the filtered capture has no
    ///   usable maxima (e.g. a constant input)
    /// - `RateError::NoCyclesFound` when no maxima pair brackets exactly
    ///   one qualifying minimum
    pub fn estimate(&self, signal: &[f64]) -> Result<RateEstimate> {
        if signal.is_empty() {
            return Err(RateError::EmptySignal);
        }

        let filtered = self.bandpass.apply(signal);
        if signal_power(&filtered) < MIN_FILTERED_POWER {
            return Err(RateError::DegenerateExtrema { survivors: 0 });
        }

        let maxima = find_local_maxima(&filtered);
        let minima = find_local_minima(&filtered);

        let maxima_values: Vec<f64> = maxima.iter().map(|&i| filtered[i]).collect();
        let cut = MAXIMA_CUT_FRACTION
            * upper_quartile(&maxima_values)
                .ok_or(RateError::DegenerateExtrema { survivors: 0 })?;

        let true_maxima: Vec<usize> = maxima.into_iter().filter(|&i| filtered[i] > cut).collect();
        let true_minima: Vec<usize> = minima.into_iter().filter(|&i| filtered[i] < 0.0).collect();

        log::debug!(
            "maxima cut {:.4}: {} maxima and {} minima qualify",
            cut,
            true_maxima.len(),
            true_minima.len()
        );

        let (total_span, cycles) = count_cycles(&true_maxima, &true_minima);
        if cycles == 0 {
            return Err(RateError::NoCyclesFound);
        }

        let mean_span = total_span as f64 / cycles as f64;
        Ok(RateEstimate {
            frequency_hz: self.sample_rate / mean_span,
            retained_extrema: true_maxima,
        })
    }
}

/// Accumulate the spans of valid cycles.
///
/// A consecutive maxima pair forms one cycle only when exactly one minimum
/// lies strictly between the two indices. The final maximum is never paired
/// past the end; an unmatched trailing maximum contributes nothing.
fn count_cycles(true_maxima: &[usize], true_minima: &[usize]) -> (usize, usize) {
    let mut total_span = 0;
    let mut cycles = 0;

    for pair in true_maxima.windows(2) {
        let between = true_minima
            .iter()
            .filter(|&&m| m > pair[0] && m < pair[1])
            .count();
        if between == 1 {
            total_span += pair[1] - pair[0];
            cycles += 1;
        }
    }

    (total_span, cycles)
}
