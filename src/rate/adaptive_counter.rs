use crate::config::FrequencyBand;
use crate::constants::MIN_FILTERED_POWER;
use crate::error::{RateError, Result};
use crate::rate::RateEstimate;
use crate::signal_processing::{
    Extremum, ZeroPhaseBandpass, find_local_maxima, find_local_minima, merge_extrema,
    signal_power, upper_quartile,
};

/// Fraction of the adjacent-difference upper quartile used as the
/// significance cut.
const DIFF_CUT_FRACTION: f64 = 0.3;

/// Cycle counter with adaptive extrema reduction
///
/// Merges maxima and minima into one index-ordered sequence and repeatedly
/// collapses the adjacent pair with the smallest amplitude swing until
/// every remaining swing clears a quantile-derived cut. The survivors are
/// the significant alternating extrema; their mean spacing is half a cycle.
pub struct AdaptiveCycleCounter {
    bandpass: ZeroPhaseBandpass,
    sample_rate: f64,
}

impl AdaptiveCycleCounter {
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
    /// Returns the rate in cycles per second plus the surviving extrema
    /// indices for diagnostics.
    ///
    /// # Errors
    /// - `RateError::EmptySignal` for a zero-length capture
    /// - `RateError::DegenerateExtrema` when fewer than two extrema survive
    ///   reduction (including the no-extrema flat-signal case)
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
        let mut extrema = merge_extrema(&filtered, &maxima, &minima);

        let diffs = adjacent_differences(&extrema);
        let cut = DIFF_CUT_FRACTION
            * upper_quartile(&diffs).ok_or(RateError::DegenerateExtrema {
                survivors: extrema.len(),
            })?;

        let before = extrema.len();
        reduce_insignificant(&mut extrema, cut);
        log::debug!(
            "difference cut {:.4}: {} of {} extrema survive",
            cut,
            extrema.len(),
            before
        );
        if extrema.len() < before / 2 {
            log::warn!(
                "{} of {} extrema collapsed as noise; capture may be too noisy or the band too wide",
                before - extrema.len(),
                before
            );
        }

        if extrema.len() < 2 {
            return Err(RateError::DegenerateExtrema {
                survivors: extrema.len(),
            });
        }

        let retained: Vec<usize> = extrema.iter().map(|e| e.index).collect();
        let total_span: usize = retained.windows(2).map(|w| w[1] - w[0]).sum();

        // Adjacent survivors are half a cycle apart. An odd trailing
        // extremum is dropped from the count so half-cycles pair evenly.
        let half_swings = extrema.len() & !1;
        let mean_half_span = total_span as f64 / half_swings as f64;

        Ok(RateEstimate {
            frequency_hz: self.sample_rate / (2.0 * mean_half_span),
            retained_extrema: retained,
        })
    }
}

fn adjacent_differences(extrema: &[Extremum]) -> Vec<f64> {
    extrema
        .windows(2)
        .map(|w| (w[0].value - w[1].value).abs())
        .collect()
}

/// Collapse adjacent extrema whose amplitude swing falls below `cut`.
///
/// Every pass finds the globally smallest swing (first occurrence wins
/// ties), removes both members of that adjacent pair, and rebuilds the
/// difference list from scratch, since removal changes which extrema are
/// now adjacent. Both members are removed at every position, the final
/// pair included. The sequence shrinks by two per pass, so the loop runs
/// at most `len / 2` times.
fn reduce_insignificant(extrema: &mut Vec<Extremum>, cut: f64) {
    loop {
        let diffs = adjacent_differences(extrema);
        if diffs.is_empty() {
            return;
        }

        let mut pos = 0;
        for (i, &d) in diffs.iter().enumerate() {
            if d < diffs[pos] {
                pos = i;
            }
        }

        if diffs[pos] >= cut {
            return;
        }
        extrema.drain(pos..=pos + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    // Nonzero phase keeps crests off the exact midpoint between samples,
    // where strict neighbour comparison would miss the extremum.
    fn sine(freq: f64, sample_rate: f64, num_samples: usize) -> Vec<f64> {
        (0..num_samples)
            .map(|i| (2.0 * PI * freq * i as f64 / sample_rate + 0.4).sin())
            .collect()
    }

    fn counter() -> AdaptiveCycleCounter {
        AdaptiveCycleCounter::new(FrequencyBand::new(0.1, 0.5), 10.0, 5).unwrap()
    }

    fn extrema_from(values: &[f64]) -> Vec<Extremum> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| Extremum {
                index: i * 10,
                value,
            })
            .collect()
    }

    #[test]
    fn test_sine_rate() {
        let signal = sine(0.2, 10.0, 600);
        let estimate = counter().estimate(&signal).unwrap();

        assert!(
            (estimate.frequency_hz - 0.2).abs() < 0.02,
            "expected ~0.2 Hz, got {}",
            estimate.frequency_hz
        );
        // 12 periods in the capture, two extrema per period
        assert!(estimate.retained_extrema.len() >= 20);
    }

    #[test]
    fn test_empty_signal() {
        assert!(matches!(
            counter().estimate(&[]),
            Err(RateError::EmptySignal)
        ));
    }

    #[test]
    fn test_flat_signal() {
        let signal = vec![-1.2; 600];
        assert!(matches!(
            counter().estimate(&signal),
            Err(RateError::DegenerateExtrema { .. })
        ));
    }

    #[test]
    fn test_idempotent() {
        let signal = sine(0.15, 10.0, 600);
        let counter = counter();

        let first = counter.estimate(&signal).unwrap();
        let second = counter.estimate(&signal).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reduction_removes_noise_wiggle() {
        // A small min/max wiggle (0.2, 0.25) riding on the descent between
        // two full swings collapses; the full swings survive.
        let mut extrema = extrema_from(&[1.0, 0.2, 0.25, -1.0, 1.0]);
        reduce_insignificant(&mut extrema, 0.5);

        let values: Vec<f64> = extrema.iter().map(|e| e.value).collect();
        assert_eq!(values, vec![1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_reduction_stops_at_cut() {
        let mut extrema = extrema_from(&[1.0, -1.0, 1.0, -1.0]);
        reduce_insignificant(&mut extrema, 0.5);
        assert_eq!(extrema.len(), 4);
    }

    #[test]
    fn test_reduction_tie_breaks_on_first_occurrence() {
        // Overlapping tied pairs: removing the first pair leaves 5.4,
        // removing the second would leave 5.0.
        let mut extrema = extrema_from(&[5.0, 5.2, 5.4]);
        reduce_insignificant(&mut extrema, 0.5);

        let values: Vec<f64> = extrema.iter().map(|e| e.value).collect();
        assert_eq!(values, vec![5.4]);
    }

    #[test]
    fn test_reduction_handles_final_pair() {
        // Smallest swing is the last one; both members of the final pair
        // are removed, same as anywhere else.
        let mut extrema = extrema_from(&[1.0, -1.0, -0.95]);
        reduce_insignificant(&mut extrema, 0.5);

        let values: Vec<f64> = extrema.iter().map(|e| e.value).collect();
        assert_eq!(values, vec![1.0]);
    }

    #[test]
    fn test_reduction_terminates_within_half_length() {
        // Everything below the cut: the sequence must drain in len/2 steps
        // rather than loop.
        let values: Vec<f64> = (0..64).map(|i| (i % 2) as f64 * 0.01).collect();
        let mut extrema = extrema_from(&values);
        reduce_insignificant(&mut extrema, 1.0);
        assert!(extrema.len() <= 1);
    }

    #[test]
    fn test_degenerate_after_reduction() {
        // In-band content so weak next to the dominant swing that every
        // neighbouring pair collapses is reported, not divided by.
        let mut extrema = extrema_from(&[0.01, 0.02, 0.01, 0.02, 5.0]);
        let diffs = adjacent_differences(&extrema);
        let cut = DIFF_CUT_FRACTION * upper_quartile(&diffs).unwrap();
        reduce_insignificant(&mut extrema, cut);
        assert!(extrema.len() < 2);
    }
}
