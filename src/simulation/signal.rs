use std::f64::consts::PI;

/// Width of the simulated heartbeat complex in seconds
pub const CARDIAC_PULSE_WIDTH_SECS: f64 = 0.08;

/// Generate a sine wave at the given frequency
pub fn sine_wave(duration_secs: f64, sample_rate: f64, freq_hz: f64, amplitude: f64) -> Vec<f64> {
    sine_wave_with_phase(duration_secs, sample_rate, freq_hz, amplitude, 0.0)
}

/// Generate a sine wave with an initial phase in radians
///
/// A nonzero phase keeps crests off the exact midpoint between samples,
/// where the two neighbouring samples of an ideal sine are equal.
pub fn sine_wave_with_phase(
    duration_secs: f64,
    sample_rate: f64,
    freq_hz: f64,
    amplitude: f64,
    phase_radians: f64,
) -> Vec<f64> {
    let num_samples = (duration_secs * sample_rate) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            amplitude * (2.0 * PI * freq_hz * t + phase_radians).sin()
        })
        .collect()
}

/// Generate a clean respiratory-style trace at a given breathing rate
///
/// A resting adult breathes 12-20 times per minute (0.2-0.33 Hz); the
/// returned unit-amplitude sinusoid models the slow thoracic excursion a
/// chest-band or ADC capture would see.
pub fn respiratory_signal(
    duration_secs: f64,
    sample_rate: f64,
    breaths_per_minute: f64,
) -> Vec<f64> {
    sine_wave(duration_secs, sample_rate, breaths_per_minute / 60.0, 1.0)
}

/// Overlay a heartbeat artifact train on a respiratory trace
///
/// Each beat contributes a short biphasic pulse (a rough stand-in for the
/// QRS complex) at the cardiac rate, the dominant interferer riding on
/// chest-measured respiratory signals.
pub fn with_cardiac_artifact(
    signal: &[f64],
    sample_rate: f64,
    beats_per_minute: f64,
    amplitude: f64,
) -> Vec<f64> {
    let beat_period = sample_rate * 60.0 / beats_per_minute;
    let pulse_width = (CARDIAC_PULSE_WIDTH_SECS * sample_rate).max(2.0);

    signal
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let phase = i as f64 % beat_period;
            if phase < pulse_width {
                // One full sine cycle across the pulse width: sharp
                // upstroke then undershoot, zero net area.
                let w = phase / pulse_width;
                x + amplitude * (2.0 * PI * w).sin()
            } else {
                x
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_wave_length_and_amplitude() {
        let signal = sine_wave(10.0, 125.0, 0.2, 0.3);
        assert_eq!(signal.len(), 1250);

        let max = signal.iter().fold(0.0f64, |a, &b| a.max(b));
        assert!((max - 0.3).abs() < 0.01);
    }

    #[test]
    fn test_respiratory_signal_frequency() {
        // 12 breaths/min = 0.2 Hz: one full period every 5 seconds
        let signal = respiratory_signal(10.0, 125.0, 12.0);

        let quarter = &signal[0..313];
        let max = quarter.iter().fold(0.0f64, |a, &b| a.max(b));
        assert!((max - 1.0).abs() < 0.01, "crest expected in first quarter");
    }

    #[test]
    fn test_cardiac_artifact_is_additive() {
        let base = respiratory_signal(10.0, 125.0, 15.0);
        let with_beats = with_cardiac_artifact(&base, 125.0, 60.0, 0.5);

        assert_eq!(with_beats.len(), base.len());
        let delta: f64 = with_beats
            .iter()
            .zip(base.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        assert!(delta > 0.0, "artifact should modify the trace");
    }
}
