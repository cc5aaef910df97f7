/// Rate measurement result
///
/// Produced fresh by each counting call; carries no cross-call state.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RateEstimate {
    /// Estimated rate in cycles per second
    pub frequency_hz: f64,
    /// Sample indices of the extrema retained as significant, ascending.
    /// Useful for plotting the survivors over the filtered trace.
    pub retained_extrema: Vec<usize>,
}

impl RateEstimate {
    /// The rate expressed per minute (breaths/min for respiratory signals)
    pub fn cycles_per_minute(&self) -> f64 {
        self.frequency_hz * 60.0
    }
}
