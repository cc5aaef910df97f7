use thiserror::Error;

#[derive(Error, Debug)]
pub enum RateError {
    #[error(
        "Invalid frequency band: {low_hz}-{high_hz} Hz (need 0 < low < high < {nyquist_hz} Hz)"
    )]
    InvalidBand {
        low_hz: f64,
        high_hz: f64,
        nyquist_hz: f64,
    },

    #[error("Empty signal")]
    EmptySignal,

    #[error("No qualifying cycles found after filtering and thresholding")]
    NoCyclesFound,

    #[error("Degenerate extrema: {survivors} survived reduction, need at least 2")]
    DegenerateExtrema { survivors: usize },

    #[error("Filter design failed: {0}")]
    FilterDesign(String),
}

pub type Result<T> = std::result::Result<T, RateError>;
