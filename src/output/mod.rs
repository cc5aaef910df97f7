mod csv;
mod json;
mod text;

use chrono::Utc;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

use crate::config::{CountingMethod, FrequencyBand};
use crate::rate::RateEstimate;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// One rate measurement prepared for reporting.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RateReport {
    pub method: String,
    pub band: String,
    pub filter_order: usize,
    pub frequency_hz: f64,
    pub cycles_per_minute: f64,
    pub retained_extrema: usize,
}

impl RateReport {
    pub fn new(
        method: CountingMethod,
        band: FrequencyBand,
        filter_order: usize,
        estimate: &RateEstimate,
    ) -> Self {
        Self {
            method: format!("{:?}", method).to_lowercase(),
            band: band.to_string(),
            filter_order,
            frequency_hz: estimate.frequency_hz,
            cycles_per_minute: estimate.cycles_per_minute(),
            retained_extrema: estimate.retained_extrema.len(),
        }
    }
}

pub trait Formatter: Send {
    fn format(&self, report: &RateReport) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> RateReport {
        RateReport {
            method: "adaptive".to_string(),
            band: "0.1-0.5hz".to_string(),
            filter_order: 5,
            frequency_hz: 0.207,
            cycles_per_minute: 12.42,
            retained_extrema: 24,
        }
    }

    #[test]
    fn test_text_formatter() {
        let formatter = TextFormatter::new(false);
        let line = formatter.format(&report());
        assert!(line.contains("0.207"));
        assert!(line.contains("12.4"));
    }

    #[test]
    fn test_csv_formatter_has_header() {
        let formatter = CsvFormatter;
        assert!(formatter.header().unwrap().starts_with("ts,"));
        let line = formatter.format(&report());
        assert_eq!(line.split(',').count(), 7);
    }

    #[test]
    fn test_json_formatter_round_trips() {
        let formatter = JsonFormatter;
        let line = formatter.format(&report());
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["method"], "adaptive");
        assert_eq!(value["retained_extrema"], 24);
    }

    #[test]
    fn test_create_formatter_matches_format() {
        // Only the CSV formatter announces a header.
        assert!(create_formatter(OutputFormat::Csv, false).header().is_some());
        assert!(create_formatter(OutputFormat::Text, false).header().is_none());
        assert!(create_formatter(OutputFormat::Json, false).header().is_none());
    }

    #[test]
    fn test_report_from_estimate() {
        let estimate = crate::rate::RateEstimate {
            frequency_hz: 0.25,
            retained_extrema: vec![10, 30, 50],
        };
        let report = RateReport::new(
            CountingMethod::Threshold,
            FrequencyBand::respiratory_narrow(),
            5,
            &estimate,
        );

        assert_eq!(report.method, "threshold");
        assert_eq!(report.band, "0.1-0.5hz");
        assert!((report.cycles_per_minute - 15.0).abs() < 1e-9);
        assert_eq!(report.retained_extrema, 3);
    }
}
