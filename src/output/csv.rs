use super::{Formatter, RateReport, iso8601_timestamp};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, report: &RateReport) -> String {
        format!(
            "{},{},{},{},{:.4},{:.2},{}",
            iso8601_timestamp(),
            report.method,
            report.band,
            report.filter_order,
            report.frequency_hz,
            report.cycles_per_minute,
            report.retained_extrema
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("ts,method,band,order,frequency_hz,cycles_per_minute,retained_extrema")
    }
}
