use super::{Formatter, RateReport};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &RateReport) -> String {
        if self.verbose {
            format!(
                "Rate: {:.3} Hz ({:>5.1}/min) [method: {}, band: {}, order: {}, extrema: {}]",
                report.frequency_hz,
                report.cycles_per_minute,
                report.method,
                report.band,
                report.filter_order,
                report.retained_extrema
            )
        } else {
            format!(
                "Rate: {:.3} Hz ({:>5.1}/min)",
                report.frequency_hz, report.cycles_per_minute
            )
        }
    }
}
