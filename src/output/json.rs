use super::{Formatter, RateReport};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, report: &RateReport) -> String {
        serde_json::to_string(report).expect("report serialization cannot fail")
    }
}
