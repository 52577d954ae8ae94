use super::{FilterReport, Formatter};

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, report: &FilterReport) -> String {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        encoded.unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
    }
}
