use super::{FilterReport, Formatter};

/// One row per master tap: index, phase, tap value, impulse response sample
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, report: &FilterReport) -> String {
        report
            .taps
            .iter()
            .zip(&report.impulse_response)
            .enumerate()
            .map(|(i, (tap, response))| {
                format!("{},{},{:.8},{:.8}", i, i % report.rate, tap, response)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn header(&self) -> Option<&'static str> {
        Some("index,phase,tap,impulse_response")
    }
}
