mod csv;
mod json;
mod text;

use chrono::Utc;
use num_complex::Complex32;
use serde::Serialize;

use crate::interp::FirInterpolator;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Snapshot of an interpolator's coefficients and impulse response
#[derive(Debug, Clone, Serialize)]
pub struct FilterReport {
    pub ts: String,
    pub filter: String,
    pub rate: usize,
    pub sub_filter_length: usize,
    pub scale: f32,
    /// Sum of the master taps times the scale (DC gain of the output stream)
    pub dc_gain: f32,
    pub taps: Vec<f32>,
    /// Real part of the response to a unit impulse followed by
    /// `sub_filter_length - 1` zeros
    pub impulse_response: Vec<f32>,
}

impl FilterReport {
    /// Build a report from a copy of `interp`, leaving the original untouched
    pub fn new(interp: &FirInterpolator, filter: impl Into<String>) -> Self {
        let mut probe = interp.clone();
        probe.reset();

        let rate = probe.rate();
        let len = probe.sub_filter_length();
        let mut input = vec![Complex32::new(0.0, 0.0); len];
        input[0] = Complex32::new(1.0, 0.0);
        let mut output = vec![Complex32::new(0.0, 0.0); len * rate];
        probe.execute_block(&input, &mut output);

        Self {
            ts: iso8601_timestamp(),
            filter: filter.into(),
            rate,
            sub_filter_length: len,
            scale: probe.scale(),
            dc_gain: probe.coefficients().iter().sum::<f32>() * probe.scale(),
            taps: probe.coefficients().to_vec(),
            impulse_response: output.iter().map(|y| y.re).collect(),
        }
    }
}

pub trait Formatter: Send {
    fn format(&self, report: &FilterReport) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter::new(verbose)),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
