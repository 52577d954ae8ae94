use std::fmt::Write as _;

use super::{FilterReport, Formatter};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &FilterReport) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "polyfir report ({})", report.ts);
        let _ = writeln!(out, "  filter        : {}", report.filter);
        let _ = writeln!(out, "  rate          : {}", report.rate);
        let _ = writeln!(out, "  sub-length    : {}", report.sub_filter_length);
        let _ = writeln!(out, "  scale         : {}", report.scale);
        let _ = write!(out, "  dc gain       : {:.6}", report.dc_gain);

        if self.verbose && report.rate > 0 {
            for phase in 0..report.rate {
                let _ = write!(out, "\n  phase {:3}:", phase);
                for tap in report.taps.iter().skip(phase).step_by(report.rate) {
                    let _ = write!(out, " {:>11.8}", tap);
                }
            }
            let _ = write!(out, "\n  impulse response:");
            for (i, y) in report.impulse_response.iter().enumerate() {
                let _ = write!(out, "\n  {:4}: {:12.8}", i, y);
            }
        }
        out
    }
}
