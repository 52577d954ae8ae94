//! Injectable logging context
//!
//! Library code logs through the `log` facade. Applications that want
//! several destinations with independent thresholds, or per-severity event
//! counts, build a [`Logger`] and either pass it around explicitly or
//! install it once as the `log` backend.

mod logger;
mod severity;
mod sink;

pub use logger::{Logger, log_with};
pub use severity::Severity;
pub use sink::{CallbackSink, ConsoleSink, LogEvent, LogSink, WriterSink};
