use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Local;
use chrono::format::{Item, StrftimeItems};

use crate::constants::{DEFAULT_LOG_TIME_FORMAT, MAX_LOG_SINKS};
use crate::error::{DspError, Result};
use crate::logging::{CallbackSink, ConsoleSink, LogEvent, LogSink, Severity};

struct SinkEntry {
    sink: Box<dyn LogSink>,
    level: Severity,
}

struct LoggerState {
    level: Severity,
    time_format: String,
    sinks: Vec<SinkEntry>,
}

impl Default for LoggerState {
    fn default() -> Self {
        Self {
            level: Severity::Trace,
            time_format: DEFAULT_LOG_TIME_FORMAT.to_string(),
            sinks: Vec::new(),
        }
    }
}

/// Leveled log registry with multiple sinks and per-severity counters
///
/// An event below the logger's level is dropped outright. Accepted events
/// are counted, timestamped once and then offered to each sink whose own
/// minimum severity they meet. Sink failures are ignored.
///
/// A `Logger` is an ordinary value and can be passed wherever diagnostics
/// are wanted; [`install`](Logger::install) additionally makes it the
/// process-wide `log` backend.
///
/// Sinks must not log through the logger that is calling them.
///
/// # Example
/// ```
/// use polyfir::logging::{Logger, Severity};
///
/// let logger = Logger::new();
/// logger.add_callback(|_, _| {}, Severity::Warn).unwrap();
/// logger.log(Severity::Info, "demo", None, None, format_args!("ignored by sink"));
/// assert_eq!(logger.count(Severity::Info), 1);
/// ```
pub struct Logger {
    state: Mutex<LoggerState>,
    counts: [AtomicU64; Severity::COUNT],
}

impl Logger {
    /// Logger accepting every severity, with no sinks
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LoggerState::default()),
            counts: Default::default(),
        }
    }

    /// Logger with a single stderr sink
    pub fn with_console(level: Severity, color: bool) -> Self {
        let logger = Self::new();
        logger.set_level(level);
        // a fresh logger always has room for one sink
        let _ = logger.add_sink(ConsoleSink::new(color), level);
        logger
    }

    fn state(&self) -> MutexGuard<'_, LoggerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_level(&self, level: Severity) {
        self.state().level = level;
    }

    pub fn level(&self) -> Severity {
        self.state().level
    }

    /// Set the strftime format used for event timestamps
    ///
    /// # Errors
    /// Returns `DspError::Logging` if the format string is invalid.
    pub fn set_time_format(&self, format: &str) -> Result<()> {
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(DspError::Logging(format!("invalid time format: {}", format)));
        }
        self.state().time_format = format.to_string();
        Ok(())
    }

    pub fn time_format(&self) -> String {
        self.state().time_format.clone()
    }

    /// Register a sink receiving events at or above `level`
    ///
    /// # Errors
    /// Returns `DspError::Logging` once the sink table is full.
    pub fn add_sink<S: LogSink + 'static>(&self, sink: S, level: Severity) -> Result<()> {
        let mut state = self.state();
        if state.sinks.len() >= MAX_LOG_SINKS {
            return Err(DspError::Logging(format!(
                "sink limit of {} reached",
                MAX_LOG_SINKS
            )));
        }
        state.sinks.push(SinkEntry {
            sink: Box::new(sink),
            level,
        });
        Ok(())
    }

    /// Register a closure as a sink
    pub fn add_callback<F>(&self, callback: F, level: Severity) -> Result<()>
    where
        F: FnMut(&LogEvent<'_>, &str) + Send + 'static,
    {
        self.add_sink(CallbackSink::new(callback), level)
    }

    pub fn num_sinks(&self) -> usize {
        self.state().sinks.len()
    }

    /// Number of accepted events of the given severity
    pub fn count(&self, severity: Severity) -> u64 {
        self.counts[severity.index()].load(Ordering::Relaxed)
    }

    /// Restore defaults: level, time format, no sinks, zeroed counters
    pub fn reset(&self) {
        *self.state() = LoggerState::default();
        for count in &self.counts {
            count.store(0, Ordering::Relaxed);
        }
    }

    /// Record one event
    pub fn log(
        &self,
        severity: Severity,
        target: &str,
        file: Option<&str>,
        line: Option<u32>,
        args: fmt::Arguments<'_>,
    ) {
        let mut state = self.state();
        if severity < state.level {
            return;
        }
        self.counts[severity.index()].fetch_add(1, Ordering::Relaxed);

        if state.sinks.is_empty() {
            return;
        }

        let event = LogEvent {
            severity,
            target,
            file,
            line,
            timestamp: Local::now(),
            args,
        };
        let time = event.timestamp.format(&state.time_format).to_string();

        for entry in state.sinks.iter_mut() {
            if severity >= entry.level {
                let _ = entry.sink.emit(&event, &time);
            }
        }
    }

    /// Flush every sink
    pub fn flush_sinks(&self) {
        for entry in self.state().sinks.iter_mut() {
            let _ = entry.sink.flush();
        }
    }

    /// Install this logger as the process-wide `log` backend
    ///
    /// # Errors
    /// Returns `DspError::Logging` if a backend is already installed.
    pub fn install(self) -> Result<()> {
        let max_level = self.level().to_log_level().to_level_filter();
        log::set_boxed_logger(Box::new(self))
            .map_err(|e| DspError::Logging(format!("cannot install logger: {}", e)))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Severity::from(metadata.level()) >= self.level()
    }

    fn log(&self, record: &log::Record) {
        Logger::log(
            self,
            Severity::from(record.level()),
            record.target(),
            record.file(),
            record.line(),
            *record.args(),
        );
    }

    fn flush(&self) {
        self.flush_sinks();
    }
}

impl fmt::Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (level, time_format, num_sinks) = {
            let state = self.state();
            (state.level, state.time_format.clone(), state.sinks.len())
        };
        writeln!(f, "logger:")?;
        writeln!(f, "  level       : {}", level)?;
        writeln!(f, "  time format : {}", time_format)?;
        writeln!(f, "  sinks       : {}", num_sinks)?;
        write!(f, "  counts      :")?;
        for severity in Severity::ALL {
            write!(f, " {}={}", severity, self.count(severity))?;
        }
        writeln!(f)
    }
}

/// Log through `logger`, or through the process-wide `log` backend when
/// `logger` is `None`
pub fn log_with(
    logger: Option<&Logger>,
    severity: Severity,
    target: &str,
    args: fmt::Arguments<'_>,
) {
    match logger {
        Some(logger) => logger.log(severity, target, None, None, args),
        None => log::logger().log(
            &log::Record::builder()
                .level(severity.to_log_level())
                .target(target)
                .args(args)
                .build(),
        ),
    }
}
