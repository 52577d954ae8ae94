use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Local};

use crate::logging::Severity;

/// A single log event, built once and handed to every accepting sink
pub struct LogEvent<'a> {
    pub severity: Severity,
    pub target: &'a str,
    pub file: Option<&'a str>,
    pub line: Option<u32>,
    pub timestamp: DateTime<Local>,
    pub args: fmt::Arguments<'a>,
}

impl LogEvent<'_> {
    fn location(&self) -> String {
        match (self.file, self.line) {
            (Some(file), Some(line)) => format!("{}:{}", file, line),
            (Some(file), None) => file.to_string(),
            _ => self.target.to_string(),
        }
    }
}

/// Destination for log events
///
/// `time` is the event timestamp already rendered with the logger's time
/// format. Errors are reported to the logger, which discards them.
pub trait LogSink: Send {
    fn emit(&mut self, event: &LogEvent<'_>, time: &str) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes events to stderr, optionally with ANSI colors
pub struct ConsoleSink {
    color: bool,
}

impl ConsoleSink {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl LogSink for ConsoleSink {
    fn emit(&mut self, event: &LogEvent<'_>, time: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        if self.color {
            writeln!(
                stderr,
                "{} {}{:<5}\x1b[0m \x1b[90m{}:\x1b[0m {}",
                time,
                event.severity.color(),
                event.severity,
                event.location(),
                event.args
            )
        } else {
            writeln!(
                stderr,
                "{} {:<5} {}: {}",
                time,
                event.severity,
                event.location(),
                event.args
            )
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Writes plain-text events to any writer (typically a file)
pub struct WriterSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<File> {
    /// Create (or truncate) a log file
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn emit(&mut self, event: &LogEvent<'_>, time: &str) -> io::Result<()> {
        writeln!(
            self.writer,
            "{} {:<5} {}: {}",
            time,
            event.severity,
            event.location(),
            event.args
        )
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

type Callback = Box<dyn FnMut(&LogEvent<'_>, &str) + Send>;

/// Hands every event to a closure
pub struct CallbackSink {
    callback: Callback,
}

impl CallbackSink {
    pub fn new<F>(callback: F) -> Self
    where
        F: FnMut(&LogEvent<'_>, &str) + Send + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl LogSink for CallbackSink {
    fn emit(&mut self, event: &LogEvent<'_>, time: &str) -> io::Result<()> {
        (self.callback)(event, time);
        Ok(())
    }
}
