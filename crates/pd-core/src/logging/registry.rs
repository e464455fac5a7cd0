//! Process-wide named-logger registry.
//!
//! Loggers are created lazily on first request and live for the process
//! lifetime. Each logger binds a [`RedactingFormatter`] to a [`LogSink`];
//! sink writes are best-effort and never fail the logging call site.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use tracing::error;

use super::formatter::{Level, LogRecord, RedactingFormatter, PII_FIELDS};

/// Destination for formatted log lines.
///
/// Implementations must be safe to call from multiple threads and must make
/// a best effort to emit the line. If emission fails, the error should be
/// reported through `tracing` but NOT propagated -- logging must never fail
/// the operation being logged.
pub trait LogSink: Send + Sync {
    /// Emit one formatted line.
    fn write_line(&self, line: &str);
}

/// Sink writing one line per record to standard error.
#[derive(Debug, Clone)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write_line(&self, line: &str) {
        eprintln!("{}", line);
    }
}

/// Sink appending lines to a file, flushed after every line.
///
/// Thread-safe via an internal `Mutex`. The parent directory is created if
/// it does not exist.
pub struct FileSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    /// Open (or create) the log file in append mode.
    pub fn new(path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(BufWriter::new(file)),
        })
    }
}

impl LogSink for FileSink {
    fn write_line(&self, line: &str) {
        let mut guard = match self.writer.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(guard, "{}", line).and_then(|_| guard.flush()) {
            error!(
                path = %self.path.display(),
                error = %e,
                "Failed to write user-data log line, line lost"
            );
        }
    }
}

impl std::fmt::Debug for FileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSink").field("path", &self.path).finish()
    }
}

/// Sink collecting lines in memory.
///
/// Useful for tests and for environments where the user-data channel is
/// inspected rather than shipped.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lines captured so far.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(g) => g.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) {
        let mut guard = match self.lines.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(line.to_owned());
    }
}

/// A named logger: a severity threshold, a formatter, and a sink.
pub struct Logger {
    name: String,
    level: Level,
    formatter: RedactingFormatter,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    pub fn new(
        name: impl Into<String>,
        level: Level,
        formatter: RedactingFormatter,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            name: name.into(),
            level,
            formatter,
            sink,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Format and emit a record. Records below the threshold are dropped.
    pub fn log(&self, level: Level, message: impl Into<String>) {
        if level < self.level {
            return;
        }
        let record = LogRecord::new(self.name.clone(), level, message);
        self.sink.write_line(&self.formatter.format(&record));
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level)
            .finish()
    }
}

static REGISTRY: Lazy<Mutex<HashMap<String, Arc<Logger>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Fetch the logger registered under `name`, creating it with `init` on
/// first use. Later calls with the same name return the original instance
/// and ignore `init`.
pub fn get_or_create<F>(name: &str, init: F) -> Arc<Logger>
where
    F: FnOnce() -> Logger,
{
    let mut registry = match REGISTRY.lock() {
        Ok(g) => g,
        Err(poisoned) => poisoned.into_inner(),
    };
    registry
        .entry(name.to_owned())
        .or_insert_with(|| Arc::new(init()))
        .clone()
}

/// The `user_data` logger: Info threshold, the default PII field set, and a
/// stderr sink. Registered on first call.
pub fn user_data_logger() -> Arc<Logger> {
    get_or_create("user_data", || {
        Logger::new(
            "user_data",
            Level::Info,
            RedactingFormatter::new(PII_FIELDS),
            Arc::new(StderrSink),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_logger(name: &str, level: Level) -> (Logger, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::new(
            name,
            level,
            RedactingFormatter::new(PII_FIELDS),
            sink.clone(),
        );
        (logger, sink)
    }

    #[test]
    fn test_logger_redacts_through_sink() {
        let (logger, sink) = memory_logger("test_redacts", Level::Info);
        logger.info("name=alice; ssn=123-45-6789; ip=10.0.0.1;");

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("name=***;"));
        assert!(lines[0].contains("ssn=***;"));
        assert!(lines[0].contains("ip=10.0.0.1;"));
        assert!(!lines[0].contains("123-45-6789"));
    }

    #[test]
    fn test_level_threshold_filters() {
        let (logger, sink) = memory_logger("test_threshold", Level::Warning);
        logger.debug("ssn=1;");
        logger.info("ssn=2;");
        logger.warning("ssn=3;");
        logger.error("ssn=4;");
        assert_eq!(sink.lines().len(), 2);
    }

    #[test]
    fn test_get_or_create_returns_same_instance() {
        let a = get_or_create("test_same_instance", || {
            Logger::new(
                "test_same_instance",
                Level::Info,
                RedactingFormatter::new(PII_FIELDS),
                Arc::new(MemorySink::new()),
            )
        });
        let b = get_or_create("test_same_instance", || {
            unreachable!("logger already registered")
        });
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_user_data_logger_configuration() {
        let logger = user_data_logger();
        assert_eq!(logger.name(), "user_data");
        assert!(Arc::ptr_eq(&logger, &user_data_logger()));
    }

    #[test]
    fn test_file_sink_appends() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join("user_data.log");

        let sink = FileSink::new(&path).unwrap();
        sink.write_line("first");
        sink.write_line("second");

        // A second sink on the same path appends rather than truncating.
        let sink2 = FileSink::new(&path).unwrap();
        sink2.write_line("third");

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\nthird\n");
    }
}
