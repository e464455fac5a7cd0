//! Log record rendering with PII redaction.

use std::fmt;

use chrono::{DateTime, Utc};
use regex::{NoExpand, Regex};

use super::redact;

/// Marker substituted for redacted field values.
pub const REDACTION_MARKER: &str = "***";

/// Separator terminating each `field=value` token in user-data messages.
pub const SEPARATOR: char = ';';

/// Field names treated as personally identifiable information.
pub const PII_FIELDS: &[&str] = &["name", "email", "phone", "ssn", "password"];

/// Log severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        };
        write!(f, "{}", s)
    }
}

/// A single log record, produced externally and consumed once.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Name of the logger that emitted the record.
    pub logger: String,
    pub level: Level,
    /// When the record was created (UTC).
    pub timestamp: DateTime<Utc>,
    /// The raw message, possibly containing PII tokens.
    pub message: String,
}

impl LogRecord {
    /// Create a record stamped with the current UTC time.
    pub fn new(logger: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            logger: logger.into(),
            level,
            timestamp: Utc::now(),
            message: message.into(),
        }
    }
}

/// Renders log records as text and scrubs configured PII field values.
///
/// The field set is fixed at construction and the per-field patterns are
/// compiled once; the formatter holds no mutable state afterwards, so a
/// shared instance can format records from any number of threads.
#[derive(Debug)]
pub struct RedactingFormatter {
    fields: Vec<String>,
    marker: String,
    separator: char,
    patterns: Vec<Regex>,
}

impl RedactingFormatter {
    /// Formatter with the default marker (`***`) and separator (`;`).
    pub fn new<S: AsRef<str>>(fields: &[S]) -> Self {
        Self::with_marker(fields, REDACTION_MARKER, SEPARATOR)
    }

    /// Formatter with an explicit marker and separator.
    pub fn with_marker<S: AsRef<str>>(fields: &[S], marker: &str, separator: char) -> Self {
        let fields: Vec<String> = fields.iter().map(|f| f.as_ref().to_owned()).collect();
        let patterns = fields
            .iter()
            .map(|f| redact::field_pattern(f, separator))
            .collect();
        Self {
            fields,
            marker: marker.to_owned(),
            separator,
            patterns,
        }
    }

    /// The configured field names, in application order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Scrub an already rendered message using the precompiled patterns.
    pub fn redact_message(&self, message: &str) -> String {
        let mut message = message.to_owned();
        for (field, pattern) in self.fields.iter().zip(&self.patterns) {
            let replacement = redact::field_replacement(field, &self.marker, self.separator);
            message = pattern
                .replace_all(&message, NoExpand(&replacement))
                .into_owned();
        }
        message
    }

    /// Render a record as `<timestamp> <logger> <LEVEL>: <message>` and
    /// redact the result.
    pub fn format(&self, record: &LogRecord) -> String {
        let rendered = format!(
            "{} {} {}: {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            record.logger,
            record.level,
            record.message,
        );
        self.redact_message(&rendered)
    }
}
