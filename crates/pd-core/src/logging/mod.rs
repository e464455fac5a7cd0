//! PII-redacting user-data logging.
//!
//! Three layers: a pure text transform ([`redact::redact`]), a formatter that
//! renders records and scrubs configured fields ([`formatter::RedactingFormatter`]),
//! and a process-wide named-logger registry ([`registry`]) that binds
//! formatters to output sinks.

pub mod formatter;
pub mod redact;
pub mod registry;
