//! Pattern-based redaction of `field=value<separator>` tokens.

use regex::{escape, NoExpand, Regex};

/// Compile the pattern matching one field's token: `<field>=<value><separator>`.
///
/// The value match is non-greedy and may be empty; it stops at the first
/// separator after `<field>=`. Field name and separator are escaped, so the
/// compiled pattern is always valid.
pub(crate) fn field_pattern(field: &str, separator: char) -> Regex {
    let pattern = format!("{}=.*?{}", escape(field), escape(&separator.to_string()));
    Regex::new(&pattern).expect("escaped field pattern is a valid regex")
}

/// The replacement token: `<field>=<marker><separator>`.
pub(crate) fn field_replacement(field: &str, marker: &str, separator: char) -> String {
    format!("{}={}{}", field, marker, separator)
}

/// Replace the value of every `field=value<separator>` token in `message`
/// with `marker`, for each name in `fields`.
///
/// Matching is case-sensitive and left to right; duplicate occurrences are
/// all replaced. Fields absent from the message are no-ops, and a message
/// with no matches is returned unchanged. The marker is inserted literally,
/// with no capture-group expansion.
///
/// A value that itself contains the separator is truncated at it: the match
/// stops at the first separator after `field=`, and the remainder of the
/// value survives. Callers own keeping separators out of values.
pub fn redact<S: AsRef<str>>(fields: &[S], marker: &str, message: &str, separator: char) -> String {
    let mut message = message.to_owned();
    for field in fields {
        let field = field.as_ref();
        let pattern = field_pattern(field, separator);
        let replacement = field_replacement(field, marker, separator);
        message = pattern
            .replace_all(&message, NoExpand(&replacement))
            .into_owned();
    }
    message
}
