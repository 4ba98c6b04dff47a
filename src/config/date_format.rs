//! Date format handling for `{DATE}` placeholders.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// Default date format (ISO calendar date).
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Go reference-layout tokens and their strftime equivalents.
///
/// Longer tokens come first so `January` wins over `Jan` and `15` over `1`.
/// Zone tokens render the UTC offset (`+00:00`), never a literal `Z`.
const GO_LAYOUT_TOKENS: &[(&str, &str)] = &[
    ("January", "%B"),
    ("Monday", "%A"),
    ("Z07:00", "%:z"),
    ("-07:00", "%:z"),
    ("Z0700", "%z"),
    ("-0700", "%z"),
    ("2006", "%Y"),
    (".000", "%.3f"),
    ("Jan", "%b"),
    ("Mon", "%a"),
    ("MST", "%Z"),
    ("01", "%m"),
    ("02", "%d"),
    ("_2", "%e"),
    ("15", "%H"),
    ("03", "%I"),
    ("04", "%M"),
    ("05", "%S"),
    ("06", "%y"),
    ("PM", "%p"),
    ("pm", "%P"),
    ("1", "%-m"),
    ("2", "%-d"),
    ("3", "%-I"),
    ("4", "%-M"),
    ("5", "%-S"),
];

/// A validated strftime pattern, rendered in UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
}

impl DateFormat {
    /// Parse a user-supplied date format.
    ///
    /// Strings containing `%` are taken as strftime. Anything else is read as
    /// a Go reference layout (`2006-01-02_15-04-05`) and translated.
    pub fn parse(input: &str) -> Result<Self> {
        let pattern = if input.contains('%') {
            input.to_string()
        } else {
            translate_go_layout(input)
        };

        let invalid = || Error::ConfigValidation {
            field: "date_format".to_string(),
            message: format!("Invalid date format: '{}'", input),
        };

        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(invalid());
        }

        // Some specifiers parse but cannot be rendered (`%#z`).
        let mut sample = String::new();
        write!(sample, "{}", DateTime::<Utc>::default().format(&pattern)).map_err(|_| invalid())?;

        Ok(Self { pattern })
    }

    /// The strftime pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Format a unix timestamp (seconds).
    pub fn format(&self, timestamp: i64) -> String {
        let dt = DateTime::<Utc>::from_timestamp(timestamp, 0).unwrap_or_default();
        let mut out = String::new();
        if write!(out, "{}", dt.format(&self.pattern)).is_err() {
            tracing::warn!("Cannot render date format '{}'", self.pattern);
            out.clear();
        }
        out
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

fn translate_go_layout(layout: &str) -> String {
    let mut out = String::with_capacity(layout.len() * 2);
    let mut rest = layout;

    'outer: while let Some(c) = rest.chars().next() {
        for (token, replacement) in GO_LAYOUT_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(replacement);
                rest = tail;
                continue 'outer;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}
