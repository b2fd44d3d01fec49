//! Error types for the Curry dashboard.
//!
//! Library crates use [`DashboardError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all dataset and reporting operations.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The CSV could not be read or a record could not be deserialized.
    #[error("csv error{}: {message}", line_suffix(.line))]
    Csv { line: Option<u64>, message: String },

    /// The CSV header lacks a column the pipeline depends on.
    #[error("missing expected column '{column}'")]
    MissingColumn { column: String },

    /// A non-sentinel value failed numeric coercion.
    ///
    /// `row` is the 1-based position of the record in the input sequence.
    #[error("row {row}: column '{column}' has malformed numeric value {value:?} ({reason})")]
    MalformedNumeric {
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },

    /// An order date did not match `dd-mm-yyyy`.
    #[error("row {row}: column '{column}' has malformed date {value:?} (expected dd-mm-yyyy)")]
    MalformedDate {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DashboardError>;

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

impl DashboardError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// The input row a cleaning error points at, when known.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::MalformedNumeric { row, .. } | Self::MalformedDate { row, .. } => Some(*row),
            _ => None,
        }
    }
}

impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        Self::Csv {
            line,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = DashboardError::config("cutoff is not a date");
        assert_eq!(err.to_string(), "config error: cutoff is not a date");

        let err = DashboardError::missing_column("City");
        assert_eq!(err.to_string(), "missing expected column 'City'");
    }

    #[test]
    fn malformed_numeric_names_row_and_column() {
        let err = DashboardError::MalformedNumeric {
            row: 7,
            column: "Delivery_person_Age",
            value: "abc".into(),
            reason: "invalid digit found in string".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("row 7:"));
        assert!(msg.contains("Delivery_person_Age"));
        assert!(msg.contains("\"abc\""));
        assert_eq!(err.row(), Some(7));
    }

    #[test]
    fn csv_error_without_line() {
        let err = DashboardError::Csv {
            line: None,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "csv error: boom");
        assert_eq!(err.row(), None);
    }
}
