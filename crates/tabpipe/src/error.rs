//! Error type shared by all table and workflow operations.
//!
//! Every failure is surfaced to the caller immediately; nothing is retried.
//! Missing values propagating through elementwise derivation are not errors.

/// The `Error` enum names every way a pipeline step can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file could not be opened, read, or written.
    #[error("could not access {path}: {source}")]
    Io {
        path:   String,
        #[source]
        source: std::io::Error,
    },

    /// Delimited input was malformed, e.g., rows with inconsistent column counts.
    #[error("parse error in {source_name} at line {line}: {message}")]
    Parse {
        source_name: String,
        line:        u64,
        message:     String,
    },

    /// A referenced column does not exist.
    #[error("{caller} error: column {column} not found")]
    ColumnNotFound { caller: &'static str, column: String },

    /// A referenced row index label does not exist.
    #[error("{caller} error: row index {label} not found")]
    RowNotFound { caller: &'static str, label: usize },

    /// An incoming column name is already used in the table.
    #[error("{caller} error: column {column} already exists")]
    DuplicateColumn { caller: &'static str, column: String },

    /// A column insert position lies beyond the last column.
    #[error("insert error: position {pos} out of range for {n_col} columns")]
    PositionOutOfRange { pos: usize, n_col: usize },

    /// Two row-aligned operands have different lengths.
    #[error("{caller} error: length mismatch, {expected} (expected) != {found} (found)")]
    LengthMismatch {
        caller:   &'static str,
        expected: usize,
        found:    usize,
    },

    /// Two operands have equal lengths but different row index labels.
    #[error("{caller} error: row index labels are not aligned")]
    IndexMismatch { caller: &'static str },

    /// An operation was requested on a column of an unsuitable type.
    #[error("{caller} error: column {column} has type {found}, expected {expected}")]
    TypeMismatch {
        caller:   &'static str,
        column:   String,
        expected: String,
        found:    String,
    },

    /// A max, min, or mean was requested over zero non-missing values.
    #[error("{caller} error: no non-missing values to reduce in column {column}")]
    EmptyReduction { caller: &'static str, column: String },

    /// A configuration value was absent or could not be parsed.
    #[error("config key {key}: {message}")]
    Config { key: String, message: String },

    /// A counter key was used before it was declared.
    #[error("counter {0} not found")]
    Counter(String),

    /// Low-level CSV failure while writing.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON export failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Convert a CSV read error into a load-time error for `source_name`.
    pub(crate) fn from_csv_read(err: csv::Error, source_name: &str) -> Self {
        let line = err.position().map(|pos| pos.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(source) => Error::Io {
                path: source_name.to_string(),
                source,
            },
            csv::ErrorKind::UnequalLengths { expected_len, len, .. } => Error::Parse {
                source_name: source_name.to_string(),
                line,
                message: format!("found {len} fields, expected {expected_len}"),
            },
            csv::ErrorKind::Utf8 { err, .. } => Error::Parse {
                source_name: source_name.to_string(),
                line,
                message: format!("invalid UTF-8: {err}"),
            },
            other => Error::Parse {
                source_name: source_name.to_string(),
                line,
                message: format!("{other:?}"),
            },
        }
    }
}
