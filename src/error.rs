use thiserror::Error;

/// Convenience result type for ETL operations.
pub type EtlResult<T> = Result<T, EtlError>;

/// Coarse classification of an [`EtlError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing required field/structure.
    InvalidInput,
    /// File open/create/read/write failure.
    Io,
    /// Row/header shape mismatch or otherwise unparsable delimited text.
    Format,
}

/// Error type returned by every stage of the pipeline.
///
/// This is a single error enum shared across reading, aggregation, writing and configuration.
#[derive(Debug, Error)]
pub enum EtlError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader/writer error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error (run summary output).
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A row or field does not have the shape the aggregator needs.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// A data line has a different number of fields than the header.
    #[error("format error at line {line}: expected {expected} fields, found {found}")]
    Format {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Configuration file could not be parsed or is inconsistent.
    #[error("config error: {message}")]
    Config { message: String },
}

impl EtlError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Classify this error into the `InvalidInput` / `Io` / `Format` taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EtlError::Io(_) => ErrorKind::Io,
            EtlError::Csv(err) => match err.kind() {
                csv::ErrorKind::Io(_) | csv::ErrorKind::Seek => ErrorKind::Io,
                _ => ErrorKind::Format,
            },
            EtlError::Json(err) => {
                if err.is_io() {
                    ErrorKind::Io
                } else {
                    ErrorKind::InvalidInput
                }
            }
            EtlError::InvalidInput { .. } | EtlError::Config { .. } => ErrorKind::InvalidInput,
            EtlError::Format { .. } => ErrorKind::Format,
        }
    }
}
