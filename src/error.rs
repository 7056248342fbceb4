//! Error types for tool table conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for tool table processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// File not found (-1)
    FileNotFound = -1,
    /// General I/O failure (-2)
    Io = -2,
    /// Malformed tool table line (-3)
    Format = -3,
    /// Malformed preset JSON (-4)
    Json = -4,
    /// Required INI section missing (-11)
    MissingSection = -11,
    /// Two presets share a tool number (E200)
    DuplicatePreset = 200,
}

/// Errors raised while decoding tool table text.
///
/// This is the only error the line and table codecs produce. Blank and
/// comment-only lines are never errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("Missing tool number")]
    MissingToolNumber,

    #[error("Invalid tool number '{token}'")]
    InvalidToolNumber { token: String },

    #[error("Invalid value for {field}: '{token}'")]
    InvalidValue { field: &'static str, token: String },

    #[error("Diameter must be non-negative, got {value}")]
    NegativeDiameter { value: f64 },

    #[error("Duplicate tool number T{tool_number} at line {line}")]
    DuplicateToolNumber { tool_number: u32, line: usize },

    #[error("Error at line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<FormatError>,
    },
}

impl FormatError {
    /// Attach a 1-based line number to a line-level error.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            // Already carries its own position.
            FormatError::DuplicateToolNumber { .. } | FormatError::AtLine { .. } => self,
            other => FormatError::AtLine {
                line,
                source: Box::new(other),
            },
        }
    }

    /// The 1-based line number this error refers to, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            FormatError::DuplicateToolNumber { line, .. } | FormatError::AtLine { line, .. } => {
                Some(*line)
            }
            _ => None,
        }
    }

    /// The underlying error with any line wrapper removed.
    pub fn root(&self) -> &FormatError {
        match self {
            FormatError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Main error type for the crate.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Invalid preset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No [{section}] section found in INI file")]
    MissingSection { section: String },

    #[error("Duplicate tool number T{tool_number} in presets")]
    DuplicatePreset { tool_number: u32 },
}

impl SyncError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SyncError::FileNotFound { .. } => ErrorCode::FileNotFound,
            SyncError::Io(_) => ErrorCode::Io,
            SyncError::Format(_) => ErrorCode::Format,
            SyncError::Json(_) => ErrorCode::Json,
            SyncError::MissingSection { .. } => ErrorCode::MissingSection,
            SyncError::DuplicatePreset { .. } => ErrorCode::DuplicatePreset,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }

    /// Whether the error was caused by the caller's input rather than the
    /// environment. Transports report these as client errors.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, SyncError::FileNotFound { .. } | SyncError::Io(_))
    }
}

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_line_wraps_line_errors() {
        let err = FormatError::MissingToolNumber.at_line(4);
        assert_eq!(err.line(), Some(4));
        assert_eq!(err.root(), &FormatError::MissingToolNumber);
        assert_eq!(err.to_string(), "Error at line 4: Missing tool number");
    }

    #[test]
    fn test_at_line_keeps_duplicate_position() {
        let err = FormatError::DuplicateToolNumber {
            tool_number: 1,
            line: 2,
        }
        .at_line(9);
        assert_eq!(err.line(), Some(2));
        assert_eq!(err.to_string(), "Duplicate tool number T1 at line 2");
    }

    #[test]
    fn test_negative_diameter_message() {
        let err = FormatError::NegativeDiameter { value: -5.0 };
        assert!(err.to_string().contains("Diameter must be non-negative"));
    }

    #[test]
    fn test_error_codes() {
        let err = SyncError::from(FormatError::MissingToolNumber);
        assert_eq!(err.code(), ErrorCode::Format);
        assert_eq!(err.code_value(), -3);
        assert!(err.is_client_error());

        let err = SyncError::FileNotFound {
            path: PathBuf::from("tool.tbl"),
        };
        assert_eq!(err.code_value(), -1);
        assert!(!err.is_client_error());
    }
}
