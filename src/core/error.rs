//! Error types for msa-entropy
//!
//! Defines all error types used throughout the library.

use thiserror::Error;

/// Main error type for msa-entropy operations
#[derive(Debug, Error)]
pub enum EntropyError {
    /// Alignment could not be parsed as the declared format
    #[error("Format error: {0}")]
    Format(#[from] AlignmentParseError),

    /// Reference accession is not among the alignment rows
    #[error("Reference sequence not found in alignment: {0}")]
    MissingReference(String),

    /// Smoothing windows wider than 1 must be odd
    #[error("Window size must be odd when greater than 1, got {0}")]
    InvalidWindow(usize),

    /// Gap fraction outside [0, 1]
    #[error("Maximum gap fraction must be within [0, 1], got {0}")]
    InvalidGapFraction(f64),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Specific kinds of alignment parsing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentParseErrorKind {
    /// Missing or malformed format header
    InvalidHeader,
    /// A line that does not fit the format
    InvalidLine,
    /// Records of different lengths
    UnequalLength,
    /// No records in the input
    Empty,
    /// More than one alignment in the input
    MultipleAlignments,
    /// Record count disagrees with the header or earlier blocks
    RecordMismatch,
    /// Bytes are not valid UTF-8
    InvalidEncoding,
}

/// Error raised by the alignment readers
///
/// Carries the declared format and, where known, the 1-based line number
/// of the offending input.
#[derive(Debug, Clone)]
pub struct AlignmentParseError {
    /// Declared input format (`fasta`, `clustal`, ...)
    pub format: &'static str,
    /// Human-readable error message
    pub message: String,
    /// Line number where the error occurred (1-based)
    pub line_number: Option<usize>,
    /// The kind of error that occurred
    pub kind: AlignmentParseErrorKind,
}

impl AlignmentParseError {
    pub fn new(
        format: &'static str,
        kind: AlignmentParseErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            format,
            message: message.into(),
            line_number: None,
            kind,
        }
    }

    pub fn at_line(
        format: &'static str,
        kind: AlignmentParseErrorKind,
        message: impl Into<String>,
        line_number: usize,
    ) -> Self {
        Self {
            line_number: Some(line_number),
            ..Self::new(format, kind, message)
        }
    }

    pub fn is_kind(&self, kind: AlignmentParseErrorKind) -> bool {
        self.kind == kind
    }
}

impl std::fmt::Display for AlignmentParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line_number {
            Some(line) => write!(f, "{} line {}: {}", self.format, line, self.message),
            None => write!(f, "{}: {}", self.format, self.message),
        }
    }
}

impl std::error::Error for AlignmentParseError {}

/// Result type alias for msa-entropy operations
pub type EntropyResult<T> = std::result::Result<T, EntropyError>;

/// Result type alias for alignment parsing
pub type ParseResult<T> = std::result::Result<T, AlignmentParseError>;
