use thiserror::Error;

/// A line that could not be turned into a record.
///
/// Failures are local to one line: the stream they came from stays usable.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseError {
    /// Fewer than five columns. Four columns are rejected too, since the attribute column would
    /// then be the position column.
    #[error("line {line}: expected at least {expected} columns, found {found}")]
    TooFewColumns {
        line: usize,
        found: usize,
        expected: usize,
        text: String,
    },

    #[error("line {line}: attribute column {column:?} holds no attributes")]
    EmptyAttributes {
        line: usize,
        column: String,
        text: String,
    },

    #[error("line {line}: {tag} found before the last attribute, attributes are out of order")]
    MisplacedVariantType {
        line: usize,
        tag: &'static str,
        text: String,
    },

    /// `text` holds the line with invalid bytes replaced by U+FFFD.
    #[error("line {line}: not valid UTF-8")]
    InvalidUtf8 { line: usize, text: String },
}

impl ParseError {
    /// The line number the failing line was parsed with.
    pub fn line(&self) -> usize {
        match self {
            ParseError::TooFewColumns { line, .. }
            | ParseError::EmptyAttributes { line, .. }
            | ParseError::MisplacedVariantType { line, .. }
            | ParseError::InvalidUtf8 { line, .. } => *line,
        }
    }

    /// The raw text of the failing line.
    pub fn text(&self) -> &str {
        match self {
            ParseError::TooFewColumns { text, .. }
            | ParseError::EmptyAttributes { text, .. }
            | ParseError::MisplacedVariantType { text, .. }
            | ParseError::InvalidUtf8 { text, .. } => text,
        }
    }
}

/// Errors yielded while iterating [`VariantRecords`](crate::reader::VariantRecords).
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
