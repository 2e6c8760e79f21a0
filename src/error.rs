//! Error types for precis.

/// Errors that can occur while chunking or summarizing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid chunk size (must be > 0).
    #[error("invalid chunk size: {0} (must be > 0)")]
    InvalidChunkSize(usize),

    /// Overlap is not strictly smaller than the chunk size.
    #[error("overlap {overlap} must be smaller than chunk size {size}")]
    OverlapExceedsSize {
        /// The chunk size in tokens.
        size: usize,
        /// The overlap that reached or exceeded the size.
        overlap: usize,
    },

    /// Summary length bounds are inverted or zero.
    #[error("invalid summary length: min {min} / max {max} (need 1 <= min <= max)")]
    InvalidSummaryLength {
        /// Requested minimum output tokens.
        min: usize,
        /// Requested maximum output tokens.
        max: usize,
    },

    /// Tokenizer failed to load, encode or decode.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// Summarization backend failed or returned an unusable response.
    #[error("model error: {0}")]
    Model(String),

    /// Summarization backend answered with a non-success status.
    #[error("model endpoint returned status {status}: {body}")]
    ModelStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// Input bytes were not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Filesystem or socket failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller configured the pipeline with impossible parameters.
    Configuration,
    /// Tokenization, inference, decoding or I/O failed while processing input.
    Processing,
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidChunkSize(_)
            | Self::OverlapExceedsSize { .. }
            | Self::InvalidSummaryLength { .. } => ErrorKind::Configuration,
            Self::Tokenizer(_)
            | Self::Model(_)
            | Self::ModelStatus { .. }
            | Self::Utf8(_)
            | Self::Io(_) => ErrorKind::Processing,
        }
    }

    /// Whether this error was caused by invalid configuration.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self.kind(), ErrorKind::Configuration)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Model(err.to_string())
    }
}

/// Result type for precis operations.
pub type Result<T> = std::result::Result<T, Error>;
