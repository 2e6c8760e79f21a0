//! Summarization model interface.
//!
//! The model is an opaque capability: text in, shorter text out, bounded by a
//! token budget. Backends (a hosted endpoint, a local runtime, a test double)
//! plug in through [`SummaryModel`].

use async_trait::async_trait;

use crate::{Error, Result};

/// Default upper bound on summary length, in tokens.
pub const DEFAULT_SUMMARY_MAX_TOKENS: usize = 150;

/// Default lower bound on summary length, in tokens.
pub const DEFAULT_SUMMARY_MIN_TOKENS: usize = 50;

/// Output length bounds for one summary.
///
/// ```rust
/// use precis::SummaryLength;
///
/// let length = SummaryLength::default();
/// assert_eq!((length.min_tokens(), length.max_tokens()), (50, 150));
/// assert!(SummaryLength::new(200, 100).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLength {
    min_tokens: usize,
    max_tokens: usize,
}

impl SummaryLength {
    /// Bounds of `min_tokens..=max_tokens` output tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSummaryLength`] unless
    /// `1 <= min_tokens <= max_tokens`.
    pub const fn new(min_tokens: usize, max_tokens: usize) -> Result<Self> {
        if min_tokens == 0 || min_tokens > max_tokens {
            return Err(Error::InvalidSummaryLength {
                min: min_tokens,
                max: max_tokens,
            });
        }
        Ok(Self {
            min_tokens,
            max_tokens,
        })
    }

    /// Minimum output tokens.
    #[must_use]
    pub const fn min_tokens(&self) -> usize {
        self.min_tokens
    }

    /// Maximum output tokens.
    #[must_use]
    pub const fn max_tokens(&self) -> usize {
        self.max_tokens
    }
}

impl Default for SummaryLength {
    fn default() -> Self {
        Self {
            min_tokens: DEFAULT_SUMMARY_MIN_TOKENS,
            max_tokens: DEFAULT_SUMMARY_MAX_TOKENS,
        }
    }
}

/// A sequence-to-sequence summarization model.
///
/// Implementations decode greedily: the same text and length must produce the
/// same summary, as far as the backend allows. No retries happen above this
/// trait, so a returned error fails the whole document.
#[async_trait]
pub trait SummaryModel: Send + Sync {
    /// Summarize `text` within `length`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Model`] or [`Error::ModelStatus`] if inference fails.
    async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String>;
}
