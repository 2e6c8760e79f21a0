//! Token window geometry.
//!
//! ## The Problem
//!
//! A summarization model has a context window. Documents don't fit. The token
//! sequence is cut into windows of at most `max_tokens`, and each window
//! repeats the last `overlap` tokens of its predecessor so that a sentence cut
//! at a seam still appears whole in one of the two windows.
//!
//! ```text
//! max_tokens = 4, overlap = 1, N = 10
//!
//! tokens:  a b c d e f g h i j
//! window 0 [a b c d]             [0..4]
//! window 1       [d e f g]       [3..7]   <- starts at 4 - 1 = 3
//! window 2             [g h i j] [6..10]  <- reaches N, last window
//! ```
//!
//! ## Termination
//!
//! The start advances by `step = max_tokens - overlap` each time. A zero step
//! never advances, so `overlap >= max_tokens` is rejected when the window is
//! built, before any text is tokenized.

use std::ops::Range;

use crate::{Error, Result};

/// Default window size, in tokens.
pub const DEFAULT_MAX_TOKENS: usize = 512;

/// Default overlap between consecutive windows, in tokens.
pub const DEFAULT_OVERLAP: usize = 50;

/// A validated token window: size plus overlap.
///
/// # Examples
///
/// ```rust
/// use precis::ChunkWindow;
///
/// let window = ChunkWindow::new(4, 1).unwrap();
/// let spans: Vec<_> = window.spans(10).collect();
/// assert_eq!(spans, vec![0..4, 3..7, 6..10]);
///
/// // A window that would never advance is refused up front.
/// assert!(ChunkWindow::new(10, 10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkWindow {
    max_tokens: usize,
    overlap: usize,
}

impl ChunkWindow {
    /// Create a window of `max_tokens` tokens repeating `overlap` tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChunkSize`] if `max_tokens == 0` and
    /// [`Error::OverlapExceedsSize`] if `overlap >= max_tokens`.
    pub const fn new(max_tokens: usize, overlap: usize) -> Result<Self> {
        if max_tokens == 0 {
            return Err(Error::InvalidChunkSize(max_tokens));
        }
        if overlap >= max_tokens {
            return Err(Error::OverlapExceedsSize {
                size: max_tokens,
                overlap,
            });
        }
        Ok(Self {
            max_tokens,
            overlap,
        })
    }

    /// A window with no overlap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChunkSize`] if `max_tokens == 0`.
    pub const fn no_overlap(max_tokens: usize) -> Result<Self> {
        Self::new(max_tokens, 0)
    }

    /// Maximum tokens per window.
    #[must_use]
    pub const fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Tokens shared by consecutive windows.
    #[must_use]
    pub const fn overlap(&self) -> usize {
        self.overlap
    }

    /// Distance between consecutive window starts. Always > 0.
    #[must_use]
    pub const fn step(&self) -> usize {
        self.max_tokens - self.overlap
    }

    /// Number of windows needed for `n_tokens` tokens.
    #[must_use]
    pub const fn count(&self, n_tokens: usize) -> usize {
        if n_tokens == 0 {
            0
        } else if n_tokens <= self.max_tokens {
            1
        } else {
            (n_tokens - self.overlap).div_ceil(self.step())
        }
    }

    /// Token spans covering `0..n_tokens`, in order.
    pub fn spans(&self, n_tokens: usize) -> Spans {
        Spans {
            window: *self,
            n_tokens,
            next: (n_tokens > 0).then_some(0),
        }
    }
}

impl Default for ChunkWindow {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

/// Iterator over the token spans of a [`ChunkWindow`].
#[derive(Debug, Clone)]
pub struct Spans {
    window: ChunkWindow,
    n_tokens: usize,
    next: Option<usize>,
}

impl Iterator for Spans {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next?;
        let end = (start + self.window.max_tokens).min(self.n_tokens);
        // The window reaching the last token closes the sequence.
        self.next = (end < self.n_tokens).then(|| start + self.window.step());
        Some(start..end)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            None => 0,
            Some(start) => self.window.count(self.n_tokens - start),
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Spans {}

impl std::iter::FusedIterator for Spans {}
