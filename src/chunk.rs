//! The Chunk type: decoded window text with its token span.

use std::ops::Range;

/// A window of tokens, decoded back to text.
///
/// ## Token Offsets
///
/// `start` and `end` are token indices into the encoded document, not byte
/// offsets. The text is whatever the tokenizer decodes the window into, which
/// need not be a substring of the original: tokenizer round trips may drop or
/// add whitespace around punctuation.
///
/// ```rust
/// use precis::Chunk;
///
/// let chunk = Chunk::new("defg", 3, 7, 1);
/// assert_eq!(chunk.token_count(), 4);
/// assert_eq!(chunk.span(), 3..7);
/// ```
///
/// ## Overlap
///
/// Consecutive chunks share tokens. The `index` field orders them:
///
/// ```text
/// Tokens:  a b c d e f g h i j
/// Chunk 0: [a b c d]          [0..4]
/// Chunk 1:       [d e f g]    [3..7]  <- shares token 3 with chunk 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The decoded window text.
    pub text: String,
    /// First token index (inclusive).
    pub start: usize,
    /// Last token index (exclusive).
    pub end: usize,
    /// Zero-based index of this chunk in the sequence.
    pub index: usize,
}

impl Chunk {
    /// Create a new chunk.
    #[must_use]
    pub fn new(text: impl Into<String>, start: usize, end: usize, index: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            index,
        }
    }

    /// Number of tokens in this window.
    #[must_use]
    pub const fn token_count(&self) -> usize {
        self.end - self.start
    }

    /// Whether the decoded text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The token span of this chunk in the encoded document.
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk {{ index: {}, tokens: {}..{}, chars: {} }}",
            self.index,
            self.start,
            self.end,
            self.text.chars().count()
        )
    }
}
