//! Tokenizer backends.
//!
//! The chunker only needs two operations from a tokenizer: text to token ids
//! and token ids back to text. Anything that can do both can sit behind
//! [`Tokenizer`], which keeps the window arithmetic testable without a model
//! vocabulary on disk.

use crate::{Error, Result};

/// A text tokenizer.
///
/// Implementations must be safe to share between requests; both methods take
/// `&self` and may be called concurrently.
pub trait Tokenizer: Send + Sync {
    /// Encode text into token ids.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tokenizer`] if the backend rejects the input.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// Decode token ids back into text.
    ///
    /// The result need not equal the substring the ids came from.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tokenizer`] if an id is outside the vocabulary.
    fn decode(&self, ids: &[u32]) -> Result<String>;

    /// Count the tokens in `text`.
    ///
    /// # Errors
    ///
    /// Propagates encoding failures.
    fn count(&self, text: &str) -> Result<usize> {
        self.encode(text).map(|ids| ids.len())
    }
}

/// One token per Unicode scalar value; the id is the code point.
///
/// Exact round trip, no vocabulary. Useful offline and for reasoning about
/// window boundaries by eye.
///
/// ```rust
/// use precis::{CharTokenizer, Tokenizer};
///
/// let tok = CharTokenizer;
/// let ids = tok.encode("héllo").unwrap();
/// assert_eq!(ids.len(), 5);
/// assert_eq!(tok.decode(&ids[1..3]).unwrap(), "él");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CharTokenizer;

impl Tokenizer for CharTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        Ok(text.chars().map(u32::from).collect())
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        ids.iter()
            .map(|&id| {
                char::from_u32(id)
                    .ok_or_else(|| Error::Tokenizer(format!("id {id:#x} is not a scalar value")))
            })
            .collect()
    }

    fn count(&self, text: &str) -> Result<usize> {
        Ok(text.chars().count())
    }
}
