//! Fixed-size token chunking with overlap.
//!
//! The only strategy a summarization model needs: cut the token sequence into
//! windows that fit its context and decode each back to text.
//!
//! ## How It Works
//!
//! ```text
//! max_tokens = 10, overlap = 3, 26 tokens
//!
//! Chunk 0: tokens [0..10]
//! Chunk 1: tokens [7..17]   <- starts at 10 - 3 = 7
//! Chunk 2: tokens [14..24]  <- starts at 17 - 3 = 14
//! Chunk 3: tokens [21..26]  <- final chunk may be shorter
//! ```
//!
//! ## Why Tokens, Not Bytes?
//!
//! The model truncates by token count. A byte budget either wastes context on
//! ASCII prose or overflows it on CJK text. Counting with the model's own
//! tokenizer is the only budget the model agrees with.
//!
//! ## Lossy Decoding
//!
//! Each window is decoded independently. Sub-word tokenizers do not promise
//! `decode(encode(s)[a..b]) == s[x..y]`: spaces before punctuation, leading
//! spaces at a seam and special tokens may change. The decoded text is passed
//! on as is; nothing is normalized at the seams.

use std::sync::Arc;

use crate::{Chunk, ChunkWindow, Chunker, Result, Tokenizer};

/// Token-window chunker.
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use precis::{CharTokenizer, Chunker, TokenChunker};
///
/// let chunker = TokenChunker::new(Arc::new(CharTokenizer), 4, 1).unwrap();
/// let chunks = chunker.chunk("abcdefghij").unwrap();
///
/// let texts: Vec<_> = chunks.iter().map(|c| c.text.as_str()).collect();
/// assert_eq!(texts, ["abcd", "defg", "ghij"]);
/// assert_eq!(chunks[1].start, 3); // 4 - 1 overlap
/// ```
#[derive(Clone)]
pub struct TokenChunker {
    tokenizer: Arc<dyn Tokenizer>,
    window: ChunkWindow,
}

impl TokenChunker {
    /// Create a chunker of `max_tokens` windows repeating `overlap` tokens.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `max_tokens == 0` or
    /// `overlap >= max_tokens`.
    pub fn new(tokenizer: Arc<dyn Tokenizer>, max_tokens: usize, overlap: usize) -> Result<Self> {
        Ok(Self::with_window(
            tokenizer,
            ChunkWindow::new(max_tokens, overlap)?,
        ))
    }

    /// Create a chunker from an already validated window.
    #[must_use]
    pub fn with_window(tokenizer: Arc<dyn Tokenizer>, window: ChunkWindow) -> Self {
        Self { tokenizer, window }
    }

    /// The window this chunker cuts with.
    #[must_use]
    pub const fn window(&self) -> ChunkWindow {
        self.window
    }
}

impl Chunker for TokenChunker {
    fn chunk(&self, text: &str) -> Result<Vec<Chunk>> {
        windows(&*self.tokenizer, self.window, text)
    }

    fn estimate_chunks(&self, n_tokens: usize) -> usize {
        self.window.count(n_tokens)
    }
}

/// Encode once, then decode every window of the token sequence.
///
/// An empty token sequence yields no chunks, whatever the input text was.
fn windows(tokenizer: &dyn Tokenizer, window: ChunkWindow, text: &str) -> Result<Vec<Chunk>> {
    let ids = tokenizer.encode(text)?;
    window
        .spans(ids.len())
        .enumerate()
        .map(|(index, span)| {
            let decoded = tokenizer.decode(&ids[span.clone()])?;
            Ok(Chunk::new(decoded, span.start, span.end, index))
        })
        .collect()
}

impl std::fmt::Debug for TokenChunker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenChunker")
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

/// Split `text` into decoded windows of at most `max_length` tokens.
///
/// The window is validated before `text` is tokenized, so a bad
/// configuration fails fast even on huge inputs.
///
/// # Errors
///
/// Returns a configuration error for `max_length == 0` or
/// `overlap >= max_length`, and tokenizer errors otherwise.
///
/// ```rust
/// use precis::{chunk_text, CharTokenizer};
///
/// let chunks = chunk_text(&CharTokenizer, "abcdefghij", 4, 1).unwrap();
/// assert_eq!(chunks, ["abcd", "defg", "ghij"]);
///
/// let err = chunk_text(&CharTokenizer, "abc", 10, 10).unwrap_err();
/// assert!(err.is_config());
/// ```
pub fn chunk_text(
    tokenizer: &dyn Tokenizer,
    text: &str,
    max_length: usize,
    overlap: usize,
) -> Result<Vec<String>> {
    let window = ChunkWindow::new(max_length, overlap)?;
    Ok(windows(tokenizer, window, text)?
        .into_iter()
        .map(|chunk| chunk.text)
        .collect())
}
