//! # precis
//!
//! Abstractive summarization of arbitrarily long text with a fixed-context
//! sequence-to-sequence model.
//!
//! ## The Problem
//!
//! Summarization models have context windows. BART reads 1024 tokens; a
//! report, a transcript or a book chapter does not fit. Truncating throws the
//! rest of the document away. Instead:
//!
//! 1. Tokenize the whole document with the model's own tokenizer.
//! 2. Cut the token sequence into windows of `max_tokens` that repeat the last
//!    `overlap` tokens of the previous window.
//! 3. Decode each window back to text and summarize it independently.
//! 4. Join the partial summaries with single spaces, in window order.
//!
//! ```text
//! Tokens:   [0 ........................................ N)
//! Windows:  [0 ..... 512)
//!                [462 ..... 974)
//!                      [924 ..... 1436)     step = 512 - 50
//! Summary:  "S0 S1 S2"
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use precis::{
//!     async_trait, CharTokenizer, ChunkWindow, Result, Summarizer, SummarizerOptions,
//!     SummaryLength, SummaryModel,
//! };
//!
//! struct FirstWord;
//!
//! #[async_trait]
//! impl SummaryModel for FirstWord {
//!     async fn summarize(&self, text: &str, _: SummaryLength) -> Result<String> {
//!         Ok(text.split_whitespace().next().unwrap_or_default().to_string())
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let summarizer = Summarizer::new(
//!     Arc::new(CharTokenizer),
//!     Arc::new(FirstWord),
//!     SummarizerOptions {
//!         window: ChunkWindow::new(12, 0)?,
//!         ..SummarizerOptions::default()
//!     },
//! );
//! let summary = summarizer.summarize_document("alpha beta  gamma delta ").await?;
//! assert_eq!(summary, "alpha gamma");
//! # Ok::<(), precis::Error>(())
//! # }).unwrap();
//! ```
//!
//! ## Backends
//!
//! | Seam | Trait | Shipped backends |
//! |------|-------|------------------|
//! | Tokenizer | [`Tokenizer`] | [`CharTokenizer`], `HfTokenizer` (feature `hf`) |
//! | Model | [`SummaryModel`] | [`InferenceClient`] (hosted endpoint) |
//!
//! ## Surfaces
//!
//! - [`Summarizer::summarize_document`]: direct call.
//! - [`server::build_router`]: `POST /summarize`, `POST /upload`, `GET /`.
//! - [`file::summarize_file`]: file in, file out.

mod chunk;
pub mod config;
mod error;
pub mod file;
mod fixed;
#[cfg(feature = "hf")]
mod hf;
mod inference;
mod model;
mod pipeline;
pub mod server;
mod tokenizer;
mod window;

pub use async_trait::async_trait;
pub use chunk::Chunk;
pub use error::{Error, ErrorKind, Result};
pub use fixed::{chunk_text, TokenChunker};
pub use inference::{InferenceClient, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use model::{
    SummaryLength, SummaryModel, DEFAULT_SUMMARY_MAX_TOKENS, DEFAULT_SUMMARY_MIN_TOKENS,
};
pub use pipeline::{aggregate, Summarizer, SummarizerOptions};
pub use tokenizer::{CharTokenizer, Tokenizer};
pub use window::{ChunkWindow, Spans, DEFAULT_MAX_TOKENS, DEFAULT_OVERLAP};

#[cfg(feature = "hf")]
pub use hf::HfTokenizer;

/// A token chunking strategy.
///
/// ```rust
/// use std::sync::Arc;
/// use precis::{CharTokenizer, Chunker, TokenChunker};
///
/// fn chunk_document(chunker: &dyn Chunker, text: &str) -> Vec<precis::Chunk> {
///     chunker.chunk(text).unwrap()
/// }
///
/// let chunker = TokenChunker::new(Arc::new(CharTokenizer), 100, 20).unwrap();
/// let chunks = chunk_document(&chunker, "Hello world. This is a test.");
/// assert_eq!(chunks.len(), 1);
/// ```
pub trait Chunker: Send + Sync {
    /// Split text into chunks.
    ///
    /// Each [`Chunk`] carries its decoded text and its token span in the
    /// encoded document.
    ///
    /// # Errors
    ///
    /// Propagates tokenizer failures.
    fn chunk(&self, text: &str) -> Result<Vec<Chunk>>;

    /// Number of chunks a document of `n_tokens` tokens is cut into.
    ///
    /// Zero tokens means zero chunks.
    fn estimate_chunks(&self, n_tokens: usize) -> usize;
}
