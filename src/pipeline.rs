//! Chunk, summarize, aggregate.
//!
//! ```text
//! text ──encode──▶ [t0 .. tN) ──windows──▶ chunk 0, chunk 1, ..., chunk k
//!                                             │        │             │
//!                                          model    model         model
//!                                             │        │             │
//!                                          sum 0 ␣  sum 1  ␣ ... ␣ sum k
//! ```
//!
//! Chunks are summarized independently. With `concurrency > 1` several model
//! calls are in flight at once, but results are still joined in chunk order.
//! The first failure aborts the document; no partial summary is returned.

use std::sync::Arc;

use futures::{StreamExt, TryStreamExt};
use tracing::{debug, info};

use crate::{
    Chunk, ChunkWindow, Chunker, Result, SummaryLength, SummaryModel, TokenChunker, Tokenizer,
};

/// Knobs for a [`Summarizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarizerOptions {
    /// Token window used to cut the input.
    pub window: ChunkWindow,
    /// Output bounds for each chunk summary.
    pub length: SummaryLength,
    /// Model calls in flight at once. `1` is strictly sequential.
    pub concurrency: usize,
}

impl Default for SummarizerOptions {
    fn default() -> Self {
        Self {
            window: ChunkWindow::default(),
            length: SummaryLength::default(),
            concurrency: 1,
        }
    }
}

/// Join chunk summaries with single spaces, in order.
///
/// ```rust
/// use precis::aggregate;
///
/// assert_eq!(aggregate::<&str>(&[]), "");
/// assert_eq!(aggregate(&["only"]), "only");
/// assert_eq!(aggregate(&["a.", "b."]), "a. b.");
/// ```
pub fn aggregate<S: AsRef<str>>(summaries: &[S]) -> String {
    let mut out = String::with_capacity(summaries.iter().map(|s| s.as_ref().len() + 1).sum());
    for (i, summary) in summaries.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(summary.as_ref());
    }
    out
}

/// Document summarizer over injected tokenizer and model handles.
///
/// Handles are shared, read-only, and usually created once per process.
#[derive(Clone)]
pub struct Summarizer {
    chunker: TokenChunker,
    model: Arc<dyn SummaryModel>,
    length: SummaryLength,
    concurrency: usize,
}

impl Summarizer {
    /// Build a summarizer. Options are already validated by their types.
    #[must_use]
    pub fn new(
        tokenizer: Arc<dyn Tokenizer>,
        model: Arc<dyn SummaryModel>,
        options: SummarizerOptions,
    ) -> Self {
        Self {
            chunker: TokenChunker::with_window(tokenizer, options.window),
            model,
            length: options.length,
            concurrency: options.concurrency.max(1),
        }
    }

    /// The token window used for chunking.
    #[must_use]
    pub const fn window(&self) -> ChunkWindow {
        self.chunker.window()
    }

    /// Per-chunk summary bounds.
    #[must_use]
    pub const fn length(&self) -> SummaryLength {
        self.length
    }

    /// Cut `text` into decoded token windows.
    ///
    /// # Errors
    ///
    /// Propagates tokenizer failures.
    pub fn chunk(&self, text: &str) -> Result<Vec<Chunk>> {
        self.chunker.chunk(text)
    }

    /// Summarize one chunk of text.
    ///
    /// # Errors
    ///
    /// Propagates model failures unchanged.
    pub async fn summarize_chunk(&self, text: &str) -> Result<String> {
        self.model.summarize(text, self.length).await
    }

    /// Chunk `text`, summarize every chunk, join the summaries.
    ///
    /// Empty input yields an empty summary without calling the model.
    ///
    /// # Errors
    ///
    /// Returns the first tokenizer or model error encountered.
    pub async fn summarize_document(&self, text: &str) -> Result<String> {
        let chunks = self.chunk(text)?;
        let window = self.window();
        info!(
            chunks = chunks.len(),
            max_tokens = window.max_tokens(),
            overlap = window.overlap(),
            "summarizing document"
        );

        let summaries: Vec<String> = futures::stream::iter(chunks)
            .map(|chunk| async move {
                debug!(
                    index = chunk.index,
                    start = chunk.start,
                    end = chunk.end,
                    "summarizing chunk"
                );
                self.summarize_chunk(&chunk.text).await
            })
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        Ok(aggregate(&summaries))
    }
}

impl std::fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summarizer")
            .field("chunker", &self.chunker)
            .field("length", &self.length)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}
