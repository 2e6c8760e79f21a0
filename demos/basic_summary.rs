//! Basic Chunked Summarization
//!
//! Runs the whole pipeline offline: one token per character and a "model"
//! that keeps the first sentence of each chunk.
//!
//! ```bash
//! cargo run --example basic_summary
//! ```

use std::sync::Arc;

use precis::{
    async_trait, CharTokenizer, ChunkWindow, Result, Summarizer, SummarizerOptions, SummaryLength,
    SummaryModel,
};

/// Keeps the first sentence of its input.
struct LeadSentence;

#[async_trait]
impl SummaryModel for LeadSentence {
    async fn summarize(&self, text: &str, _: SummaryLength) -> Result<String> {
        let text = text.trim();
        let end = text.find(". ").map_or(text.len(), |i| i + 1);
        Ok(text[..end].to_string())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let document = "Machine learning models learn patterns from data. \
        They generalize these patterns to make predictions. \
        This is fundamentally different from traditional programming. \
        Deep learning extends this with multiple hidden layers. \
        Each layer learns increasingly abstract representations.";

    let summarizer = Summarizer::new(
        Arc::new(CharTokenizer),
        Arc::new(LeadSentence),
        SummarizerOptions {
            window: ChunkWindow::new(120, 20)?,
            ..SummarizerOptions::default()
        },
    );

    let chunks = summarizer.chunk(document)?;
    println!("Document: {} chars", document.chars().count());
    println!("Chunks: {}\n", chunks.len());
    for chunk in &chunks {
        println!("[{}] tokens {}..{}: \"{}\"", chunk.index, chunk.start, chunk.end, chunk.text);
    }

    // Chunks overlap, so a sentence may open two windows in a row.
    let summary = summarizer.summarize_document(document).await?;
    println!("\nSummary: {summary}");

    Ok(())
}
