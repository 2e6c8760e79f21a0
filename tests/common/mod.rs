#![allow(dead_code)]
//! Test doubles shared by the integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use precis::{
    async_trait, CharTokenizer, ChunkWindow, Error, Result, Summarizer, SummarizerOptions,
    SummaryLength, SummaryModel,
};

/// Summarizes any text as `"S:" + text`.
pub struct PrefixModel;

#[async_trait]
impl SummaryModel for PrefixModel {
    async fn summarize(&self, text: &str, _: SummaryLength) -> Result<String> {
        Ok(format!("S:{text}"))
    }
}

/// Records every call, then answers like [`PrefixModel`].
#[derive(Default)]
pub struct RecordingModel {
    pub calls: Mutex<Vec<(String, SummaryLength)>>,
}

#[async_trait]
impl SummaryModel for RecordingModel {
    async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String> {
        self.calls.lock().unwrap().push((text.to_string(), length));
        Ok(format!("S:{text}"))
    }
}

/// Fails on the call with the given zero-based index.
pub struct FailingModel {
    pub fail_at: usize,
    pub calls: AtomicUsize,
}

impl FailingModel {
    pub fn new(fail_at: usize) -> Self {
        Self {
            fail_at,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SummaryModel for FailingModel {
    async fn summarize(&self, text: &str, _: SummaryLength) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call == self.fail_at {
            return Err(Error::Model(format!("inference failed on call {call}")));
        }
        Ok(format!("S:{text}"))
    }
}

/// Sleeps longer on earlier calls so completions arrive out of order.
#[derive(Default)]
pub struct SlowFirstModel {
    pub calls: AtomicUsize,
}

#[async_trait]
impl SummaryModel for SlowFirstModel {
    async fn summarize(&self, text: &str, _: SummaryLength) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) as u64;
        tokio::time::sleep(Duration::from_millis(40u64.saturating_sub(call * 10))).await;
        Ok(format!("S:{text}"))
    }
}

/// Char-tokenized summarizer over `model`.
pub fn summarizer(
    model: Arc<dyn SummaryModel>,
    max_tokens: usize,
    overlap: usize,
    concurrency: usize,
) -> Summarizer {
    Summarizer::new(
        Arc::new(CharTokenizer),
        model,
        SummarizerOptions {
            window: ChunkWindow::new(max_tokens, overlap).unwrap(),
            length: SummaryLength::default(),
            concurrency,
        },
    )
}
