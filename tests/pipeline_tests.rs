//! End-to-end pipeline scenarios with test doubles for the model.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::{summarizer, FailingModel, PrefixModel, RecordingModel, SlowFirstModel};
use precis::{
    aggregate, chunk_text, CharTokenizer, ChunkWindow, Error, ErrorKind, Summarizer,
    SummarizerOptions, SummaryLength,
};

#[tokio::test]
async fn three_windows_three_summaries() {
    let s = summarizer(Arc::new(PrefixModel), 4, 1, 1);

    let spans: Vec<_> = s.chunk("abcdefghij").unwrap().iter().map(|c| c.span()).collect();
    assert_eq!(spans, vec![0..4, 3..7, 6..10]);

    let summary = s.summarize_document("abcdefghij").await.unwrap();
    assert_eq!(summary, "S:abcd S:defg S:ghij");
}

#[tokio::test]
async fn short_text_is_one_model_call() {
    let model = Arc::new(RecordingModel::default());
    let s = summarizer(model.clone(), 512, 50, 1);

    let summary = s.summarize_document("A short note.").await.unwrap();
    assert_eq!(summary, "S:A short note.");

    let calls = model.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "A short note.");
    assert_eq!(calls[0].1, SummaryLength::default());
}

#[tokio::test]
async fn summary_length_is_forwarded() {
    let model = Arc::new(RecordingModel::default());
    let s = Summarizer::new(
        Arc::new(CharTokenizer),
        model.clone(),
        SummarizerOptions {
            length: SummaryLength::new(5, 20).unwrap(),
            ..SummarizerOptions::default()
        },
    );

    s.summarize_chunk("anything").await.unwrap();
    let calls = model.calls.lock().unwrap();
    assert_eq!(calls[0].1.min_tokens(), 5);
    assert_eq!(calls[0].1.max_tokens(), 20);
}

#[tokio::test]
async fn failing_chunk_aborts_document() {
    let model = Arc::new(FailingModel::new(1));
    let s = summarizer(model.clone(), 4, 1, 1);

    let err = s.summarize_document("abcdefghij").await.unwrap_err();
    assert!(matches!(err, Error::Model(_)));
    assert_eq!(err.kind(), ErrorKind::Processing);
    // Sequential: the third chunk is never requested.
    assert_eq!(model.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn concurrent_summaries_keep_chunk_order() {
    let text = "abcdefghijklmnopqrstuvwxyz";
    let sequential = summarizer(Arc::new(PrefixModel), 6, 2, 1)
        .summarize_document(text)
        .await
        .unwrap();
    let concurrent = summarizer(Arc::new(SlowFirstModel::default()), 6, 2, 4)
        .summarize_document(text)
        .await
        .unwrap();

    assert_eq!(sequential, concurrent);
    assert!(concurrent.starts_with("S:abcdef S:efghij"));
}

#[tokio::test]
async fn same_input_same_output() {
    let s = summarizer(Arc::new(PrefixModel), 7, 3, 2);
    let text = "The quick brown fox jumps over the lazy dog.";
    let first = s.summarize_document(text).await.unwrap();
    let second = s.summarize_document(text).await.unwrap();
    assert_eq!(first, second);
}

#[test]
fn invalid_window_is_configuration_error() {
    let err = chunk_text(&CharTokenizer, "abc", 10, 10).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(ChunkWindow::new(10, 11).unwrap_err().is_config());
}

#[test]
fn aggregate_contract() {
    assert_eq!(aggregate::<&str>(&[]), "");
    assert_eq!(aggregate(&["one"]), "one");
    assert_eq!(aggregate(&["one", "two", "three"]), "one two three");
}
