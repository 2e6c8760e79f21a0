//! File-to-file summarization.

mod common;

use std::sync::Arc;

use common::{summarizer, PrefixModel, RecordingModel};
use precis::file::{summarize_file, summarize_file_and_text, OUTPUT_HEADER};
use precis::Error;

#[tokio::test]
async fn writes_header_then_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("summary.txt");
    std::fs::write(&input, "abcdefghij").unwrap();

    let s = summarizer(Arc::new(PrefixModel), 4, 1, 1);
    let summary = summarize_file(&s, &input, &output).await.unwrap();
    assert_eq!(summary, "S:abcd S:defg S:ghij");

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, format!("{OUTPUT_HEADER}\nS:abcd S:defg S:ghij\n"));
    assert!(written.starts_with("Summary:\n"));
}

#[tokio::test]
async fn missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let s = summarizer(Arc::new(PrefixModel), 4, 1, 1);

    let err = summarize_file(&s, dir.path().join("absent.txt"), dir.path().join("out.txt"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(!dir.path().join("out.txt").exists());
}

#[tokio::test]
async fn non_utf8_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("latin1.txt");
    std::fs::write(&input, [0x63, 0x61, 0x66, 0xe9]).unwrap();

    let s = summarizer(Arc::new(PrefixModel), 4, 1, 1);
    let err = summarize_file(&s, &input, dir.path().join("out.txt"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Utf8(_)));
}

#[tokio::test]
async fn file_and_text_are_both_summarized() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("summary.txt");
    std::fs::write(&input, "abcdefghij").unwrap();

    let s = summarizer(Arc::new(PrefixModel), 4, 1, 1);
    let report = summarize_file_and_text(&s, &input, &output, "xyz")
        .await
        .unwrap();

    assert_eq!(report.file_summary, "S:abcd S:defg S:ghij");
    assert_eq!(report.text_summary, "S:xyz");
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Summary:\nS:abcd S:defg S:ghij\n"
    );
    assert_eq!(
        report.to_string(),
        format!(
            "Summary from text:\nS:xyz\n\nSummary from file ({}):\nS:abcd S:defg S:ghij\n\nWritten to {}",
            input.display(),
            output.display()
        )
    );
}

#[tokio::test]
async fn missing_file_skips_inline_text() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(RecordingModel::default());
    let s = summarizer(model.clone(), 4, 1, 1);

    let err = summarize_file_and_text(
        &s,
        dir.path().join("absent.txt"),
        dir.path().join("out.txt"),
        "xyz",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(model.calls.lock().unwrap().is_empty());
}
