//! File-to-file summarization.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::{Result, Summarizer};

/// First line of every summary file.
pub const OUTPUT_HEADER: &str = "Summary:";

/// Summarize the UTF-8 file at `input` and write the result to `output`.
///
/// The output file holds [`OUTPUT_HEADER`], a newline, then the summary. The
/// summary is also returned.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] on read or write failure,
/// [`crate::Error::Utf8`] if the input is not UTF-8, and any pipeline error.
pub async fn summarize_file(
    summarizer: &Summarizer,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<String> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let text = String::from_utf8(tokio::fs::read(input).await?)?;
    info!(input = %input.display(), chars = text.chars().count(), "summarizing file");

    let summary = summarizer.summarize_document(&text).await?;
    tokio::fs::write(output, format!("{OUTPUT_HEADER}\n{summary}\n")).await?;
    info!(output = %output.display(), "summary written");
    Ok(summary)
}

/// Outcome of summarizing a file and an inline text side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Summary of the inline text.
    pub text_summary: String,
    /// Summary of the input file, as written to `output`.
    pub file_summary: String,
    /// File that was read.
    pub input: PathBuf,
    /// File that was written.
    pub output: PathBuf,
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary from text:\n{}\n", self.text_summary)?;
        writeln!(
            f,
            "Summary from file ({}):\n{}",
            self.input.display(),
            self.file_summary
        )?;
        write!(f, "\nWritten to {}", self.output.display())
    }
}

/// Summarize `input` into `output`, then summarize `text`.
///
/// The file goes first, so a bad input path fails before any model call is
/// spent on `text`.
///
/// # Errors
///
/// Same as [`summarize_file`], plus pipeline errors for `text`.
pub async fn summarize_file_and_text(
    summarizer: &Summarizer,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    text: &str,
) -> Result<FileReport> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let file_summary = summarize_file(summarizer, input, output).await?;
    let text_summary = summarizer.summarize_document(text).await?;
    Ok(FileReport {
        text_summary,
        file_summary,
        input: input.to_path_buf(),
        output: output.to_path_buf(),
    })
}
