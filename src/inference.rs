//! Hosted inference backend.
//!
//! Speaks the Hugging Face Inference API summarization schema, which most
//! self-hosted summarization servers accept as well:
//!
//! ```text
//! POST {endpoint}/{model}
//! { "inputs": "...",
//!   "parameters": { "max_length": 150, "min_length": 50, "do_sample": false },
//!   "options": { "wait_for_model": true } }
//!
//! 200 [ { "summary_text": "..." } ]
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result, SummaryLength, SummaryModel};

/// Default hosted inference base URL.
pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co/models";

/// Default summarization model.
pub const DEFAULT_MODEL: &str = "facebook/bart-large-cnn";

#[derive(Debug, Serialize)]
struct SummarizeRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
    options: Options,
}

#[derive(Debug, Serialize)]
struct Parameters {
    max_length: usize,
    min_length: usize,
    do_sample: bool,
}

#[derive(Debug, Serialize)]
struct Options {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

/// HTTP client for a hosted summarization model.
#[derive(Clone)]
pub struct InferenceClient {
    http: Client,
    url: String,
    token: Option<String>,
}

impl InferenceClient {
    /// Client posting to `url` verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Model`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: Client::builder().build()?,
            url: url.into(),
            token: None,
        })
    }

    /// Client for `model` under `endpoint`, e.g. [`DEFAULT_ENDPOINT`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Model`] if the HTTP client cannot be built.
    pub fn for_model(endpoint: &str, model: &str) -> Result<Self> {
        Self::new(format!("{}/{model}", endpoint.trim_end_matches('/')))
    }

    /// Send `Authorization: Bearer <token>` with every request.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// The URL requests are posted to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for InferenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceClient")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SummaryModel for InferenceClient {
    async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String> {
        let req = SummarizeRequest {
            inputs: text,
            parameters: Parameters {
                max_length: length.max_tokens(),
                min_length: length.min_tokens(),
                do_sample: false,
            },
            options: Options {
                wait_for_model: true,
            },
        };

        let mut request = self.http.post(&self.url).json(&req);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::ModelStatus {
                status: status.as_u16(),
                body,
            });
        }

        let outputs: Vec<SummaryOutput> = response.json().await?;
        debug!(url = %self.url, outputs = outputs.len(), "inference response");
        outputs
            .into_iter()
            .next()
            .map(|out| out.summary_text)
            .ok_or_else(|| Error::Model("endpoint returned no summaries".to_string()))
    }
}
