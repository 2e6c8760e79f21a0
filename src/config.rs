//! Process configuration and one-shot handle loading.
//!
//! Tokenizer and model handles are built exactly once, at startup, by
//! [`ModelConfig::load`] and then injected everywhere else. Nothing in the
//! crate reaches for a global.

use std::net::SocketAddr;
#[cfg(feature = "hf")]
use std::path::PathBuf;
#[cfg(feature = "hf")]
use std::sync::Arc;

#[cfg(feature = "hf")]
use tracing::info;

#[cfg(feature = "hf")]
use crate::{HfTokenizer, InferenceClient, Result, Summarizer, SummarizerOptions};
use crate::inference::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// Maximum accepted request body, in bytes (10 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";

/// Where the tokenizer and model come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Hub model id, used for both the tokenizer and the inference URL.
    pub model: String,
    /// Local `tokenizer.json`; fetched from the Hub when unset.
    #[cfg(feature = "hf")]
    pub tokenizer_path: Option<PathBuf>,
    /// Inference base URL; the model id is appended.
    pub endpoint: String,
    /// Bearer token for the Hub and the inference endpoint.
    pub api_token: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            #[cfg(feature = "hf")]
            tokenizer_path: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_token: None,
        }
    }
}

#[cfg(feature = "hf")]
impl ModelConfig {
    /// Load the tokenizer, connect the model, and assemble a [`Summarizer`].
    ///
    /// Blocking when the tokenizer has to be downloaded; call it before
    /// serving, or from `spawn_blocking`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Tokenizer`] if the tokenizer cannot be loaded and
    /// [`crate::Error::Model`] if the HTTP client cannot be built.
    pub fn load(&self, options: SummarizerOptions) -> Result<Summarizer> {
        let tokenizer = match &self.tokenizer_path {
            Some(path) => HfTokenizer::from_file(path)?,
            None => HfTokenizer::from_pretrained(&self.model, self.api_token.clone())?,
        };
        let model = InferenceClient::for_model(&self.endpoint, &self.model)?
            .with_token(self.api_token.clone());
        info!(
            model = %self.model,
            url = model.url(),
            vocab = tokenizer.vocab_size(),
            "model handles ready"
        );
        Ok(Summarizer::new(Arc::new(tokenizer), Arc::new(model), options))
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind.
    pub addr: SocketAddr,
    /// Request body cap, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
