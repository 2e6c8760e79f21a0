//! Hugging Face tokenizer backend (requires the `hf` feature).
//!
//! Wraps a `tokenizers::Tokenizer` loaded from a `tokenizer.json`, either a
//! local file or one fetched from the Hub with `hf-hub`. Encoding yields
//! content tokens only: the model adds its own special tokens (BOS/EOS for
//! BART) to every chunk, and blank input encodes to nothing. Decoding skips
//! any special tokens it is given.

use std::path::Path;

use hf_hub::api::sync::ApiBuilder;
use tracing::info;

use crate::{Error, Result, Tokenizer};

/// A `tokenizers` tokenizer behind the [`Tokenizer`] trait.
pub struct HfTokenizer {
    inner: tokenizers::Tokenizer,
}

impl HfTokenizer {
    /// Wrap an already-built tokenizer.
    #[must_use]
    pub const fn new(inner: tokenizers::Tokenizer) -> Self {
        Self { inner }
    }

    /// Load a `tokenizer.json` from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tokenizer`] if the file is missing or malformed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let inner = tokenizers::Tokenizer::from_file(path)
            .map_err(|e| Error::Tokenizer(format!("{}: {e}", path.display())))?;
        Ok(Self::new(inner))
    }

    /// Fetch `tokenizer.json` for `model` from the Hugging Face Hub.
    ///
    /// Blocking: performs network I/O on a cache miss. The file is cached
    /// under the usual `HF_HOME` location.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tokenizer`] if the download or parse fails.
    pub fn from_pretrained(model: &str, token: Option<String>) -> Result<Self> {
        info!(model, "fetching tokenizer from the hub");
        let api = ApiBuilder::new()
            .with_token(token)
            .build()
            .map_err(|e| Error::Tokenizer(e.to_string()))?;
        let path = api
            .model(model.to_string())
            .get("tokenizer.json")
            .map_err(|e| Error::Tokenizer(format!("{model}: {e}")))?;
        Self::from_file(path)
    }

    /// Vocabulary size including added tokens.
    #[must_use]
    pub fn vocab_size(&self) -> usize {
        self.inner.get_vocab_size(true)
    }
}

impl Tokenizer for HfTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| Error::Tokenizer(e.to_string()))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        self.inner
            .decode(ids, true)
            .map_err(|e| Error::Tokenizer(e.to_string()))
    }
}

impl std::fmt::Debug for HfTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HfTokenizer")
            .field("vocab_size", &self.vocab_size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chunk_text, Chunker, TokenChunker};
    use std::sync::Arc;

    /// Word-level vocabulary with a BART-style `<s> $A </s>` template.
    const WORD_LEVEL: &str = r#"{
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [
            {"id": 0, "content": "<s>", "single_word": false, "lstrip": false,
             "rstrip": false, "normalized": false, "special": true},
            {"id": 1, "content": "</s>", "single_word": false, "lstrip": false,
             "rstrip": false, "normalized": false, "special": true}
        ],
        "normalizer": null,
        "pre_tokenizer": {"type": "Whitespace"},
        "post_processor": {
            "type": "TemplateProcessing",
            "single": [
                {"SpecialToken": {"id": "<s>", "type_id": 0}},
                {"Sequence": {"id": "A", "type_id": 0}},
                {"SpecialToken": {"id": "</s>", "type_id": 0}}
            ],
            "pair": [
                {"SpecialToken": {"id": "<s>", "type_id": 0}},
                {"Sequence": {"id": "A", "type_id": 0}},
                {"SpecialToken": {"id": "</s>", "type_id": 0}},
                {"Sequence": {"id": "B", "type_id": 1}},
                {"SpecialToken": {"id": "</s>", "type_id": 1}}
            ],
            "special_tokens": {
                "<s>": {"id": "<s>", "ids": [0], "tokens": ["<s>"]},
                "</s>": {"id": "</s>", "ids": [1], "tokens": ["</s>"]}
            }
        },
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": {"<s>": 0, "</s>": 1, "<unk>": 2, "the": 3, "cat": 4, "sat": 5, "down": 6},
            "unk_token": "<unk>"
        }
    }"#;

    fn word_level() -> HfTokenizer {
        HfTokenizer::new(tokenizers::Tokenizer::from_bytes(WORD_LEVEL.as_bytes()).unwrap())
    }

    #[test]
    fn test_encode_leaves_out_special_tokens() {
        let tok = word_level();
        assert_eq!(tok.encode("the cat sat").unwrap(), [3, 4, 5]);

        // The template itself is live: the model would see <s> ... </s>.
        let with_special = tok.inner.encode("the cat sat", true).unwrap();
        assert_eq!(with_special.get_ids(), [0, 3, 4, 5, 1]);
    }

    #[test]
    fn test_decode_skips_special_tokens() {
        let tok = word_level();
        assert_eq!(tok.decode(&[0, 3, 4, 1]).unwrap(), "the cat");
        assert_eq!(tok.decode(&[3, 4, 5, 6]).unwrap(), "the cat sat down");
    }

    #[test]
    fn test_blank_input_has_no_tokens_or_chunks() {
        let tok = word_level();
        assert!(tok.encode("").unwrap().is_empty());
        assert!(tok.encode("   ").unwrap().is_empty());

        assert!(chunk_text(&tok, "", 4, 1).unwrap().is_empty());
        assert!(chunk_text(&tok, "  ", 4, 1).unwrap().is_empty());

        let chunker = TokenChunker::new(Arc::new(word_level()), 4, 1).unwrap();
        assert!(chunker.chunk("").unwrap().is_empty());
        assert!(chunker.chunk("  ").unwrap().is_empty());
    }

    #[test]
    fn test_windows_over_word_tokens() {
        let tok = word_level();
        let chunks = chunk_text(&tok, "the cat sat down", 2, 1).unwrap();
        assert_eq!(chunks, ["the cat", "cat sat", "sat down"]);
    }

    #[test]
    fn test_missing_file_is_tokenizer_error() {
        let err = HfTokenizer::from_file("/nonexistent/tokenizer.json").unwrap_err();
        assert!(matches!(err, Error::Tokenizer(_)));
        assert!(err.to_string().contains("/nonexistent/tokenizer.json"));
    }

    #[test]
    fn test_malformed_file_is_tokenizer_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokenizer.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            HfTokenizer::from_file(&path),
            Err(Error::Tokenizer(_))
        ));
    }
}
