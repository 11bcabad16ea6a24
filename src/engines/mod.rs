//! # External Engines
//!
//! The translator leans on three collaborators it does not implement itself:
//!
//! - **Translator**: source code + target code + text → translated text
//! - **Transliterator**: text + script + romanization scheme → romanized text
//! - **SpeechSynthesizer**: text + language code → encoded audio bytes
//!
//! Each one is a trait so the orchestrator can be driven by the real HTTP
//! clients in production and by in-memory fakes in tests.
//!
//! ## Key Rust Concepts Used:
//! - **async_trait**: Lets trait methods be `async` while staying object safe
//! - **`Send + Sync` bounds**: Engines live in `Arc<dyn ...>` shared across actix workers
//! - **thiserror**: Derives `Display` and `Error` for the failure enum

pub mod google;
pub mod speech;

#[cfg(test)]
pub mod fake;

pub use google::GoogleTranslator;
pub use speech::GoogleSpeech;

use crate::audio::AudioClip;
use crate::catalog::Script;
use async_trait::async_trait;
use thiserror::Error;

/// Everything that can go wrong inside an engine call.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    InvalidResponse(String),

    #[error("no translation was returned")]
    EmptyResult,

    #[error("text is {length} characters long, the limit is {limit}")]
    InputTooLong { length: usize, limit: usize },

    #[error("language '{0}' is not supported")]
    UnsupportedLanguage(String),

    #[error("no text to speak")]
    NothingToSpeak,
}

/// Target notation for romanized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RomanScheme {
    /// Indian languages TRANSliteration, an ASCII phonetic scheme
    Itrans,
}

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` to `target` (both engine language codes).
    async fn translate(&self, source: &str, target: &str, text: &str) -> Result<String, EngineError>;
}

pub trait Transliterator: Send + Sync {
    /// Romanize `text` written in `script` into `scheme`.
    fn transliterate(&self, text: &str, script: Script, scheme: RomanScheme) -> Result<String, EngineError>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak `text` in `language` (an engine language code).
    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioClip, EngineError>;
}

/// Turn a non-success response into [`EngineError::Status`], keeping a bit of the body.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, EngineError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let mut body = response.text().await.unwrap_or_default();
    if body.len() > 200 {
        let cut = (0..=200).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        body.truncate(cut);
    }

    Err(EngineError::Status {
        status: status.as_u16(),
        body,
    })
}
