//! # Request Orchestrator
//!
//! Turns one submitted request into a displayable result. The steps always run
//! in the same order because every later step consumes the translated text:
//!
//! 1. **Validation**: blank input short-circuits to `Outcome::MissingInput`
//! 2. **Translation**: source code + target code + text
//! 3. **Transliteration**: only for targets listed in the script catalog;
//!    everything else reuses the translation as its "romanized" form
//! 4. **Speech synthesis**: translated text in the target language
//! 5. **Assembly**: all three pieces or nothing
//!
//! ## Error model:
//! Each stage has its own `TranslateError` variant so tests and logs can tell
//! them apart, while the `Display` output is the same single message the user
//! sees regardless of which stage failed.
//!
//! ## Key Rust Concepts Used:
//! - **`Arc<dyn Trait>`**: Engines are shared trait objects, swapped for fakes in tests
//! - **`map_err` + `?`**: Each stage tags its engine error and returns early

use crate::audio::AudioClip;
use crate::catalog::{self, Language};
use crate::config::AppConfig;
use crate::engines::{
    EngineError, GoogleSpeech, GoogleTranslator, RomanScheme, SpeechSynthesizer, Transliterator, Translator,
};
use crate::transliteration::ItransTransliterator;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Message shown when the text box is blank.
pub const MISSING_INPUT_MESSAGE: &str = "Please enter some text to translate!";

/// A language name that is not in the catalog.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown language '{0}'")]
pub struct UnknownLanguage(pub String);

/// Failure of one orchestration stage.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Translation failed: {0}")]
    Translation(#[source] EngineError),

    #[error("Translation failed: {0}")]
    Transliteration(#[source] EngineError),

    #[error("Translation failed: {0}")]
    Synthesis(#[source] EngineError),
}

impl TranslateError {
    /// Machine-readable name of the stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            TranslateError::Translation(_) => "translation",
            TranslateError::Transliteration(_) => "transliteration",
            TranslateError::Synthesis(_) => "synthesis",
        }
    }

    pub fn engine_error(&self) -> &EngineError {
        match self {
            TranslateError::Translation(err)
            | TranslateError::Transliteration(err)
            | TranslateError::Synthesis(err) => err,
        }
    }
}

/// One user submission.
///
/// Languages are stored as catalog references, so a request can only be
/// built from names the catalog knows.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub source: &'static Language,
    pub target: &'static Language,
    pub text: String,
}

impl TranslationRequest {
    /// Resolve display names against the catalog.
    pub fn new(source: &str, target: &str, text: impl Into<String>) -> Result<Self, UnknownLanguage> {
        let resolve = |name: &str| catalog::by_name(name).ok_or_else(|| UnknownLanguage(name.to_string()));

        Ok(Self {
            source: resolve(source)?,
            target: resolve(target)?,
            text: text.into(),
        })
    }
}

/// Everything produced by a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub translated: String,
    /// Lower-case ITRANS for Indic targets, otherwise identical to `translated`
    pub romanized: String,
    pub audio: AudioClip,
}

/// What a submission produced when no engine failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The text box was blank; nothing was sent to any engine
    MissingInput,
    Completed(TranslationResult),
}

/// Sequences the translation, transliteration and speech engines.
#[derive(Clone)]
pub struct Orchestrator {
    translator: Arc<dyn Translator>,
    transliterator: Arc<dyn Transliterator>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl Orchestrator {
    pub fn new(
        translator: Arc<dyn Translator>,
        transliterator: Arc<dyn Transliterator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            translator,
            transliterator,
            synthesizer,
        }
    }

    /// Production wiring: Google translation and speech, in-process ITRANS.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(GoogleTranslator::new(&config.translation)),
            Arc::new(ItransTransliterator),
            Arc::new(GoogleSpeech::new(&config.speech)),
        )
    }

    /// Run one submission to completion.
    pub async fn translate(&self, request: &TranslationRequest) -> Result<Outcome, TranslateError> {
        if request.text.trim().is_empty() {
            debug!("Blank input, no engine called");
            return Ok(Outcome::MissingInput);
        }

        let source = request.source.code;
        let target = request.target.code;

        info!(source, target, chars = request.text.chars().count(), "Translating");

        let translated = self
            .translator
            .translate(source, target, &request.text)
            .await
            .map_err(TranslateError::Translation)?;

        let romanized = match request.target.script() {
            Some(script) => self
                .transliterator
                .transliterate(&translated, script, RomanScheme::Itrans)
                .map_err(TranslateError::Transliteration)?
                .to_lowercase(),
            None => translated.clone(),
        };

        let audio = self
            .synthesizer
            .synthesize(&translated, target)
            .await
            .map_err(TranslateError::Synthesis)?;

        info!(source, target, audio_bytes = audio.len(), "Translation completed");

        Ok(Outcome::Completed(TranslationResult {
            translated,
            romanized,
            audio,
        }))
    }
}
