//! In-memory engines for tests.
//!
//! All three are deterministic and count their calls so tests can assert which
//! stages ran.

use super::{EngineError, RomanScheme, SpeechSynthesizer, Transliterator, Translator};
use crate::audio::AudioClip;
use crate::catalog::Script;
use crate::orchestrator::Orchestrator;
use crate::transliteration::ItransTransliterator;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Known phrases, a native greeting per Indic target, and a tagged echo for
/// everything else.
#[derive(Default)]
pub struct FakeTranslator {
    pub calls: AtomicUsize,
    pub fail: bool,
}

fn greeting(code: &str) -> Option<&'static str> {
    Some(match code {
        "hi" | "ne" => "नमस्ते",
        "mr" => "नमस्कार",
        "sa" => "नमः",
        "ta" => "வணக்கம்",
        "te" => "నమస్కారం",
        "bn" => "নমস্কার",
        "gu" => "નમસ્તે",
        "kn" => "ನಮಸ್ಕಾರ",
        "ml" => "നമസ്കാരം",
        "pa" => "ਸਤ ਸ੍ਰੀ ਅਕਾਲ",
        _ => return None,
    })
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(&self, source: &str, target: &str, text: &str) -> Result<String, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(EngineError::Status {
                status: 503,
                body: "quota exceeded".to_string(),
            });
        }

        Ok(match (source, target, text) {
            ("en", "hi", "Hello, how are you?") => "नमस्ते, आप कैसे हैं?".to_string(),
            ("en", "fr", "Good morning") => "Bonjour".to_string(),
            ("en", "fr", "<b>bold</b>") => "<b>gras</b>".to_string(),
            _ => match greeting(target) {
                Some(native) => native.to_string(),
                None => format!("[{}] {}", target, text),
            },
        })
    }
}

/// The real ITRANS table with a call counter in front.
#[derive(Default)]
pub struct CountingTransliterator {
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl Transliterator for CountingTransliterator {
    fn transliterate(&self, text: &str, script: Script, scheme: RomanScheme) -> Result<String, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(EngineError::InvalidResponse(format!("no {} table", script)));
        }
        ItransTransliterator.transliterate(text, script, scheme)
    }
}

/// Returns an ID3-tagged clip whose payload is the spoken text.
#[derive(Default)]
pub struct FakeSpeech {
    pub calls: AtomicUsize,
    pub fail: bool,
}

#[async_trait]
impl SpeechSynthesizer for FakeSpeech {
    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioClip, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(EngineError::UnsupportedLanguage(language.to_string()));
        }
        let mut bytes = b"ID3\x04\x00".to_vec();
        bytes.extend_from_slice(text.as_bytes());
        Ok(AudioClip::from_bytes(bytes))
    }
}

/// Orchestrator wired to fakes; `fail_translation` makes every translation fail.
pub fn orchestrator(fail_translation: bool) -> Orchestrator {
    Orchestrator::new(
        Arc::new(FakeTranslator {
            fail: fail_translation,
            ..Default::default()
        }),
        Arc::new(CountingTransliterator::default()),
        Arc::new(FakeSpeech::default()),
    )
}
