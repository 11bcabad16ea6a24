//! # Google Speech Client
//!
//! Synthesizes speech through the `batchexecute` RPC behind Google
//! Translate's "listen" button (RPC id `jQ1olc`).
//!
//! ## Request flow:
//! 1. Reject languages the voice service does not speak
//! 2. Split the text into chunks of at most `chunk_chars` characters,
//!    preferring sentence punctuation, then spaces, then a hard cut
//! 3. POST one RPC per chunk; each answer carries base64 MP3 audio
//! 4. Concatenate the chunks (MPEG frames can be appended back to back)
//!
//! ## Response format:
//! ```text
//! )]}'
//!
//! 104
//! [["wrb.fr","jQ1olc","[\"//NExAAR...\"]",null,null,null,"generic"],...]
//! ```

use super::{check_status, EngineError, SpeechSynthesizer};
use crate::audio::AudioClip;
use crate::config::SpeechConfig;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use tracing::{debug, warn};

const RPC_ID: &str = "jQ1olc";

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Language codes the speech service can voice. Sanskrit has no voice.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "ar", "bn", "de", "en", "es", "fr", "gu", "hi", "it", "ja", "kn", "ko", "ml", "mr", "ne", "pa",
    "ru", "ta", "te", "ur",
];

/// Marks that always end a chunk.
const BREAK_ALWAYS: &[char] = &[
    '?', '!', '\u{0964}', '\u{0965}', '\u{3002}', '\u{3001}', '\u{061F}', '\u{060C}', '\u{FF01}', '\u{FF1F}',
];

/// Marks that end a chunk only before whitespace or the end of the text,
/// so "1,250.50" and "10:30" stay in one piece.
const BREAK_BEFORE_SPACE: &[char] = &['.', ',', ';', ':'];

/// HTTP client for Google's web text-to-speech RPC.
pub struct GoogleSpeech {
    client: reqwest::Client,
    base_url: String,
    slow: bool,
    chunk_chars: usize,
}

impl GoogleSpeech {
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            slow: config.slow,
            chunk_chars: config.chunk_chars,
        }
    }

    /// Point the client at another host (used with mock servers).
    #[cfg(test)]
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(&SpeechConfig {
            base_url: base_url.to_string(),
            ..SpeechConfig::default()
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/_/TranslateWebserverUi/data/batchexecute", self.base_url)
    }

    async fn synthesize_chunk(&self, chunk: &str, language: &str) -> Result<Vec<u8>, EngineError> {
        let response = self
            .client
            .post(self.endpoint())
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::REFERER, "https://translate.google.com/")
            .form(&[("f.req", rpc_payload(chunk, language, self.slow))])
            .send()
            .await?;

        let body = check_status(response).await?.text().await?;
        extract_audio(&body)
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleSpeech {
    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioClip, EngineError> {
        if !SUPPORTED_LANGUAGES.contains(&language) {
            return Err(EngineError::UnsupportedLanguage(language.to_string()));
        }

        let chunks = split_text(text, self.chunk_chars);
        if chunks.is_empty() {
            return Err(EngineError::NothingToSpeak);
        }

        debug!(language, chunks = chunks.len(), "Synthesizing speech");

        let mut audio = Vec::new();
        for chunk in &chunks {
            audio.extend(self.synthesize_chunk(chunk, language).await?);
        }

        let clip = AudioClip::from_bytes(audio);
        if clip.is_empty() {
            return Err(EngineError::InvalidResponse("speech service returned no audio".to_string()));
        }
        if !clip.format().is_known() {
            warn!(language, bytes = clip.len(), "Speech service returned audio in an unrecognised container");
        }

        Ok(clip)
    }
}

/// Body of the `f.req` form field for one chunk.
fn rpc_payload(text: &str, language: &str, slow: bool) -> String {
    let speed = if slow { Value::Bool(true) } else { Value::Null };
    let parameter = json!([text, language, speed, "null"]).to_string();
    json!([[[RPC_ID, parameter, null, "generic"]]]).to_string()
}

/// Pull the base64 audio out of a `batchexecute` response.
fn extract_audio(body: &str) -> Result<Vec<u8>, EngineError> {
    for line in body.lines().filter(|line| line.contains(RPC_ID)) {
        let Ok(Value::Array(entries)) = serde_json::from_str::<Value>(line) else {
            continue;
        };

        for entry in &entries {
            if entry.get(1).and_then(Value::as_str) != Some(RPC_ID) {
                continue;
            }

            let encoded = entry
                .get(2)
                .and_then(Value::as_str)
                .and_then(|payload| serde_json::from_str::<Value>(payload).ok())
                .and_then(|payload| payload.get(0).and_then(Value::as_str).map(str::to_string))
                .ok_or_else(|| EngineError::InvalidResponse("speech RPC returned no audio".to_string()))?;

            return STANDARD
                .decode(encoded.as_bytes())
                .map_err(|e| EngineError::InvalidResponse(format!("audio is not valid base64: {}", e)));
        }
    }

    Err(EngineError::InvalidResponse("speech RPC result not found".to_string()))
}

/// Split `text` into speakable chunks of at most `max_chars` characters.
///
/// Whitespace is collapsed first. Chunks made only of punctuation are dropped
/// since the service has nothing to say for them.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chunks = Vec::new();

    for sentence in sentences(&cleaned) {
        let sentence = sentence.trim();
        if sentence.chars().any(char::is_alphanumeric) {
            minimize(sentence, max_chars.max(1), &mut chunks);
        }
    }

    chunks
}

/// Split after each break mark, keeping the mark with the text before it.
fn sentences(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let next = chars.peek().map(|&(_, next)| next);
        let ends = BREAK_ALWAYS.contains(&c)
            || (BREAK_BEFORE_SPACE.contains(&c) && next.map_or(true, char::is_whitespace));

        if ends {
            let end = idx + c.len_utf8();
            pieces.push(&text[start..end]);
            start = end;
        }
    }

    if start < text.len() {
        pieces.push(&text[start..]);
    }

    pieces
}

/// Cut an over-long sentence at the last space that keeps the piece in bounds.
fn minimize(sentence: &str, max_chars: usize, out: &mut Vec<String>) {
    let mut rest = sentence;

    while rest.chars().count() > max_chars {
        let limit = rest
            .char_indices()
            .nth(max_chars)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let cut = match rest[..limit].rfind(' ') {
            Some(idx) if idx > 0 => idx,
            _ => limit,
        };

        out.push(rest[..cut].trim_end().to_string());
        rest = rest[cut..].trim_start();
    }

    if !rest.is_empty() {
        out.push(rest.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn rpc_response(audio: &[u8]) -> String {
        let payload = json!([STANDARD.encode(audio)]).to_string();
        let line = json!([
            ["wrb.fr", RPC_ID, payload, null, null, null, "generic"],
            ["di", 42],
            ["af.httprm", 41, "123", 5]
        ])
        .to_string();
        format!(")]}}'\n\n{}\n{}\n25\n[[\"e\",4,null,null,{}]]\n", line.len(), line, line.len())
    }

    #[test]
    fn test_split_text_short_sentence_is_single_chunk() {
        assert_eq!(split_text("  Good   morning  ", 100), vec!["Good morning"]);
    }

    #[test]
    fn test_split_text_breaks_on_punctuation() {
        assert_eq!(
            split_text("नमस्ते, आप कैसे हैं?", 100),
            vec!["नमस्ते,", "आप कैसे हैं?"]
        );
        assert!(split_text("?! ...", 100).is_empty());
    }

    #[test]
    fn test_split_text_keeps_numbers_whole() {
        assert_eq!(
            split_text("I paid 1,250.50 rupees at 10:30", 100),
            vec!["I paid 1,250.50 rupees at 10:30"]
        );
        assert_eq!(
            split_text("It costs 3.5 euros. Pay at 9:15, please.", 100),
            vec!["It costs 3.5 euros.", "Pay at 9:15,", "please."]
        );
        assert_eq!(split_text("Wait!Now", 100), vec!["Wait!", "Now"]);
    }

    #[test]
    fn test_split_text_respects_limit() {
        let text = "word ".repeat(60);
        let chunks = split_text(&text, 100);
        assert!(chunks.len() >= 3);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 100, "chunk too long: {}", chunk.len());
        }
        assert_eq!(chunks.join(" "), text.trim());

        // No spaces at all: hard cut on character boundaries.
        let devanagari = "क".repeat(250);
        let chunks = split_text(&devanagari, 100);
        assert_eq!(chunks.iter().map(|c| c.chars().count()).collect::<Vec<_>>(), vec![100, 100, 50]);
    }

    #[test]
    fn test_rpc_payload_shape() {
        let payload = rpc_payload("Bonjour", "fr", false);
        assert_eq!(payload, r#"[[["jQ1olc","[\"Bonjour\",\"fr\",null,\"null\"]",null,"generic"]]]"#);
        assert!(rpc_payload("Bonjour", "fr", true).contains(r#"\"fr\",true"#));
    }

    #[test]
    fn test_extract_audio() {
        let audio = extract_audio(&rpc_response(b"ID3-first")).unwrap();
        assert_eq!(audio, b"ID3-first");

        assert!(extract_audio(")]}'\n\n[[\"wrb.fr\",\"jQ1olc\",null]]").is_err());
        assert!(extract_audio("<html>blocked</html>").is_err());
    }

    #[tokio::test]
    async fn test_synthesize_concatenates_chunks() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/_/TranslateWebserverUi/data/batchexecute"))
            .and(body_string_contains(RPC_ID))
            .respond_with(ResponseTemplate::new(200).set_body_string(rpc_response(b"ID3chunk")))
            .expect(2)
            .mount(&server)
            .await;

        let speech = GoogleSpeech::with_base_url(&server.uri());
        let clip = speech.synthesize("Bonjour. Comment allez-vous ?", "fr").await.unwrap();

        assert_eq!(clip.bytes(), b"ID3chunkID3chunk");
        assert_eq!(clip.mime_type(), "audio/mpeg");
    }

    #[tokio::test]
    async fn test_empty_audio_is_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/_/TranslateWebserverUi/data/batchexecute"))
            .respond_with(ResponseTemplate::new(200).set_body_string(rpc_response(b"")))
            .expect(1)
            .mount(&server)
            .await;

        let speech = GoogleSpeech::with_base_url(&server.uri());
        assert!(matches!(
            speech.synthesize("Bonjour", "fr").await,
            Err(EngineError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_unsupported_language_skips_network() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let speech = GoogleSpeech::with_base_url(&server.uri());
        assert!(matches!(
            speech.synthesize("नमः", "sa").await,
            Err(EngineError::UnsupportedLanguage(code)) if code == "sa"
        ));
        assert!(matches!(speech.synthesize("...", "en").await, Err(EngineError::NothingToSpeak)));
    }
}
