//! # Google Translation Client
//!
//! Talks to the public `translate_a/single` endpoint used by Google's web
//! widgets. The endpoint answers with a nested JSON array whose first element
//! lists translated segments:
//!
//! ```json
//! [[["नमस्ते", "Hello", null, null, 10]], null, "en"]
//! ```
//!
//! ## Input checks (made before any network call):
//! - Text longer than the configured limit → `EngineError::InputTooLong`
//! - Same source and target code → the text is returned untouched

use super::{check_status, EngineError, Translator};
use crate::config::TranslationConfig;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// HTTP client for Google's web translation endpoint.
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
    max_chars: usize,
}

impl GoogleTranslator {
    pub fn new(config: &TranslationConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_chars: config.max_chars,
        }
    }

    /// Point the client at another host (used with mock servers).
    #[cfg(test)]
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(&TranslationConfig {
            base_url: base_url.to_string(),
            ..TranslationConfig::default()
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/translate_a/single", self.base_url)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, source: &str, target: &str, text: &str) -> Result<String, EngineError> {
        let length = text.chars().count();
        if length > self.max_chars {
            return Err(EngineError::InputTooLong {
                length,
                limit: self.max_chars,
            });
        }

        if source == target {
            debug!(source, "Source and target match, skipping translation request");
            return Ok(text.to_string());
        }

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let body = check_status(response).await?.text().await?;
        let parsed: Value = serde_json::from_str(&body)
            .map_err(|e| EngineError::InvalidResponse(format!("translation body is not JSON: {}", e)))?;

        parse_translation(&parsed)
    }
}

/// Join the translated segments of a `translate_a/single` response.
fn parse_translation(body: &Value) -> Result<String, EngineError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| EngineError::InvalidResponse("missing translation segments".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(EngineError::EmptyResult);
    }

    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_joins_segments() {
        let body = json!([
            [["Bonjour. ", "Hello. ", null, null, 10], ["Comment allez-vous ?", "How are you?", null, null, 10]],
            null,
            "en"
        ]);
        assert_eq!(parse_translation(&body).unwrap(), "Bonjour. Comment allez-vous ?");
    }

    #[test]
    fn test_parse_rejects_unexpected_shapes() {
        assert!(matches!(
            parse_translation(&json!({"error": "nope"})),
            Err(EngineError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_translation(&json!([[[null, "Hello"]]])),
            Err(EngineError::EmptyResult)
        ));
    }

    #[tokio::test]
    async fn test_translate_against_mock_server() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("sl", "en"))
            .and(query_param("tl", "hi"))
            .and(query_param("q", "Hello"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([[["नमस्ते", "Hello", null, null, 10]], null, "en"])))
            .expect(1)
            .mount(&server)
            .await;

        let translator = GoogleTranslator::with_base_url(&server.uri());
        let translated = translator.translate("en", "hi", "Hello").await.unwrap();
        assert_eq!(translated, "नमस्ते");
    }

    #[tokio::test]
    async fn test_http_error_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&server)
            .await;

        let translator = GoogleTranslator::with_base_url(&server.uri());
        let err = translator.translate("en", "fr", "Good morning").await.unwrap_err();
        match err {
            EngineError::Status { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "Too Many Requests");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_same_language_and_long_input_skip_network() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let translator = GoogleTranslator::with_base_url(&server.uri());
        assert_eq!(translator.translate("fr", "fr", "Bonjour").await.unwrap(), "Bonjour");

        let long_text = "a".repeat(5001);
        assert!(matches!(
            translator.translate("en", "fr", &long_text).await,
            Err(EngineError::InputTooLong { length: 5001, limit: 5000 })
        ));
    }
}
