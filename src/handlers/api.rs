//! # JSON API Handlers
//!
//! ## Available Endpoints:
//! - `GET /api/v1/languages` - The language catalog in selector order
//! - `POST /api/v1/translate` - Translate, romanize and synthesize in one call
//!
//! ## Translate responses:
//! ```json
//! {
//!   "status": "ok",
//!   "source": "en",
//!   "target": "hi",
//!   "translated": "नमस्ते",
//!   "romanized": "namaste",
//!   "audio": { "mime": "audio/mpeg", "format": "mp3", "bytes": 5184, "base64": "SUQz..." }
//! }
//! ```
//! A blank `text` answers 200 with `{"status": "missing_input", "message": ...}`;
//! an engine failure answers 502 with a `translation_failed` error body.

use crate::audio::AudioFormat;
use crate::catalog::{self, Language, LANGUAGES};
use crate::error::{AppError, AppResult};
use crate::orchestrator::{Outcome, TranslationRequest, UnknownLanguage, MISSING_INPUT_MESSAGE};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

/// Request body for `POST /api/v1/translate`.
#[derive(Debug, Deserialize)]
pub struct TranslateBody {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AudioPayload {
    pub mime: &'static str,
    pub format: AudioFormat,
    pub bytes: usize,
    pub base64: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TranslateResponse {
    Ok {
        source: &'static str,
        target: &'static str,
        translated: String,
        romanized: String,
        audio: AudioPayload,
    },
    MissingInput {
        message: &'static str,
    },
}

pub async fn list_languages() -> HttpResponse {
    let languages: Vec<_> = LANGUAGES
        .iter()
        .map(|language| {
            json!({
                "name": language.name,
                "code": language.code,
                "script": language.script(),
            })
        })
        .collect();

    HttpResponse::Ok().json(json!({
        "languages": languages,
        "default_source": catalog::DEFAULT_SOURCE,
        "default_target": catalog::default_target(),
    }))
}

/// API callers may name a language by display name or by engine code.
fn resolve(name: &str) -> AppResult<&'static Language> {
    catalog::by_name(name)
        .or_else(|| catalog::by_code(name))
        .ok_or_else(|| AppError::BadRequest(UnknownLanguage(name.to_string()).to_string()))
}

pub async fn translate(state: web::Data<AppState>, body: web::Json<TranslateBody>) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let request = TranslationRequest {
        source: resolve(&body.source)?,
        target: resolve(&body.target)?,
        text: body.text,
    };

    let outcome = state.orchestrator.translate(&request).await;
    state.record_outcome(&outcome);

    let response = match outcome {
        Ok(Outcome::MissingInput) => TranslateResponse::MissingInput {
            message: MISSING_INPUT_MESSAGE,
        },
        Ok(Outcome::Completed(result)) => TranslateResponse::Ok {
            source: request.source.code,
            target: request.target.code,
            audio: AudioPayload {
                mime: result.audio.mime_type(),
                format: result.audio.format(),
                bytes: result.audio.len(),
                base64: result.audio.to_base64(),
            },
            translated: result.translated,
            romanized: result.romanized,
        },
        Err(err) => {
            warn!(stage = err.stage(), error = %err.engine_error(), "Translation failed");
            return Err(err.into());
        }
    };

    Ok(HttpResponse::Ok().json(response))
}
