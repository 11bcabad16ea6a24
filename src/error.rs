//! # Error Handling
//!
//! This module defines the HTTP-facing error type and how it is converted to
//! responses. Engine and orchestrator failures have their own `thiserror`
//! enums (see `engines` and `orchestrator`); they are folded into [`AppError`]
//! only when they reach a handler.
//!
//! Startup failures (configuration, binding) never reach this type; they
//! propagate through `anyhow::Result` in `main`.
//!
//! ## Error Categories:
//! - **BadRequest**: Client sent invalid data, e.g. an unknown language name (400)
//! - **NotFound**: No route matches the request (404)
//! - **Translation**: One of the engines failed while serving a request (502)

use crate::orchestrator::TranslateError;
use actix_web::error::{JsonPayloadError, UrlencodedError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

/// Custom error types for the application.
///
/// ## Usage Example:
/// ```rust
/// return Err(AppError::BadRequest("Unknown language 'Klingon'".to_string()));
/// ```
#[derive(Debug)]
pub enum AppError {
    /// Client sent invalid or malformed data
    BadRequest(String),

    /// Requested resource was not found
    NotFound(String),

    /// A translation, transliteration or speech call failed
    Translation(TranslateError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Translation(err) => write!(f, "{}", err),
        }
    }
}

/// Converts errors into JSON responses.
///
/// ## JSON Response Format:
/// ```json
/// {
///   "error": {
///     "type": "translation_failed",
///     "stage": "synthesis",
///     "message": "Translation failed: language 'sa' is not supported",
///     "timestamp": "2025-01-01T12:00:00Z"
///   }
/// }
/// ```
/// `stage` is only present for `translation_failed` errors.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Translation(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_type, message) = match self {
            AppError::BadRequest(msg) => ("bad_request", msg.clone()),
            AppError::NotFound(msg) => ("not_found", msg.clone()),
            AppError::Translation(err) => ("translation_failed", err.to_string()),
        };

        let mut error = json!({
            "type": error_type,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if let AppError::Translation(err) = self {
            error["stage"] = json!(err.stage());
        }

        HttpResponse::build(self.status_code()).json(json!({ "error": error }))
    }
}

impl From<TranslateError> for AppError {
    fn from(err: TranslateError) -> Self {
        AppError::Translation(err)
    }
}

/// Shorthand for `Result<T, AppError>`.
pub type AppResult<T> = Result<T, AppError>;

/// Malformed JSON bodies get the same error shape as every other 400.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Form bodies missing `source` or `target` are rejected like bad JSON.
pub fn form_error_handler(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Fallback for unmatched routes.
pub async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(format!("no route for {} {}", req.method(), req.path())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::EngineError;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_translation_error_response() {
        let err = AppError::from(TranslateError::Synthesis(EngineError::UnsupportedLanguage("sa".to_string())));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["type"], "translation_failed");
        assert_eq!(value["error"]["stage"], "synthesis");
        assert_eq!(
            value["error"]["message"],
            "Translation failed: language 'sa' is not supported"
        );
    }

    #[actix_web::test]
    async fn test_unmatched_route_is_json_404() {
        use actix_web::{test, web, App};

        let app = test::init_service(App::new().default_service(web::to(not_found))).await;
        let req = test::TestRequest::get().uri("/nowhere").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let value: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(value["error"]["type"], "not_found");
        assert_eq!(value["error"]["message"], "no route for GET /nowhere");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
    }
}
