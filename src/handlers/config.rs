use crate::{error::AppError, state::AppState};
use actix_web::{web, HttpResponse};
use serde_json::json;

/// Read-only view of the running configuration.
///
/// Configuration is fixed at startup; there is no update endpoint.
pub async fn get_config(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let config = state.get_config();

    Ok(HttpResponse::Ok().json(json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "config": {
            "server": {
                "host": config.server.host,
                "port": config.server.port
            },
            "translation": {
                "base_url": config.translation.base_url,
                "max_chars": config.translation.max_chars
            },
            "speech": {
                "base_url": config.speech.base_url,
                "slow": config.speech.slow,
                "chunk_chars": config.speech.chunk_chars
            },
            "ui": {
                "default_source": config.ui.default_source,
                "default_target": config.ui.default_target
            }
        }
    })))
}
