//! # Translator Page Handlers
//!
//! - `GET /`  - Empty form with the configured default languages
//! - `POST /` - Run one submission and render the page with its outcome
//!
//! The page always answers 200 with HTML: a blank text box renders a warning
//! banner and an engine failure renders an error banner. Only a language name
//! missing from the catalog (which the page itself never sends) is rejected
//! with a 400.

use crate::error::{AppError, AppResult};
use crate::orchestrator::{Outcome, TranslationRequest, MISSING_INPUT_MESSAGE};
use crate::state::AppState;
use crate::view::{self, FormState, View};
use actix_web::web;
use maud::Markup;
use serde::Deserialize;
use tracing::warn;

/// Fields posted by the translator form.
#[derive(Debug, Deserialize)]
pub struct TranslateForm {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub text: String,
}

pub async fn index(state: web::Data<AppState>) -> Markup {
    let ui = &state.get_config().ui;
    let form = FormState {
        source: &ui.default_source,
        target: &ui.default_target,
        text: "",
    };

    view::page(&form, &View::Empty)
}

pub async fn submit(state: web::Data<AppState>, form: web::Form<TranslateForm>) -> AppResult<Markup> {
    let form = form.into_inner();
    let request = TranslationRequest::new(&form.source, &form.target, form.text.as_str())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let outcome = state.orchestrator.translate(&request).await;
    state.record_outcome(&outcome);

    let form_state = FormState {
        source: request.source.name,
        target: request.target.name,
        text: &form.text,
    };

    let markup = match &outcome {
        Ok(Outcome::MissingInput) => view::page(&form_state, &View::Warning(MISSING_INPUT_MESSAGE)),
        Ok(Outcome::Completed(result)) => view::page(&form_state, &View::Card(result)),
        Err(err) => {
            warn!(stage = err.stage(), error = %err.engine_error(), "Translation failed");
            view::page(&form_state, &View::Error(err.to_string()))
        }
    };

    Ok(markup)
}
