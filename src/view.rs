//! # Page Rendering
//!
//! Server-side HTML for the single translator page, built with `maud`.
//! After every page load or submission exactly one of four things is shown
//! under the form (see [`View`]).
//!
//! All interpolated text goes through maud's escaping, so translations that
//! happen to contain markup are displayed, never interpreted.

use crate::catalog::LANGUAGES;
use crate::orchestrator::TranslationResult;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body {
    background: #0f1117;
    color: #fff;
    font-family: 'Segoe UI', sans-serif;
    max-width: 720px;
    margin: 0 auto;
    padding: 24px;
}
h1 { text-align: center; font-size: 42px; margin-bottom: 5px; }
h2 { text-align: center; font-size: 22px; color: #bbb; margin-top: -5px; font-weight: normal; }
.columns { display: flex; gap: 16px; }
.columns label { flex: 1; }
select, textarea {
    width: 100%;
    box-sizing: border-box;
    margin: 6px 0 10px;
    border-radius: 12px;
    font-size: 16px;
    padding: 12px;
    background: #1c1e29;
    color: #fff;
    border: 1px solid #2a2c3d;
}
button {
    border-radius: 12px;
    width: 100%;
    height: 50px;
    font-size: 16px;
    margin-top: 10px;
    background: #4b6cb7;
    color: white;
    border: none;
    transition: 0.3s;
}
button:hover { background: #3a55a2; cursor: pointer; }
.banner { border-radius: 12px; padding: 14px 18px; margin-top: 15px; }
.banner.warning { background: #3d3415; color: #ffd666; }
.banner.error { background: #3d1a1d; color: #ff8a8a; }
.card {
    background-color: #1c1e29;
    border-radius: 16px;
    padding: 20px;
    margin-top: 15px;
    margin-bottom: 20px;
    box-shadow: 0 8px 20px rgba(0,0,0,0.6);
    transition: transform 0.2s;
}
.card:hover { transform: translateY(-5px); }
.card h3 { margin-bottom: 10px; color: #4b6cb7; }
.translation-text { font-size: 26px; font-weight: bold; margin-bottom: 5px; color: #ffffff; }
.transliteration { font-size: 18px; font-style: italic; color: #a0c4ff; margin-bottom: 10px; }
.audio-container {
    background-color: #2a2c3d;
    padding: 8px;
    border-radius: 12px;
    display: flex;
    align-items: center;
}
audio { width: 100%; border-radius: 12px; }
"#;

/// What is shown below the form.
#[derive(Debug)]
pub enum View<'a> {
    /// Fresh page, nothing submitted yet
    Empty,
    /// User-correctable problem (blank input)
    Warning(&'a str),
    /// An engine failed; carries the unified failure message
    Error(String),
    /// Successful translation
    Card(&'a TranslationResult),
}

/// Current contents of the form, echoed back after a submission.
#[derive(Debug)]
pub struct FormState<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub text: &'a str,
}

/// Render the full page.
pub fn page(form: &FormState<'_>, view: &View<'_>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Translatify 🌐" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                h1 { "🌐 Translatify" }
                h2 { "Translate text instantly and listen to translations!" }
                (translate_form(form))
                (outcome(view))
            }
        }
    }
}

fn translate_form(form: &FormState<'_>) -> Markup {
    html! {
        form method="post" action="/" {
            div class="columns" {
                label {
                    "🌏 From Language"
                    (language_select("source", form.source))
                }
                label {
                    "🌐 To Language"
                    (language_select("target", form.target))
                }
            }
            label {
                "📝 Enter text to translate"
                textarea name="text" rows="4" { (form.text) }
            }
            button type="submit" { "🔁 Translate" }
        }
    }
}

fn language_select(name: &str, selected: &str) -> Markup {
    html! {
        select name=(name) {
            @for language in LANGUAGES {
                option value=(language.name) selected[language.name == selected] { (language.name) }
            }
        }
    }
}

fn outcome(view: &View<'_>) -> Markup {
    match view {
        View::Empty => html! {},
        View::Warning(message) => html! {
            div class="banner warning" role="status" { (message) }
        },
        View::Error(message) => html! {
            div class="banner error" role="alert" { "⚠️ " (message) }
        },
        View::Card(result) => card(result),
    }
}

/// The result card with the audio embedded inline.
pub fn card(result: &TranslationResult) -> Markup {
    html! {
        div class="card" {
            h3 { "🗣️ Translation" }
            p class="translation-text" { (result.translated) }
            p class="transliteration" { (result.romanized) }
            div class="audio-container" {
                audio controls {
                    source src=(result.audio.to_data_uri()) type=(result.audio.mime_type());
                    "Your browser does not support the audio element."
                }
            }
        }
    }
}
