//! # Transliteration Engine
//!
//! Romanizes text in one of the catalog's Indic scripts. The heavy lifting is
//! in [`brahmic`]; this module exposes it through the [`Transliterator`] seam
//! the orchestrator talks to.

pub mod brahmic;

use crate::catalog::Script;
use crate::engines::{EngineError, RomanScheme, Transliterator};

/// In-process Brahmic → ITRANS romanizer.
#[derive(Debug, Default, Clone, Copy)]
pub struct ItransTransliterator;

impl Transliterator for ItransTransliterator {
    fn transliterate(&self, text: &str, script: Script, scheme: RomanScheme) -> Result<String, EngineError> {
        match scheme {
            RomanScheme::Itrans => Ok(brahmic::to_itrans(text, script)),
        }
    }
}
