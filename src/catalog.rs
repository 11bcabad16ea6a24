//! # Language and Script Catalogs
//!
//! Two fixed lookup tables drive everything the translator does:
//!
//! - **LanguageCatalog**: display name → engine language code, in the order the
//!   selectors show them. The default target is the third entry.
//! - **ScriptCatalog**: engine language code → Indic script. Only codes listed
//!   here get a romanized rendering; every other language passes its
//!   translation through unchanged.
//!
//! ## Key Rust Concepts Used:
//! - **`static` slices**: The tables are compiled into the binary and never change
//! - **`&'static Language`**: Callers hold references into the table instead of
//!   copying strings around, so a resolved language can only ever be a catalog member

use serde::Serialize;
use std::fmt;

/// Writing systems the transliteration engine can romanize.
///
/// Every script here occupies a 128-codepoint Unicode block laid out in
/// parallel with Devanagari, which is what lets one table serve all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Devanagari,
    Bengali,
    Gurmukhi,
    Gujarati,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
}

impl Script {
    /// First codepoint of the script's Unicode block.
    pub fn block_start(self) -> u32 {
        match self {
            Script::Devanagari => 0x0900,
            Script::Bengali => 0x0980,
            Script::Gurmukhi => 0x0A00,
            Script::Gujarati => 0x0A80,
            Script::Tamil => 0x0B80,
            Script::Telugu => 0x0C00,
            Script::Kannada => 0x0C80,
            Script::Malayalam => 0x0D00,
        }
    }

    /// Offset of `c` inside this script's block, if it belongs to it.
    pub fn offset_of(self, c: char) -> Option<u32> {
        let cp = c as u32;
        let start = self.block_start();
        (start..start + 0x80).contains(&cp).then(|| cp - start)
    }

    pub fn name(self) -> &'static str {
        match self {
            Script::Devanagari => "devanagari",
            Script::Bengali => "bengali",
            Script::Gurmukhi => "gurmukhi",
            Script::Gujarati => "gujarati",
            Script::Tamil => "tamil",
            Script::Telugu => "telugu",
            Script::Kannada => "kannada",
            Script::Malayalam => "malayalam",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One selectable language: what the user sees and what the engines expect.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Language {
    pub name: &'static str,
    pub code: &'static str,
}

impl Language {
    /// The script to romanize from when this language is the target.
    pub fn script(&self) -> Option<Script> {
        script_for_code(self.code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// The language catalog in selector order.
pub static LANGUAGES: &[Language] = &[
    Language { name: "English", code: "en" },
    Language { name: "Hindi", code: "hi" },
    Language { name: "Marathi", code: "mr" },
    Language { name: "Tamil", code: "ta" },
    Language { name: "Telugu", code: "te" },
    Language { name: "Bengali", code: "bn" },
    Language { name: "Gujarati", code: "gu" },
    Language { name: "Kannada", code: "kn" },
    Language { name: "Malayalam", code: "ml" },
    Language { name: "Punjabi", code: "pa" },
    Language { name: "Urdu", code: "ur" },
    Language { name: "Sanskrit", code: "sa" },
    Language { name: "Nepali", code: "ne" },
    Language { name: "French", code: "fr" },
    Language { name: "Spanish", code: "es" },
    Language { name: "German", code: "de" },
    Language { name: "Italian", code: "it" },
    Language { name: "Japanese", code: "ja" },
    Language { name: "Korean", code: "ko" },
    Language { name: "Arabic", code: "ar" },
    Language { name: "Russian", code: "ru" },
];

/// Engine codes that are written in an Indic script.
pub static SCRIPTS: &[(&str, Script)] = &[
    ("hi", Script::Devanagari),
    ("mr", Script::Devanagari),
    ("sa", Script::Devanagari),
    ("ne", Script::Devanagari),
    ("ta", Script::Tamil),
    ("te", Script::Telugu),
    ("bn", Script::Bengali),
    ("gu", Script::Gujarati),
    ("kn", Script::Kannada),
    ("ml", Script::Malayalam),
    ("pa", Script::Gurmukhi),
];

/// Display name of the default source language.
pub const DEFAULT_SOURCE: &str = "English";

/// Display name of the default target language (third catalog entry).
pub fn default_target() -> &'static str {
    LANGUAGES[2].name
}

/// Look up a language by its display name.
pub fn by_name(name: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|language| language.name == name)
}

/// Look up a language by its engine code.
pub fn by_code(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|language| language.code == code)
}

/// Script for an engine code; `None` means no romanization applies.
pub fn script_for_code(code: &str) -> Option<Script> {
    SCRIPTS
        .iter()
        .find(|(script_code, _)| *script_code == code)
        .map(|(_, script)| *script)
}
