//! Brahmic script → ITRANS romanization.
//!
//! The Indic Unicode blocks share one layout: a consonant, vowel or sign sits at
//! the same offset in every block it exists in. Translation therefore runs in
//! two steps: find the offset of a character inside its script's block, then
//! classify that offset with a shared table (plus a few per-script overrides).
//!
//! ## Syllable model:
//! - A consonant carries an inherent `a`
//! - A virama kills the inherent vowel (`क्` → `k`)
//! - A dependent vowel sign replaces it (`कि` → `ki`)
//! - Anything else (signs, spaces, punctuation) first flushes a pending `a`

use crate::catalog::Script;

/// How a single codepoint behaves in the romanizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Glyph {
    /// Independent vowel letter
    Vowel(&'static str),
    /// Consonant letter with an inherent `a`
    Consonant(&'static str),
    /// Dependent vowel sign attached to the previous consonant
    VowelSign(&'static str),
    /// Suppresses the inherent vowel
    Virama,
    /// Dot below; turns the previous consonant into its borrowed-sound form
    Nukta,
    /// Gurmukhi addak; doubles the following consonant
    Addak,
    /// Anything emitted verbatim after flushing the inherent vowel
    Sign(&'static str),
}

/// Offsets shared by every script that defines them.
fn common_glyph(offset: u32) -> Option<Glyph> {
    use Glyph::*;

    let glyph = match offset {
        0x00 | 0x01 => Sign(".N"),
        0x02 => Sign("M"),
        0x03 => Sign("H"),
        0x05 => Vowel("a"),
        0x06 => Vowel("A"),
        0x07 => Vowel("i"),
        0x08 => Vowel("I"),
        0x09 => Vowel("u"),
        0x0A => Vowel("U"),
        0x0B => Vowel("RRi"),
        0x0C => Vowel("LLi"),
        0x0D => Vowel("e"),
        0x0E => Vowel("e"),
        0x0F => Vowel("e"),
        0x10 => Vowel("ai"),
        0x11 => Vowel("o"),
        0x12 => Vowel("o"),
        0x13 => Vowel("o"),
        0x14 => Vowel("au"),
        0x15 => Consonant("k"),
        0x16 => Consonant("kh"),
        0x17 => Consonant("g"),
        0x18 => Consonant("gh"),
        0x19 => Consonant("~N"),
        0x1A => Consonant("ch"),
        0x1B => Consonant("Ch"),
        0x1C => Consonant("j"),
        0x1D => Consonant("jh"),
        0x1E => Consonant("~n"),
        0x1F => Consonant("T"),
        0x20 => Consonant("Th"),
        0x21 => Consonant("D"),
        0x22 => Consonant("Dh"),
        0x23 => Consonant("N"),
        0x24 => Consonant("t"),
        0x25 => Consonant("th"),
        0x26 => Consonant("d"),
        0x27 => Consonant("dh"),
        0x28 => Consonant("n"),
        0x29 => Consonant("^n"),
        0x2A => Consonant("p"),
        0x2B => Consonant("ph"),
        0x2C => Consonant("b"),
        0x2D => Consonant("bh"),
        0x2E => Consonant("m"),
        0x2F => Consonant("y"),
        0x30 => Consonant("r"),
        0x31 => Consonant("R"),
        0x32 => Consonant("l"),
        0x33 => Consonant("L"),
        0x34 => Consonant("zh"),
        0x35 => Consonant("v"),
        0x36 => Consonant("sh"),
        0x37 => Consonant("Sh"),
        0x38 => Consonant("s"),
        0x39 => Consonant("h"),
        0x3C => Nukta,
        0x3D => Sign(".a"),
        0x3E => VowelSign("A"),
        0x3F => VowelSign("i"),
        0x40 => VowelSign("I"),
        0x41 => VowelSign("u"),
        0x42 => VowelSign("U"),
        0x43 => VowelSign("RRi"),
        0x44 => VowelSign("RRI"),
        0x45 => VowelSign("e"),
        0x46 => VowelSign("e"),
        0x47 => VowelSign("e"),
        0x48 => VowelSign("ai"),
        0x49 => VowelSign("o"),
        0x4A => VowelSign("o"),
        0x4B => VowelSign("o"),
        0x4C => VowelSign("au"),
        0x4D => Virama,
        0x50 => Sign("OM"),
        // Vedic accents and length marks carry no sound of their own.
        0x51..=0x57 => Sign(""),
        0x58 => Consonant("q"),
        0x59 => Consonant("K"),
        0x5A => Consonant("G"),
        0x5B => Consonant("z"),
        0x5C => Consonant(".D"),
        0x5D => Consonant(".Dh"),
        0x5E => Consonant("f"),
        0x5F => Consonant("Y"),
        0x60 => Vowel("RRI"),
        0x61 => Vowel("LLI"),
        0x62 => VowelSign("LLi"),
        0x63 => VowelSign("LLI"),
        0x64 => Sign("."),
        0x65 => Sign(".."),
        0x66 => Sign("0"),
        0x67 => Sign("1"),
        0x68 => Sign("2"),
        0x69 => Sign("3"),
        0x6A => Sign("4"),
        0x6B => Sign("5"),
        0x6C => Sign("6"),
        0x6D => Sign("7"),
        0x6E => Sign("8"),
        0x6F => Sign("9"),
        _ => return None,
    };

    Some(glyph)
}

/// Places where a script diverges from the shared layout.
fn script_glyph(script: Script, offset: u32) -> Option<Glyph> {
    use Glyph::*;

    let glyph = match (script, offset) {
        (Script::Devanagari, 0x70) => Sign("."),

        (Script::Bengali, 0x4E) => Sign("t"),
        (Script::Bengali, 0x70) => Consonant("r"),
        (Script::Bengali, 0x71) => Consonant("v"),

        (Script::Gurmukhi, 0x70) => Sign("M"),
        (Script::Gurmukhi, 0x71) => Addak,
        (Script::Gurmukhi, 0x72 | 0x73) => Sign(""),
        (Script::Gurmukhi, 0x74) => Sign("ik oMkAr"),
        (Script::Gurmukhi, 0x75) => Sign("y"),

        // Dravidian scripts spell short e/o at the shared slots; long forms are E/O.
        (Script::Tamil | Script::Telugu | Script::Kannada | Script::Malayalam, 0x0F) => Vowel("E"),
        (Script::Tamil | Script::Telugu | Script::Kannada | Script::Malayalam, 0x13) => Vowel("O"),
        (Script::Tamil | Script::Telugu | Script::Kannada | Script::Malayalam, 0x47) => VowelSign("E"),
        (Script::Tamil | Script::Telugu | Script::Kannada | Script::Malayalam, 0x4B) => VowelSign("O"),

        (Script::Tamil, 0x29) => Consonant("n"),

        (Script::Telugu, 0x58) => Consonant("ts"),
        (Script::Telugu, 0x59) => Consonant("dz"),
        (Script::Telugu, 0x5A) => Consonant("R"),

        (Script::Kannada, 0x5E) => Consonant("zh"),

        (Script::Malayalam, 0x3B | 0x3C) => Virama,
        (Script::Malayalam, 0x4E) => Sign("r"),
        (Script::Malayalam, 0x54) => Sign("m"),
        (Script::Malayalam, 0x55) => Sign("y"),
        (Script::Malayalam, 0x56) => Sign("zh"),
        (Script::Malayalam, 0x58..=0x5E) => Sign(""),
        // Chillu letters: dead consonants with no vowel at all.
        (Script::Malayalam, 0x7A) => Sign("N"),
        (Script::Malayalam, 0x7B) => Sign("n"),
        (Script::Malayalam, 0x7C) => Sign("r"),
        (Script::Malayalam, 0x7D) => Sign("l"),
        (Script::Malayalam, 0x7E) => Sign("L"),
        (Script::Malayalam, 0x7F) => Sign("k"),

        _ => return None,
    };

    Some(glyph)
}

fn glyph(script: Script, c: char) -> Option<Glyph> {
    // Devanagari danda marks are shared by every script.
    match c {
        '\u{0964}' => return Some(Glyph::Sign(".")),
        '\u{0965}' => return Some(Glyph::Sign("..")),
        _ => {}
    }

    let offset = script.offset_of(c)?;
    script_glyph(script, offset).or_else(|| {
        // Offsets past the digits are script-specific symbols.
        if offset < 0x70 {
            common_glyph(offset)
        } else {
            None
        }
    })
}

/// Consonant + nukta spelled as two codepoints.
fn nukta_form(consonant: &str) -> Option<&'static str> {
    match consonant {
        "k" => Some("q"),
        "kh" => Some("K"),
        "g" => Some("G"),
        "j" => Some("z"),
        "D" => Some(".D"),
        "Dh" => Some(".Dh"),
        "ph" => Some("f"),
        "y" => Some("Y"),
        _ => None,
    }
}

/// Leading letters written again when a consonant is doubled.
fn gemination_prefix(consonant: &str) -> &str {
    match consonant.char_indices().nth(1) {
        Some((idx, _)) if consonant.starts_with(|c: char| c.is_ascii_alphabetic()) => {
            &consonant[..idx]
        }
        _ => consonant,
    }
}

/// Romanize `text` written in `script` into ITRANS.
///
/// Characters that do not belong to `script` (spaces, punctuation, Latin text,
/// other scripts) are copied through unchanged.
pub fn to_itrans(text: &str, script: Script) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut chars = text.chars().peekable();
    let mut inherent_vowel = false;
    let mut geminate = false;

    while let Some(c) = chars.next() {
        let Some(kind) = glyph(script, c) else {
            flush(&mut out, &mut inherent_vowel);
            geminate = false;
            out.push(c);
            continue;
        };

        match kind {
            Glyph::Consonant(mut roman) => {
                flush(&mut out, &mut inherent_vowel);
                if chars.peek().and_then(|&next| glyph(script, next)) == Some(Glyph::Nukta) {
                    chars.next();
                    roman = nukta_form(roman).unwrap_or(roman);
                }
                if geminate {
                    out.push_str(gemination_prefix(roman));
                    geminate = false;
                }
                out.push_str(roman);
                inherent_vowel = true;
            }
            Glyph::VowelSign(roman) => {
                inherent_vowel = false;
                out.push_str(roman);
            }
            Glyph::Virama => inherent_vowel = false,
            // A nukta that did not follow a consonant has nothing to modify.
            Glyph::Nukta => {}
            Glyph::Addak => {
                flush(&mut out, &mut inherent_vowel);
                geminate = true;
            }
            Glyph::Vowel(roman) | Glyph::Sign(roman) => {
                flush(&mut out, &mut inherent_vowel);
                out.push_str(roman);
            }
        }
    }

    flush(&mut out, &mut inherent_vowel);
    out
}

fn flush(out: &mut String, inherent_vowel: &mut bool) {
    if *inherent_vowel {
        out.push('a');
        *inherent_vowel = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_devanagari_words() {
        assert_eq!(to_itrans("नमस्ते", Script::Devanagari), "namaste");
        assert_eq!(to_itrans("भारत", Script::Devanagari), "bhArata");
        assert_eq!(to_itrans("कृष्ण", Script::Devanagari), "kRRiShNa");
        assert_eq!(to_itrans("हैं", Script::Devanagari), "haiM");
    }

    #[test]
    fn test_punctuation_and_latin_pass_through() {
        assert_eq!(
            to_itrans("नमस्ते, आप कैसे हैं?", Script::Devanagari),
            "namaste, Apa kaise haiM?"
        );
        assert_eq!(to_itrans("OK राम!", Script::Devanagari), "OK rAma!");
    }

    #[test]
    fn test_danda_and_digits() {
        assert_eq!(to_itrans("राम।", Script::Devanagari), "rAma.");
        assert_eq!(to_itrans("१२३", Script::Devanagari), "123");
        assert_eq!(to_itrans("১২", Script::Bengali), "12");
    }

    #[test]
    fn test_nukta_forms() {
        // precomposed and decomposed spellings agree
        assert_eq!(to_itrans("\u{095B}", Script::Devanagari), "za");
        assert_eq!(to_itrans("\u{091C}\u{093C}", Script::Devanagari), "za");
        assert_eq!(to_itrans("\u{092B}\u{093C}\u{093F}\u{0932}\u{094D}\u{092E}", Script::Devanagari), "filma");
    }

    #[test]
    fn test_other_scripts() {
        assert_eq!(to_itrans("வணக்கம்", Script::Tamil), "vaNakkam");
        assert_eq!(to_itrans("తెలుగు", Script::Telugu), "telugu");
        assert_eq!(to_itrans("தேன்", Script::Tamil), "tEn");
        assert_eq!(to_itrans("ಕನ್ನಡ", Script::Kannada), "kannaDa");
        assert_eq!(to_itrans("বাংলা", Script::Bengali), "bAMlA");
        assert_eq!(to_itrans("ગુજરાતી", Script::Gujarati), "gujarAtI");
        assert_eq!(to_itrans("മലയാളം", Script::Malayalam), "malayALaM");
    }

    #[test]
    fn test_gurmukhi_addak_and_tippi() {
        assert_eq!(to_itrans("ਪੱਕਾ", Script::Gurmukhi), "pakkA");
        assert_eq!(to_itrans("ਪੰਜਾਬ", Script::Gurmukhi), "paMjAba");
    }

    #[test]
    fn test_malayalam_chillu() {
        assert_eq!(to_itrans("അവൻ", Script::Malayalam), "avan");
    }

    #[test]
    fn test_foreign_script_is_untouched() {
        // Tamil text handed to the Devanagari table is left alone.
        assert_eq!(to_itrans("வணக்கம்", Script::Devanagari), "வணக்கம்");
    }

    #[test]
    fn test_gemination_prefix() {
        assert_eq!(gemination_prefix("kh"), "k");
        assert_eq!(gemination_prefix("k"), "k");
        assert_eq!(gemination_prefix(".D"), ".D");
    }
}
