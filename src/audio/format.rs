//! Container detection from the first bytes of an audio stream.

use serde::Serialize;

/// Audio container recognised from its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
    Ogg,
    Unknown,
}

impl AudioFormat {
    /// Identify the container by its magic bytes.
    ///
    /// ## Recognised headers:
    /// - `ID3` tag, or an MPEG frame sync (11 set bits) → MP3
    /// - `RIFF....WAVE` → WAV
    /// - `OggS` → OGG
    pub fn sniff(data: &[u8]) -> Self {
        if data.starts_with(b"ID3") {
            return AudioFormat::Mp3;
        }

        if data.len() >= 2 && data[0] == 0xFF && data[1] & 0xE0 == 0xE0 {
            return AudioFormat::Mp3;
        }

        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WAVE" {
            return AudioFormat::Wav;
        }

        if data.starts_with(b"OggS") {
            return AudioFormat::Ogg;
        }

        AudioFormat::Unknown
    }

    /// MIME type used for the `<source type=...>` attribute and the data URI.
    pub fn mime_type(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Ogg => "audio/ogg",
            AudioFormat::Unknown => "application/octet-stream",
        }
    }

    pub fn is_known(self) -> bool {
        self != AudioFormat::Unknown
    }
}
