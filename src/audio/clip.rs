//! In-memory audio handed from the speech engine to the renderer.

use super::format::AudioFormat;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Encoded audio plus the container it was recognised as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    bytes: Vec<u8>,
    format: AudioFormat,
}

impl AudioClip {
    /// Wrap raw bytes, sniffing the container from the header.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let format = AudioFormat::sniff(&bytes);
        Self { bytes, format }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Standard base64 of the whole clip.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.bytes())
    }

    /// `data:` URI suitable for an `<audio>` source.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), self.to_base64())
    }
}
