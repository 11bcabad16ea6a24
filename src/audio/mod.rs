//! # Audio Clips
//!
//! Holds the synthesized speech on its way from the speech engine to the page.
//! The audio never touches the filesystem: the bytes stay in memory and are
//! embedded in the HTML as a base64 `data:` URI.
//!
//! ## Supported Containers:
//! - **MP3**: What the Google speech endpoint returns (ID3 tag or bare MPEG frames)
//! - **WAV / OGG**: Recognised so alternative engines can be plugged in

pub mod clip;    // AudioClip and data-URI encoding
pub mod format;  // Container sniffing from leading bytes

pub use clip::AudioClip;
pub use format::AudioFormat;
