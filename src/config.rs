//! # Configuration Management
//!
//! This module handles loading and managing application configuration from multiple sources:
//! - TOML configuration files (config.toml)
//! - Environment variables (with APP_ prefix)
//! - Default values (built into the code)
//!
//! ## Key Rust Concepts Used:
//! - **Serde**: Serialization/deserialization library for converting between Rust structs and data formats
//! - **derive macros**: Automatically generate code for common traits (Debug, Clone, Serialize, Deserialize)
//! - **#[serde(default)]**: Missing sections fall back to their `Default` impl
//!
//! ## Configuration Priority (highest to lowest):
//! 1. Environment variables (APP_SERVER__PORT, APP_SPEECH__SLOW, etc.)
//! 2. Configuration file (config.toml)
//! 3. Default values (defined in the Default impls)

use crate::catalog;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Main application configuration that contains all settings.
///
/// ## Sections:
/// - `server`: Where the HTTP server listens
/// - `translation`: Translation endpoint and input limit
/// - `speech`: Speech endpoint and voice options
/// - `ui`: Default selections shown on the page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub translation: TranslationConfig,
    pub speech: SpeechConfig,
    pub ui: UiConfig,
}

/// Server-specific configuration settings.
///
/// ## Common values:
/// - `host = "127.0.0.1"`: Only accept connections from localhost (development)
/// - `host = "0.0.0.0"`: Accept connections from any IP address (production)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Translation engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Scheme and host of the translation endpoint
    pub base_url: String,
    /// Longest input (in characters) accepted in one request
    pub max_chars: usize,
}

/// Speech engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Scheme and host of the speech endpoint; swap the TLD for a regional host
    pub base_url: String,
    /// Ask for the slower voice
    pub slow: bool,
    /// Longest chunk (in characters) sent per speech request
    pub chunk_chars: usize,
}

/// Page defaults. Both names must exist in the language catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub default_source: String,
    pub default_target: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),  // Localhost only (safe for development)
            port: 8080,
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.googleapis.com".to_string(),
            max_chars: 5000,
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.google.com".to_string(),
            slow: false,
            chunk_chars: 100,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_source: catalog::DEFAULT_SOURCE.to_string(),
            default_target: catalog::default_target().to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources in priority order.
    ///
    /// ## Configuration Loading Process:
    /// 1. Start with built-in defaults
    /// 2. Override with values from config.toml (if it exists)
    /// 3. Override with environment variables prefixed with APP_
    /// 4. Handle special cases for HOST and PORT environment variables
    ///
    /// ## Environment Variable Examples:
    /// - `APP_SERVER__PORT=3000`: Override server port
    /// - `APP_SPEECH__BASE_URL=https://translate.google.co.in`: Use a regional speech host
    /// - `APP_UI__DEFAULT_TARGET=Hindi`: Change the preselected target language
    /// - `HOST=0.0.0.0` / `PORT=3000`: Special cases for deployment platforms
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name("config").required(false))
            // Double underscore separates sections so field names may keep single ones
            .add_source(config::Environment::with_prefix("APP").prefix_separator("_").separator("__"));

        if let Ok(host) = env::var("HOST") {
            settings = settings.set_override("server.host", host)?;
        }

        if let Ok(port) = env::var("PORT") {
            settings = settings.set_override("server.port", port)?;
        }

        let config = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate that the configuration values make sense.
    ///
    /// ## What this checks:
    /// - Server port is not 0
    /// - Input and chunk limits are positive
    /// - Engine base URLs parse as http(s) URLs
    /// - Default languages exist in the catalog
    ///
    /// ## Why validate:
    /// The page preselects the configured languages; a name missing from the
    /// catalog is a deployment mistake and must stop startup rather than
    /// surface later as a failed lookup.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(anyhow!("Server port cannot be 0"));
        }

        if self.translation.max_chars == 0 {
            return Err(anyhow!("Translation max_chars must be greater than 0"));
        }

        if self.speech.chunk_chars == 0 {
            return Err(anyhow!("Speech chunk_chars must be greater than 0"));
        }

        validate_url("translation.base_url", &self.translation.base_url)?;
        validate_url("speech.base_url", &self.speech.base_url)?;

        for (field, name) in [
            ("ui.default_source", &self.ui.default_source),
            ("ui.default_target", &self.ui.default_target),
        ] {
            if catalog::by_name(name).is_none() {
                return Err(anyhow!("{} '{}' is not a catalog language", field, name));
            }
        }

        Ok(())
    }
}

fn validate_url(field: &str, value: &str) -> Result<()> {
    let parsed = url::Url::parse(value).map_err(|e| anyhow!("{} '{}' is not a valid URL: {}", field, value, e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(anyhow!("{} must use http or https, got '{}'", field, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that the default configuration is valid and has expected values.
    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ui.default_source, "English");
        assert_eq!(config.ui.default_target, "Marathi");
        assert!(config.validate().is_ok());
    }

    /// Test that validation catches invalid configurations.
    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.speech.chunk_chars = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.translation.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    /// An unknown default language is a deployment defect and must fail startup.
    #[test]
    fn test_unknown_default_language_rejected() {
        let mut config = AppConfig::default();
        config.ui.default_target = "Klingon".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Klingon"));
    }

    /// Partial TOML keeps the defaults for everything it leaves out.
    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml_like(
            r#"
            [speech]
            slow = true
            "#,
        );
        assert!(config.speech.slow);
        assert_eq!(config.speech.chunk_chars, 100);
        assert_eq!(config.translation.max_chars, 5000);
    }

    fn toml_like(source: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
