use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Default greeting seeded into every new conversation.
pub const DEFAULT_GREETING: &str = "Hello! I'm your FAQ assistant. How can I help you today?";

/// Top-level configuration for the Converse application.
///
/// Loaded from `~/.converse/config.toml` by default. Each section covers one
/// collaborator of the conversation controller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverseConfig {
    pub general: GeneralConfig,
    pub backend: BackendConfig,
    pub chat: ChatConfig,
    pub dictation: DictationConfig,
}

impl ConverseConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ConverseConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Answering-service endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Full URL of the ask endpoint.
    pub ask_url: String,
    /// End-to-end timeout for one exchange, in seconds.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            ask_url: "http://127.0.0.1:8000/ask".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Conversation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Bot message seeded at the start of every conversation.
    pub greeting: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

/// Dictation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DictationConfig {
    /// Whether to bind a speech capability at startup when one is present.
    pub enabled: bool,
    /// BCP-47 language tag passed to the speech engine.
    pub language: String,
}

impl Default for DictationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: "en-US".to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConverseConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.backend.ask_url, "http://127.0.0.1:8000/ask");
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.chat.greeting, DEFAULT_GREETING);
        assert!(config.dictation.enabled);
        assert_eq!(config.dictation.language, "en-US");
    }

    #[test]
    fn test_load_missing_file_errors() {
        let result = ConverseConfig::load(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ConverseConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.backend.timeout_secs, 30);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = ConverseConfig::default();
        config.backend.ask_url = "http://10.0.0.5:9000/ask".to_string();
        config.backend.timeout_secs = 5;
        config.chat.greeting = "Welcome back!".to_string();
        config.save(&path).unwrap();

        let loaded = ConverseConfig::load(&path).unwrap();
        assert_eq!(loaded.backend.ask_url, "http://10.0.0.5:9000/ask");
        assert_eq!(loaded.backend.timeout_secs, 5);
        assert_eq!(loaded.chat.greeting, "Welcome back!");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[backend]\nask_url = \"http://host/ask\"\n").unwrap();

        let config = ConverseConfig::load(&path).unwrap();
        assert_eq!(config.backend.ask_url, "http://host/ask");
        // Unspecified fields come from defaults.
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.chat.greeting, DEFAULT_GREETING);
    }

    #[test]
    fn test_load_invalid_toml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [[[ toml").unwrap();

        assert!(ConverseConfig::load(&path).is_err());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.toml");

        ConverseConfig::default().save(&path).unwrap();
        assert!(path.exists());
    }
}
