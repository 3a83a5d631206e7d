use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the default prompt template
pub const TEMPLATE_ENV: &str = "CLIPIQ_PROMPT_TEMPLATE";

/// Legacy variable honored for users of the Python predecessor
pub const LEGACY_TEMPLATE_ENV: &str = "NO_MORE_TYPO_PROMPT_TEMPLATE";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Model
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub request_timeout_secs: u64,

    // Default template override (env variables take precedence)
    #[serde(default)]
    pub default_template: Option<String>,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo-instruct".to_string(),
            max_tokens: 512,
            temperature: 0.7,
            request_timeout_secs: 30,
            default_template: None,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from a specific file
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            match serde_json::from_str(&content) {
                Ok(config) => Ok(config),
                Err(e) => {
                    // Graceful degradation: log warning and use defaults
                    tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                    // Backup corrupt file for debugging
                    let backup_path = config_path.with_extension("json.corrupt");
                    let _ = std::fs::rename(config_path, &backup_path);
                    Ok(Self::default())
                }
            }
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    /// Save config to a specific file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Resolve the default template override, read once at startup.
    /// Environment variables win over the config file field.
    pub fn resolve_default_template(&self) -> Option<String> {
        std::env::var(TEMPLATE_ENV)
            .or_else(|_| std::env::var(LEGACY_TEMPLATE_ENV))
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| self.default_template.clone())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("clipiq")
        .join("config.json")
}
