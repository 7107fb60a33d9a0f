use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ReceptionistError, Result};

/// Top-level configuration for the receptionist backend.
///
/// Loaded from `~/.receptionist/config.toml` by default, then overlaid with
/// environment variables (see [`ReceptionistConfig::apply_env_overrides`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceptionistConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub company: CompanyConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReceptionistConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ReceptionistConfig = toml::from_str(&content)?;
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
        let content = toml::to_string_pretty(self)
            .map_err(|e| ReceptionistError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Overlay values from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from an arbitrary key lookup.
    ///
    /// Unparseable numeric or boolean values are ignored with a warning.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("PORT") {
            match v.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %v, "Ignoring invalid PORT"),
            }
        }
        if let Some(v) = lookup("CORS_ORIGINS") {
            self.server.cors_origins = split_origins(&v);
        }
        if let Some(v) = lookup("OPENAI_API_KEY") {
            self.llm.api_key = Some(v);
        }
        if let Some(v) = lookup("OPENAI_MODEL") {
            self.llm.model = v;
        }
        if let Some(v) = lookup("OPENAI_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Some(v) = lookup("COMPANY_NAME") {
            self.company.name = v;
        }
        if let Some(v) = lookup("COMPANY_EMAIL") {
            self.company.email = v;
        }
        if let Some(v) = lookup("COMPANY_PHONE") {
            self.company.phone = v;
        }
        if let Some(v) = lookup("BUSINESS_HOURS") {
            self.company.business_hours = v;
        }
        if let Some(v) = lookup("EMAIL_ENABLED") {
            match parse_bool(&v) {
                Some(enabled) => self.email.enabled = enabled,
                None => warn!(value = %v, "Ignoring invalid EMAIL_ENABLED"),
            }
        }
        if let Some(v) = lookup("EMAIL_FROM") {
            self.email.from = v;
        }
        if let Some(v) = lookup("EMAIL_RELAY_URL") {
            self.email.relay_url = Some(v);
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Browser origins allowed by CORS.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
        }
    }
}

/// Chat-completion backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API credential. `None` or blank puts the chat into degraded mode.
    pub api_key: Option<String>,
    /// Model identifier sent with every completion request.
    pub model: String,
    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// The API key, if one is configured and not blank.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Business identity used in the receptionist persona and outgoing mail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyConfig {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_hours: String,
    /// Service catalog listed in the persona.
    pub services: Vec<String>,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: "Softechsol".to_string(),
            email: "info@softechsol.com".to_string(),
            phone: "+1-555-0123".to_string(),
            business_hours: "Monday-Friday, 9 AM - 5 PM".to_string(),
            services: vec![
                "Web Development".to_string(),
                "Mobile Applications".to_string(),
                "AI & Automation".to_string(),
                "Cloud / IT Services".to_string(),
            ],
        }
    }
}

/// Record store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the SQLite database.
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.receptionist/data".to_string(),
        }
    }
}

/// Outgoing notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// When false, notifications are only logged.
    pub enabled: bool,
    /// Sender address.
    pub from: String,
    /// HTTP mail relay endpoint. Without one, notifications are only logged.
    pub relay_url: Option<String>,
    /// Delay before the callback reminder for a new appointment lead.
    pub callback_reminder_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            from: "noreply@softechsol.com".to_string(),
            relay_url: None,
            callback_reminder_secs: 900,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    pub level: String,
    /// Directory for daily rolling log files. Console only when unset.
    pub log_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}
