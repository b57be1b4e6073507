//! Configuration loading, validation, and management for skybrief.
//!
//! Loads configuration from `~/.skybrief/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.skybrief/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Anthropic API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Chat model
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per model response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Maximum model↔tool round-trips per user message
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: u32,

    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Report output configuration
    #[serde(default)]
    pub reports: ReportsConfig,

    /// Background monitoring configuration
    #[serde(default)]
    pub monitor: MonitorConfig,
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    4096
}
fn default_max_tool_rounds() -> u32 {
    8
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_tool_rounds", &self.max_tool_rounds)
            .field("weather", &self.weather)
            .field("reports", &self.reports)
            .field("monitor", &self.monitor)
            .finish()
    }
}

/// Weather provider settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Yandex.Weather API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Forecast endpoint base URL
    #[serde(default = "default_weather_api_url")]
    pub api_url: String,

    /// How long a fetched weather record stays fresh
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// How often the background sweep reclaims expired entries
    #[serde(default = "default_cache_sweep_secs")]
    pub cache_sweep_secs: u64,
}

fn default_weather_api_url() -> String {
    "https://api.weather.yandex.ru/v2/forecast".into()
}
fn default_cache_ttl_secs() -> u64 {
    300
}
fn default_cache_sweep_secs() -> u64 {
    60
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("cache_sweep_secs", &self.cache_sweep_secs)
            .finish()
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_weather_api_url(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_sweep_secs: default_cache_sweep_secs(),
        }
    }
}

/// Where saved reports land and how their download URLs are built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Directory reports are written into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Base URL prepended to file names to form `file_url`
    #[serde(default = "default_reports_base_url")]
    pub base_url: String,
}

fn default_reports_base_url() -> String {
    "file://localhost/reports".into()
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            base_url: default_reports_base_url(),
        }
    }
}

/// Background weather monitoring settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub enabled: bool,

    /// City to observe
    #[serde(default = "default_monitor_city")]
    pub city: String,

    /// Minutes between polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_minutes: u32,

    /// Minutes between trend summaries
    #[serde(default = "default_summary_interval")]
    pub summary_interval_minutes: u32,

    /// History file path (defaults to ~/.skybrief/weather-history.json)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_file: Option<PathBuf>,

    /// Observations kept before the oldest are dropped
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_monitor_city() -> String {
    "Рига".into()
}
fn default_poll_interval() -> u32 {
    15
}
fn default_summary_interval() -> u32 {
    60
}
fn default_max_entries() -> usize {
    // 7 days of 15-minute polls
    672
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            city: default_monitor_city(),
            poll_interval_minutes: default_poll_interval(),
            summary_interval_minutes: default_summary_interval(),
            history_file: None,
            max_entries: default_max_entries(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.skybrief/config.toml).
    ///
    /// Also checks environment variables for API keys:
    /// - `SKYBRIEF_API_KEY` (highest priority)
    /// - `ANTHROPIC_API_KEY`
    /// - `YANDEX_WEATHER_API_KEY` for the weather provider
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = Self::config_dir();
        let config_path = config_dir.join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        // Environment variable overrides (highest priority)
        if config.api_key.is_none() {
            config.api_key = std::env::var("SKYBRIEF_API_KEY")
                .ok()
                .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok());
        }

        if config.weather.api_key.is_none() {
            config.weather.api_key = std::env::var("YANDEX_WEATHER_API_KEY").ok();
        }

        // Allow env var to override the model
        if let Ok(model) = std::env::var("SKYBRIEF_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".skybrief")
    }

    /// Directory reports are written into.
    pub fn reports_dir(&self) -> PathBuf {
        self.reports
            .dir
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("reports"))
    }

    /// Path of the monitoring history file.
    pub fn history_file(&self) -> PathBuf {
        self.monitor
            .history_file
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("weather-history.json"))
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature < 0.0 || self.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.max_tool_rounds == 0 {
            return Err(ConfigError::ValidationError(
                "max_tool_rounds must be at least 1".into(),
            ));
        }

        if self.monitor.poll_interval_minutes == 0 {
            return Err(ConfigError::ValidationError(
                "monitor.poll_interval_minutes must be at least 1".into(),
            ));
        }

        if self.monitor.max_entries == 0 {
            return Err(ConfigError::ValidationError(
                "monitor.max_entries must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Check if a chat API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_tool_rounds: default_max_tool_rounds(),
            weather: WeatherConfig::default(),
            reports: ReportsConfig::default(),
            monitor: MonitorConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.max_tool_rounds, 8);
        assert_eq!(config.weather.cache_ttl_secs, 300);
        assert_eq!(config.monitor.city, "Рига");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.model, config.model);
        assert_eq!(parsed.monitor.max_entries, config.monitor.max_entries);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            temperature: 5.0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_tool_rounds_rejected() {
        let config = AppConfig {
            max_tool_rounds: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        let config = result.unwrap();
        assert_eq!(config.model, default_model());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
model = "claude-haiku-4-20250514"

[monitor]
enabled = true
city = "Таллин"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.model, "claude-haiku-4-20250514");
        assert!(config.monitor.enabled);
        assert_eq!(config.monitor.city, "Таллин");
        assert_eq!(config.monitor.poll_interval_minutes, 15);
        assert_eq!(config.weather.cache_ttl_secs, 300);
    }

    #[test]
    fn debug_redacts_api_keys() {
        let config = AppConfig {
            api_key: Some("sk-ant-secret".into()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-ant-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("max_tool_rounds"));
        assert!(toml_str.contains("cache_ttl_secs"));
    }
}
