//! Configuration management for seqdraw.
//!
//! Parses `seqdraw.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! Every section is optional:
//!
//! ```toml
//! [cache]
//! enabled = true
//! validation_max_entries = 1000
//! validation_ttl_ms = 300000
//! render_max_entries = 50
//!
//! [render]
//! theme = "simple"
//!
//! [compiler]
//! kroki_url = "https://kroki.io"
//! timeout_secs = 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use seqdraw_diagrams::{
    DEFAULT_RENDER_CACHE_ENTRIES, DEFAULT_TIMEOUT, DEFAULT_VALIDATION_CACHE_ENTRIES,
    DEFAULT_VALIDATION_CACHE_TTL, Theme,
};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override render theme.
    pub theme: Option<Theme>,
    /// Override Kroki URL for diagram rendering.
    pub kroki_url: Option<String>,
    /// Override cache enabled flag.
    pub cache_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "seqdraw.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Validation and render cache configuration.
    pub cache: CacheConfig,
    /// Render defaults.
    pub render: RenderConfig,
    /// Diagram compiler configuration.
    pub compiler: CompilerConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Cache configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether caching is enabled. Disabled means no-op caches for both tiers.
    pub enabled: bool,
    /// Maximum cached validation results.
    pub validation_max_entries: usize,
    /// Validation result time-to-live in milliseconds.
    pub validation_ttl_ms: u64,
    /// Maximum cached render results.
    pub render_max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            validation_max_entries: DEFAULT_VALIDATION_CACHE_ENTRIES,
            validation_ttl_ms: u64::try_from(DEFAULT_VALIDATION_CACHE_TTL.as_millis())
                .unwrap_or(u64::MAX),
            render_max_entries: DEFAULT_RENDER_CACHE_ENTRIES,
        }
    }
}

impl CacheConfig {
    /// Validation result time-to-live.
    #[must_use]
    pub fn validation_ttl(&self) -> Duration {
        Duration::from_millis(self.validation_ttl_ms)
    }
}

/// Render configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Default theme (`"simple"` or `"hand-drawn"`).
    pub theme: Theme,
}

/// Diagram compiler configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Kroki server URL. Required for rendering, not for checking.
    pub kroki_url: Option<String>,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            kroki_url: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl CompilerConfig {
    /// HTTP timeout for compiler requests.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require a numeric field to be greater than zero.
fn require_positive(value: u64, field: &str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Validation(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `seqdraw.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values. The result is validated again
    /// after overrides.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the effective configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(theme) = settings.theme {
            self.render.theme = theme;
        }
        if let Some(kroki_url) = &settings.kroki_url {
            self.compiler.kroki_url = Some(kroki_url.clone());
        }
        if let Some(cache_enabled) = settings.cache_enabled {
            self.cache.enabled = cache_enabled;
        }
    }

    /// Get the validated Kroki URL.
    ///
    /// Use this instead of accessing `compiler.kroki_url` directly when the
    /// command needs to render.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no URL is configured or it is invalid.
    pub fn require_kroki_url(&self) -> Result<&str, ConfigError> {
        let url = self.compiler.kroki_url.as_deref().ok_or_else(|| {
            ConfigError::Validation(
                "compiler.kroki_url is required for rendering (set it in seqdraw.toml or pass --kroki-url)"
                    .to_owned(),
            )
        })?;
        require_non_empty(url, "compiler.kroki_url")?;
        require_http_url(url, "compiler.kroki_url")?;
        Ok(url)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after applying
    /// CLI settings. Theme names are checked while parsing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_cache()?;
        self.validate_compiler()?;
        Ok(())
    }

    /// Validate cache configuration.
    fn validate_cache(&self) -> Result<(), ConfigError> {
        // Limits apply even when caching is disabled
        require_positive(
            self.cache.validation_max_entries as u64,
            "cache.validation_max_entries",
        )?;
        require_positive(self.cache.validation_ttl_ms, "cache.validation_ttl_ms")?;
        require_positive(
            self.cache.render_max_entries as u64,
            "cache.render_max_entries",
        )?;
        Ok(())
    }

    /// Validate compiler configuration.
    fn validate_compiler(&self) -> Result<(), ConfigError> {
        // Only validate kroki_url if set (rendering enabled)
        if let Some(ref kroki_url) = self.compiler.kroki_url {
            require_non_empty(kroki_url, "compiler.kroki_url")?;
            require_http_url(kroki_url, "compiler.kroki_url")?;
        }
        require_positive(self.compiler.timeout_secs, "compiler.timeout_secs")?;
        Ok(())
    }
}
