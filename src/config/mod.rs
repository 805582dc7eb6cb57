//! Configuration for focal
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/focal/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! The `[ui]` section doubles as the durable preference store: toggling the
//! view mode or theme from inside the TUI writes the file back.

use crate::item::ViewMode;
use serde::Deserialize;
use std::path::PathBuf;

#[cfg(test)]
mod tests;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Log Rotation
// ─────────────────────────────────────────────────────────────────────────────

/// Log file rotation strategy
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LogRotation {
    /// Rotate log files hourly
    Hourly,
    /// Rotate log files daily (default)
    #[default]
    Daily,
    /// Never rotate - single log file
    Never,
}

impl LogRotation {
    /// Parse rotation string from config
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily, // Default to daily for unknown values
        }
    }

    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Remote API endpoints and paging
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Primary (Firebase) API base URL
    pub base_url: String,
    /// Enrichment (Algolia) API base URL, tried first for replies
    pub enrich_url: String,
    /// Stories fetched per page of the home collection
    pub page_size: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://hacker-news.firebaseio.com/v0".to_string(),
            enrich_url: "https://hn.algolia.com/api/v1".to_string(),
            page_size: 30,
            timeout_secs: 30,
        }
    }
}

/// UI preferences, persisted back on change
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Home collection layout: "grid" or "list"
    pub view_mode: ViewMode,
    /// Theme name, resolved by the TUI theme module
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Grid,
            theme: "Dark".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Enable file logging (in addition to the TUI buffer)
    pub file_enabled: bool,
    /// Directory for log files
    pub file_dir: PathBuf,
    /// Log file name prefix
    pub file_prefix: String,
    /// Rotation strategy
    pub file_rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_prefix: "focal".to_string(),
            file_rotation: LogRotation::Daily,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (everything optional; defaults fill the gaps)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api: Option<FileApiConfig>,
    pub ui: Option<FileUiConfig>,
    pub logging: Option<FileLogging>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileApiConfig {
    pub base_url: Option<String>,
    pub enrich_url: Option<String>,
    pub page_size: Option<usize>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileUiConfig {
    pub view_mode: Option<String>,
    pub theme: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_prefix: Option<String>,
    pub file_rotation: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// ~/.config/focal/config.toml on every platform
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("focal").join("config.toml"))
    }

    /// Write a commented default config on first run so the options are
    /// discoverable. Existing files are never touched.
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // config is optional, run without one
            }
        }
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Read the TOML file layer. A file that exists but does not parse is
    /// a hard startup error; falling back to defaults would leave the user
    /// debugging the wrong configuration.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\nCONFIG ERROR - Failed to parse configuration file\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  To reset, run `focal config --reset` or delete the file.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\nCONFIG ERROR - Cannot read configuration file\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        Self::resolve(file)
    }

    pub(crate) fn resolve(file: FileConfig) -> Self {
        let defaults = Config::default();
        let file_api = file.api.unwrap_or_default();
        let file_ui = file.ui.unwrap_or_default();
        let file_logging = file.logging.unwrap_or_default();

        let api = ApiConfig {
            base_url: std::env::var("FOCAL_API_BASE")
                .ok()
                .or(file_api.base_url)
                .unwrap_or(defaults.api.base_url),
            enrich_url: std::env::var("FOCAL_ENRICH_BASE")
                .ok()
                .or(file_api.enrich_url)
                .unwrap_or(defaults.api.enrich_url),
            page_size: std::env::var("FOCAL_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .or(file_api.page_size)
                .filter(|&n| n > 0)
                .unwrap_or(defaults.api.page_size),
            timeout_secs: std::env::var("FOCAL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .or(file_api.timeout_secs)
                .filter(|&n| n > 0)
                .unwrap_or(defaults.api.timeout_secs),
        };

        let ui = UiConfig {
            view_mode: std::env::var("FOCAL_VIEW")
                .ok()
                .as_deref()
                .and_then(ViewMode::parse)
                .or_else(|| file_ui.view_mode.as_deref().and_then(ViewMode::parse))
                .unwrap_or(defaults.ui.view_mode),
            theme: std::env::var("FOCAL_THEME")
                .ok()
                .or(file_ui.theme)
                .unwrap_or(defaults.ui.theme),
        };

        let logging = LoggingConfig {
            level: std::env::var("FOCAL_LOG_LEVEL")
                .ok()
                .or(file_logging.level)
                .unwrap_or(defaults.logging.level),
            file_enabled: file_logging
                .file_enabled
                .unwrap_or(defaults.logging.file_enabled),
            file_dir: file_logging
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.logging.file_dir),
            file_prefix: file_logging
                .file_prefix
                .unwrap_or(defaults.logging.file_prefix),
            file_rotation: file_logging
                .file_rotation
                .as_deref()
                .map(LogRotation::parse)
                .unwrap_or(defaults.logging.file_rotation),
        };

        Config { api, ui, logging }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Serialization
    // ─────────────────────────────────────────────────────────────────────────

    /// Render this config as the TOML file template. Single source of truth
    /// for the config file format.
    pub fn to_toml(&self) -> String {
        format!(
            r#"# focal configuration
# Env vars (FOCAL_API_BASE, FOCAL_VIEW, FOCAL_THEME, ...) override this file.

[ui]
# Home collection layout: "grid" or "list"
view_mode = "{view_mode}"
theme = "{theme}"

[api]
base_url = "{base_url}"
enrich_url = "{enrich_url}"
page_size = {page_size}
timeout_secs = {timeout_secs}

[logging]
# trace, debug, info, warn, error
level = "{level}"
file_enabled = {file_enabled}
file_dir = "{file_dir}"
file_prefix = "{file_prefix}"
# hourly, daily, never
file_rotation = "{file_rotation}"
"#,
            view_mode = self.ui.view_mode.name(),
            theme = self.ui.theme,
            base_url = self.api.base_url,
            enrich_url = self.api.enrich_url,
            page_size = self.api.page_size,
            timeout_secs = self.api.timeout_secs,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_prefix = self.logging.file_prefix,
            file_rotation = self.logging.file_rotation.as_str(),
        )
    }

    /// Persist the current `[ui]` preferences. Called when the user toggles
    /// the view mode or cycles the theme inside the TUI; failure is logged
    /// and otherwise ignored (preferences just won't stick).
    pub fn save_ui_prefs(&self) {
        let Some(path) = Self::config_path() else {
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = std::fs::write(&path, self.to_toml()) {
            tracing::warn!("could not persist UI preferences: {}", e);
        } else {
            tracing::debug!(
                "saved UI preferences (view_mode={}, theme={})",
                self.ui.view_mode.name(),
                self.ui.theme
            );
        }
    }
}
