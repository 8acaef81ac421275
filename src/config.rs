//! Configuration file support for pharmpick.
//!
//! Settings live in a versioned JSON file. Every field has a default, so a
//! partial file (or none at all) still yields a usable configuration.

use std::path::Path;

use pharmpick_ui::{DropdownConfig, Timings};
use serde::{Deserialize, Serialize};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,

    /// Behaviour shared by every picker
    #[serde(default)]
    pub dropdown: DropdownSettings,
}

fn default_app_name() -> String {
    "pharmpick".to_string()
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level (RUST_LOG takes precedence when set)
    #[serde(default)]
    pub log_level: LogLevel,

    /// Viewport used by the headless demo, `[width, height]`
    #[serde(default = "default_viewport")]
    pub viewport: [f32; 2],
}

fn default_viewport() -> [f32; 2] {
    [1280.0, 800.0]
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            viewport: default_viewport(),
        }
    }
}

/// Picker settings section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownSettings {
    /// Open pickers when the pointer dwells on them
    #[serde(default)]
    pub hover_to_open: bool,

    /// Pickers without a search box filter by typing
    #[serde(default = "default_type_ahead")]
    pub type_ahead: bool,

    /// Rows moved by PageUp/PageDown
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Tallest the option list may grow, in pixels
    #[serde(default = "default_max_list_height")]
    pub max_list_height: f32,

    /// Every engine delay
    #[serde(default)]
    pub timings: Timings,
}

fn default_type_ahead() -> bool {
    true
}

fn default_page_size() -> usize {
    pharmpick_ui::constants::PAGE_SIZE
}

fn default_max_list_height() -> f32 {
    pharmpick_ui::constants::MAX_LIST_HEIGHT
}

impl Default for DropdownSettings {
    fn default() -> Self {
        Self {
            hover_to_open: false,
            type_ahead: default_type_ahead(),
            page_size: default_page_size(),
            max_list_height: default_max_list_height(),
            timings: Timings::default(),
        }
    }
}

impl DropdownSettings {
    /// Base picker configuration; callers add placeholder, mode and validation.
    pub fn to_dropdown_config(&self) -> DropdownConfig {
        DropdownConfig::new()
            .hover_to_open(self.hover_to_open)
            .type_ahead(self.type_ahead)
            .page_size(self.page_size)
            .max_list_height(self.max_list_height)
            .timings(self.timings)
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: UserPreferences::default(),
            dropdown: DropdownSettings::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Write a configuration file, creating parent directories if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "pharmpick-config.json"
    }

    /// Get the default config file path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("pharmpick").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("pharmpick")
                    .join(Self::default_filename())
            })
        }
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the default path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save(&path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
