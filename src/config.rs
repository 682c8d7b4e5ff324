//! qrlogo runtime configuration handling

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure loaded from disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrLogoConfig {
    /// QR rasterization parameters
    pub render: RenderOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
    /// Decode every saved PNG and compare it against the payload
    pub verify: bool,
}

impl QrLogoConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrlogo.toml / qrlogo.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        config.render.clamp();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrlogo.toml", "qrlogo.yaml", "qrlogo.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrlogo");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.render.apply_env_overrides();
        self.logging.apply_env_overrides();
        if let Ok(verify) = env::var("QRLOGO_VERIFY") {
            if let Some(flag) = parse_flag(&verify) {
                self.verify = flag;
            }
        }
    }
}

/// Fixed QR layout: symbol version floor, pixels per module, quiet zone and logo square.
///
/// Error correction is always level M.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Smallest QR version to encode with; grown automatically when the data does not fit
    pub min_version: i16,
    /// Pixels per module side
    pub box_size: u32,
    /// Quiet zone width in modules
    pub border: u32,
    /// Side of the square the logo is stretched to, in pixels
    pub logo_size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            min_version: 8,
            box_size: 7,
            border: 3,
            logo_size: 120,
        }
    }
}

impl RenderOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(version) = env::var("QRLOGO_MIN_VERSION") {
            if let Ok(parsed) = version.parse::<i16>() {
                self.min_version = parsed;
            }
        }
        if let Ok(size) = env::var("QRLOGO_BOX_SIZE") {
            if let Ok(parsed) = size.parse::<u32>() {
                self.box_size = parsed;
            }
        }
        if let Ok(border) = env::var("QRLOGO_BORDER") {
            if let Ok(parsed) = border.parse::<u32>() {
                self.border = parsed;
            }
        }
        if let Ok(size) = env::var("QRLOGO_LOGO_SIZE") {
            if let Ok(parsed) = size.parse::<u32>() {
                self.logo_size = parsed;
            }
        }
    }

    /// Largest accepted module size in pixels
    pub const MAX_BOX_SIZE: u32 = 64;
    /// Largest accepted quiet zone in modules
    pub const MAX_BORDER: u32 = 16;
    /// Largest accepted logo square in pixels
    pub const MAX_LOGO_SIZE: u32 = 1024;

    /// Force every field into its valid range.
    ///
    /// The upper bounds keep the raster (at most 13376 px per side) from overflowing or
    /// exhausting memory.
    pub fn clamp(&mut self) {
        self.min_version = self.min_version.clamp(1, 40);
        self.box_size = self.box_size.clamp(1, Self::MAX_BOX_SIZE);
        self.border = self.border.min(Self::MAX_BORDER);
        self.logo_size = self.logo_size.clamp(1, Self::MAX_LOGO_SIZE);
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRLOGO_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in console logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRLOGO_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRLOGO_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRLOGO_LOG_COLOR") {
            if let Some(flag) = parse_flag(&color) {
                self.color = flag;
            }
        }
        if let Ok(rotation) = env::var("QRLOGO_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}
