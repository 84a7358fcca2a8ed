//! Canvas preferences
//!
//! Supports JSON and TOML files, by default stored as
//! `<config dir>/labelkit/canvas.toml`.

use crate::error::{SettingsError, SettingsResult};
use labelkit_core::constants::{DEFAULT_ZOOM, FIT_DEBOUNCE_MS, MAX_ZOOM, MIN_ZOOM};
use labelkit_core::LabelSize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name used inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "canvas.toml";

/// Persisted canvas preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Label size new designs start with
    pub default_label_size: LabelSize,
    /// Draw the alignment grid
    pub show_grid: bool,
    /// Initial zoom in percent
    pub zoom: f64,
    /// Fit the label into the viewport when a design is opened
    pub auto_fit: bool,
    /// Maximum number of undo snapshots kept; `None` keeps all
    pub history_limit: Option<usize>,
    /// Delay before refitting after a container resize
    pub fit_debounce_ms: u64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            default_label_size: LabelSize::default(),
            show_grid: false,
            zoom: DEFAULT_ZOOM,
            auto_fit: true,
            history_limit: None,
            fit_debounce_ms: FIT_DEBOUNCE_MS,
        }
    }
}

impl CanvasSettings {
    /// Default location of the settings file
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        path.push("labelkit");
        path.push(CONFIG_FILE_NAME);
        path
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let settings: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No canvas settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring canvas settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> SettingsResult<()> {
        self.default_label_size
            .validate()
            .map_err(|e| SettingsError::invalid("default_label_size", e.to_string()))?;

        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.zoom) {
            return Err(SettingsError::invalid(
                "zoom",
                format!("must be between {} and {}", MIN_ZOOM, MAX_ZOOM),
            ));
        }

        if self.history_limit == Some(0) {
            return Err(SettingsError::invalid("history_limit", "must be > 0"));
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
