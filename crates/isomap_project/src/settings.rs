//! Editor settings persisted as TOML in the platform config directory

use crate::error::SettingsError;
use directories::ProjectDirs;
use isomap_core::DEFAULT_FILL_LIMIT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.toml";

/// Paint tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
    Fill,
    Eyedropper,
}

/// User-facing editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Tileset selected at startup
    pub tileset: String,
    pub tool: Tool,
    pub color_index: usize,
    pub autotile_enabled: bool,
    pub auto_group: String,
    pub randomize_brush: bool,
    pub show_grid: bool,
    /// Largest region a flood fill may cover
    pub fill_limit: usize,
    /// Directory for the file-backed project store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_project: Option<String>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            tileset: "grassland".to_string(),
            tool: Tool::Brush,
            color_index: 0,
            autotile_enabled: false,
            auto_group: String::new(),
            randomize_brush: false,
            show_grid: true,
            fill_limit: DEFAULT_FILL_LIMIT,
            store_dir: None,
            last_project: None,
        }
    }
}

impl EditorSettings {
    /// Get the config directory path for the editor
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "isomap", "isomap").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(SETTINGS_FILE))
    }

    /// Load settings, returning defaults if missing or unreadable
    pub fn load() -> Self {
        let result = Self::settings_path()
            .ok_or(SettingsError::NoConfigDir)
            .and_then(|path| Self::load_from(&path));
        match result {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Could not load settings: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Load settings from a specific file. A missing file gives defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save settings to the config directory
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        log::info!("Saved settings to {:?}", path);
        Ok(())
    }
}
