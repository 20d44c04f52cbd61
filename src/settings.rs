use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Settings for the editor helpers
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Workspace edit application settings
    pub edits: EditSettings,
    /// Path display settings
    pub display: DisplaySettings,
}

/// Workspace edit application settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EditSettings {
    /// Show a warning for create/rename/delete operations in a workspace
    /// edit, which are skipped rather than applied
    pub report_unsupported_operations: bool,
}

impl Default for EditSettings {
    fn default() -> Self {
        Self {
            report_unsupported_operations: true,
        }
    }
}

/// Path display settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Volume prefix collapsed out of display paths when no workspace root
    /// is set
    pub volume_prefix: String,
    /// Replace a home-directory prefix with `~`
    pub collapse_home: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            volume_prefix: "/Volumes/Macintosh HD".to_string(),
            collapse_home: true,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(&path)
            .into_diagnostic()
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;

        let settings: Settings = toml::from_str(&contents)
            .into_diagnostic()
            .with_context(|| format!("Failed to parse settings file: {:?}", path.as_ref()))?;

        Ok(settings)
    }

    /// Load settings from a TOML file, or return defaults if the file doesn't exist
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(&path) {
            Ok(settings) => settings,
            Err(_) => {
                log::info!(
                    "Settings file not found or invalid, using defaults: {:?}",
                    path.as_ref()
                );
                Self::default()
            }
        }
    }
}
