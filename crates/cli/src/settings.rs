use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use speakcheck_core::shared::constants::APP_DIR_NAME;

/// Persisted user preferences for the command line front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Overrides the platform default location of the progress store.
    #[serde(default)]
    pub store_path: Option<PathBuf>,
    /// Print the per-word breakdown after every scored attempt.
    #[serde(default)]
    pub show_details: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: None,
            show_details: false,
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|json| Self::from_json(&json))
            .unwrap_or_default()
    }

    fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {e}");
                None
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = Self::config_path().ok_or("could not determine config directory")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }
}
