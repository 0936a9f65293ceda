//! Remembered scale settings, stored as RON.

use std::fs;
use std::path::{Path, PathBuf};

use resizer_core::{ScaleMode, ScaleSettings};
use resizer_engine::{ensure_dir, replace_file};
use resizer_logging::{resizer_error, resizer_info, resizer_warn};
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "batch-resizer";
const SETTINGS_FILENAME: &str = "settings.ron";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum PersistedMode {
    Percentage,
    Absolute,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct PersistedSettings {
    mode: PersistedMode,
    percent_width: u32,
    percent_height: u32,
    absolute_width: u32,
    absolute_height: u32,
    auto_convert: bool,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self::from(&ScaleSettings::default())
    }
}

impl From<&ScaleSettings> for PersistedSettings {
    fn from(settings: &ScaleSettings) -> Self {
        Self {
            mode: match settings.mode {
                ScaleMode::Percentage => PersistedMode::Percentage,
                ScaleMode::Absolute => PersistedMode::Absolute,
            },
            percent_width: settings.percent_width,
            percent_height: settings.percent_height,
            absolute_width: settings.absolute_width,
            absolute_height: settings.absolute_height,
            auto_convert: settings.auto_convert,
        }
    }
}

impl From<PersistedSettings> for ScaleSettings {
    fn from(stored: PersistedSettings) -> Self {
        Self {
            mode: match stored.mode {
                PersistedMode::Percentage => ScaleMode::Percentage,
                PersistedMode::Absolute => ScaleMode::Absolute,
            },
            percent_width: stored.percent_width,
            percent_height: stored.percent_height,
            absolute_width: stored.absolute_width,
            absolute_height: stored.absolute_height,
            auto_convert: stored.auto_convert,
        }
    }
}

/// `<config dir>/batch-resizer/settings.ron`, when the platform has a config dir.
pub(crate) fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILENAME))
}

pub(crate) fn load(path: &Path) -> ScaleSettings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return ScaleSettings::default();
        }
        Err(err) => {
            resizer_warn!("Failed to read settings from {:?}: {}", path, err);
            return ScaleSettings::default();
        }
    };

    match ron::from_str::<PersistedSettings>(&content) {
        Ok(stored) => {
            resizer_info!("Loaded settings from {:?}", path);
            stored.into()
        }
        Err(err) => {
            resizer_warn!("Failed to parse settings from {:?}: {}", path, err);
            ScaleSettings::default()
        }
    }
}

pub(crate) fn save(path: &Path, settings: &ScaleSettings) {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if let Err(err) = ensure_dir(dir) {
            resizer_error!("Failed to ensure settings dir {:?}: {}", dir, err);
            return;
        }
    }

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&PersistedSettings::from(settings), pretty) {
        Ok(text) => text,
        Err(err) => {
            resizer_error!("Failed to serialize settings: {}", err);
            return;
        }
    };

    match replace_file(path, content.as_bytes()) {
        Ok(()) => resizer_info!("Saved settings to {:?}", path),
        Err(err) => resizer_error!("Failed to write settings to {:?}: {}", path, err),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            load(&temp.path().join("absent.ron")),
            ScaleSettings::default()
        );
    }

    #[test]
    fn saved_settings_load_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join(SETTINGS_FILENAME);
        let settings = ScaleSettings {
            mode: ScaleMode::Absolute,
            percent_width: 10,
            percent_height: 20,
            absolute_width: 1920,
            absolute_height: 1080,
            auto_convert: true,
        };

        save(&path, &settings);

        assert_eq!(load(&path), settings);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(SETTINGS_FILENAME);
        fs::write(&path, "(mode: Absolute, absolute_width: 300)").unwrap();

        let settings = load(&path);

        assert_eq!(settings.mode, ScaleMode::Absolute);
        assert_eq!(settings.params(), (300, 720));
        assert_eq!(settings.percent_width, 50);
    }

    #[test]
    fn garbage_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(SETTINGS_FILENAME);
        fs::write(&path, "{ not ron").unwrap();
        assert_eq!(load(&path), ScaleSettings::default());
    }
}
