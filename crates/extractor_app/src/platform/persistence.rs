use std::fs;
use std::path::{Path, PathBuf};

use extractor_client::{ensure_state_dir, AtomicFileWriter};
use panel_logging::{panel_error, panel_info, panel_warn};
use serde::{Deserialize, Serialize};

const SETTINGS_FILENAME: &str = ".extractor_settings.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedSettings {
    areas: Vec<String>,
}

/// Loads the persisted area set. Any read or parse failure falls back to an
/// empty set so a damaged settings file never blocks startup.
pub(crate) fn load_areas(state_dir: &Path) -> Option<Vec<String>> {
    let path = state_dir.join(SETTINGS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return None;
        }
        Err(err) => {
            panel_warn!("Failed to read settings from {:?}: {}", path, err);
            return None;
        }
    };

    let settings: PersistedSettings = match ron::from_str(&content) {
        Ok(settings) => settings,
        Err(err) => {
            panel_warn!("Failed to parse settings from {:?}: {}", path, err);
            return None;
        }
    };

    panel_info!("Loaded persisted areas from {:?}", path);
    Some(settings.areas)
}

pub(crate) fn save_areas(state_dir: &Path, areas: &[String]) {
    if let Err(err) = ensure_state_dir(state_dir) {
        panel_error!("Failed to ensure state dir {:?}: {}", state_dir, err);
        return;
    }

    let settings = PersistedSettings {
        areas: areas.to_vec(),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&settings, pretty) {
        Ok(text) => text,
        Err(err) => {
            panel_error!("Failed to serialize settings: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(PathBuf::from(state_dir));
    if let Err(err) = writer.write(SETTINGS_FILENAME, &content) {
        panel_error!("Failed to write settings to {:?}: {}", state_dir, err);
    }
}
