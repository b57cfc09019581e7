//! Optional RON settings file with defaults for the command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use seq_engine::DEFAULT_EXTENSIONS;
use seq_logging::LogDestination;
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_SETTINGS_FILE: &str = "seqwrite.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub strip_tags: bool,
    pub extensions: Vec<String>,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strip_tags: false,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            log_destination: LogDestination::Terminal,
            log_file: PathBuf::from("./seqwrite.log"),
        }
    }
}

/// Settings plus a warning to log once the logger is up.
#[derive(Debug)]
pub(crate) struct LoadedSettings {
    pub settings: Settings,
    pub warning: Option<String>,
}

/// An explicit `--config` must exist and parse. The default file is optional,
/// and a broken default file falls back to defaults with a warning.
pub(crate) fn load_settings(explicit: Option<&Path>) -> anyhow::Result<LoadedSettings> {
    if let Some(path) = explicit {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let settings = ron::from_str(&content)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        return Ok(LoadedSettings {
            settings,
            warning: None,
        });
    }

    let path = Path::new(DEFAULT_SETTINGS_FILE);
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(LoadedSettings {
                settings: Settings::default(),
                warning: None,
            });
        }
        Err(err) => {
            return Ok(LoadedSettings {
                settings: Settings::default(),
                warning: Some(format!("Failed to read settings from {:?}: {}", path, err)),
            });
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => Ok(LoadedSettings {
            settings,
            warning: None,
        }),
        Err(err) => Ok(LoadedSettings {
            settings: Settings::default(),
            warning: Some(format!("Failed to parse settings from {:?}: {}", path, err)),
        }),
    }
}
