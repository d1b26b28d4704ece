use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const CONFIG_ENV: &str = "LIMS_CASE_CONFIG";
pub const CONFIG_FILE_NAME: &str = ".lims-case.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("toml parse error in {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Where the CLI finds its LIMS snapshot and rule overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
    #[serde(default)]
    pub rules_dir: Option<PathBuf>,
}

impl Settings {
    /// An explicit path must exist; the env var and home file are optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match locate() {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        let settings: Settings = toml::from_str(&text).map_err(|source| SettingsError::Toml {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings.relative_to(path.parent()))
    }

    /// Relative paths in a settings file are taken from the file's directory.
    fn relative_to(mut self, base: Option<&Path>) -> Self {
        if let Some(base) = base {
            for path in [&mut self.snapshot, &mut self.rules_dir].into_iter().flatten() {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        }
        self
    }
}

fn locate() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(path));
    }
    let home = std::env::var_os("HOME")?;
    let path = Path::new(&home).join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}

#[cfg(test)]
#[path = "../tests/src_inline/settings/mod.rs"]
mod tests;
