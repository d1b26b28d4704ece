use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::apptag::Categories;
use crate::capture::CaptureKitRules;
use crate::panels::PanelRules;

pub const APPTAGS_FILE: &str = "apptags.toml";
pub const PANELS_FILE: &str = "panels.toml";
pub const CAPTURE_KITS_FILE: &str = "capture_kits.toml";

#[derive(Debug, Error)]
pub enum RulesError {
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

/// Lookup tables the case logic runs on. Every table falls back to the
/// built-in defaults when no override file is present.
#[derive(Debug, Clone, Default)]
pub struct Rules {
    pub categories: Arc<Categories>,
    pub panels: PanelRules,
    pub capture_kits: CaptureKitRules,
}

impl Rules {
    pub fn load(dir: Option<&Path>) -> Result<Self, RulesError> {
        let Some(dir) = dir else {
            return Ok(Self::default());
        };
        Ok(Self {
            categories: Arc::new(load_table_or_default(&dir.join(APPTAGS_FILE))?),
            panels: load_table_or_default(&dir.join(PANELS_FILE))?,
            capture_kits: load_table_or_default(&dir.join(CAPTURE_KITS_FILE))?,
        })
    }
}

pub fn load_table<T: DeserializeOwned>(path: &Path) -> Result<T, RulesError> {
    let text = fs::read_to_string(path).map_err(|source| RulesError::Io {
        path: path.to_string_lossy().to_string(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| RulesError::Toml {
        path: path.to_string_lossy().to_string(),
        source,
    })
}

fn load_table_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, RulesError> {
    if path.is_file() {
        debug!(path = %path.display(), "loading rules override");
        load_table(path)
    } else {
        Ok(T::default())
    }
}

pub fn default_rules_dir() -> Option<PathBuf> {
    let relative = Path::new("assets").join("rules");
    if relative.is_dir() {
        return Some(relative);
    }

    if let Ok(exe) = std::env::current_exe()
        && let Some(dir) = exe.parent()
    {
        let sibling = dir.join("assets").join("rules");
        if sibling.is_dir() {
            return Some(sibling);
        }
    }

    None
}

#[cfg(test)]
#[path = "../tests/src_inline/rules/mod.rs"]
mod tests;
