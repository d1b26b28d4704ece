use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::lims::{Lims, LimsError, LimsSample, udf};

pub const LATEST_CAPTURE_KIT: &str = "Agilent_SureSelectCRE.V1";
pub const HYBRIDIZATION_PROCESS: &str = "669";
pub const PROCESS_KIT_ATTRIBUTE: &str = "SureSelect capture library/libraries used";

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no capture kit annotated: {0}")]
    MissingCaptureKitData(String),
    #[error("unknown capture kit '{kit}' on sample {sample}")]
    UnmappedCaptureKit { sample: String, kit: String },
    #[error("lims error: {0}")]
    Lims(#[from] LimsError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureKitRules {
    #[serde(default = "default_kit")]
    pub default_kit: String,
    #[serde(default = "default_process")]
    pub hybridization_process: String,
    #[serde(default = "default_attribute")]
    pub process_attribute: String,
    #[serde(default)]
    pub kits: BTreeMap<String, String>,
}

fn default_kit() -> String {
    LATEST_CAPTURE_KIT.to_string()
}

fn default_process() -> String {
    HYBRIDIZATION_PROCESS.to_string()
}

fn default_attribute() -> String {
    PROCESS_KIT_ATTRIBUTE.to_string()
}

impl Default for CaptureKitRules {
    fn default() -> Self {
        let kits = [
            ("Agilent Sureselect CRE", "Agilent_SureSelectCRE.V1"),
            ("SureSelect CRE", "Agilent_SureSelectCRE.V1"),
            ("Agilent Sureselect V5", "Agilent_SureSelect.V5"),
            ("SureSelect Focused Exome", "Agilent_SureSelectFocusedExome.V1"),
            ("other", "Agilent_SureSelectCRE.V1"),
        ];
        Self {
            default_kit: default_kit(),
            hybridization_process: default_process(),
            process_attribute: default_attribute(),
            kits: kits
                .into_iter()
                .map(|(name, id)| (name.to_string(), id.to_string()))
                .collect(),
        }
    }
}

impl CaptureKitRules {
    pub fn canonical(&self, sample: &str, kit_name: &str) -> Result<String, CaptureError> {
        let name = kit_name.trim();
        self.kits
            .get(name)
            .cloned()
            .ok_or_else(|| CaptureError::UnmappedCaptureKit {
                sample: sample.to_string(),
                kit: name.to_string(),
            })
    }
}

/// Work out which capture kit a sample was prepared with.
///
/// A kit annotated on the sample itself wins; otherwise the first
/// hybridization step in the sample's history that recorded a kit is used.
pub fn resolve_capture_kit<L: Lims + ?Sized>(
    lims: &L,
    rules: &CaptureKitRules,
    sample: &LimsSample,
) -> Result<String, CaptureError> {
    if let Some(kit) = sample
        .udf_nonempty(udf::CAPTURE_KIT)
        .filter(|kit| kit != udf::NOT_AVAILABLE)
    {
        debug!(sample = %sample.id, kit = %kit, "capture kit annotated on sample");
        return rules.canonical(&sample.id, &kit);
    }

    let history = lims.fetch_process_history(&sample.id, &rules.hybridization_process)?;
    for record in &history {
        match record.udf(&rules.process_attribute) {
            Some(kit) if !kit.is_empty() => {
                debug!(sample = %sample.id, kit = %kit, "capture kit from process history");
                return rules.canonical(&sample.id, &kit);
            }
            _ => warn!(sample = %sample.id, "capture kit not found on expected process"),
        }
    }

    Err(CaptureError::MissingCaptureKitData(sample.id.clone()))
}

#[cfg(test)]
#[path = "../../tests/src_inline/capture/mod.rs"]
mod tests;
