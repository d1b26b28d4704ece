use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::apptag::{ApplicationTag, Categories, TagError};
use crate::lims::{Lims, LimsError, LimsSample, udf};

pub const RELATION_KEYS: [&str; 3] = [udf::MOTHER, udf::FATHER, udf::OTHER_RELATIONS];

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{sample}: missing required attribute '{attribute}'")]
    MissingRequiredAttribute {
        sample: String,
        attribute: &'static str,
    },
    #[error("{sample}: {source}")]
    Tag { sample: String, source: TagError },
    #[error("lims error: {0}")]
    Lims(#[from] LimsError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub sample: String,
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn error(sample: &LimsSample, message: impl Into<String>) -> Self {
        Self {
            sample: sample.id.clone(),
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(sample: &LimsSample, message: impl Into<String>) -> Self {
        Self {
            sample: sample.id.clone(),
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// External names may only hold alphanumerics and dashes.
pub fn check_sample_name(sample: &LimsSample) -> Option<Finding> {
    let ok = !sample.name.is_empty()
        && sample
            .name
            .chars()
            .all(|c| c == '-' || c.is_alphanumeric());
    (!ok).then(|| Finding::error(sample, format!("sample name not OK: {}", sample.name)))
}

/// Externally sequenced exomes need the kit filled in by hand.
pub fn check_capture_kit(sample: &LimsSample, categories: &Arc<Categories>) -> Option<Finding> {
    let raw = sample.udf_nonempty(udf::APPLICATION_TAG)?;
    let tag = match ApplicationTag::parse_with(&raw, categories) {
        Ok(tag) => tag,
        Err(err) => return Some(Finding::error(sample, err.to_string())),
    };
    if !(tag.is_external() && tag.is_panel()) {
        return None;
    }
    match sample.udf_nonempty(udf::CAPTURE_KIT).as_deref() {
        None | Some(udf::NOT_AVAILABLE) => Some(Finding::error(
            sample,
            "capture kit not filled in for external sample",
        )),
        Some(_) => None,
    }
}

/// Relations must point inside the family, and a multi-sample family
/// without relations is suspicious unless it is a tumour/normal pair.
pub fn check_family_members(sample: &LimsSample, related: &[LimsSample]) -> Vec<Finding> {
    let mut findings = Vec::new();
    if related.len() <= 1 {
        return findings;
    }

    let relations = |s: &LimsSample| -> Vec<(&'static str, String)> {
        RELATION_KEYS
            .iter()
            .filter_map(|key| {
                s.udf_nonempty(key)
                    .filter(|value| value != "0")
                    .map(|value| (*key, value))
            })
            .collect()
    };
    let names: HashSet<&str> = related.iter().map(|s| s.name.as_str()).collect();
    let is_family = related.iter().any(|s| !relations(s).is_empty());

    if is_family {
        for other in related {
            for (key, related_name) in relations(other) {
                if names.contains(related_name.as_str()) {
                    debug!(sample = %other.id, key, related = %related_name, "found related sample");
                } else {
                    findings.push(Finding::error(
                        sample,
                        format!(
                            "{} {key} '{related_name}' is not part of family {}",
                            other.id,
                            sample.udf(udf::FAMILY_ID).unwrap_or_default()
                        ),
                    ));
                }
            }
        }
    } else if related.iter().any(|s| s.is_flagged(udf::TUMOR)) {
        debug!(sample = %sample.id, "samples part of cancer combo");
    } else {
        findings.push(Finding::warning(
            sample,
            "samples in family are not related, tumor/normal?",
        ));
    }
    findings
}

pub fn check_sample<L: Lims + ?Sized>(
    lims: &L,
    categories: &Arc<Categories>,
    sample: &LimsSample,
) -> Result<Vec<Finding>, CheckError> {
    let mut findings = Vec::new();
    findings.extend(check_sample_name(sample));
    findings.extend(check_capture_kit(sample, categories));

    if let (Some(customer), Some(family_id)) = (
        sample.udf_nonempty(udf::CUSTOMER),
        sample.udf_nonempty(udf::FAMILY_ID),
    ) {
        let related = lims.fetch_case_samples(&customer, &family_id)?;
        findings.extend(check_family_members(sample, &related));
    }

    for finding in &findings {
        match finding.severity {
            Severity::Error => error!(sample = %finding.sample, "{}", finding.message),
            Severity::Warning => warn!(sample = %finding.sample, "{}", finding.message),
        }
    }
    Ok(findings)
}

/// Fill in `Reads missing (M)` from the ordered amount. Returns whether the
/// LIMS was updated.
pub fn set_missing_reads<L: Lims + ?Sized>(
    lims: &mut L,
    categories: &Arc<Categories>,
    sample: &LimsSample,
    force: bool,
) -> Result<bool, CheckError> {
    let raw = sample
        .udf_nonempty(udf::APPLICATION_TAG)
        .ok_or_else(|| CheckError::MissingRequiredAttribute {
            sample: sample.id.clone(),
            attribute: udf::APPLICATION_TAG,
        })?;
    let tag_error = |source| CheckError::Tag {
        sample: sample.id.clone(),
        source,
    };
    let tag = ApplicationTag::parse_with(&raw, categories).map_err(tag_error)?;
    let reads = tag.reads().map_err(tag_error)?;

    let current = sample
        .udf_nonempty(udf::READS_MISSING)
        .filter(|value| value != "0");
    if !force
        && let Some(current) = current
    {
        warn!(sample = %sample.id, current = %current, "missing reads already set");
        return Ok(false);
    }

    let millions = reads as f64 / 1_000_000.0;
    lims.update_sample_attribute(&sample.id, udf::READS_MISSING, &millions.to_string())?;
    info!(sample = %sample.id, reads_missing_m = millions, "updated reads missing");
    Ok(true)
}

#[cfg(test)]
#[path = "../../tests/src_inline/checks/mod.rs"]
mod tests;
