pub mod memory;
pub mod sample;
pub mod udf;

use thiserror::Error;
use tracing::{debug, info};

pub use memory::{MemoryLims, Snapshot};
pub use sample::{LimsSample, ProcessRecord, UdfValue};

#[derive(Debug, Error)]
pub enum LimsError {
    #[error("sample not found: {0}")]
    SampleNotFound(String),
    #[error("'{id}' matches several samples: {}", matches.join(", "))]
    MultipleSamples { id: String, matches: Vec<String> },
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("snapshot parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What the case logic needs from the LIMS. Calls are blocking and are
/// issued one at a time.
pub trait Lims {
    fn fetch_case_samples(
        &self,
        customer: &str,
        family_id: &str,
    ) -> Result<Vec<LimsSample>, LimsError>;

    fn fetch_sample(&self, id_or_name: &str) -> Result<LimsSample, LimsError>;

    /// Records come back in processing order, oldest first.
    fn fetch_process_history(
        &self,
        sample_id: &str,
        process_type: &str,
    ) -> Result<Vec<ProcessRecord>, LimsError>;

    fn update_sample_attribute(
        &mut self,
        sample_id: &str,
        key: &str,
        value: &str,
    ) -> Result<(), LimsError>;
}

/// Drop samples that are cancelled, tumour or excluded from analysis.
pub fn relevant_samples(samples: Vec<LimsSample>) -> impl Iterator<Item = LimsSample> {
    samples.into_iter().filter(|sample| {
        !sample.is_flagged(udf::CANCELLED)
            && !sample.is_flagged(udf::TUMOR)
            && !sample.is_flagged(udf::EXCLUDE_ANALYSIS)
    })
}

/// Old and new value of one attribute update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    pub sample: String,
    pub key: String,
    pub old: Option<String>,
    pub new: String,
}

impl AttributeChange {
    pub fn is_noop(&self) -> bool {
        self.old.as_deref() == Some(self.new.as_str())
    }
}

/// Look a sample up by id, clinical id or name and set one attribute on it.
pub fn update_attribute<L: Lims + ?Sized>(
    lims: &mut L,
    id_or_name: &str,
    key: &str,
    value: &str,
) -> Result<AttributeChange, LimsError> {
    let sample = lims.fetch_sample(id_or_name)?;
    let change = AttributeChange {
        sample: sample.id.clone(),
        key: key.to_string(),
        old: sample.udf(key),
        new: value.to_string(),
    };
    if change.is_noop() {
        debug!(sample = %change.sample, key, "attribute already set");
    } else {
        lims.update_sample_attribute(&sample.id, key, value)?;
        info!(
            sample = %change.sample,
            key,
            old = change.old.as_deref().unwrap_or("N/A"),
            new = value,
            "updated sample attribute"
        );
    }
    Ok(change)
}

#[cfg(test)]
#[path = "../../tests/src_inline/lims/mod.rs"]
mod tests;
