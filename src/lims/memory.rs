use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::lims::sample::{LimsSample, ProcessRecord, UdfValue};
use crate::lims::{Lims, LimsError, udf};

/// Offline dump of LIMS samples and their lab-process history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub samples: Vec<LimsSample>,
    #[serde(default)]
    pub processes: Vec<ProcessRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryLims {
    snapshot: Snapshot,
    path: Option<PathBuf>,
    dirty: bool,
}

impl MemoryLims {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            path: None,
            dirty: false,
        }
    }

    pub fn open(path: &Path) -> Result<Self, LimsError> {
        let text = std::fs::read_to_string(path).map_err(|source| LimsError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        let snapshot: Snapshot = serde_json::from_str(&text)?;
        debug!(
            path = %path.display(),
            samples = snapshot.samples.len(),
            processes = snapshot.processes.len(),
            "loaded lims snapshot"
        );
        Ok(Self {
            snapshot,
            path: Some(path.to_path_buf()),
            dirty: false,
        })
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write pending attribute updates back to the snapshot file.
    /// Returns whether anything was written.
    pub fn save(&mut self) -> Result<bool, LimsError> {
        let Some(path) = self.path.as_ref() else {
            return Ok(false);
        };
        if !self.dirty {
            return Ok(false);
        }
        let json = serde_json::to_string_pretty(&self.snapshot)?;
        std::fs::write(path, json).map_err(|source| LimsError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        info!(path = %path.display(), "saved lims snapshot");
        self.dirty = false;
        Ok(true)
    }

    fn find_unique<'a>(
        &'a self,
        id: &str,
        matches: impl Iterator<Item = &'a LimsSample>,
    ) -> Result<Option<&'a LimsSample>, LimsError> {
        let found: Vec<&LimsSample> = matches.collect();
        match found.len() {
            0 => Ok(None),
            1 => Ok(Some(found[0])),
            _ => Err(LimsError::MultipleSamples {
                id: id.to_string(),
                matches: found.iter().map(|s| s.id.clone()).collect(),
            }),
        }
    }
}

impl Lims for MemoryLims {
    fn fetch_case_samples(
        &self,
        customer: &str,
        family_id: &str,
    ) -> Result<Vec<LimsSample>, LimsError> {
        Ok(self
            .snapshot
            .samples
            .iter()
            .filter(|s| {
                s.udf(udf::CUSTOMER).as_deref() == Some(customer)
                    && s.udf(udf::FAMILY_ID).as_deref() == Some(family_id)
            })
            .cloned()
            .collect())
    }

    fn fetch_sample(&self, id_or_name: &str) -> Result<LimsSample, LimsError> {
        if let Some(sample) = self.snapshot.samples.iter().find(|s| s.id == id_or_name) {
            return Ok(sample.clone());
        }
        let by_clinical_id = self.snapshot.samples.iter().filter(|s| {
            s.udf(udf::CLINICAL_ID).as_deref() == Some(id_or_name)
        });
        if let Some(sample) = self.find_unique(id_or_name, by_clinical_id)? {
            return Ok(sample.clone());
        }
        let by_name = self
            .snapshot
            .samples
            .iter()
            .filter(|s| s.name == id_or_name);
        self.find_unique(id_or_name, by_name)?
            .cloned()
            .ok_or_else(|| LimsError::SampleNotFound(id_or_name.to_string()))
    }

    fn fetch_process_history(
        &self,
        sample_id: &str,
        process_type: &str,
    ) -> Result<Vec<ProcessRecord>, LimsError> {
        Ok(self
            .snapshot
            .processes
            .iter()
            .filter(|p| p.sample == sample_id && p.process_type == process_type)
            .cloned()
            .collect())
    }

    fn update_sample_attribute(
        &mut self,
        sample_id: &str,
        key: &str,
        value: &str,
    ) -> Result<(), LimsError> {
        let sample = self
            .snapshot
            .samples
            .iter_mut()
            .find(|s| s.id == sample_id)
            .ok_or_else(|| LimsError::SampleNotFound(sample_id.to_string()))?;
        let new_value = UdfValue::from(value);
        if sample.udf.get(key) != Some(&new_value) {
            sample.udf.insert(key.to_string(), new_value);
            self.dirty = true;
        }
        Ok(())
    }
}
