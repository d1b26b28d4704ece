pub mod gather;
pub mod relations;

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::apptag::SequencingType;
use crate::capture::{CaptureError, resolve_capture_kit};
use crate::lims::{Lims, LimsError, LimsSample, relevant_samples};
use crate::model::{CaseConfig, ModelError, SampleData, SampleRecord, Sex};
use crate::panels::convert_panels;
use crate::rules::Rules;

pub use gather::{expected_coverage, gene_panels};
pub use relations::{check_relations, internalize_ids};

pub const UNKNOWN_PHENOTYPE: &str = "unknown";
pub const UNAFFECTED_PHENOTYPE: &str = "unaffected";

#[derive(Debug, Error)]
pub enum CaseError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error("lims error: {0}")]
    Lims(#[from] LimsError),
    #[error("{sample}: {relation} '{reference}' is not part of the case")]
    DanglingParentReference {
        sample: String,
        relation: &'static str,
        reference: String,
    },
    #[error("{sample}: {relation} {parent} has sex {sex}")]
    ParentSexMismatch {
        sample: String,
        relation: &'static str,
        parent: String,
        sex: Sex,
    },
    #[error("conflicting {field} values in case: [{}]", values.join(", "))]
    ConflictingCaseIdentity {
        field: &'static str,
        values: Vec<String>,
    },
    #[error("sample name used twice in case: {0}")]
    DuplicateSampleName(String),
    #[error("no samples to analyse for {customer}-{family_id}")]
    EmptyCase { customer: String, family_id: String },
}

/// Caller overrides for a case assembly run.
#[derive(Debug, Clone, Default)]
pub struct AssembleOptions {
    pub customer: Option<String>,
    pub family_id: Option<String>,
    pub gene_panels: Option<Vec<String>>,
    pub capture_kit: Option<String>,
    /// Skip the parent sex check. Nothing else is skippable.
    pub force: bool,
}

pub struct CaseAssembler<'a, L: Lims + ?Sized> {
    lims: &'a mut L,
    rules: &'a Rules,
}

impl<'a, L: Lims + ?Sized> CaseAssembler<'a, L> {
    pub fn new(lims: &'a mut L, rules: &'a Rules) -> Self {
        Self { lims, rules }
    }

    /// Fetch a family from the LIMS and assemble its analysis config.
    pub fn basic_config(
        &mut self,
        customer: &str,
        family_id: &str,
        options: &AssembleOptions,
    ) -> Result<CaseConfig, CaseError> {
        let samples: Vec<LimsSample> =
            relevant_samples(self.lims.fetch_case_samples(customer, family_id)?).collect();
        if samples.is_empty() {
            return Err(CaseError::EmptyCase {
                customer: customer.to_string(),
                family_id: family_id.to_string(),
            });
        }
        debug!(customer, family_id, samples = samples.len(), "fetched case");
        self.make_config(&samples, options)
    }

    /// Assemble a config from samples that were already filtered for analysis.
    pub fn make_config(
        &mut self,
        samples: &[LimsSample],
        options: &AssembleOptions,
    ) -> Result<CaseConfig, CaseError> {
        let mut samples_data = Vec::with_capacity(samples.len());
        let mut customers = BTreeSet::new();
        let mut families = BTreeSet::new();
        let mut all_panels = BTreeSet::new();

        for sample in samples {
            let (record, data) = self.gather_sample(sample, options)?;
            customers.insert(record.customer);
            families.insert(record.family_id);
            all_panels.extend(data.gene_panels.iter().cloned());
            samples_data.push(data);
        }

        internalize_ids(&mut samples_data)?;
        if options.force {
            warn!("skipping parent sex checks");
        } else {
            check_relations(&samples_data)?;
        }

        if let [only] = samples_data.as_mut_slice()
            && only.phenotype == UNKNOWN_PHENOTYPE
        {
            info!(sample = %only.sample_id, "setting 'unknown' phenotype to 'unaffected'");
            only.phenotype = UNAFFECTED_PHENOTYPE.to_string();
        }

        let owner = single_value("customer", options.customer.as_deref(), customers)?;
        let family = single_value("family", options.family_id.as_deref(), families)?;

        let default_gene_panels = match &options.gene_panels {
            Some(panels) => panels.clone(),
            None => all_panels.into_iter().collect(),
        };
        let gene_panels = convert_panels(&self.rules.panels, &owner, &default_gene_panels);

        Ok(CaseConfig {
            owner,
            family,
            default_gene_panels,
            gene_panels,
            samples: samples_data,
        })
    }

    fn gather_sample(
        &mut self,
        sample: &LimsSample,
        options: &AssembleOptions,
    ) -> Result<(SampleRecord, SampleData), CaseError> {
        let record = SampleRecord::from_lims(sample, &self.rules.categories)?;
        let tag_error = |source| ModelError::Tag {
            sample: sample.id.clone(),
            source,
        };
        let tag = &record.application_tag;
        let sequencing_type = tag.sequencing_type().map_err(tag_error)?;
        let analysis_type = tag.sequencing_type_mip().map_err(tag_error)?;
        let expected_coverage = expected_coverage(tag).map_err(tag_error)?;

        let capture_kit = match analysis_type {
            SequencingType::Wes => match &options.capture_kit {
                Some(kit) => kit.clone(),
                None => resolve_capture_kit(&*self.lims, &self.rules.capture_kits, sample)?,
            },
            _ => self.rules.capture_kits.default_kit.clone(),
        };
        let gene_panels = gene_panels(&mut *self.lims, &record)?;

        let data = SampleData {
            sample_id: record.sample_id.clone(),
            sample_name: record.name.clone(),
            sex: record.sex,
            phenotype: record.phenotype(),
            analysis_type,
            expected_coverage,
            capture_kit: Some(capture_kit),
            mother: record.mother.clone(),
            father: record.father.clone(),
            sequencing_type,
            gene_panels,
        };
        Ok((record, data))
    }
}

fn single_value(
    field: &'static str,
    requested: Option<&str>,
    found: BTreeSet<String>,
) -> Result<String, CaseError> {
    if let Some(value) = requested {
        return Ok(value.to_string());
    }
    if found.len() != 1 {
        return Err(CaseError::ConflictingCaseIdentity {
            field,
            values: found.into_iter().collect(),
        });
    }
    Ok(found.into_iter().next().unwrap_or_default())
}

#[cfg(test)]
#[path = "../../tests/src_inline/case/mod.rs"]
mod tests;
