use std::sync::Arc;

use thiserror::Error;

use crate::apptag::{ApplicationTag, Categories, TagError};
use crate::lims::{LimsSample, udf};
use crate::model::sample_data::Sex;

pub const NO_PARENT: &str = "0";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{sample}: missing required attribute '{attribute}'")]
    MissingRequiredAttribute {
        sample: String,
        attribute: &'static str,
    },
    #[error("{sample}: unrecognized sex code '{code}'")]
    UnrecognizedSex { sample: String, code: String },
    #[error("{sample}: {source}")]
    Tag { sample: String, source: TagError },
}

/// Typed view over the attributes the case logic reads from a LIMS sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    pub lims_id: String,
    pub name: String,
    pub sample_id: String,
    pub customer: String,
    pub family_id: String,
    pub sex: Sex,
    pub status: String,
    pub application_tag: ApplicationTag,
    pub mother: Option<String>,
    pub father: Option<String>,
    pub gene_list: Option<String>,
    pub additional_gene_list: Option<String>,
    pub capture_kit: Option<String>,
    pub tissue_type: Option<String>,
}

impl SampleRecord {
    pub fn from_lims(sample: &LimsSample, categories: &Arc<Categories>) -> Result<Self, ModelError> {
        let required = |attribute: &'static str| {
            sample
                .udf_nonempty(attribute)
                .ok_or_else(|| ModelError::MissingRequiredAttribute {
                    sample: sample.id.clone(),
                    attribute,
                })
        };

        let customer = required(udf::CUSTOMER)?;
        let family_id = required(udf::FAMILY_ID)?;
        let sex_code = required(udf::SEX)?;
        let status = required(udf::STATUS)?;
        let raw_tag = required(udf::APPLICATION_TAG)?;

        let sex = Sex::from_code(&sex_code).ok_or_else(|| ModelError::UnrecognizedSex {
            sample: sample.id.clone(),
            code: sex_code.clone(),
        })?;
        let application_tag =
            ApplicationTag::parse_with(&raw_tag, categories).map_err(|source| ModelError::Tag {
                sample: sample.id.clone(),
                source,
            })?;

        Ok(Self {
            lims_id: sample.id.clone(),
            name: sample.name.clone(),
            sample_id: sample.sample_id(),
            customer,
            family_id,
            sex,
            status,
            application_tag,
            mother: parent_ref(sample, udf::MOTHER),
            father: parent_ref(sample, udf::FATHER),
            gene_list: sample.udf_nonempty(udf::GENE_LIST),
            additional_gene_list: sample
                .udf_nonempty(udf::ADDITIONAL_GENE_LIST)
                .map(|panel| panel.trim().to_string())
                .filter(|panel| !panel.is_empty()),
            capture_kit: sample.udf_nonempty(udf::CAPTURE_KIT),
            tissue_type: sample.udf_nonempty(udf::TISSUE_TYPE),
        })
    }

    pub fn phenotype(&self) -> String {
        self.status.to_lowercase()
    }

    pub fn case_id(&self) -> String {
        format!("{}-{}", self.customer, self.family_id)
    }
}

fn parent_ref(sample: &LimsSample, key: &str) -> Option<String> {
    sample
        .udf_nonempty(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty() && value != NO_PARENT)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/record.rs"]
mod tests;
