use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::apptag::{Categories, Pipeline, SequencingType};
use crate::lims::{LimsSample, UdfValue, udf};
use crate::model::record::{ModelError, SampleRecord};
use crate::model::sample_data::Sex;

pub const INTERNAL_CUSTOMER: &str = "cust000";

/// Flattened report of one sample for the `sample` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSummary {
    pub id: String,
    pub sample_id: String,
    pub name: String,
    pub case_id: String,
    pub sex: Sex,
    pub application_tag: String,
    pub reads: Option<u64>,
    pub expected_reads: Option<u64>,
    pub is_human: bool,
    pub is_external: bool,
    pub sequencing_type: Option<SequencingType>,
    pub pipeline: Option<Pipeline>,
    pub is_production: bool,
    pub panels: Option<Vec<String>>,
    pub udf: BTreeMap<String, UdfValue>,
}

pub fn summarize(
    sample: &LimsSample,
    categories: &Arc<Categories>,
) -> Result<SampleSummary, ModelError> {
    let record = SampleRecord::from_lims(sample, categories)?;
    let tag = &record.application_tag;
    // RML and other non-analysis tags have no sequencing type; report them as absent.
    Ok(SampleSummary {
        id: record.lims_id.clone(),
        sample_id: record.sample_id.clone(),
        name: record.name.clone(),
        case_id: record.case_id(),
        sex: record.sex,
        application_tag: tag.to_string(),
        reads: tag.reads().ok(),
        expected_reads: tag.expected_reads().ok(),
        is_human: tag.is_human(),
        is_external: tag.is_external(),
        sequencing_type: tag.sequencing_type().ok(),
        pipeline: tag.pipeline(record.tissue_type.as_deref()),
        is_production: record.customer != INTERNAL_CUSTOMER,
        panels: sample
            .udf_nonempty(udf::GENE_LIST)
            .map(|list| list.split(';').map(|p| p.trim().to_string()).collect()),
        udf: sample.udf.clone(),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/summary.rs"]
mod tests;
