use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::apptag::{ApplicationTag, Categories};
use crate::lims::{Lims, LimsError, LimsSample, ProcessRecord, udf};
use crate::model::Sex;

// Lab process types that carry reportable facts, in the order they are applied.
pub const CAPTURE_PROCESS: &str = "33";
pub const PCR_FREE_PREP_PROCESS: &str = "667";
pub const SEQUENCING_PROCESS: &str = "663";
pub const SEQUENCING_FINISH_PROCESS: &str = "670";
pub const DELIVERY_PROCESS: &str = "159";

pub const REFERENCE_GENOME: &str = "Reference Genome";
pub const DATA_ANALYSIS: &str = "Data Analysis";
pub const PRIORITY: &str = "priority";
pub const APPTAG_VERSION: &str = "Application Tag Version";

const DEFAULT_PRIORITY: &str = "standard";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{sample}: missing required attribute '{attribute}'")]
    MissingRequiredAttribute {
        sample: String,
        attribute: &'static str,
    },
    #[error("{sample}: attribute '{attribute}' has invalid value '{value}'")]
    InvalidAttribute {
        sample: String,
        attribute: &'static str,
        value: String,
    },
    #[error("{sample}: process {process} lacks '{attribute}'")]
    MissingProcessAttribute {
        sample: String,
        process: &'static str,
        attribute: &'static str,
    },
    #[error("conflicting {field} values in case: [{}]", values.join(", "))]
    ConflictingFamily {
        field: &'static str,
        values: Vec<String>,
    },
    #[error("no samples found for {customer}-{family_id}")]
    EmptyCase { customer: String, family_id: String },
    #[error("lims error: {0}")]
    Lims(#[from] LimsError),
}

/// Case report: family level facts plus what each sample went through in the lab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseExport {
    pub customer: String,
    pub family_id: String,
    pub case_id: String,
    pub gene_panels: Vec<String>,
    pub reference_genome: Option<String>,
    pub samples: Vec<SampleExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleExport {
    pub id: String,
    pub name: String,
    pub status: String,
    pub sex: Option<Sex>,
    pub app_tag: String,
    pub app_tag_version: u32,
    pub category: Option<String>,
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<String>,
    pub capture_kit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_prep_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_prep_lotno: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequencing_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flowcell: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequencing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_method: Option<String>,
}

/// Accepts `cust003-17010` as well as separate customer and family arguments.
pub fn split_case_id<'a>(
    customer_or_case: &'a str,
    family_id: Option<&'a str>,
) -> Option<(&'a str, &'a str)> {
    match family_id {
        Some(family_id) => Some((customer_or_case, family_id)),
        None => customer_or_case.split_once('-'),
    }
}

/// Fetch every sample of a family, cancelled ones included, and export it.
pub fn export_family<L: Lims + ?Sized>(
    lims: &L,
    categories: &Arc<Categories>,
    customer: &str,
    family_id: &str,
) -> Result<CaseExport, ExportError> {
    let samples = lims.fetch_case_samples(customer, family_id)?;
    if samples.is_empty() {
        return Err(ExportError::EmptyCase {
            customer: customer.to_string(),
            family_id: family_id.to_string(),
        });
    }
    debug!(customer, family_id, samples = samples.len(), "exporting case");
    export_case(lims, categories, &samples)
}

pub fn export_case<L: Lims + ?Sized>(
    lims: &L,
    categories: &Arc<Categories>,
    samples: &[LimsSample],
) -> Result<CaseExport, ExportError> {
    let mut customers = BTreeSet::new();
    let mut families = BTreeSet::new();
    let mut genomes = BTreeSet::new();
    let mut gene_panels = BTreeSet::new();
    let mut exports = Vec::with_capacity(samples.len());

    for sample in samples {
        customers.insert(required(sample, udf::CUSTOMER)?);
        families.insert(required(sample, udf::FAMILY_ID)?);
        genomes.extend(sample.udf_nonempty(REFERENCE_GENOME));
        if let Some(list) = sample.udf_nonempty(udf::GENE_LIST) {
            gene_panels.extend(
                list.split(';')
                    .map(str::trim)
                    .filter(|panel| !panel.is_empty())
                    .map(str::to_string),
            );
        }
        exports.push(export_sample(lims, categories, sample)?);
    }

    let customer = single("customer", customers)?.unwrap_or_default();
    let family_id = single("family_id", families)?.unwrap_or_default();
    Ok(CaseExport {
        case_id: format!("{customer}-{family_id}"),
        customer,
        family_id,
        gene_panels: gene_panels.into_iter().collect(),
        reference_genome: single("reference_genome", genomes)?,
        samples: exports,
    })
}

pub fn export_sample<L: Lims + ?Sized>(
    lims: &L,
    categories: &Arc<Categories>,
    sample: &LimsSample,
) -> Result<SampleExport, ExportError> {
    let app_tag = required(sample, udf::APPLICATION_TAG)?;
    let category = match ApplicationTag::parse_with(&app_tag, categories) {
        Ok(tag) => tag.category().ok(),
        Err(err) => {
            warn!(sample = %sample.id, error = %err, "application tag not decodable");
            None
        }
    };
    let app_tag_version = match sample.udf_nonempty(APPTAG_VERSION) {
        Some(value) => value.parse().map_err(|_| ExportError::InvalidAttribute {
            sample: sample.id.clone(),
            attribute: APPTAG_VERSION,
            value,
        })?,
        None => 1,
    };

    let mut data = SampleExport {
        id: sample.id.clone(),
        name: sample.name.clone(),
        status: required(sample, udf::STATUS)?.to_lowercase(),
        sex: sample.udf(udf::SEX).and_then(|code| Sex::from_code(&code)),
        app_tag,
        app_tag_version,
        category,
        priority: sample
            .udf_nonempty(PRIORITY)
            .unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
        delivery: sample.udf_nonempty(DATA_ANALYSIS),
        capture_kit: sample
            .udf_nonempty(udf::CAPTURE_KIT)
            .filter(|kit| kit != udf::NOT_AVAILABLE),
        library_prep_method: None,
        library_prep_lotno: None,
        sequencing_method: None,
        flowcell: None,
        sequencing_date: None,
        delivery_date: None,
        delivery_method: None,
    };

    for process in lims.fetch_process_history(&sample.id, CAPTURE_PROCESS)? {
        let step = Step::new(sample, CAPTURE_PROCESS, &process);
        data.capture_kit = Some(step.get("Capture Library version")?);
        data.library_prep_method = Some(step.get("Method document and version no:")?);
        data.library_prep_lotno = Some(step.get("Lot no: Capture library")?);
    }
    for process in lims.fetch_process_history(&sample.id, PCR_FREE_PREP_PROCESS)? {
        let step = Step::new(sample, PCR_FREE_PREP_PROCESS, &process);
        data.library_prep_method = Some(step.method("Method document", "Method document version")?);
    }
    for process in lims.fetch_process_history(&sample.id, SEQUENCING_PROCESS)? {
        let step = Step::new(sample, SEQUENCING_PROCESS, &process);
        data.sequencing_method = Some(step.method("Method", "Version")?);
        data.flowcell = Some(step.get("Experiment Name")?);
    }
    for process in lims.fetch_process_history(&sample.id, SEQUENCING_FINISH_PROCESS)? {
        match process.udf("Finish Date") {
            Some(date) => data.sequencing_date = Some(date),
            None => warn!(sample = %sample.id, "sequencing date not found in LIMS"),
        }
    }
    for process in lims.fetch_process_history(&sample.id, DELIVERY_PROCESS)? {
        let step = Step::new(sample, DELIVERY_PROCESS, &process);
        data.delivery_date = Some(step.get("Date delivered")?);
        data.delivery_method = Some(step.method("Method Document", "Method Version")?);
    }
    Ok(data)
}

struct Step<'a> {
    sample: &'a LimsSample,
    process_type: &'static str,
    record: &'a ProcessRecord,
}

impl<'a> Step<'a> {
    fn new(sample: &'a LimsSample, process_type: &'static str, record: &'a ProcessRecord) -> Self {
        Self {
            sample,
            process_type,
            record,
        }
    }

    fn get(&self, attribute: &'static str) -> Result<String, ExportError> {
        self.record
            .udf(attribute)
            .ok_or_else(|| ExportError::MissingProcessAttribute {
                sample: self.sample.id.clone(),
                process: self.process_type,
                attribute,
            })
    }

    /// Method documents are reported as `number:version`.
    fn method(&self, number: &'static str, version: &'static str) -> Result<String, ExportError> {
        Ok(format!("{}:{}", self.get(number)?, self.get(version)?))
    }
}

fn required(sample: &LimsSample, attribute: &'static str) -> Result<String, ExportError> {
    sample
        .udf_nonempty(attribute)
        .ok_or_else(|| ExportError::MissingRequiredAttribute {
            sample: sample.id.clone(),
            attribute,
        })
}

fn single(field: &'static str, found: BTreeSet<String>) -> Result<Option<String>, ExportError> {
    if found.len() > 1 {
        return Err(ExportError::ConflictingFamily {
            field,
            values: found.into_iter().collect(),
        });
    }
    Ok(found.into_iter().next())
}

#[cfg(test)]
#[path = "../../tests/src_inline/export/mod.rs"]
mod tests;
