use std::io::Write;

use serde::Serialize;
use thiserror::Error;

use crate::model::{CaseConfig, NO_PARENT, SampleData, Sex};

pub const COLUMNS: [&str; 10] = [
    "Family ID",
    "Individual ID",
    "Paternal ID",
    "Maternal ID",
    "Sex",
    "Phenotype",
    "Clinical_db",
    "Capture_kit",
    "display_name",
    "Sequencing_type",
];

#[derive(Debug, Error)]
pub enum PedigreeError {
    #[error("{sample}: unrecognized phenotype '{phenotype}'")]
    UnrecognizedPhenotype { sample: String, phenotype: String },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phenotype {
    Affected,
    Unaffected,
    Unknown,
}

impl Phenotype {
    /// Strict: unlike the config, anything outside the three known words fails.
    pub fn parse(value: &str) -> Option<Phenotype> {
        match value {
            "affected" => Some(Phenotype::Affected),
            "unaffected" => Some(Phenotype::Unaffected),
            "unknown" => Some(Phenotype::Unknown),
            _ => None,
        }
    }

    pub fn ped_code(&self) -> &'static str {
        match self {
            Phenotype::Affected => "2",
            Phenotype::Unaffected => "1",
            Phenotype::Unknown => "0",
        }
    }
}

pub fn sex_code(sex: Sex) -> &'static str {
    match sex {
        Sex::Male => "1",
        Sex::Female => "2",
        Sex::Unknown => "0",
    }
}

/// One PED row; field order is the column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PedigreeRecord {
    pub family_id: String,
    pub individual_id: String,
    pub paternal_id: String,
    pub maternal_id: String,
    pub sex: &'static str,
    pub phenotype: &'static str,
    pub clinical_db: String,
    pub capture_kit: String,
    pub display_name: String,
    pub sequencing_type: String,
}

impl PedigreeRecord {
    pub fn from_sample(family_id: &str, sample: &SampleData) -> Result<Self, PedigreeError> {
        let phenotype = Phenotype::parse(&sample.phenotype).ok_or_else(|| {
            PedigreeError::UnrecognizedPhenotype {
                sample: sample.sample_id.clone(),
                phenotype: sample.phenotype.clone(),
            }
        })?;
        Ok(Self {
            family_id: family_id.to_string(),
            individual_id: sample.sample_id.clone(),
            paternal_id: sample.father.clone().unwrap_or_else(|| NO_PARENT.to_string()),
            maternal_id: sample.mother.clone().unwrap_or_else(|| NO_PARENT.to_string()),
            sex: sex_code(sample.sex),
            phenotype: phenotype.ped_code(),
            clinical_db: sample.gene_panels.join(";"),
            capture_kit: sample.capture_kit.clone().unwrap_or_default(),
            display_name: sample.sample_name.clone(),
            sequencing_type: sample.sequencing_type.to_string(),
        })
    }
}

pub fn pedigree_records(config: &CaseConfig) -> Result<Vec<PedigreeRecord>, PedigreeError> {
    config
        .samples
        .iter()
        .map(|sample| PedigreeRecord::from_sample(&config.family, sample))
        .collect()
}

/// Tab separated PED table; the header line starts with `#`.
pub fn write_pedigree<W: Write>(records: &[PedigreeRecord], out: W) -> Result<(), PedigreeError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    let header: Vec<String> = COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| if i == 0 { format!("#{column}") } else { column.to_string() })
        .collect();
    writer.write_record(&header)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn render_pedigree(config: &CaseConfig) -> Result<String, PedigreeError> {
    let records = pedigree_records(config)?;
    let mut buf = Vec::new();
    write_pedigree(&records, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pedigree/mod.rs"]
mod tests;
