use serde::{Serialize, Serializer};

use crate::apptag::SequencingType;
use crate::model::record::NO_PARENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

impl Sex {
    pub fn from_code(code: &str) -> Option<Sex> {
        match code {
            "M" => Some(Sex::Male),
            "F" => Some(Sex::Female),
            "Unknown" | "unknown" => Some(Sex::Unknown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-sample analysis facts. Parent references hold external sample names
/// until the case assembler internalizes them into sample ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleData {
    pub sample_id: String,
    pub sample_name: String,
    pub sex: Sex,
    pub phenotype: String,
    pub analysis_type: SequencingType,
    pub expected_coverage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_kit: Option<String>,
    #[serde(serialize_with = "parent_or_zero")]
    pub mother: Option<String>,
    #[serde(serialize_with = "parent_or_zero")]
    pub father: Option<String>,
    #[serde(skip)]
    pub sequencing_type: SequencingType,
    #[serde(skip)]
    pub gene_panels: Vec<String>,
}

fn parent_or_zero<S: Serializer>(parent: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(parent.as_deref().unwrap_or(NO_PARENT))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseConfig {
    pub owner: String,
    pub family: String,
    pub default_gene_panels: Vec<String>,
    pub gene_panels: Vec<String>,
    pub samples: Vec<SampleData>,
}
