use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lims::udf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UdfValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl fmt::Display for UdfValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UdfValue::Text(value) => f.write_str(value),
            UdfValue::Number(value) => write!(f, "{value}"),
            UdfValue::Flag(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for UdfValue {
    fn from(value: &str) -> Self {
        UdfValue::Text(value.to_string())
    }
}

/// A sample as the LIMS hands it out: ids plus a flat attribute map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimsSample {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub udf: BTreeMap<String, UdfValue>,
}

impl LimsSample {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            udf: BTreeMap::new(),
        }
    }

    pub fn with_udf(mut self, key: &str, value: impl Into<UdfValue>) -> Self {
        self.udf.insert(key.to_string(), value.into());
        self
    }

    pub fn udf(&self, key: &str) -> Option<String> {
        self.udf.get(key).map(|value| value.to_string())
    }

    /// Empty strings count as unset, the way the LIMS web forms store them.
    pub fn udf_nonempty(&self, key: &str) -> Option<String> {
        self.udf(key).filter(|value| !value.is_empty())
    }

    pub fn is_flagged(&self, key: &str) -> bool {
        self.udf(key).as_deref() == Some(udf::YES)
    }

    pub fn sample_id(&self) -> String {
        self.udf_nonempty(udf::CLINICAL_ID)
            .unwrap_or_else(|| self.id.clone())
    }
}

/// One historical lab step a sample passed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub sample: String,
    pub process_type: String,
    #[serde(default)]
    pub udf: BTreeMap<String, UdfValue>,
}

impl ProcessRecord {
    pub fn udf(&self, key: &str) -> Option<String> {
        self.udf.get(key).map(|value| value.to_string())
    }
}
