pub mod categories;

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use thiserror::Error;

pub use categories::{ApplicationClass, Categories};

pub const MIN_TAG_LEN: usize = 10;

// One HiSeq X lane, of which at least 75% is expected to pass, gives 30x.
pub const READS_PER_LANE: f64 = 650_000_000.0;
pub const MIN_YIELD_FRACTION: f64 = 0.75;
pub const LANE_COVERAGE: f64 = 30.0;
pub const READS_PER_1X: f64 = READS_PER_LANE / MIN_YIELD_FRACTION / LANE_COVERAGE;

pub const EXPECTED_READS_FRACTION: f64 = 0.75;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("malformed application tag {tag:?}: {reason}")]
    MalformedApplicationTag { tag: String, reason: &'static str },
    #[error("unknown sequencing type for application tag {0}")]
    UnknownSequencingType(String),
    #[error("invalid read type code '{code}' in application tag {tag}: {reason}")]
    InvalidReadTypeCode {
        tag: String,
        code: char,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequencingType {
    Wgs,
    Wes,
    Tga,
}

impl SequencingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SequencingType::Wgs => "wgs",
            SequencingType::Wes => "wes",
            SequencingType::Tga => "tga",
        }
    }
}

impl fmt::Display for SequencingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pipeline {
    Mip,
    Mwgs,
}

impl Pipeline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pipeline::Mip => "mip",
            Pipeline::Mwgs => "mwgs",
        }
    }
}

/// Last four characters of a tag: a type letter and a three digit amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTarget {
    pub code: char,
    pub number: u32,
}

/// Immutable application tag such as `WGSPCFC030`.
///
/// Layout: application (3) + library prep (3) + read target (4). All
/// accessors are pure functions of the raw string and the category tables
/// the tag was decoded with.
#[derive(Clone)]
pub struct ApplicationTag {
    raw: String,
    categories: Arc<Categories>,
}

impl ApplicationTag {
    pub fn parse(raw: &str) -> Result<Self, TagError> {
        Self::parse_with(raw, &Categories::shared())
    }

    pub fn parse_with(raw: &str, categories: &Arc<Categories>) -> Result<Self, TagError> {
        let malformed = |reason| TagError::MalformedApplicationTag {
            tag: raw.to_string(),
            reason,
        };
        if !raw.is_ascii() {
            return Err(malformed("non-ascii characters"));
        }
        if raw.len() < MIN_TAG_LEN {
            return Err(malformed("shorter than 10 characters"));
        }
        if !raw[raw.len() - 3..].bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("read target is not numeric"));
        }
        Ok(Self {
            raw: raw.to_string(),
            categories: Arc::clone(categories),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn application(&self) -> &str {
        &self.raw[..3]
    }

    pub fn library_prep(&self) -> &str {
        &self.raw[3..6]
    }

    pub fn read_target(&self) -> ReadTarget {
        let tail = &self.raw[self.raw.len() - 4..];
        let code = tail.as_bytes()[0] as char;
        let number = tail[1..]
            .bytes()
            .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
        ReadTarget { code, number }
    }

    pub fn is_human(&self) -> bool {
        self.categories.is_human(self.application())
    }

    pub fn is_panel(&self) -> bool {
        self.categories.panel.contains(self.application())
    }

    pub fn is_microbial(&self) -> bool {
        self.categories.microbial.contains(self.application())
    }

    pub fn is_rna(&self) -> bool {
        self.categories.rna.contains(self.application())
    }

    pub fn is_analysis_only(&self) -> bool {
        self.categories.analysis_only.contains(self.application())
    }

    pub fn is_external(&self) -> bool {
        self.application().ends_with('X')
    }

    pub fn application_class(&self) -> Option<ApplicationClass> {
        self.categories.classify(self.application())
    }

    pub fn sequencing_type(&self) -> Result<SequencingType, TagError> {
        let application = self.application();
        if self.categories.whole_genome.contains(application) {
            Ok(SequencingType::Wgs)
        } else if self.categories.targeted.contains(application) {
            Ok(SequencingType::Tga)
        } else if self.categories.panel.contains(application) {
            Ok(SequencingType::Wes)
        } else {
            Err(TagError::UnknownSequencingType(self.raw.clone()))
        }
    }

    /// MIP has no targeted mode, so `tga` runs as `wes`.
    pub fn sequencing_type_mip(&self) -> Result<SequencingType, TagError> {
        match self.sequencing_type()? {
            SequencingType::Tga => Ok(SequencingType::Wes),
            other => Ok(other),
        }
    }

    pub fn category(&self) -> Result<String, TagError> {
        let sequencing_type = self.sequencing_type()?;
        if self.is_external() {
            Ok(format!("{sequencing_type}-ext"))
        } else {
            Ok(sequencing_type.to_string())
        }
    }

    pub fn reads(&self) -> Result<u64, TagError> {
        let target = self.read_target();
        let number = u64::from(target.number);
        match target.code {
            'R' => Ok(number * 1_000_000),
            'K' => Ok(number * 1_000),
            'C' if self.is_panel() => Err(self.invalid_read_type(
                target.code,
                "coverage can't be converted to reads for panels",
            )),
            'C' => Ok((number as f64 * READS_PER_1X).round() as u64),
            other => Err(self.invalid_read_type(other, "expected one of R, K, C")),
        }
    }

    pub fn expected_reads(&self) -> Result<u64, TagError> {
        Ok((self.reads()? as f64 * EXPECTED_READS_FRACTION) as u64)
    }

    pub fn pipeline(&self, tissue_type: Option<&str>) -> Option<Pipeline> {
        if tissue_type != Some("tumour") && self.is_human() {
            return Some(Pipeline::Mip);
        }
        if self.is_microbial() {
            return Some(Pipeline::Mwgs);
        }
        None
    }

    pub(crate) fn invalid_read_type(&self, code: char, reason: &'static str) -> TagError {
        TagError::InvalidReadTypeCode {
            tag: self.raw.clone(),
            code,
            reason,
        }
    }
}

impl PartialEq for ApplicationTag {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for ApplicationTag {}

impl fmt::Debug for ApplicationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApplicationTag").field(&self.raw).finish()
    }
}

impl fmt::Display for ApplicationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for ApplicationTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/apptag/mod.rs"]
mod tests;
