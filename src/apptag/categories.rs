use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

static SHARED: LazyLock<Arc<Categories>> = LazyLock::new(|| Arc::new(Categories::default()));

/// Application-code tables keyed on the first three characters of a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categories {
    pub panel: BTreeSet<String>,
    pub whole_genome: BTreeSet<String>,
    #[serde(default)]
    pub analysis_only: BTreeSet<String>,
    #[serde(default)]
    pub microbial: BTreeSet<String>,
    #[serde(default)]
    pub rna: BTreeSet<String>,
    #[serde(default)]
    pub targeted: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationClass {
    Microbial,
    Rna,
    AnalysisOnly,
    Panel,
    WholeGenome,
}

impl ApplicationClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationClass::Microbial => "microbial",
            ApplicationClass::Rna => "rna",
            ApplicationClass::AnalysisOnly => "analysis_only",
            ApplicationClass::Panel => "panel",
            ApplicationClass::WholeGenome => "whole_genome",
        }
    }
}

impl Categories {
    pub fn shared() -> Arc<Categories> {
        Arc::clone(&SHARED)
    }

    pub fn is_human(&self, application: &str) -> bool {
        let human = self.panel.contains(application)
            || self.whole_genome.contains(application)
            || self.analysis_only.contains(application);
        human && !self.microbial.contains(application) && !self.rna.contains(application)
    }

    pub fn classify(&self, application: &str) -> Option<ApplicationClass> {
        if self.microbial.contains(application) {
            Some(ApplicationClass::Microbial)
        } else if self.rna.contains(application) {
            Some(ApplicationClass::Rna)
        } else if self.analysis_only.contains(application) {
            Some(ApplicationClass::AnalysisOnly)
        } else if self.panel.contains(application) {
            Some(ApplicationClass::Panel)
        } else if self.whole_genome.contains(application) {
            Some(ApplicationClass::WholeGenome)
        } else {
            None
        }
    }
}

impl Default for Categories {
    fn default() -> Self {
        Self {
            panel: codes(&["EXO", "EXT", "MHP", "EFT", "CCP", "EXX"]),
            whole_genome: codes(&[
                "WGS", "WGT", "WGL", "MWG", "MWL", "MWX", "MET", "MEL", "WGX",
            ]),
            analysis_only: codes(&["EXX", "WGX"]),
            microbial: codes(&["MWX", "MWG", "MWL"]),
            rna: codes(&["RNA", "RNL"]),
            targeted: codes(&["MHP", "EFT", "CCP"]),
        }
    }
}

fn codes(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}
