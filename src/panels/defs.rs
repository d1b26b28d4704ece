use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const BASELINE_PANEL: &str = "OMIM-AUTO";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelRules {
    #[serde(default = "default_baseline")]
    pub baseline: String,
    #[serde(default)]
    pub collaborators: Vec<String>,
    #[serde(default)]
    pub master_list: Vec<String>,
    #[serde(default)]
    pub combos: BTreeMap<String, Vec<String>>,
}

fn default_baseline() -> String {
    BASELINE_PANEL.to_string()
}

impl PanelRules {
    pub fn is_collaborator(&self, customer: &str) -> bool {
        self.collaborators.iter().any(|c| c == customer)
    }

    pub fn in_master_list(&self, panel: &str) -> bool {
        self.master_list.iter().any(|p| p == panel)
    }

    pub fn combo(&self, panel: &str) -> impl Iterator<Item = &str> {
        self.combos
            .get(panel)
            .into_iter()
            .flat_map(|panels| panels.iter().map(|p| p.as_str()))
    }
}

impl Default for PanelRules {
    fn default() -> Self {
        let combos = [
            ("ATX", &["ATX", "SPG", "Ataxi", "LARGE", "AD-HSP"][..]),
            ("DSD", &["DSD", "HYP", "SEXDIF", "SEXDET"][..]),
            ("CM", &["CNM", "CM"][..]),
            ("Horsel", &["Horsel", "141217", "141201"][..]),
            (
                "NMD",
                &[
                    "HMSN", "MM", "OM", "CMD", "ACM", "HP", "OND", "MS", "HCM", "NMD", "MD", "CM",
                    "IC", "MND", "NM", "CMS", "DM", "CRD", "HA",
                ][..],
            ),
        ];
        Self {
            baseline: default_baseline(),
            collaborators: strings(&["cust000", "cust002", "cust003", "cust004"]),
            master_list: strings(&[
                "ENDO",
                "EP",
                "IEM",
                "IBMFS",
                "mtDNA",
                "MIT",
                "OMIM",
                "PIDCAD",
                "PID",
                "SKD",
            ]),
            combos: combos
                .into_iter()
                .map(|(key, panels)| (key.to_string(), strings(panels)))
                .collect(),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
