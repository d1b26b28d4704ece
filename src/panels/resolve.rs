use std::collections::BTreeSet;

use tracing::debug;

use crate::panels::defs::PanelRules;

/// Expand the panels a customer asked for into the panels to order.
///
/// Collaborators asking only for master-list panels get the whole master
/// list. Everyone else gets their request plus combo expansions. The
/// baseline panel is always added and the result is sorted.
pub fn convert_panels<S: AsRef<str>>(
    rules: &PanelRules,
    customer: &str,
    default_panels: &[S],
) -> Vec<String> {
    // An empty request never counts as "all from the master list".
    if rules.is_collaborator(customer)
        && !default_panels.is_empty()
        && default_panels
            .iter()
            .all(|panel| rules.in_master_list(panel.as_ref()))
    {
        debug!(customer, "collaborator ordering master list panels");
        let mut all_panels: BTreeSet<String> = rules.master_list.iter().cloned().collect();
        all_panels.insert(rules.baseline.clone());
        return all_panels.into_iter().collect();
    }

    let mut all_panels: BTreeSet<String> = default_panels
        .iter()
        .map(|panel| panel.as_ref().to_string())
        .collect();
    for panel in default_panels {
        all_panels.extend(rules.combo(panel.as_ref()).map(str::to_string));
    }
    all_panels.insert(rules.baseline.clone());

    all_panels.into_iter().collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/panels/resolve.rs"]
mod tests;
