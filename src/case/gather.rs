use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::apptag::{ApplicationTag, TagError};
use crate::lims::{Lims, udf};
use crate::model::SampleRecord;

// Share of the ordered depth the lab actually delivers.
pub const YIELD_FACTOR: f64 = 0.87;
// Millions of reads to coverage for the current exome chemistry.
pub const READS_TO_COVERAGE: f64 = 1.5;

pub fn expected_coverage(tag: &ApplicationTag) -> Result<f64, TagError> {
    let target = tag.read_target();
    let number = f64::from(target.number);
    match target.code {
        'C' => Ok(number * YIELD_FACTOR),
        'R' => Ok(number * READS_TO_COVERAGE * YIELD_FACTOR),
        other => Err(tag.invalid_read_type(other, "expected coverage needs a C or R target")),
    }
}

/// Panels listed on the sample plus its optional additional panel.
///
/// A gene list typed with ':' separators is fixed in the LIMS before use.
pub fn gene_panels<L: Lims + ?Sized>(
    lims: &mut L,
    record: &SampleRecord,
) -> Result<Vec<String>, crate::lims::LimsError> {
    let mut panels = BTreeSet::new();
    if let Some(list) = record.gene_list.as_deref() {
        let list = if list.contains(':') {
            let fixed = list.replace(':', ";");
            warn!(sample = %record.lims_id, gene_list = list, "wrong separator in gene list");
            lims.update_sample_attribute(&record.lims_id, udf::GENE_LIST, &fixed)?;
            info!(
                sample = %record.lims_id,
                from = list,
                to = %fixed,
                "updated gene list"
            );
            fixed
        } else {
            list.to_string()
        };
        panels.extend(
            list.split(';')
                .map(str::trim)
                .filter(|panel| !panel.is_empty())
                .map(str::to_string),
        );
    }
    if let Some(additional) = record.additional_gene_list.as_deref() {
        panels.insert(additional.to_string());
    }
    Ok(panels.into_iter().collect())
}

#[cfg(test)]
#[path = "../../tests/src_inline/case/gather.rs"]
mod tests;
