use std::collections::HashMap;

use crate::case::CaseError;
use crate::model::{SampleData, Sex};

pub const MOTHER: &str = "mother";
pub const FATHER: &str = "father";

/// Rewrite mother/father references from external sample names to sample ids.
pub fn internalize_ids(samples: &mut [SampleData]) -> Result<(), CaseError> {
    let mut ids: HashMap<String, String> = HashMap::with_capacity(samples.len());
    for sample in samples.iter() {
        if ids
            .insert(sample.sample_name.clone(), sample.sample_id.clone())
            .is_some()
        {
            return Err(CaseError::DuplicateSampleName(sample.sample_name.clone()));
        }
    }

    for sample in samples.iter_mut() {
        resolve_parent(&ids, &sample.sample_id, MOTHER, &mut sample.mother)?;
        resolve_parent(&ids, &sample.sample_id, FATHER, &mut sample.father)?;
    }
    Ok(())
}

fn resolve_parent(
    ids: &HashMap<String, String>,
    sample_id: &str,
    relation: &'static str,
    parent: &mut Option<String>,
) -> Result<(), CaseError> {
    let Some(name) = parent.as_deref() else {
        return Ok(());
    };
    let internal = ids
        .get(name)
        .ok_or_else(|| CaseError::DanglingParentReference {
            sample: sample_id.to_string(),
            relation,
            reference: name.to_string(),
        })?;
    *parent = Some(internal.clone());
    Ok(())
}

/// Fathers must be male and mothers female. Expects internalized ids.
pub fn check_relations(samples: &[SampleData]) -> Result<(), CaseError> {
    let sexes: HashMap<&str, Sex> = samples
        .iter()
        .map(|s| (s.sample_id.as_str(), s.sex))
        .collect();

    for sample in samples {
        let parents = [
            (FATHER, sample.father.as_deref(), Sex::Male),
            (MOTHER, sample.mother.as_deref(), Sex::Female),
        ];
        for (relation, parent, expected) in parents {
            let Some(parent) = parent else {
                continue;
            };
            let sex = *sexes
                .get(parent)
                .ok_or_else(|| CaseError::DanglingParentReference {
                    sample: sample.sample_id.clone(),
                    relation,
                    reference: parent.to_string(),
                })?;
            if sex != expected {
                return Err(CaseError::ParentSexMismatch {
                    sample: sample.sample_id.clone(),
                    relation,
                    parent: parent.to_string(),
                    sex,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/case/relations.rs"]
mod tests;
