use super::*;
use crate::apptag::SequencingType;

fn data(id: &str, name: &str, sex: Sex, phenotype: &str) -> SampleData {
    SampleData {
        sample_id: id.to_string(),
        sample_name: name.to_string(),
        sex,
        phenotype: phenotype.to_string(),
        analysis_type: SequencingType::Wes,
        expected_coverage: 130.5,
        capture_kit: Some("Agilent_SureSelectCRE.V1".to_string()),
        mother: None,
        father: None,
        sequencing_type: SequencingType::Tga,
        gene_panels: vec!["ATX".to_string(), "EP".to_string()],
    }
}

fn config() -> CaseConfig {
    let mut child = data("CG1", "17010-I-1A", Sex::Male, "affected");
    child.mother = Some("CG2".to_string());
    child.father = Some("CG3".to_string());
    CaseConfig {
        owner: "cust003".to_string(),
        family: "17010".to_string(),
        default_gene_panels: vec!["EP".to_string()],
        gene_panels: vec!["EP".to_string(), "OMIM-AUTO".to_string()],
        samples: vec![
            child,
            data("CG2", "17010-II-2U", Sex::Female, "unaffected"),
            data("CG3", "17010-II-1U", Sex::Unknown, "unknown"),
        ],
    }
}

#[test]
fn phenotype_codes() {
    let config = config();
    let records = pedigree_records(&config).expect("records");
    let codes: Vec<&str> = records.iter().map(|r| r.phenotype).collect();
    assert_eq!(codes, vec!["2", "1", "0"]);
    let sexes: Vec<&str> = records.iter().map(|r| r.sex).collect();
    assert_eq!(sexes, vec!["1", "2", "0"]);
}

#[test]
fn unrecognized_phenotype_fails() {
    let mut config = config();
    config.samples[1].phenotype = "carrier".to_string();
    let err = pedigree_records(&config).expect_err("phenotype");
    assert!(matches!(
        err,
        PedigreeError::UnrecognizedPhenotype { ref phenotype, .. } if phenotype == "carrier"
    ));
}

#[test]
fn renders_fixed_column_order() {
    let text = render_pedigree(&config()).expect("render");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "#Family ID\tIndividual ID\tPaternal ID\tMaternal ID\tSex\tPhenotype\tClinical_db\tCapture_kit\tdisplay_name\tSequencing_type"
    );
    assert_eq!(
        lines[1],
        "17010\tCG1\tCG3\tCG2\t1\t2\tATX;EP\tAgilent_SureSelectCRE.V1\t17010-I-1A\ttga"
    );
    assert_eq!(
        lines[2],
        "17010\tCG2\t0\t0\t2\t1\tATX;EP\tAgilent_SureSelectCRE.V1\t17010-II-2U\ttga"
    );
    assert!(text.ends_with('\n'));
}

#[test]
fn column_count_matches_header() {
    let text = render_pedigree(&config()).expect("render");
    for line in text.lines() {
        assert_eq!(line.split('\t').count(), COLUMNS.len());
    }
}
