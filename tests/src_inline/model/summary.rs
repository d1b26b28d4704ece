use super::*;

fn sample(tag: &str, customer: &str) -> LimsSample {
    LimsSample::new("ACC1", "s1")
        .with_udf(udf::CUSTOMER, customer)
        .with_udf(udf::FAMILY_ID, "1")
        .with_udf(udf::SEX, "F")
        .with_udf(udf::STATUS, "unknown")
        .with_udf(udf::APPLICATION_TAG, tag)
        .with_udf(udf::GENE_LIST, "EP; IEM")
}

#[test]
fn summarizes_exome_sample() {
    let summary = summarize(&sample("EXOSXTR100", "cust003"), &Categories::shared()).expect("summary");
    assert_eq!(summary.case_id, "cust003-1");
    assert_eq!(summary.reads, Some(100_000_000));
    assert_eq!(summary.expected_reads, Some(75_000_000));
    assert_eq!(summary.sequencing_type, Some(SequencingType::Wes));
    assert_eq!(summary.pipeline, Some(Pipeline::Mip));
    assert!(summary.is_production);
    assert_eq!(
        summary.panels,
        Some(vec!["EP".to_string(), "IEM".to_string()])
    );
}

#[test]
fn rml_sample_has_no_sequencing_type() {
    let summary = summarize(&sample("RMLP10R150", "cust000"), &Categories::shared()).expect("summary");
    assert_eq!(summary.sequencing_type, None);
    assert_eq!(summary.pipeline, None);
    assert!(!summary.is_production);
    assert_eq!(summary.reads, Some(150_000_000));
}
