use super::*;
use crate::apptag::Categories;
use crate::lims::{LimsSample, MemoryLims, Snapshot};

fn record(gene_list: Option<&str>, additional: Option<&str>) -> (MemoryLims, SampleRecord) {
    let mut sample = LimsSample::new("ACC1", "s1")
        .with_udf(udf::CUSTOMER, "cust100")
        .with_udf(udf::FAMILY_ID, "1")
        .with_udf(udf::SEX, "F")
        .with_udf(udf::STATUS, "affected")
        .with_udf(udf::APPLICATION_TAG, "WGSPCFC030");
    if let Some(list) = gene_list {
        sample = sample.with_udf(udf::GENE_LIST, list);
    }
    if let Some(panel) = additional {
        sample = sample.with_udf(udf::ADDITIONAL_GENE_LIST, panel);
    }
    let record = SampleRecord::from_lims(&sample, &Categories::shared()).expect("record");
    let lims = MemoryLims::new(Snapshot {
        samples: vec![sample],
        processes: Vec::new(),
    });
    (lims, record)
}

#[test]
fn coverage_target_is_scaled_by_yield() {
    let tag = ApplicationTag::parse("WGSPCFC030").expect("tag");
    assert!((expected_coverage(&tag).expect("coverage") - 26.1).abs() < 1e-9);
}

#[test]
fn read_target_converts_to_coverage() {
    let tag = ApplicationTag::parse("EXOSXTR100").expect("tag");
    assert!((expected_coverage(&tag).expect("coverage") - 130.5).abs() < 1e-9);
}

#[test]
fn kilo_reads_have_no_coverage() {
    let tag = ApplicationTag::parse("WGSPCFK005").expect("tag");
    assert!(matches!(
        expected_coverage(&tag),
        Err(TagError::InvalidReadTypeCode { code: 'K', .. })
    ));
}

#[test]
fn panels_are_split_and_merged() {
    let (mut lims, record) = record(Some("EP; IEM;"), Some("ATX"));
    let panels = gene_panels(&mut lims, &record).expect("panels");
    assert_eq!(panels, vec!["ATX", "EP", "IEM"]);
    assert!(!lims.is_dirty());
}

#[test]
fn missing_gene_list_gives_no_panels() {
    let (mut lims, record) = record(None, None);
    assert!(gene_panels(&mut lims, &record).expect("panels").is_empty());
}

#[test]
fn colon_separator_is_corrected_once() {
    let (mut lims, record) = record(Some("EP:IEM"), None);
    let panels = gene_panels(&mut lims, &record).expect("panels");
    assert_eq!(panels, vec!["EP", "IEM"]);
    let stored = lims.fetch_sample("ACC1").expect("sample");
    assert_eq!(stored.udf(udf::GENE_LIST).as_deref(), Some("EP;IEM"));

    let fixed = SampleRecord::from_lims(&stored, &Categories::shared()).expect("record");
    let mut again = MemoryLims::new(lims.snapshot().clone());
    assert_eq!(gene_panels(&mut again, &fixed).expect("panels"), panels);
    assert!(!again.is_dirty());
}
