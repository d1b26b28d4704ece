use super::*;

fn tag(raw: &str) -> ApplicationTag {
    ApplicationTag::parse(raw).expect("valid tag")
}

#[test]
fn splits_application_and_library_prep() {
    let wgs = tag("WGSPCFC030");
    assert_eq!(wgs.application(), "WGS");
    assert_eq!(wgs.library_prep(), "PCF");
    assert_eq!(
        wgs.read_target(),
        ReadTarget {
            code: 'C',
            number: 30
        }
    );
}

#[test]
fn decoding_is_repeatable() {
    for raw in ["WGSPCFC030", "EXOSXTR100", "EFTSXTR020", "MWGNXTR003"] {
        let first = tag(raw);
        let second = tag(raw);
        assert_eq!(first, second);
        assert_eq!(first.sequencing_type(), second.sequencing_type());
        assert_eq!(first.reads(), second.reads());
        assert_eq!(first.is_human(), second.is_human());
        assert_eq!(first.reads(), first.reads());
    }
}

#[test]
fn reads_per_read_type() {
    assert_eq!(
        tag("WGSPCFC030").reads().expect("reads"),
        (30.0 * READS_PER_1X).round() as u64
    );
    assert_eq!(tag("EXOSXTR100").reads().expect("reads"), 100_000_000);
    assert_eq!(tag("WGSPCFK005").reads().expect("reads"), 5_000);
}

#[test]
fn reads_per_1x_is_derived_from_lane_yield() {
    let expected = 650_000_000.0 / 0.75 / 30.0;
    assert!((READS_PER_1X - expected).abs() < 1e-6);
}

#[test]
fn coverage_on_panel_is_rejected() {
    let err = tag("EXOSXTC030").reads().expect_err("panel coverage");
    assert!(matches!(err, TagError::InvalidReadTypeCode { code: 'C', .. }));
}

#[test]
fn unknown_read_type_is_rejected() {
    let err = tag("WGSPCFX030").reads().expect_err("bad code");
    assert!(matches!(err, TagError::InvalidReadTypeCode { code: 'X', .. }));
}

#[test]
fn sequencing_types() {
    assert_eq!(tag("WGSPCFC030").sequencing_type(), Ok(SequencingType::Wgs));
    assert_eq!(tag("EXOSXTR100").sequencing_type(), Ok(SequencingType::Wes));
    assert_eq!(tag("EFTSXTR020").sequencing_type(), Ok(SequencingType::Tga));
    assert!(matches!(
        tag("RMLP10R150").sequencing_type(),
        Err(TagError::UnknownSequencingType(_))
    ));
}

#[test]
fn targeted_runs_as_exome_for_mip() {
    assert_eq!(
        tag("EFTSXTR020").sequencing_type_mip(),
        Ok(SequencingType::Wes)
    );
    assert_eq!(
        tag("WGSPCFC030").sequencing_type_mip(),
        Ok(SequencingType::Wgs)
    );
}

#[test]
fn human_classification() {
    assert!(tag("WGSPCFC030").is_human());
    assert!(tag("EXOSXTR100").is_human());
    assert!(tag("EXXCUSR000").is_human());
    assert!(tag("WGXCUSR000").is_human());
    assert!(tag("METPCFR020").is_human());
    assert!(!tag("MWGNXTR003").is_human());
    assert!(!tag("RMLP10R150").is_human());
    assert!(!tag("RNAPOAR025").is_human());
}

#[test]
fn microbial_and_rna_flags() {
    assert!(tag("MWGNXTR003").is_microbial());
    assert_eq!(
        tag("MWGNXTR003").application_class(),
        Some(ApplicationClass::Microbial)
    );
    assert!(tag("RNAPOAR025").is_rna());
    assert_eq!(tag("RMLP10R150").application_class(), None);
    assert_eq!(
        tag("EXXCUSR000").application_class(),
        Some(ApplicationClass::AnalysisOnly)
    );
}

#[test]
fn external_category() {
    assert!(tag("EXXCUSR000").is_external());
    assert!(!tag("EXOSXTR100").is_external());
    assert_eq!(tag("EXXCUSR000").category().expect("category"), "wes-ext");
    assert_eq!(tag("WGXCUSR000").category().expect("category"), "wgs-ext");
    assert_eq!(tag("WGSPCFC030").category().expect("category"), "wgs");
}

#[test]
fn pipeline_selection() {
    assert_eq!(tag("WGSPCFC030").pipeline(None), Some(Pipeline::Mip));
    assert_eq!(tag("MWGNXTR003").pipeline(None), Some(Pipeline::Mwgs));
    assert_eq!(tag("WGSPCFC030").pipeline(Some("tumour")), None);
    assert_eq!(tag("RMLP10R150").pipeline(None), None);
}

#[test]
fn expected_reads_is_three_quarters_of_ordered() {
    assert_eq!(tag("EXOSXTR100").expected_reads(), Ok(75_000_000));
}

#[test]
fn malformed_tags_fail() {
    assert!(matches!(
        ApplicationTag::parse("WGSPCF"),
        Err(TagError::MalformedApplicationTag { .. })
    ));
    assert!(matches!(
        ApplicationTag::parse("WGSPCFC0X0"),
        Err(TagError::MalformedApplicationTag { .. })
    ));
    assert!(matches!(
        ApplicationTag::parse("WGSPCFCÅ30"),
        Err(TagError::MalformedApplicationTag { .. })
    ));
}

#[test]
fn custom_categories_are_honoured() {
    let mut categories = Categories::default();
    categories.whole_genome.insert("WGN".to_string());
    let categories = Arc::new(categories);
    let tag = ApplicationTag::parse_with("WGNPCFC030", &categories).expect("tag");
    assert_eq!(tag.sequencing_type(), Ok(SequencingType::Wgs));
    assert!(tag.is_human());
    assert!(ApplicationTag::parse("WGNPCFC030")
        .expect("tag")
        .sequencing_type()
        .is_err());
}

#[test]
fn serializes_as_plain_string() {
    let json = serde_json::to_string(&tag("WGSPCFC030")).expect("json");
    assert_eq!(json, "\"WGSPCFC030\"");
}
