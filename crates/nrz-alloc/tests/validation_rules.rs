use nrz_alloc::validate_subjects;
use nrz_core::{NrzError, SubjectRecord};

#[test]
fn normalizes_sex_and_keeps_other_fields() -> Result<(), NrzError> {
    let mut raw = SubjectRecord::new("RAT_001")
        .with_sex(" Male")
        .with_weight(250.0)
        .with_cage("C1");
    raw.strain = Some("Wistar".into());
    let subjects = vec![
        raw.clone(),
        SubjectRecord::new("RAT_002").with_sex("n/a"),
        SubjectRecord::new("RAT_003").with_sex("FEMALE"),
        SubjectRecord::new("RAT_004"),
    ];

    let normalized = validate_subjects(&subjects)?;

    let sexes: Vec<Option<&str>> = normalized.iter().map(|s| s.sex.as_deref()).collect();
    assert_eq!(sexes, vec![Some("M"), None, Some("F"), None]);
    assert_eq!(normalized[0].strain.as_deref(), Some("Wistar"));
    assert_eq!(normalized[0].weight, raw.weight);
    Ok(())
}

#[test]
fn empty_id_reports_row() {
    let subjects = vec![SubjectRecord::new("A1"), SubjectRecord::new("  ")];
    let err = validate_subjects(&subjects).unwrap_err();
    assert!(matches!(err, NrzError::Validation(_)));
    assert_eq!(err.info().code, "empty-id");
    assert_eq!(err.info().context["row"], "2");
}

#[test]
fn duplicate_ids_are_case_sensitive() {
    let distinct = vec![SubjectRecord::new("a1"), SubjectRecord::new("A1")];
    assert!(validate_subjects(&distinct).is_ok());

    let duplicate = vec![
        SubjectRecord::new("A1"),
        SubjectRecord::new("A2"),
        SubjectRecord::new("A1"),
    ];
    let err = validate_subjects(&duplicate).unwrap_err();
    assert_eq!(err.info().code, "duplicate-id");
    assert_eq!(err.info().context["subject_id"], "A1");
    assert_eq!(err.info().context["row"], "3");
}

#[test]
fn non_positive_weight_is_rejected() {
    for weight in [0.0, -3.5] {
        let subjects = vec![SubjectRecord::new("A1").with_weight(weight)];
        let err = validate_subjects(&subjects).unwrap_err();
        assert_eq!(err.info().code, "non-positive-weight");
    }
}

#[test]
fn unknown_sex_is_rejected_with_subject_context() {
    let subjects = vec![SubjectRecord::new("A1").with_sex("X")];
    let err = validate_subjects(&subjects).unwrap_err();
    assert!(matches!(err, NrzError::Validation(_)));
    assert_eq!(err.info().code, "invalid-sex");
    assert_eq!(err.info().context["subject_id"], "A1");
    assert_eq!(err.info().context["value"], "X");
}
