use nrz_core::{Method, Sex, SubjectRecord, MISSING_LABEL};

#[test]
fn sex_spellings_normalize() {
    for raw in ["M", "m", " Male ", "MALE"] {
        assert_eq!(Sex::normalize(raw).unwrap(), Some(Sex::M), "{raw}");
    }
    for raw in ["F", "female", "  f"] {
        assert_eq!(Sex::normalize(raw).unwrap(), Some(Sex::F), "{raw}");
    }
    for raw in ["", "  ", "NA", "n/a", "None", "unknown", "U", "-"] {
        assert_eq!(Sex::normalize(raw).unwrap(), None, "{raw}");
    }
}

#[test]
fn unrecognized_sex_is_rejected() {
    let info = Sex::normalize("hermaphrodite").unwrap_err();
    assert_eq!(info.code, "invalid-sex");
    assert_eq!(info.context["value"], "hermaphrodite");
}

#[test]
fn blank_cage_reads_as_missing() {
    assert_eq!(SubjectRecord::new("A").with_cage("").cage_label(), MISSING_LABEL);
    assert_eq!(SubjectRecord::new("A").cage_label(), MISSING_LABEL);
    assert_eq!(SubjectRecord::new("A").with_cage("C7").cage_label(), "C7");
}

#[test]
fn method_parse_is_case_insensitive() {
    assert_eq!(" Balanced ".parse::<Method>().unwrap(), Method::Balanced);
    assert_eq!("BLOCK".parse::<Method>().unwrap(), Method::Block);
    assert_eq!(Method::Stratified.to_string(), "stratified");
}

#[test]
fn missing_covariates_use_na_label() {
    let subject = SubjectRecord::new("A1");
    assert_eq!(subject.cage_label(), MISSING_LABEL);
    assert_eq!(subject.sex_label(), MISSING_LABEL);
    let caged = SubjectRecord::new("A2").with_cage("C7");
    assert_eq!(caged.cage_label(), "C7");
}
