use nrz_core::errors::{ErrorInfo, NrzError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("row", "3")
        .with_context("subject_id", "RAT_003")
}

#[test]
fn validation_error_surface() {
    let err = NrzError::Validation(sample_info("V001", "duplicate id"));
    assert_eq!(err.info().code, "V001");
    assert!(err.info().context.contains_key("row"));
}

#[test]
fn unsupported_method_mentions_value() {
    let err = "random-walk".parse::<nrz_core::Method>().unwrap_err();
    assert!(matches!(err, NrzError::UnsupportedMethod(_)));
    assert_eq!(err.info().context["method"], "random-walk");
    assert!(err.to_string().contains("random-walk"));
}

#[test]
fn display_includes_context_and_hint() {
    let err = NrzError::Configuration(sample_info("C001", "no groups").with_hint("add one"));
    let text = err.to_string();
    assert!(text.starts_with("configuration error: no groups (code: C001)"));
    assert!(text.contains("row=3, subject_id=RAT_003"));
    assert!(text.ends_with("| hint: add one"));
}

#[test]
fn errors_round_trip_json() {
    let err = NrzError::Rng(sample_info("RN001", "entropy"));
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"Rng\""));
    let decoded: NrzError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
