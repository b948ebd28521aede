use std::fs;

use nrz_core::{Method, StratifyKey};
use nrz_integrity::{config_from_yaml_slice, load_config};

const YAML: &str = "\
method: stratified
group_names: [Ctl, Drug]
seed: 12
stratify_by: [sex, weight]
constraints:
  max_per_cage_per_group: 2
";

#[test]
fn yaml_config_applies_defaults() {
    let config = config_from_yaml_slice(YAML.as_bytes()).expect("yaml");
    assert_eq!(config.method().unwrap(), Method::Stratified);
    assert_eq!(config.seed, Some(12));
    assert_eq!(config.stratify_by, vec![StratifyKey::Sex, StratifyKey::Weight]);
    assert_eq!(config.constraints.max_per_cage_per_group, Some(2));
    assert!(config.constraints.minimize_cage_clustering);
    assert!(config.random_block_sizes.is_empty());
}

#[test]
fn load_config_dispatches_on_extension() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let yaml_path = dir.path().join("run.yml");
    fs::write(&yaml_path, YAML).expect("write yaml");
    let json_path = dir.path().join("run.json");
    fs::write(
        &json_path,
        r#"{"method":"block","group_names":["A","B"],"block_size":4}"#,
    )
    .expect("write json");

    let from_yaml = load_config(&yaml_path).expect("load yaml");
    assert_eq!(from_yaml.group_names, vec!["Ctl", "Drug"]);
    let from_json = load_config(&json_path).expect("load json");
    assert_eq!(from_json.block_size, Some(4));
}

#[test]
fn load_config_rejects_unknown_extension_and_missing_file() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let toml_path = dir.path().join("run.toml");
    fs::write(&toml_path, "method = 'simple'").expect("write");
    let err = load_config(&toml_path).unwrap_err();
    assert_eq!(err.info().code, "config-format");

    let err = load_config(&dir.path().join("absent.json")).unwrap_err();
    assert_eq!(err.info().code, "config-read");
}
