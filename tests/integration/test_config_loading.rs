//! Integration Tests for Validator File Loading
//!
//! The same validator expressed in each supported format must load to the
//! same runtime model, and load failures must name what went wrong before
//! any command is dispatched.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use stepcheck::models::DEFAULT_TIMEOUT_SECS;
use stepcheck::{ConfigLoader, Error, Expectation};

fn write_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write");
    file
}

const YAML: &str = r#"
step_validator:
  - step: 1
    title: "Packages"
    validations:
      - name: "nginx installed"
        command: "dpkg -l nginx"
        expected_pattern: "ii\\s+nginx"
        success_message: "installed"
        failure_message: "missing"
  - step: 2
    title: "Ports"
    validations:
      - name: "port 80"
        command: "ss -ltn sport = :80"
        timeout: 12
        expected_output: "LISTEN"
        success_message: "listening"
        failure_message: "closed"
"#;

const JSON: &str = r#"{
  "step_validator": [
    {
      "step": 1,
      "title": "Packages",
      "validations": [
        {
          "name": "nginx installed",
          "command": "dpkg -l nginx",
          "expected_pattern": "ii\\s+nginx",
          "success_message": "installed",
          "failure_message": "missing"
        }
      ]
    },
    {
      "step": 2,
      "title": "Ports",
      "validations": [
        {
          "name": "port 80",
          "command": "ss -ltn sport = :80",
          "timeout": 12,
          "expected_output": "LISTEN",
          "success_message": "listening",
          "failure_message": "closed"
        }
      ]
    }
  ]
}"#;

const TOML: &str = r#"
[[step_validator]]
step = 1
title = "Packages"

[[step_validator.validations]]
name = "nginx installed"
command = "dpkg -l nginx"
expected_pattern = 'ii\s+nginx'
success_message = "installed"
failure_message = "missing"

[[step_validator]]
step = 2
title = "Ports"

[[step_validator.validations]]
name = "port 80"
command = "ss -ltn sport = :80"
timeout = 12
expected_output = "LISTEN"
success_message = "listening"
failure_message = "closed"
"#;

#[test]
fn test_formats_load_to_the_same_model() {
    let yaml = ConfigLoader::load(write_file(".yml", YAML).path()).expect("yaml");
    let json = ConfigLoader::load(write_file(".json", JSON).path()).expect("json");
    let toml = ConfigLoader::load(write_file(".toml", TOML).path()).expect("toml");

    for config in [&yaml, &json, &toml] {
        assert_eq!(config.steps.len(), 2);
        assert_eq!(config.check_count(), 2);

        let packages = &config.steps[0];
        assert_eq!(packages.ordinal, 1);
        assert_eq!(packages.title, "Packages");
        let nginx = &packages.checks[0];
        assert_eq!(nginx.timeout, DEFAULT_TIMEOUT_SECS);
        match &nginx.expectation {
            Expectation::Pattern(re) => assert_eq!(re.as_str(), "ii\\s+nginx"),
            other => panic!("expected pattern, got {:?}", other),
        }

        let ports = &config.steps[1];
        assert_eq!(ports.checks[0].timeout, 12);
        assert!(matches!(
            ports.checks[0].expectation,
            Expectation::Literal(ref s) if s == "LISTEN"
        ));
    }
}

#[test]
fn test_load_error_names_the_path() {
    let err = ConfigLoader::load(Path::new("/does/not/exist.yml")).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("/does/not/exist.yml"), "got: {}", message);
}

#[test]
fn test_parse_error_names_the_format() {
    let file = write_file(".json", "{ not json");
    let err = ConfigLoader::load(file.path()).unwrap_err();
    match &err {
        Error::ConfigParseFailed { format, .. } => assert_eq!(format, "JSON"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_validation_error_names_the_check() {
    let yaml = r#"
step_validator:
  - step: 1
    title: "Bad"
    validations:
      - name: "double expectation"
        command: "true"
        expected_output: "x"
        expected_pattern: "x"
        success_message: "s"
        failure_message: "f"
"#;
    let file = write_file(".yml", yaml);
    let err = ConfigLoader::load(file.path()).unwrap_err();
    assert!(
        err.to_string().contains("double expectation"),
        "got: {}",
        err
    );
}

#[test]
fn test_unknown_extension_falls_back_to_yaml() {
    let file = write_file(".validator", YAML);
    let config = ConfigLoader::load(file.path()).expect("load");
    assert_eq!(config.steps.len(), 2);
}
