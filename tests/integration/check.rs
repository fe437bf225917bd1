use predicates::prelude::*;

use crate::common::{CYCLIC_SCHEMA, TestProject};
use fieldgraph::test_utils::ADDRESS_SCHEMA;

#[test]
fn test_check_valid_schema() {
    let project = TestProject::new();
    let schema = project.write_file("address.toml", ADDRESS_SCHEMA);

    project
        .command()
        .arg("check")
        .arg(&schema)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓"))
        .stdout(predicate::str::contains("4 field(s), no circular dependencies"));
}

#[test]
fn test_check_reports_cycle_chain() {
    let project = TestProject::new();
    let schema = project.write_file("cycle.toml", CYCLIC_SCHEMA);

    project
        .command()
        .arg("check")
        .arg(&schema)
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗"))
        .stdout(predicate::str::contains("a → b → c → a"))
        .stderr(predicate::str::contains("Circular dependency detected at field 'a'"));
}

#[test]
fn test_check_duplicate_key() {
    let project = TestProject::new();
    let schema = project.write_file(
        "dup.toml",
        r#"
[[fields]]
key = "city"

[[fields]]
key = "city"
"#,
    );

    project
        .command()
        .arg("check")
        .arg(&schema)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Field 'city' is already registered"));
}

#[test]
fn test_check_json_output() {
    let project = TestProject::new();
    let schema = project.write_file("cycle.toml", CYCLIC_SCHEMA);

    let output = project
        .command()
        .args(["check", "--format", "json"])
        .arg(&schema)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["fields"], 3);
    assert_eq!(report["errors"].as_array().unwrap().len(), 1);
}

#[test]
fn test_check_warnings_and_strict_mode() {
    let project = TestProject::new();
    let schema = project.write_file(
        "typo.toml",
        r#"
[[fields]]
key = "country"

[[fields]]
key = "state"
depends_on = ["contry"]

[[fields.on.form]]
update = { visible = true }
"#,
    );

    project
        .command()
        .arg("check")
        .arg(&schema)
        .assert()
        .success()
        .stdout(predicate::str::contains("depends on 'contry'"))
        .stdout(predicate::str::contains("did you mean 'country'"));

    project
        .command()
        .args(["check", "--strict"])
        .arg(&schema)
        .assert()
        .failure()
        .stderr(predicate::str::contains("strict mode"));
}

#[test]
fn test_check_missing_schema_file() {
    let project = TestProject::new();

    project
        .command()
        .args(["check", "missing.toml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Failed to read form schema"));
}

#[test]
fn test_check_invalid_toml() {
    let project = TestProject::new();
    let schema = project.write_file("broken.toml", "[[fields]\nkey = ");

    project
        .command()
        .arg("check")
        .arg(&schema)
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.toml"));
}
