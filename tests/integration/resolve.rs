use predicates::prelude::*;
use serde_json::{Value, json};

use crate::common::{CYCLIC_SCHEMA, TestProject};
use fieldgraph::test_utils::ADDRESS_SCHEMA;

fn resolve_json(project: &TestProject, args: &[&str]) -> Value {
    let output = project.command().arg("resolve").args(args).output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_resolve_with_form_data() {
    let project = TestProject::new();
    project.write_file("address.toml", ADDRESS_SCHEMA);
    project.write_file("data.json", r#"{"country": "US", "state": ""}"#);

    let updates = resolve_json(
        &project,
        &["address.toml", "--changed", "country", "--data", "data.json"],
    );

    assert_eq!(
        updates,
        json!({
            "state": { "visible": true, "required": true },
            "city": { "options": { "nyc": "New York", "sf": "San Francisco" } },
            "zip": { "disabled": true, "value": "" }
        })
    );
}

#[test]
fn test_resolve_output_follows_discovery_order() {
    let project = TestProject::new();
    project.write_file("address.toml", ADDRESS_SCHEMA);
    project.write_file("data.json", r#"{"country": "FR", "state": "IDF"}"#);

    let output = project
        .command()
        .args(["resolve", "address.toml", "--changed", "country", "--data", "data.json", "--compact"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let state = stdout.find("\"state\"").unwrap();
    let city = stdout.find("\"city\"").unwrap();
    let zip = stdout.find("\"zip\"").unwrap();
    assert!(state < city && city < zip);
    assert!(stdout.contains(r#""state":{"visible":false,"required":false,"value":""}"#));
}

#[test]
fn test_resolve_in_filter_context() {
    let project = TestProject::new();
    project.write_file("address.toml", ADDRESS_SCHEMA);

    let updates = resolve_json(
        &project,
        &["address.toml", "--changed", "country", "--context", "filter"],
    );
    assert_eq!(updates, json!({ "city": { "placeholder": "Any city" } }));
}

#[test]
fn test_resolve_uses_configured_default_context() {
    let project = TestProject::with_config("default_context = \"filter\"\n");
    project.write_file("address.toml", ADDRESS_SCHEMA);

    let updates = resolve_json(&project, &["address.toml", "--changed", "country"]);
    assert_eq!(updates, json!({ "city": { "placeholder": "Any city" } }));
}

#[test]
fn test_resolve_unknown_changed_key_warns() {
    let project = TestProject::new();
    project.write_file("address.toml", ADDRESS_SCHEMA);

    project
        .command()
        .args(["resolve", "address.toml", "--changed", "contry"])
        .assert()
        .success()
        .stdout(predicate::str::diff("{}\n"))
        .stderr(predicate::str::contains("'contry' is not declared"))
        .stderr(predicate::str::contains("did you mean 'country'?"));
}

#[test]
fn test_resolve_changed_leaf_produces_nothing() {
    let project = TestProject::new();
    project.write_file("address.toml", ADDRESS_SCHEMA);

    let updates = resolve_json(&project, &["address.toml", "--changed", "zip,city"]);
    assert_eq!(updates, json!({}));
}

#[test]
fn test_resolve_rejects_cyclic_schema() {
    let project = TestProject::new();
    project.write_file("cycle.toml", CYCLIC_SCHEMA);

    project
        .command()
        .args(["resolve", "cycle.toml", "--changed", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Circular dependency"))
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn test_resolve_rejects_non_object_data() {
    let project = TestProject::new();
    project.write_file("address.toml", ADDRESS_SCHEMA);
    project.write_file("data.json", "\"US\"");

    project
        .command()
        .args(["resolve", "address.toml", "--changed", "country", "--data", "data.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a JSON object, found a string"));
}

#[test]
fn test_resolve_requires_changed() {
    let project = TestProject::new();
    project.write_file("address.toml", ADDRESS_SCHEMA);

    project.command().args(["resolve", "address.toml"]).assert().failure();
}
