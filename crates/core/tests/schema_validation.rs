//! Validates the JSON form of every conformance model, plus a set of inline
//! models covering each value kind, against schema/model-schema.json.

use lrmodel_core::{parse, read_spec, to_json};
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn load_validator() -> jsonschema::Validator {
    let schema_path = workspace_root().join("schema/model-schema.json");
    let schema_src = std::fs::read_to_string(&schema_path)
        .unwrap_or_else(|e| panic!("Failed to read schema at {}: {}", schema_path.display(), e));
    let schema_value: serde_json::Value = serde_json::from_str(&schema_src).unwrap();
    jsonschema::validator_for(&schema_value)
        .unwrap_or_else(|e| panic!("Failed to compile schema: {}", e))
}

fn collect_spec_files(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map_or(false, |e| e == "spec"))
        .collect();
    paths.sort();
    paths
}

#[test]
fn conformance_models_match_schema() {
    let validator = load_validator();
    let mut tested = 0usize;
    let mut failures = Vec::new();

    for path in collect_spec_files(&workspace_root().join("conformance/models")) {
        let text = read_spec(&path).unwrap();
        let model = parse(&text)
            .unwrap_or_else(|e| panic!("{} does not parse: {}", path.display(), e));
        if let Err(error) = validator.validate(&to_json(&model)) {
            failures.push(format!("{}: {}", path.display(), error));
        }
        tested += 1;
    }

    assert!(tested > 0, "No conformance models found -- check paths");
    assert!(
        failures.is_empty(),
        "Schema validation failed for {} of {} models:\n{}",
        failures.len(),
        tested,
        failures.join("\n")
    );
}

#[test]
fn every_value_kind_matches_schema() {
    let validator = load_validator();
    let text = r#"{
    "doc_type": "sample",                 // required, immutable
    "count": number,                      // how many
    "ready": "boolean",
    "state": "string",                    // fixed vocabulary [open, closed, 3, true]
    "closed_at": "string",                // required if closed
    "tags": [string],
    "entries": [                          // one per entry
        {
            "name": "string"              // required
        }
    ],
    "extra": {free form notes},
    "empty": {},
    "nested": {                           // a nested scope
        "level": number                   // fixed vocabulary [1, 2]
    }
}"#;
    let model = parse(text).unwrap();
    let out = to_json(&model);
    if let Err(error) = validator.validate(&out) {
        panic!("schema validation failed: {}\n{:#}", error, out);
    }
}

#[test]
fn schema_rejects_conflicting_requirement() {
    let validator = load_validator();
    let bad = serde_json::json!({
        "k": {"type": "string", "isRequired": true, "isRequiredIf": {"s": "x"}}
    });
    assert!(validator.validate(&bad).is_err());
}
