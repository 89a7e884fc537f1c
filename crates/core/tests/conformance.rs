//! Runs the resource_data model in conformance/ against every valid and
//! invalid document, and checks the model-level properties of the pipeline.

use lrmodel_core::{
    parse, read_spec, to_json, to_json_string, validate, validate_str, JsonType, ModelSpec,
    ValidationError,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

fn conformance_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../conformance")
}

fn resource_data_model() -> ModelSpec {
    let text = read_spec(&conformance_root().join("models/resource_data.spec")).unwrap();
    parse(&text).unwrap()
}

fn read_json(path: &Path) -> Value {
    let src = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&src).unwrap()
}

fn documents(dir: &str) -> Vec<PathBuf> {
    let mut paths: Vec<_> = std::fs::read_dir(conformance_root().join(dir))
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension().map_or(false, |e| e == "json")
                && !p.to_string_lossy().contains("expected-error.json")
        })
        .collect();
    paths.sort();
    paths
}

#[test]
fn valid_documents_pass() {
    let model = resource_data_model();
    let mut tested = 0usize;
    for path in documents("valid") {
        if let Err(e) = validate(&model, &read_json(&path), true) {
            panic!("{} should be valid: {}", path.display(), e);
        }
        tested += 1;
    }
    assert!(tested > 0, "No valid documents found -- check paths");
}

#[test]
fn invalid_documents_fail_with_expected_error() {
    let model = resource_data_model();
    let mut tested = 0usize;
    let mut failures = Vec::new();

    for path in documents("invalid") {
        let expected_path = path.with_extension("expected-error.json");
        let expected = read_json(&expected_path);
        match validate(&model, &read_json(&path), true) {
            Ok(()) => failures.push(format!("{}: unexpectedly valid", path.display())),
            Err(e) => {
                let actual = e.to_json_value();
                if actual["kind"] != expected["kind"] || actual["key"] != expected["key"] {
                    failures.push(format!(
                        "{}: expected {} at {}, got {} at {} ({})",
                        path.display(),
                        expected["kind"],
                        expected["key"],
                        actual["kind"],
                        actual["key"],
                        e
                    ));
                }
            }
        }
        tested += 1;
    }

    assert!(tested > 0, "No invalid documents found -- check paths");
    assert!(
        failures.is_empty(),
        "{} of {} invalid documents misreported:\n{}",
        failures.len(),
        tested,
        failures.join("\n")
    );
}

#[test]
fn resource_data_model_shape() {
    let model = resource_data_model();
    assert_eq!(model.name(), Some("resource_data"));
    assert!(!model.contains_key("X_xxx"));

    let doc_type = model.get("doc_type").unwrap();
    assert!(doc_type.required);
    assert!(doc_type.immutable);
    assert_eq!(doc_type.value_defined(), Some(&json!("resource_data")));

    let active = model.get("active").unwrap();
    assert_eq!(active.value_type(), Some(JsonType::Boolean));
    assert!(active.required);
    assert!(!active.immutable);

    let locator = model.get("payload_locator").unwrap();
    let cond = locator.required_if.as_ref().unwrap();
    assert_eq!(cond.key, "payload_placement");
    assert_eq!(cond.value, json!("linked"));

    let data = model.get("resource_data").unwrap();
    assert_eq!(data.value_type(), Some(JsonType::Object));
    assert_eq!(data.required_if.as_ref().unwrap().value, json!("inline"));

    let identity = model.get("identity").unwrap();
    assert!(identity.required);
    assert_eq!(
        identity.description.as_deref(),
        Some("identity of the submitter and owners. required")
    );
    let submitter = identity.nested().unwrap().get("submitter").unwrap();
    assert!(submitter.required);
}

#[test]
fn to_json_is_idempotent_across_parses() {
    let text = read_spec(&conformance_root().join("models/resource_data.spec")).unwrap();
    let first = to_json_string(&parse(&text).unwrap());
    let second = to_json_string(&parse(&text).unwrap());
    assert_eq!(first, second);
}

#[test]
fn removing_any_required_key_is_reported() {
    let model = resource_data_model();
    let valid = read_json(&conformance_root().join("valid/inline_payload.json"));
    for prop in model.iter().filter(|p| p.required) {
        let mut doc = valid.clone();
        doc.as_object_mut().unwrap().remove(&prop.key);
        match validate(&model, &doc, true) {
            Err(ValidationError::MissingRequiredKey { key, .. }) => assert_eq!(key, prop.key),
            other => panic!("removing {}: unexpected {:?}", prop.key, other),
        }
    }
}

#[test]
fn unknown_keys_are_tolerated_without_verification() {
    let model = resource_data_model();
    let doc = read_json(&conformance_root().join("invalid/unknown_key.json"));
    assert!(validate(&model, &doc, false).is_ok());
}

#[test]
fn review_scenario() {
    let model = parse(
        r#"{"doc_type": {string // required}, "status": {string // fixed vocabulary [draft, final] }, "review_date": {string // required if final} }"#,
    )
    .unwrap();
    assert!(validate_str(&model, r#"{"doc_type": "x", "status": "draft"}"#, true).is_ok());
    assert!(matches!(
        validate_str(&model, r#"{"doc_type": "x", "status": "final"}"#, true),
        Err(ValidationError::MissingConditionalKey { ref key, .. }) if key == "review_date"
    ));
    assert!(validate_str(
        &model,
        r#"{"doc_type": "x", "status": "final", "review_date": "2024-01-01"}"#,
        true
    )
    .is_ok());
    assert_eq!(
        to_json(&model)["review_date"]["isRequiredIf"],
        json!({"status": "final"})
    );
}
