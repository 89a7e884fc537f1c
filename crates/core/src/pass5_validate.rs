//! Pass 5: Document validation -- walk a model and a JSON document in
//! lock-step and report the first violation.

use crate::error::ValidationError;
use crate::literal::{contains_literal, literal_eq};
use crate::model::{ElementSpec, ModelSpec, PropertySpec, ValueSpec};
use serde_json::{Map, Value};

/// Prefix that marks a document key as an extension.
pub const EXTENSION_PREFIX: &str = "X_";

/// Validate `document` against `model`.
///
/// With `verify_extended_keys`, every document key the model does not
/// declare must be an extension key (`X_...`), at every nesting level.
pub fn validate(
    model: &ModelSpec,
    document: &Value,
    verify_extended_keys: bool,
) -> Result<(), ValidationError> {
    let Some(obj) = document.as_object() else {
        return Err(ValidationError::NotAnObject { key: String::new() });
    };
    let v = Validator {
        verify_extended_keys,
    };
    v.validate_object(model, obj, "")
}

/// Parse `text` as JSON and validate it, returning the parsed document.
pub fn validate_str(
    model: &ModelSpec,
    text: &str,
    verify_extended_keys: bool,
) -> Result<Value, ValidationError> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| ValidationError::DocumentSyntax {
            message: e.to_string(),
        })?;
    validate(model, &document, verify_extended_keys)?;
    Ok(document)
}

struct Validator {
    verify_extended_keys: bool,
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{}.{}", prefix, key)
    }
}

impl Validator {
    fn validate_object(
        &self,
        model: &ModelSpec,
        obj: &Map<String, Value>,
        path: &str,
    ) -> Result<(), ValidationError> {
        tracing::trace!(path = %path, keys = obj.len(), "validating object scope");

        if self.verify_extended_keys {
            if let Some(key) = obj
                .keys()
                .find(|k| !model.contains_key(k) && !k.starts_with(EXTENSION_PREFIX))
            {
                return Err(ValidationError::UnknownKey {
                    key: join_path(path, key),
                });
            }
        }

        for prop in model {
            if obj.contains_key(&prop.key) {
                continue;
            }
            if prop.required {
                return Err(ValidationError::MissingRequiredKey {
                    key: join_path(path, &prop.key),
                    description: prop.description.clone(),
                });
            }
            if let Some(cond) = &prop.required_if {
                if obj.get(&cond.key).is_some_and(|v| literal_eq(v, &cond.value)) {
                    return Err(ValidationError::MissingConditionalKey {
                        key: join_path(path, &prop.key),
                        condition_key: cond.key.clone(),
                        condition_value: cond.value.clone(),
                        description: prop.description.clone(),
                    });
                }
            }
        }

        for prop in model {
            if let Some(value) = obj.get(&prop.key) {
                self.validate_property(prop, value, obj, &join_path(path, &prop.key))?;
            }
        }
        Ok(())
    }

    fn validate_property(
        &self,
        prop: &PropertySpec,
        value: &Value,
        scope: &Map<String, Value>,
        path: &str,
    ) -> Result<(), ValidationError> {
        if let Some(expected) = prop.value_type() {
            if !expected.matches(value) {
                return Err(ValidationError::TypeMismatch {
                    key: path.to_owned(),
                    expected: expected.to_string(),
                    description: prop.description.clone(),
                });
            }
        }

        if let Some(expected) = prop.value_defined() {
            if !literal_eq(expected, value) {
                return Err(ValidationError::ValueMismatch {
                    key: path.to_owned(),
                    expected: expected.clone(),
                    description: prop.description.clone(),
                });
            }
        }

        if let Some(range) = &prop.value_range {
            if !contains_literal(range, value) {
                return Err(ValidationError::RangeViolation {
                    key: path.to_owned(),
                    allowed: range.clone(),
                    description: prop.description.clone(),
                });
            }
        }

        if let Some(cond) = &prop.required_if {
            let actual = scope.get(&cond.key);
            if !actual.is_some_and(|v| literal_eq(v, &cond.value)) {
                return Err(ValidationError::ConditionalPresenceViolation {
                    key: path.to_owned(),
                    condition_key: cond.key.clone(),
                    condition_value: cond.value.clone(),
                    actual: actual.cloned(),
                    description: prop.description.clone(),
                });
            }
        }

        match &prop.value {
            ValueSpec::Object(nested) => {
                if let Some(obj) = value.as_object() {
                    self.validate_object(nested, obj, path)?;
                }
            }
            ValueSpec::Array(element) => {
                if let Some(items) = value.as_array() {
                    self.validate_elements(prop, element, items, path)?;
                }
            }
            ValueSpec::Scalar(_) | ValueSpec::Inline(_) | ValueSpec::Fixed(_) => {}
        }
        Ok(())
    }

    fn validate_elements(
        &self,
        prop: &PropertySpec,
        element: &ElementSpec,
        items: &[Value],
        path: &str,
    ) -> Result<(), ValidationError> {
        for (i, item) in items.iter().enumerate() {
            let item_path = format!("{}[{}]", path, i);
            match element {
                ElementSpec::Type(t) => {
                    if !t.matches(item) {
                        return Err(ValidationError::TypeMismatch {
                            key: item_path,
                            expected: t.to_string(),
                            description: prop.description.clone(),
                        });
                    }
                }
                ElementSpec::Object { model, .. } => match item.as_object() {
                    Some(obj) => self.validate_object(model, obj, &item_path)?,
                    None => return Err(ValidationError::NotAnObject { key: item_path }),
                },
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{JsonType, RequiredIf};
    use serde_json::json;

    fn prop(key: &str, value: ValueSpec) -> PropertySpec {
        PropertySpec {
            key: key.into(),
            value,
            value_range: None,
            required: false,
            required_if: None,
            immutable: false,
            description: None,
        }
    }

    fn review_model() -> ModelSpec {
        let mut doc_type = prop("doc_type", ValueSpec::Scalar(JsonType::String));
        doc_type.required = true;
        let mut status = prop("status", ValueSpec::Scalar(JsonType::String));
        status.value_range = Some(vec![json!("draft"), json!("final")]);
        let mut review = prop("review_date", ValueSpec::Scalar(JsonType::String));
        review.required_if = Some(RequiredIf {
            key: "status".into(),
            value: json!("final"),
        });
        review.description = Some("when the review happened".into());
        ModelSpec::new(vec![doc_type, status, review])
    }

    #[test]
    fn conditional_key_required_only_when_condition_holds() {
        let m = review_model();
        assert!(validate(&m, &json!({"doc_type": "x", "status": "draft"}), true).is_ok());
        assert!(validate(
            &m,
            &json!({"doc_type": "x", "status": "final", "review_date": "2024-01-01"}),
            true
        )
        .is_ok());
        let err = validate(&m, &json!({"doc_type": "x", "status": "final"}), true).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingConditionalKey {
                key: "review_date".into(),
                condition_key: "status".into(),
                condition_value: json!("final"),
                description: Some("when the review happened".into()),
            }
        );
    }

    #[test]
    fn conditional_key_present_without_condition() {
        let m = review_model();
        let err = validate(
            &m,
            &json!({"doc_type": "x", "status": "draft", "review_date": "2024-01-01"}),
            true,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ConditionalPresenceViolation { ref actual, .. } if actual == &Some(json!("draft"))
        ));
    }

    #[test]
    fn unknown_keys_depend_on_verification() {
        let m = review_model();
        let doc = json!({"doc_type": "x", "extra": 1, "X_local": true});
        assert_eq!(
            validate(&m, &doc, true).unwrap_err(),
            ValidationError::UnknownKey {
                key: "extra".into()
            }
        );
        assert!(validate(&m, &doc, false).is_ok());
    }

    #[test]
    fn extension_keys_pass_verification() {
        let m = review_model();
        assert!(validate(&m, &json!({"doc_type": "x", "X_note": "hi"}), true).is_ok());
    }

    #[test]
    fn fixed_value_must_match_exactly() {
        let m = ModelSpec::new(vec![prop("doc_version", ValueSpec::Fixed(json!("0.23.0")))]);
        assert!(validate(&m, &json!({"doc_version": "0.23.0"}), true).is_ok());
        assert!(matches!(
            validate(&m, &json!({"doc_version": "0.21.0"}), true),
            Err(ValidationError::ValueMismatch { .. })
        ));
    }

    #[test]
    fn nested_scopes_report_dotted_paths() {
        let mut submitter = prop("submitter", ValueSpec::Scalar(JsonType::String));
        submitter.required = true;
        let m = ModelSpec::new(vec![prop(
            "identity",
            ValueSpec::Object(ModelSpec::new(vec![submitter])),
        )]);
        assert_eq!(
            validate(&m, &json!({"identity": {}}), true).unwrap_err(),
            ValidationError::MissingRequiredKey {
                key: "identity.submitter".into(),
                description: None
            }
        );
        assert_eq!(
            validate(&m, &json!({"identity": {"submitter": "a", "other": 1}}), true).unwrap_err(),
            ValidationError::UnknownKey {
                key: "identity.other".into()
            }
        );
    }

    #[test]
    fn array_elements_are_checked() {
        let url = prop("url", ValueSpec::Scalar(JsonType::String));
        let m = ModelSpec::new(vec![
            prop("keys", ValueSpec::Array(ElementSpec::Type(JsonType::String))),
            prop(
                "resources",
                ValueSpec::Array(ElementSpec::Object {
                    description: None,
                    model: ModelSpec::new(vec![url]),
                }),
            ),
        ]);
        assert!(validate(&m, &json!({"keys": ["a", "b"], "resources": [{"url": "u"}]}), true).is_ok());
        assert!(matches!(
            validate(&m, &json!({"keys": ["a", 2]}), true),
            Err(ValidationError::TypeMismatch { ref key, .. }) if key == "keys[1]"
        ));
        assert!(matches!(
            validate(&m, &json!({"resources": [{"url": 3}]}), true),
            Err(ValidationError::TypeMismatch { ref key, .. }) if key == "resources[0].url"
        ));
        assert!(matches!(
            validate(&m, &json!({"resources": ["u"]}), true),
            Err(ValidationError::NotAnObject { ref key }) if key == "resources[0]"
        ));
    }

    #[test]
    fn numbers_match_by_value() {
        let mut level = prop("level", ValueSpec::Scalar(JsonType::Number));
        level.value_range = Some(vec![json!(1), json!(2)]);
        let mut detail = prop("detail", ValueSpec::Scalar(JsonType::String));
        detail.required_if = Some(RequiredIf {
            key: "level".into(),
            value: json!(2),
        });
        let m = ModelSpec::new(vec![
            prop("version", ValueSpec::Fixed(json!(3))),
            level,
            detail,
        ]);
        assert!(validate(&m, &json!({"version": 3.0, "level": 1.0}), true).is_ok());
        assert!(validate(&m, &json!({"version": 3, "level": 2.0, "detail": "x"}), true).is_ok());
        assert!(matches!(
            validate(&m, &json!({"version": 3, "level": 2.0}), true),
            Err(ValidationError::MissingConditionalKey { ref key, .. }) if key == "detail"
        ));
        assert!(matches!(
            validate(&m, &json!({"version": 3, "level": 1.5}), true),
            Err(ValidationError::RangeViolation { ref key, .. }) if key == "level"
        ));
        assert!(matches!(
            validate(&m, &json!({"version": 3.5}), true),
            Err(ValidationError::ValueMismatch { .. })
        ));
    }

    #[test]
    fn null_is_not_a_string() {
        let m = review_model();
        assert!(matches!(
            validate(&m, &json!({"doc_type": null}), true),
            Err(ValidationError::TypeMismatch { ref expected, .. }) if expected == "string"
        ));
    }

    #[test]
    fn non_object_document() {
        assert_eq!(
            validate(&review_model(), &json!([1, 2]), true).unwrap_err(),
            ValidationError::NotAnObject { key: String::new() }
        );
    }

    #[test]
    fn malformed_text_is_a_document_syntax_error() {
        assert!(matches!(
            validate_str(&review_model(), "{\"doc_type\": ", true),
            Err(ValidationError::DocumentSyntax { .. })
        ));
        let doc = validate_str(&review_model(), r#"{"doc_type": "x"}"#, true).unwrap();
        assert_eq!(doc["doc_type"], "x");
    }
}
