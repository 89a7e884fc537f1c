//! Pass 3: Conditional requirements -- resolve each `required if <token>`
//! against the fixed vocabularies of the property's siblings.
//!
//! Per object scope this is two passes: collect every sibling vocabulary,
//! then resolve every pending token against the collection. Nested scopes
//! are resolved independently; a token never resolves across scopes.

use crate::ast::*;
use crate::error::{SemanticError, SpecError};
use crate::literal;
use crate::model::RequiredIf;
use serde_json::Value;
use std::collections::HashMap;

pub fn resolve_conditions(root: &mut RawObject) -> Result<(), SpecError> {
    check_duplicate_keys(root)?;

    // Pass A: collect sibling vocabularies.
    let ranges: Vec<(String, Vec<Value>)> = root
        .properties
        .iter()
        .filter_map(|p| {
            p.directives
                .value_range
                .as_ref()
                .map(|r| (p.key.clone(), r.clone()))
        })
        .collect();

    // Pass B: resolve pending tokens.
    for prop in &mut root.properties {
        if let Some(token) = &prop.directives.required_if {
            if prop.directives.required {
                return Err(SemanticError::ConflictingRequirement {
                    key: prop.key.clone(),
                    token: token.clone(),
                }
                .into());
            }
            let condition = resolve_token(&prop.key, token, &ranges)?;
            tracing::debug!(
                key = %prop.key,
                on = %condition.key,
                value = %condition.value,
                "resolved conditional requirement"
            );
            prop.condition = Some(condition);
        }

        match &mut prop.value {
            RawValue::Object(obj) => resolve_conditions(obj)?,
            RawValue::Array(RawElement::Object { object, .. }) => resolve_conditions(object)?,
            _ => {}
        }
    }
    Ok(())
}

fn resolve_token(
    key: &str,
    token: &str,
    ranges: &[(String, Vec<Value>)],
) -> Result<RequiredIf, SemanticError> {
    let value = literal::parse_token(token);
    let candidates: Vec<&str> = ranges
        .iter()
        .filter(|(sibling, range)| sibling != key && literal::contains_literal(range, &value))
        .map(|(sibling, _)| sibling.as_str())
        .collect();

    match candidates.as_slice() {
        [sibling] => Ok(RequiredIf {
            key: (*sibling).to_owned(),
            value,
        }),
        [] => Err(SemanticError::UnresolvedCondition {
            key: key.to_owned(),
            token: token.to_owned(),
        }),
        many => Err(SemanticError::AmbiguousCondition {
            key: key.to_owned(),
            token: token.to_owned(),
            candidates: many.iter().map(|s| (*s).to_owned()).collect(),
        }),
    }
}

fn check_duplicate_keys(obj: &RawObject) -> Result<(), SemanticError> {
    let mut seen: HashMap<&str, u32> = HashMap::new();
    for prop in &obj.properties {
        if let Some(first_line) = seen.get(prop.key.as_str()) {
            return Err(SemanticError::DuplicateKey {
                key: prop.key.clone(),
                first_line: *first_line,
            });
        }
        seen.insert(&prop.key, prop.line);
    }
    Ok(())
}
