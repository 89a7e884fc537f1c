//! Pass 6: Model serialization -- the JSON form of a [`ModelSpec`].
//!
//! Keys follow spec-text order. Facts that do not apply to a property are
//! omitted rather than written as `false` or `null`.

use crate::model::{ElementSpec, ModelSpec, PropertySpec, ValueSpec};
use serde_json::{Map, Value};

pub fn to_json(model: &ModelSpec) -> Value {
    let mut out = Map::new();
    for prop in model {
        out.insert(prop.key.clone(), serialize_property(prop));
    }
    Value::Object(out)
}

/// Pretty-printed [`to_json`].
pub fn to_json_string(model: &ModelSpec) -> String {
    // Serializing a `Value` cannot fail.
    serde_json::to_string_pretty(&to_json(model)).unwrap_or_default()
}

fn serialize_property(prop: &PropertySpec) -> Value {
    let mut m = Map::new();
    if let Some(t) = prop.value_type() {
        m.insert("type".to_owned(), Value::String(t.as_str().to_owned()));
    }
    if let Some(v) = prop.value_defined() {
        m.insert("value".to_owned(), v.clone());
    }
    if let Some(range) = &prop.value_range {
        m.insert("valueRange".to_owned(), Value::Array(range.clone()));
    }
    if prop.required {
        m.insert("isRequired".to_owned(), Value::Bool(true));
    }
    if let Some(cond) = &prop.required_if {
        let mut c = Map::new();
        c.insert(cond.key.clone(), cond.value.clone());
        m.insert("isRequiredIf".to_owned(), Value::Object(c));
    }
    if prop.immutable {
        m.insert("isImmutable".to_owned(), Value::Bool(true));
    }
    if let Some(d) = &prop.description {
        m.insert("description".to_owned(), Value::String(d.clone()));
    }

    match &prop.value {
        ValueSpec::Object(nested) => {
            m.insert("properties".to_owned(), to_json(nested));
        }
        ValueSpec::Array(element) => {
            m.insert("items".to_owned(), serialize_element(element));
        }
        ValueSpec::Inline(text) => {
            m.insert("inline".to_owned(), Value::String(text.clone()));
        }
        ValueSpec::Scalar(_) | ValueSpec::Fixed(_) => {}
    }
    Value::Object(m)
}

fn serialize_element(element: &ElementSpec) -> Value {
    let mut m = Map::new();
    match element {
        ElementSpec::Type(t) => {
            m.insert("type".to_owned(), Value::String(t.as_str().to_owned()));
        }
        ElementSpec::Object { description, model } => {
            m.insert("type".to_owned(), Value::String("object".to_owned()));
            m.insert("properties".to_owned(), to_json(model));
            if let Some(d) = description {
                m.insert("description".to_owned(), Value::String(d.clone()));
            }
        }
    }
    Value::Object(m)
}
