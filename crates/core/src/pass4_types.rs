//! Pass 4: Type resolution -- turn the annotated raw tree into the typed
//! [`ModelSpec`], normalizing the array and inline encodings.

use crate::ast::*;
use crate::model::{ElementSpec, ModelSpec, PropertySpec, ValueSpec};

pub fn resolve_types(root: RawObject) -> ModelSpec {
    ModelSpec::new(root.properties.into_iter().map(resolve_property).collect())
}

fn resolve_property(prop: RawProperty) -> PropertySpec {
    let value = match prop.value {
        RawValue::Type(t) => ValueSpec::Scalar(t),
        RawValue::Defined(v) => ValueSpec::Fixed(v),
        RawValue::Inline(text) => ValueSpec::Inline(text),
        RawValue::Object(obj) => ValueSpec::Object(resolve_types(obj)),
        RawValue::Array(RawElement::Type(t)) => ValueSpec::Array(ElementSpec::Type(t)),
        RawValue::Array(RawElement::Object {
            object,
            description,
            ..
        }) => ValueSpec::Array(ElementSpec::Object {
            description,
            model: resolve_types(object),
        }),
    };

    PropertySpec {
        key: prop.key,
        value,
        value_range: prop.directives.value_range,
        required: prop.directives.required,
        required_if: prop.condition,
        immutable: prop.directives.immutable,
        description: prop.description,
    }
}
