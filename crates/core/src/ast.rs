//! Raw parse tree produced by the parser.
//!
//! The tree mirrors the nesting of the spec text. Comment text is kept
//! verbatim (minus the `//` markers); the pass modules annotate each
//! property in place before `pass4_types` turns the tree into the final
//! [`ModelSpec`](crate::model::ModelSpec).

use crate::model::{JsonType, RequiredIf};
use serde_json::Value;

/// `{ ... }` in the spec text.
#[derive(Debug, Clone)]
pub struct RawObject {
    pub properties: Vec<RawProperty>,
    pub line: u32,
}

#[derive(Debug, Clone)]
pub struct RawProperty {
    pub key: String,
    pub line: u32,
    pub key_comment: Option<String>,
    pub value: RawValue,
    pub value_comment: Option<String>,

    // Annotations filled in by the passes.
    /// Pass 1
    pub directives: Directives,
    /// Pass 2
    pub description: Option<String>,
    /// Pass 3
    pub condition: Option<RequiredIf>,
}

impl RawProperty {
    pub fn new(
        key: String,
        line: u32,
        key_comment: Option<String>,
        value: RawValue,
        value_comment: Option<String>,
    ) -> Self {
        RawProperty {
            key,
            line,
            key_comment,
            value,
            value_comment,
            directives: Directives::default(),
            description: None,
            condition: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum RawValue {
    /// A type name: `string`, `"number"`, or braced `{string}`
    Type(JsonType),
    /// A literal the document must reproduce exactly
    Defined(Value),
    /// `[ ... ]`
    Array(RawElement),
    /// `{ some example words }` -- documentation only
    Inline(String),
    Object(RawObject),
}

#[derive(Debug, Clone)]
pub enum RawElement {
    Type(JsonType),
    Object {
        comment: Option<String>,
        object: RawObject,
        /// Pass 2
        description: Option<String>,
    },
}

/// Metadata carried in a property's value comment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directives {
    pub value_range: Option<Vec<Value>>,
    pub required: bool,
    /// Unresolved `required if <token>`; resolved in pass 3
    pub required_if: Option<String>,
    pub immutable: bool,
}
