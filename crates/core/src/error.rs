//! Error types for model parsing and document validation.

use serde_json::{json, Value};
use std::path::PathBuf;

/// A failure while turning spec text into a [`ModelSpec`](crate::ModelSpec).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpecError {
    /// The text does not follow the notation's grammar.
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: u32, message: String },

    /// The text parses, but the model it describes is inconsistent.
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

impl SpecError {
    pub fn syntax(line: u32, message: impl Into<String>) -> Self {
        SpecError::Syntax {
            line,
            message: message.into(),
        }
    }

    pub fn to_json_value(&self) -> Value {
        match self {
            SpecError::Syntax { line, message } => json!({
                "kind": "syntax",
                "line": line,
                "message": message,
            }),
            SpecError::Semantic(e) => json!({
                "kind": "semantic",
                "key": e.key(),
                "message": e.to_string(),
            }),
        }
    }
}

/// Model-definition errors found after the grammar has accepted the text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SemanticError {
    #[error("cannot resolve conditional-required token '{token}' for key '{key}': no sibling vocabulary contains it")]
    UnresolvedCondition { key: String, token: String },

    #[error("ambiguous conditional-required token '{token}' for key '{key}': found in the vocabularies of {candidates:?}")]
    AmbiguousCondition {
        key: String,
        token: String,
        candidates: Vec<String>,
    },

    #[error("key '{key}' is declared both required and required if '{token}'")]
    ConflictingRequirement { key: String, token: String },

    #[error("invalid fixed vocabulary for key '{key}': {message}")]
    InvalidVocabulary { key: String, message: String },

    #[error("'required if' on key '{key}' is not followed by a value")]
    MissingConditionToken { key: String },

    #[error("duplicate key '{key}' first declared at line {first_line}")]
    DuplicateKey { key: String, first_line: u32 },
}

impl SemanticError {
    /// The property the error is about.
    pub fn key(&self) -> &str {
        match self {
            SemanticError::UnresolvedCondition { key, .. }
            | SemanticError::AmbiguousCondition { key, .. }
            | SemanticError::ConflictingRequirement { key, .. }
            | SemanticError::InvalidVocabulary { key, .. }
            | SemanticError::MissingConditionToken { key }
            | SemanticError::DuplicateKey { key, .. } => key,
        }
    }
}

/// A document that does not conform to a model.
///
/// `key` is the dotted path of the offending property from the document
/// root, e.g. `identity.submitter` or `resources[2].url`. `description` is
/// the property's description from the spec, when it has one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("document is not well-formed JSON: {message}")]
    DocumentSyntax { message: String },

    #[error("expected a JSON object at '{key}'")]
    NotAnObject { key: String },

    #[error("key '{key}' not present in model spec")]
    UnknownKey { key: String },

    #[error("missing required key '{key}'{}", describe(.description))]
    MissingRequiredKey {
        key: String,
        description: Option<String>,
    },

    #[error("key '{key}' is required if '{condition_key}' is set to {condition_value}{}", describe(.description))]
    MissingConditionalKey {
        key: String,
        condition_key: String,
        condition_value: Value,
        description: Option<String>,
    },

    #[error("value for '{key}' is of wrong type, spec defines '{key}' of type {expected}{}", describe(.description))]
    TypeMismatch {
        key: String,
        expected: String,
        description: Option<String>,
    },

    #[error("mismatch value for '{key}', expecting {expected}{}", describe(.description))]
    ValueMismatch {
        key: String,
        expected: Value,
        description: Option<String>,
    },

    #[error("invalid value for '{key}', expecting one of {}{}", list(.allowed), describe(.description))]
    RangeViolation {
        key: String,
        allowed: Vec<Value>,
        description: Option<String>,
    },

    #[error("conditionally required property '{key}' is present without meeting the required condition: '{condition_key}' must be {condition_value} yet it is {}{}", .actual.as_ref().map_or_else(|| "absent".to_owned(), Value::to_string), describe(.description))]
    ConditionalPresenceViolation {
        key: String,
        condition_key: String,
        condition_value: Value,
        actual: Option<Value>,
        description: Option<String>,
    },
}

fn describe(description: &Option<String>) -> String {
    match description {
        Some(d) => format!(": {}", d),
        None => String::new(),
    }
}

fn list(values: &[Value]) -> String {
    let items: Vec<String> = values.iter().map(Value::to_string).collect();
    format!("[{}]", items.join(", "))
}

impl ValidationError {
    /// Offending key path, if the error concerns a specific property.
    pub fn key(&self) -> Option<&str> {
        match self {
            ValidationError::DocumentSyntax { .. } => None,
            ValidationError::NotAnObject { key }
            | ValidationError::UnknownKey { key }
            | ValidationError::MissingRequiredKey { key, .. }
            | ValidationError::MissingConditionalKey { key, .. }
            | ValidationError::TypeMismatch { key, .. }
            | ValidationError::ValueMismatch { key, .. }
            | ValidationError::RangeViolation { key, .. }
            | ValidationError::ConditionalPresenceViolation { key, .. } => Some(key),
        }
    }

    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::DocumentSyntax { .. } => "DocumentSyntax",
            ValidationError::NotAnObject { .. } => "NotAnObject",
            ValidationError::UnknownKey { .. } => "UnknownKey",
            ValidationError::MissingRequiredKey { .. } => "MissingRequiredKey",
            ValidationError::MissingConditionalKey { .. } => "MissingConditionalKey",
            ValidationError::TypeMismatch { .. } => "TypeMismatch",
            ValidationError::ValueMismatch { .. } => "ValueMismatch",
            ValidationError::RangeViolation { .. } => "RangeViolation",
            ValidationError::ConditionalPresenceViolation { .. } => {
                "ConditionalPresenceViolation"
            }
        }
    }

    pub fn to_json_value(&self) -> Value {
        json!({
            "kind": self.kind(),
            "key": self.key(),
            "message": self.to_string(),
        })
    }
}

/// A failure while writing extracted models to disk.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("cannot create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write model file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("doc_type '{doc_type}' cannot be used as a file name")]
    InvalidName { doc_type: String },
}

impl ExtractError {
    pub fn to_json_value(&self) -> Value {
        json!({
            "kind": "extract",
            "message": self.to_string(),
        })
    }
}
