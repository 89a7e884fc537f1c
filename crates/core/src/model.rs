//! The resolved data model: what a parsed spec says documents must look like.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The five JSON kinds a property can be declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    String,
    Boolean,
    Number,
    Array,
    Object,
}

impl JsonType {
    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Boolean => "boolean",
            JsonType::Number => "number",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }

    /// Whether `value` is of this JSON kind. `null` matches none.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            JsonType::String => value.is_string(),
            JsonType::Boolean => value.is_boolean(),
            JsonType::Number => value.is_number(),
            JsonType::Array => value.is_array(),
            JsonType::Object => value.is_object(),
        }
    }
}

impl FromStr for JsonType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(JsonType::String),
            "boolean" => Ok(JsonType::Boolean),
            "number" => Ok(JsonType::Number),
            "array" => Ok(JsonType::Array),
            "object" => Ok(JsonType::Object),
            _ => Err(()),
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved `required if`: the property is mandatory when the sibling
/// `key` holds `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredIf {
    pub key: String,
    pub value: Value,
}

/// One object scope of a model, in spec-text order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelSpec {
    properties: Vec<PropertySpec>,
}

impl ModelSpec {
    pub fn new(properties: Vec<PropertySpec>) -> Self {
        ModelSpec { properties }
    }

    pub fn get(&self, key: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PropertySpec> {
        self.properties.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// The model's document type: the fixed string value of `doc_type`.
    pub fn name(&self) -> Option<&str> {
        match &self.get("doc_type")?.value {
            ValueSpec::Fixed(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a ModelSpec {
    type Item = &'a PropertySpec;
    type IntoIter = std::slice::Iter<'a, PropertySpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpec {
    pub key: String,
    pub value: ValueSpec,
    pub value_range: Option<Vec<Value>>,
    pub required: bool,
    pub required_if: Option<RequiredIf>,
    pub immutable: bool,
    pub description: Option<String>,
}

impl PropertySpec {
    /// The JSON kind a document value must have. Fixed-value properties
    /// declare a literal instead of a type.
    pub fn value_type(&self) -> Option<JsonType> {
        match &self.value {
            ValueSpec::Scalar(t) => Some(*t),
            ValueSpec::Array(_) => Some(JsonType::Array),
            ValueSpec::Object(_) | ValueSpec::Inline(_) => Some(JsonType::Object),
            ValueSpec::Fixed(_) => None,
        }
    }

    /// The exact literal a document must carry, for fixed-value properties.
    pub fn value_defined(&self) -> Option<&Value> {
        match &self.value {
            ValueSpec::Fixed(v) => Some(v),
            _ => None,
        }
    }

    pub fn nested(&self) -> Option<&ModelSpec> {
        match &self.value {
            ValueSpec::Object(m) => Some(m),
            ValueSpec::Array(ElementSpec::Object { model, .. }) => Some(model),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValueSpec {
    /// Declared by type name only.
    Scalar(JsonType),
    Array(ElementSpec),
    Object(ModelSpec),
    /// A braced example in the spec; an object with no declared structure.
    Inline(String),
    /// A literal the document must reproduce.
    Fixed(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementSpec {
    Type(JsonType),
    Object {
        description: Option<String>,
        model: ModelSpec,
    },
}
