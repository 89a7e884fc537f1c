//! Pass 2: Descriptions -- collapse key and value comments into a single
//! description per property.

use crate::ast::*;

/// Fold comments into `description` at every nesting level.
pub fn describe(root: &mut RawObject) {
    for prop in &mut root.properties {
        prop.description = fold_comments(prop.key_comment.as_deref(), prop.value_comment.as_deref());
        match &mut prop.value {
            RawValue::Object(obj) => describe(obj),
            RawValue::Array(RawElement::Object {
                comment,
                object,
                description,
            }) => {
                *description = fold_comments(None, comment.as_deref());
                describe(object);
            }
            _ => {}
        }
    }
}

/// The key comment becomes the first sentence, followed by the value
/// comment. `None` when there is no comment text at all.
pub fn fold_comments(key_comment: Option<&str>, value_comment: Option<&str>) -> Option<String> {
    let key = key_comment.map(collapse).filter(|s| !s.is_empty());
    let value = value_comment.map(collapse).filter(|s| !s.is_empty());
    match (key, value) {
        (None, None) => None,
        (Some(k), None) => Some(format!("{}.", k)),
        (None, Some(v)) => Some(v),
        (Some(k), Some(v)) => Some(format!("{}. {}", k, v)),
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
