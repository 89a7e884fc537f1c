//! Pass 1: Comment directives -- scan each property's raw value comment for
//! `fixed vocabulary [...]`, `required`, `required if <token>` and
//! `immutable`, and record them on the property.
//!
//! Runs before pass 2 folds the comments into descriptions.

use crate::ast::*;
use crate::error::{SemanticError, SpecError};
use crate::literal;
use regex::Regex;

/// Compiled directive patterns. Build once, share read-only.
#[derive(Debug, Clone)]
pub struct DirectiveScanner {
    vocabulary: Regex,
    required: Regex,
    followed_by_if: Regex,
    required_if: Regex,
    immutable: Regex,
}

impl Default for DirectiveScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveScanner {
    pub fn new() -> Self {
        // The patterns are constants; a failure here is a programming error.
        let re = |p: &str| Regex::new(p).expect("directive pattern is valid");
        DirectiveScanner {
            vocabulary: re(r"\bfixed\s+vocabulary\s*(\[[^\]]*\])"),
            required: re(r"\brequired\b"),
            followed_by_if: re(r"^\s+if\b"),
            required_if: re(r#"\brequired\s+if\b\s*("[^"]*"|'[^']*'|[\p{Alphabetic}\p{N}_.+\-:/]+)?"#),
            immutable: re(r"\bimmutable\b"),
        }
    }

    /// Scan one comment. `key` is only used for error reporting.
    pub fn scan(&self, key: &str, comment: &str) -> Result<Directives, SemanticError> {
        let mut directives = Directives::default();

        if let Some(caps) = self.vocabulary.captures(comment) {
            let list = &caps[1];
            let values = literal::parse_literal_list(list).map_err(|message| {
                SemanticError::InvalidVocabulary {
                    key: key.to_owned(),
                    message,
                }
            })?;
            directives.value_range = Some(values);
        }

        directives.required = self
            .required
            .find_iter(comment)
            .any(|m| !self.followed_by_if.is_match(&comment[m.end()..]));

        if let Some(caps) = self.required_if.captures(comment) {
            let token = caps
                .get(1)
                .ok_or_else(|| SemanticError::MissingConditionToken {
                    key: key.to_owned(),
                })?;
            directives.required_if = Some(token.as_str().to_owned());
        }

        directives.immutable = self.immutable.is_match(comment);

        Ok(directives)
    }
}

/// Annotate every property of `root`, at every nesting level.
pub fn extract_directives(root: &mut RawObject, scanner: &DirectiveScanner) -> Result<(), SpecError> {
    for prop in &mut root.properties {
        if let Some(comment) = &prop.value_comment {
            prop.directives = scanner.scan(&prop.key, comment)?;
        }
        match &mut prop.value {
            RawValue::Object(obj) => extract_directives(obj, scanner)?,
            RawValue::Array(RawElement::Object { object, .. }) => {
                extract_directives(object, scanner)?
            }
            _ => {}
        }
    }
    Ok(())
}
