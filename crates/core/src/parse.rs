//! Spec pipeline: text -> [`ModelSpec`].
//!
//! This is a thin orchestrator that calls each pass module in order.

use crate::error::SpecError;
use crate::lexer;
use crate::model::ModelSpec;
use crate::parser;
use crate::pass1_directives::{self, DirectiveScanner};
use crate::pass2_describe;
use crate::pass3_conditions;
use crate::pass4_types;
use crate::source;
use std::sync::OnceLock;

/// Parses spec text into models. Holds the compiled directive scanner, so
/// build one and reuse it.
#[derive(Debug, Clone, Default)]
pub struct ModelParser {
    scanner: DirectiveScanner,
}

impl ModelParser {
    pub fn new() -> Self {
        ModelParser {
            scanner: DirectiveScanner::new(),
        }
    }

    /// Parse one model, or return the first error encountered.
    pub fn parse(&self, text: &str) -> Result<ModelSpec, SpecError> {
        // Pass 0: source preparation and lexing
        let prepared = source::prepare(text);
        let tokens = lexer::lex(&prepared)?;
        tracing::debug!(tokens = tokens.len(), "lexed spec");

        let mut root = parser::parse(&tokens)?;
        tracing::debug!(properties = root.properties.len(), "parsed raw tree");

        // Pass 1: comment directives
        pass1_directives::extract_directives(&mut root, &self.scanner)?;

        // Pass 2: descriptions
        pass2_describe::describe(&mut root);

        // Pass 3: conditional requirements
        pass3_conditions::resolve_conditions(&mut root)?;

        // Pass 4: typed model
        let model = pass4_types::resolve_types(root);
        tracing::debug!(name = ?model.name(), properties = model.len(), "resolved model");
        Ok(model)
    }
}

/// Parse with a process-wide [`ModelParser`].
pub fn parse(text: &str) -> Result<ModelSpec, SpecError> {
    static DEFAULT: OnceLock<ModelParser> = OnceLock::new();
    DEFAULT.get_or_init(ModelParser::new).parse(text)
}
