#![allow(clippy::result_large_err)]
//! lrmodel-core: Learning Registry data-model parser and document validator.
//!
//! Turns a model spec written in the registry's annotated JSON notation
//! into a [`ModelSpec`], and checks JSON documents against it.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`parse()`] / [`ModelParser`] -- spec text to model
//! - [`validate()`] / [`validate_str()`] -- check a document against a model
//! - [`to_json()`] -- the JSON form of a model
//! - [`extract_models()`] -- pull every model out of a larger spec corpus
//! - [`SpecError`], [`ValidationError`], [`ExtractError`]
//!
//! Individual pass entry functions are also re-exported for selective
//! pipeline execution.

pub mod ast;
pub mod error;
pub mod extract;
pub mod lexer;
pub mod literal;
pub mod model;
pub mod parse;
pub mod parser;
pub mod pass1_directives;
pub mod pass2_describe;
pub mod pass3_conditions;
pub mod pass4_types;
pub mod pass5_validate;
pub mod pass6_serialize;
pub mod source;

// ── Convenience re-exports: key types ────────────────────────────────

pub use error::{ExtractError, SemanticError, SpecError, ValidationError};
pub use extract::ExtractedModel;
pub use model::{ElementSpec, JsonType, ModelSpec, PropertySpec, RequiredIf, ValueSpec};
pub use pass1_directives::DirectiveScanner;

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use extract::{extract_models, write_models};
pub use parse::{parse, ModelParser};
pub use pass1_directives::extract_directives;
pub use pass2_describe::describe;
pub use pass3_conditions::resolve_conditions;
pub use pass4_types::resolve_types;
pub use pass5_validate::{validate, validate_str, EXTENSION_PREFIX};
pub use pass6_serialize::{to_json, to_json_string};
pub use source::{prepare, read_spec};
