//! Bulk model extraction from a spec corpus.
//!
//! A published spec interleaves prose with model blocks. Every balanced
//! top-level `{...}` span is tried as a model; the ones that parse and name
//! a `doc_type` are kept verbatim.

use crate::error::ExtractError;
use crate::parse::ModelParser;
use std::path::{Path, PathBuf};

/// One model found in a corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedModel {
    pub doc_type: String,
    /// The model's text exactly as it appears in the corpus.
    pub text: String,
}

/// Find every model in `corpus`, in order of appearance.
pub fn extract_models(corpus: &str) -> Vec<ExtractedModel> {
    let parser = ModelParser::new();
    let mut models = Vec::new();
    for (start, end) in top_level_spans(corpus) {
        let text = &corpus[start..end];
        let line = corpus[..start].matches('\n').count() + 1;
        match parser.parse(text) {
            Ok(model) => match model.name() {
                Some(name) => {
                    tracing::debug!(doc_type = %name, line, "extracted model");
                    models.push(ExtractedModel {
                        doc_type: name.to_owned(),
                        text: text.to_owned(),
                    });
                }
                None => tracing::debug!(line, "skipping block without a doc_type"),
            },
            Err(e) => tracing::debug!(line, error = %e, "skipping block that is not a model"),
        }
    }
    models
}

/// Write each model to `dest_dir/<doc_type>`, creating the directory if
/// needed. Returns the written paths.
pub fn write_models(
    models: &[ExtractedModel],
    dest_dir: &Path,
) -> Result<Vec<PathBuf>, ExtractError> {
    std::fs::create_dir_all(dest_dir).map_err(|source| ExtractError::CreateDir {
        path: dest_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(models.len());
    for m in models {
        if !is_file_name(&m.doc_type) {
            return Err(ExtractError::InvalidName {
                doc_type: m.doc_type.clone(),
            });
        }
        let path = dest_dir.join(&m.doc_type);
        std::fs::write(&path, &m.text).map_err(|source| ExtractError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote model spec");
        written.push(path);
    }
    Ok(written)
}

fn is_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

/// End of a `//` comment whose body starts at `i`: the newline, or a `}`
/// that closes no brace opened inside the comment. Matches the lexer, so
/// `{string // required}` closes its brace.
fn comment_end(bytes: &[u8], mut i: usize) -> usize {
    let mut depth = 0usize;
    while i < bytes.len() && bytes[i] != b'\n' {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' if depth == 0 => break,
            b'}' => depth -= 1,
            _ => {}
        }
        i += 1;
    }
    i
}

/// Byte ranges of balanced top-level brace spans. Braces inside quoted
/// strings and balanced braces inside `//` comments do not count.
fn top_level_spans(text: &str) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        if depth == 0 {
            if b == b'{' {
                start = i;
                depth = 1;
            }
            i += 1;
            continue;
        }
        match b {
            b'"' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'"' && bytes[i] != b'\n' {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = comment_end(bytes, i + 2);
                continue;
            }
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    spans.push((start, i + 1));
                }
            }
            _ => {}
        }
        i += 1;
    }
    spans
}
