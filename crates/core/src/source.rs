//! Spec text preparation and file reading.
//!
//! Published specs are typed in word processors, so keys and literals often
//! carry typographic quotes, and every model ends with an `"X_xxx"`
//! placeholder that stands for "any extension key". Both are dealt with here,
//! before the lexer sees the text.

use std::path::Path;

/// Prefix of the placeholder line for extension keys.
const EXTENSION_PLACEHOLDER: &str = "\"X_xxx";

/// Normalize smart quotes and strip `X_xxx` placeholder declarations.
pub fn prepare(text: &str) -> String {
    let text = text.replace(['\u{201C}', '\u{201D}'], "\"");
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        match line.find(EXTENSION_PLACEHOLDER) {
            Some(pos) => {
                let kept = &line[..pos];
                if !kept.trim().is_empty() {
                    out.push_str(kept.trim_end());
                    out.push('\n');
                }
            }
            None => out.push_str(line),
        }
    }
    out
}

/// Read a UTF-8 spec file and [`prepare`] its contents.
pub fn read_spec(path: &Path) -> Result<String, std::io::Error> {
    let text = std::fs::read_to_string(path)?;
    Ok(prepare(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smart_quotes_become_plain() {
        assert_eq!(
            prepare("{\u{201C}doc_type\u{201D}: string}"),
            "{\"doc_type\": string}"
        );
    }

    #[test]
    fn extension_placeholder_line_is_dropped() {
        let src = "{\n  \"a\": string,\n  \"X_xxx\": ?????  // extensions\n}\n";
        assert_eq!(prepare(src), "{\n  \"a\": string,\n}\n");
    }

    #[test]
    fn extension_placeholder_with_smart_quotes_is_dropped() {
        let src = "{\n  \"a\": string,\n  \u{201C}X_xxx\u{201D}: ?????\n}";
        assert_eq!(prepare(src), "{\n  \"a\": string,\n}");
    }

    #[test]
    fn read_spec_prepares_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model");
        std::fs::write(&path, "{\u{201C}a\u{201D}: string}").unwrap();
        assert_eq!(read_spec(&path).unwrap(), "{\"a\": string}");
    }
}
