//! Literal values written in spec text: fixed values and the items of a
//! `fixed vocabulary [...]` list.
//!
//! Only primitive tokens are accepted. A vocabulary list is parsed item by
//! item; anything that is not a quoted string or a bare word is rejected.

use serde_json::Value;

/// Interpret a bare word: `true`, `false`, `null` and JSON numbers keep their
/// JSON meaning, everything else is a string.
pub fn parse_literal(word: &str) -> Value {
    match serde_json::from_str::<Value>(word) {
        Ok(v @ (Value::Bool(_) | Value::Null | Value::Number(_))) => v,
        _ => Value::String(word.to_owned()),
    }
}

/// Interpret a condition token from `required if <token>`: quoted tokens are
/// strings, bare ones go through [`parse_literal`].
pub fn parse_token(token: &str) -> Value {
    let quoted = token.len() >= 2
        && ((token.starts_with('"') && token.ends_with('"'))
            || (token.starts_with('\'') && token.ends_with('\'')));
    if quoted {
        Value::String(token[1..token.len() - 1].to_owned())
    } else {
        parse_literal(token)
    }
}

/// Equality of a document value and a spec literal. Numbers compare by
/// numeric value, so `1` and `1.0` are the same literal.
pub fn literal_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Whether `value` is one of `range`, under [`literal_eq`].
pub fn contains_literal(range: &[Value], value: &Value) -> bool {
    range.iter().any(|item| literal_eq(item, value))
}

fn is_bare_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '-' | '+' | ':' | '/')
}

/// Parse `[a, "b c", 'd', 1, true]` into its items.
///
/// Items are separated by commas and/or whitespace. The list must be
/// non-empty and contain no nested structure.
pub fn parse_literal_list(text: &str) -> Result<Vec<Value>, String> {
    let text = text.trim();
    let inner = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| format!("expected a bracketed list, got '{}'", text))?;

    let chars: Vec<char> = inner.chars().collect();
    let mut pos = 0usize;
    let mut items = Vec::new();

    while pos < chars.len() {
        let c = chars[pos];
        if c.is_whitespace() || c == ',' {
            pos += 1;
            continue;
        }

        if c == '"' || c == '\'' {
            let quote = c;
            pos += 1;
            let mut s = String::new();
            loop {
                if pos >= chars.len() {
                    return Err(format!("unterminated quoted literal {}{}", quote, s));
                }
                let sc = chars[pos];
                if sc == '\\' && pos + 1 < chars.len() {
                    s.push(chars[pos + 1]);
                    pos += 2;
                    continue;
                }
                pos += 1;
                if sc == quote {
                    break;
                }
                s.push(sc);
            }
            items.push(Value::String(s));
            continue;
        }

        if is_bare_char(c) {
            let start = pos;
            while pos < chars.len() && is_bare_char(chars[pos]) {
                pos += 1;
            }
            let word: String = chars[start..pos].iter().collect();
            items.push(parse_literal(&word));
            continue;
        }

        return Err(format!("unexpected character '{}' in list", c));
    }

    if items.is_empty() {
        return Err("empty vocabulary".to_owned());
    }
    Ok(items)
}
