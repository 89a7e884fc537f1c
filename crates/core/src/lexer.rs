use crate::error::SpecError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare word: type names, unquoted literals, numbers
    Word(String),
    /// Quoted string (content without quotes, escapes resolved)
    Str(String),
    /// A run of `//` line comments, markers removed, lines joined with '\n'
    Comment(String),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,
    Eof,
}

#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    pub line: u32,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '+')
}

pub fn lex(src: &str) -> Result<Vec<Spanned>, SpecError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = src.chars().collect();
    let mut pos = 0usize;
    let mut line: u32 = 1;

    while pos < chars.len() {
        let c = chars[pos];

        if c == '/' && pos + 1 < chars.len() && chars[pos + 1] == '/' {
            let tok_line = line;
            let (text, next, lines_crossed) = lex_comment(&chars, pos);
            tokens.push(Spanned {
                token: Token::Comment(text),
                line: tok_line,
            });
            pos = next;
            line += lines_crossed;
            continue;
        }

        if c.is_whitespace() {
            if c == '\n' {
                line += 1;
            }
            pos += 1;
            continue;
        }

        let tok_line = line;

        if c == '"' {
            pos += 1;
            let mut s = String::new();
            loop {
                if pos >= chars.len() || chars[pos] == '\n' {
                    return Err(SpecError::syntax(tok_line, "unterminated string literal"));
                }
                let sc = chars[pos];
                if sc == '"' {
                    pos += 1;
                    break;
                }
                if sc == '\\' {
                    pos += 1;
                    if pos >= chars.len() {
                        return Err(SpecError::syntax(tok_line, "unterminated escape in string"));
                    }
                    match chars[pos] {
                        '"' => s.push('"'),
                        '\\' => s.push('\\'),
                        'n' => s.push('\n'),
                        't' => s.push('\t'),
                        other => {
                            s.push('\\');
                            s.push(other);
                        }
                    }
                    pos += 1;
                    continue;
                }
                s.push(sc);
                pos += 1;
            }
            tokens.push(Spanned {
                token: Token::Str(s),
                line: tok_line,
            });
            continue;
        }

        let punct = match c {
            '{' => Some(Token::LBrace),
            '}' => Some(Token::RBrace),
            '[' => Some(Token::LBracket),
            ']' => Some(Token::RBracket),
            ':' => Some(Token::Colon),
            ',' => Some(Token::Comma),
            _ => None,
        };
        if let Some(token) = punct {
            tokens.push(Spanned {
                token,
                line: tok_line,
            });
            pos += 1;
            continue;
        }

        if is_word_char(c) {
            let start = pos;
            while pos < chars.len() && is_word_char(chars[pos]) {
                pos += 1;
            }
            let word: String = chars[start..pos].iter().collect();
            tokens.push(Spanned {
                token: Token::Word(word),
                line: tok_line,
            });
            continue;
        }

        return Err(SpecError::syntax(
            tok_line,
            format!("unexpected character '{}'", c),
        ));
    }

    tokens.push(Spanned {
        token: Token::Eof,
        line,
    });
    Ok(tokens)
}

/// Lex a run of line comments starting at `start` (which points at `//`).
///
/// A single comment line ends at the newline, or at a `}` that closes no
/// brace opened inside the comment; the `}` is left for the main lexer.
/// Returns the joined text, the position after the run, and the number of
/// newlines consumed.
fn lex_comment(chars: &[char], start: usize) -> (String, usize, u32) {
    let mut lines: Vec<String> = Vec::new();
    let mut pos = start;
    let mut crossed = 0u32;

    loop {
        pos += 2;
        let body_start = pos;
        let mut depth = 0u32;
        while pos < chars.len() && chars[pos] != '\n' {
            match chars[pos] {
                '{' => depth += 1,
                '}' if depth == 0 => break,
                '}' => depth -= 1,
                _ => {}
            }
            pos += 1;
        }
        let body: String = chars[body_start..pos].iter().collect();
        lines.push(body.trim().to_owned());

        if pos < chars.len() && chars[pos] == '}' {
            break;
        }

        // Another `//` after only whitespace continues the run.
        let mut look = pos;
        let mut newlines = 0u32;
        while look < chars.len() && chars[look].is_whitespace() {
            if chars[look] == '\n' {
                newlines += 1;
            }
            look += 1;
        }
        if look + 1 < chars.len() && chars[look] == '/' && chars[look + 1] == '/' {
            pos = look;
            crossed += newlines;
        } else {
            break;
        }
    }

    (lines.join("\n"), pos, crossed)
}
