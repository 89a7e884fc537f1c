//! Recursive-descent parser from tokens to the raw parse tree.
//! Comments are attached to properties verbatim; interpreting them is the
//! passes' job.

use crate::ast::*;
use crate::error::SpecError;
use crate::lexer::{Spanned, Token};
use crate::literal;
use crate::model::JsonType;
use serde_json::Value;

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

/// A parsed value plus comment text found inside its delimiters.
struct ParsedValue {
    value: RawValue,
    /// Leading comment of a nested object; joins the key comment
    key_note: Option<String>,
    /// Comment inside `{string // ...}` or `[ ... ]`; joins the value comment
    value_note: Option<String>,
}

impl ParsedValue {
    fn plain(value: RawValue) -> Self {
        ParsedValue {
            value,
            key_note: None,
            value_note: None,
        }
    }
}

fn join_comments(a: Option<String>, b: Option<String>) -> Option<String> {
    match (a, b) {
        (Some(a), Some(b)) => Some(format!("{}\n{}", a, b)),
        (a, None) => a,
        (None, b) => b,
    }
}

fn type_name(word: &str) -> Option<JsonType> {
    word.parse().ok()
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned]) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn cur(&self) -> &Spanned {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.cur().token
    }

    fn peek_nth(&self, n: usize) -> &Token {
        &self.tokens[(self.pos + n).min(self.tokens.len() - 1)].token
    }

    fn cur_line(&self) -> u32 {
        self.cur().line
    }

    fn advance(&mut self) -> &Spanned {
        let t = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    fn expect_colon(&mut self) -> Result<(), SpecError> {
        if self.peek() == &Token::Colon {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected ':', got {:?}", self.peek())))
        }
    }

    fn expect_lbrace(&mut self) -> Result<u32, SpecError> {
        if self.peek() == &Token::LBrace {
            let line = self.cur_line();
            self.advance();
            Ok(line)
        } else {
            Err(self.err(format!("expected '{{', got {:?}", self.peek())))
        }
    }

    fn err(&self, msg: impl Into<String>) -> SpecError {
        SpecError::syntax(self.cur_line(), msg)
    }

    fn take_str(&mut self) -> Result<String, SpecError> {
        if let Token::Str(s) = self.peek().clone() {
            self.advance();
            Ok(s)
        } else {
            Err(self.err(format!("expected quoted key or '}}', got {:?}", self.peek())))
        }
    }

    /// Consume any comment tokens at the cursor.
    fn take_comment(&mut self) -> Option<String> {
        let mut out = None;
        while let Token::Comment(text) = self.peek().clone() {
            self.advance();
            out = join_comments(out, Some(text));
        }
        out
    }

    // -- Objects ------------------------------------------------

    fn parse_root(&mut self) -> Result<RawObject, SpecError> {
        self.take_comment();
        let line = self.expect_lbrace()?;
        let (root, _) = self.parse_object_body(line)?;
        self.take_comment();
        if self.peek() != &Token::Eof {
            return Err(self.err(format!(
                "unexpected {:?} after the closing '}}' of the model",
                self.peek()
            )));
        }
        Ok(root)
    }

    /// Parse properties up to and including the closing `}`. The opening
    /// `{` has been consumed. Returns the object and any comment that
    /// directly follows the `{`.
    fn parse_object_body(&mut self, line: u32) -> Result<(RawObject, Option<String>), SpecError> {
        let leading = self.take_comment();
        let mut properties = Vec::new();
        loop {
            match self.peek() {
                Token::RBrace => {
                    self.advance();
                    break;
                }
                Token::Str(_) => properties.push(self.parse_property()?),
                Token::Eof => {
                    return Err(self.err(format!("unterminated object opened at line {}", line)))
                }
                other => {
                    return Err(self.err(format!("expected quoted key or '}}', got {:?}", other)))
                }
            }
        }
        Ok((RawObject { properties, line }, leading))
    }

    fn parse_property(&mut self) -> Result<RawProperty, SpecError> {
        let line = self.cur_line();
        let key = self.take_str()?;
        self.expect_colon()?;
        let key_comment = self.take_comment();
        let parsed = self.parse_value(&key)?;

        let comma = if self.peek() == &Token::Comma {
            self.advance();
            true
        } else {
            false
        };
        let trailing = self.take_comment();
        if !comma && trailing.is_none() && self.peek() != &Token::RBrace {
            return Err(self.err(format!(
                "expected ',' or '}}' after the value of '{}', got {:?}",
                key,
                self.peek()
            )));
        }

        Ok(RawProperty::new(
            key,
            line,
            join_comments(key_comment, parsed.key_note),
            parsed.value,
            join_comments(parsed.value_note, trailing),
        ))
    }

    // -- Values -------------------------------------------------

    fn parse_value(&mut self, key: &str) -> Result<ParsedValue, SpecError> {
        match self.peek().clone() {
            Token::Word(w) => {
                self.advance();
                Ok(ParsedValue::plain(match type_name(&w) {
                    Some(t) => RawValue::Type(t),
                    None => RawValue::Defined(literal::parse_literal(&w)),
                }))
            }
            Token::Str(s) => {
                self.advance();
                Ok(ParsedValue::plain(match type_name(&s) {
                    Some(t) => RawValue::Type(t),
                    None => RawValue::Defined(Value::String(s)),
                }))
            }
            Token::LBracket => self.parse_array(),
            Token::LBrace => self.parse_brace_value(),
            other => Err(self.err(format!("expected a value for '{}', got {:?}", key, other))),
        }
    }

    fn parse_array(&mut self) -> Result<ParsedValue, SpecError> {
        let line = self.cur_line();
        self.advance();
        let before = self.take_comment();

        let element = match self.peek().clone() {
            Token::Word(w) | Token::Str(w) => match type_name(&w) {
                Some(t) => {
                    self.advance();
                    (RawElement::Type(t), before)
                }
                None => {
                    return Err(self.err(format!(
                        "array element must be a type name or an object, got '{}'",
                        w
                    )))
                }
            },
            Token::LBrace => {
                let open = self.expect_lbrace()?;
                let (object, leading) = self.parse_object_body(open)?;
                (
                    RawElement::Object {
                        comment: join_comments(before, leading),
                        object,
                        description: None,
                    },
                    None,
                )
            }
            Token::RBracket => return Err(self.err("array must declare an element type")),
            other => {
                return Err(self.err(format!(
                    "array element must be a type name or an object, got {:?}",
                    other
                )))
            }
        };

        let after = self.take_comment();
        if self.peek() != &Token::RBracket {
            return Err(self.err(format!(
                "expected ']' to close array opened at line {}, got {:?}",
                line,
                self.peek()
            )));
        }
        self.advance();

        let (mut element, mut note) = element;
        match &mut element {
            RawElement::Object { comment, .. } => *comment = join_comments(comment.take(), after),
            RawElement::Type(_) => note = join_comments(note, after),
        }
        Ok(ParsedValue {
            value: RawValue::Array(element),
            key_note: None,
            value_note: note,
        })
    }

    /// `{` starts either a nested object, a braced type (`{string}`), or an
    /// inline example (`{ free words }`).
    fn parse_brace_value(&mut self) -> Result<ParsedValue, SpecError> {
        let mut lookahead = 1;
        while matches!(self.peek_nth(lookahead), Token::Comment(_)) {
            lookahead += 1;
        }
        let is_object = match self.peek_nth(lookahead) {
            Token::RBrace => true,
            Token::Str(_) => self.peek_nth(lookahead + 1) == &Token::Colon,
            _ => false,
        };

        let line = self.expect_lbrace()?;
        if is_object {
            let (object, leading) = self.parse_object_body(line)?;
            return Ok(ParsedValue {
                value: RawValue::Object(object),
                key_note: leading,
                value_note: None,
            });
        }

        let mut words: Vec<String> = Vec::new();
        let mut note = None;
        loop {
            match self.peek().clone() {
                Token::Word(w) | Token::Str(w) => {
                    self.advance();
                    words.push(w);
                }
                Token::Comment(text) => {
                    self.advance();
                    note = join_comments(note, Some(text));
                }
                Token::RBrace => {
                    self.advance();
                    break;
                }
                Token::Eof => {
                    return Err(self.err(format!("unterminated '{{' opened at line {}", line)))
                }
                other => {
                    return Err(self.err(format!(
                        "unexpected {:?} inside braced value opened at line {}",
                        other, line
                    )))
                }
            }
        }

        let value = match words.as_slice() {
            [single] => match type_name(single) {
                Some(t) => RawValue::Type(t),
                None => RawValue::Inline(single.clone()),
            },
            _ => RawValue::Inline(words.join(" ")),
        };
        Ok(ParsedValue {
            value,
            key_note: None,
            value_note: note,
        })
    }
}

pub fn parse(tokens: &[Spanned]) -> Result<RawObject, SpecError> {
    let mut p = Parser::new(tokens);
    p.parse_root()
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
