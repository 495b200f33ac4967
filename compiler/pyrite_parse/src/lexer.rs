//! Tokenizer for the expression subset.
//!
//! Works on bytes: every token-significant character is ASCII, and the
//! bytes of a multi-byte UTF-8 sequence are all `>= 0x80`, so they can only
//! legitimately appear inside string literals, which are sliced as `&str`.

use pyrite_ir::Span;
use pyrite_value::{syntax_error, EvalError};

/// Token kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Unsigned so that `-9223372036854775808` can be folded by the parser.
    Int(u64),
    Float(f64),
    Str(String),
    Ident(String),
    True,
    False,
    None,
    Plus,
    Minus,
    Star,
    Slash,
    SlashSlash,
    Percent,
    LParen,
    RParen,
    Comma,
    Eof,
}

impl TokenKind {
    /// Short description for error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Int(n) => format!("integer `{n}`"),
            TokenKind::Float(x) => format!("float `{x}`"),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Ident(name) => format!("name `{name}`"),
            TokenKind::True => "`True`".to_string(),
            TokenKind::False => "`False`".to_string(),
            TokenKind::None => "`None`".to_string(),
            TokenKind::Plus => "`+`".to_string(),
            TokenKind::Minus => "`-`".to_string(),
            TokenKind::Star => "`*`".to_string(),
            TokenKind::Slash => "`/`".to_string(),
            TokenKind::SlashSlash => "`//`".to_string(),
            TokenKind::Percent => "`%`".to_string(),
            TokenKind::LParen => "`(`".to_string(),
            TokenKind::RParen => "`)`".to_string(),
            TokenKind::Comma => "`,`".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Tokenize `source`. The result always ends with a single `Eof` token.
pub fn lex(source: &str) -> Result<Vec<Token>, EvalError> {
    if u32::try_from(source.len()).is_err() {
        return Err(syntax_error("source exceeds 4 GiB", Span::DUMMY));
    }
    Lexer::new(source).run()
}

struct Lexer<'src> {
    src: &'src str,
    bytes: &'src [u8],
    pos: usize,
    tokens: Vec<Token>,
}

#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

#[inline]
fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Span for a byte range already known to fit in `u32`.
#[inline]
fn span(start: usize, end: usize) -> Span {
    Span::try_from_range(start..end).unwrap_or(Span::DUMMY)
}

impl<'src> Lexer<'src> {
    fn new(src: &'src str) -> Self {
        Lexer {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            tokens: Vec::with_capacity(src.len() / 2 + 1),
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token {
            kind,
            span: span(start, self.pos),
        });
    }

    fn run(mut self) -> Result<Vec<Token>, EvalError> {
        while let Some(b) = self.peek() {
            let start = self.pos;
            match b {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'#' => self.skip_comment(),
                b'0'..=b'9' => self.lex_number()?,
                b'.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                    self.lex_number()?;
                }
                b'\'' | b'"' => self.lex_string(b)?,
                b if is_ident_start(b) => self.lex_ident(),
                b'/' if self.peek_at(1) == Some(b'/') => {
                    self.pos += 2;
                    self.push(TokenKind::SlashSlash, start);
                }
                b'+' | b'-' | b'*' | b'/' | b'%' | b'(' | b')' | b',' => {
                    self.pos += 1;
                    let kind = match b {
                        b'+' => TokenKind::Plus,
                        b'-' => TokenKind::Minus,
                        b'*' => TokenKind::Star,
                        b'/' => TokenKind::Slash,
                        b'%' => TokenKind::Percent,
                        b'(' => TokenKind::LParen,
                        b')' => TokenKind::RParen,
                        _ => TokenKind::Comma,
                    };
                    self.push(kind, start);
                }
                _ => return Err(self.unexpected_char(start)),
            }
        }
        let end = self.pos;
        self.push(TokenKind::Eof, end);
        Ok(self.tokens)
    }

    fn skip_comment(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn unexpected_char(&self, start: usize) -> EvalError {
        let ch = self.src[start..].chars().next().unwrap_or('\u{fffd}');
        syntax_error(
            format!("invalid character {ch:?}"),
            span(start, start + ch.len_utf8()),
        )
    }

    fn eat_digits(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() || b == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn lex_number(&mut self) -> Result<(), EvalError> {
        let start = self.pos;
        let mut is_float = false;

        self.eat_digits();
        if self.peek() == Some(b'.') {
            is_float = true;
            self.pos += 1;
            self.eat_digits();
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some(b'+' | b'-')));
            if self.peek_at(1 + sign).is_some_and(|b| b.is_ascii_digit()) {
                is_float = true;
                self.pos += 1 + sign;
                self.eat_digits();
            }
        }
        if self.peek().is_some_and(is_ident_continue) {
            self.pos += 1;
            return Err(syntax_error("invalid decimal literal", span(start, self.pos)));
        }

        let text: String = self.src[start..self.pos]
            .chars()
            .filter(|&c| c != '_')
            .collect();
        let kind = if is_float {
            let value = text
                .parse::<f64>()
                .map_err(|_| syntax_error("invalid float literal", span(start, self.pos)))?;
            TokenKind::Float(value)
        } else {
            let value = text.parse::<u64>().map_err(|_| {
                syntax_error("integer literal too large", span(start, self.pos))
            })?;
            TokenKind::Int(value)
        };
        self.push(kind, start);
        Ok(())
    }

    fn lex_string(&mut self, quote: u8) -> Result<(), EvalError> {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        let mut segment = self.pos;

        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    return Err(syntax_error(
                        "unterminated string literal",
                        span(start, self.pos),
                    ));
                }
                Some(b) if b == quote => {
                    value.push_str(&self.src[segment..self.pos]);
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    value.push_str(&self.src[segment..self.pos]);
                    let Some(escaped) = self.peek_at(1) else {
                        self.pos += 1;
                        continue;
                    };
                    match escaped {
                        b'n' => value.push('\n'),
                        b't' => value.push('\t'),
                        b'r' => value.push('\r'),
                        b'0' => value.push('\0'),
                        b'\\' => value.push('\\'),
                        b'\'' => value.push('\''),
                        b'"' => value.push('"'),
                        // Unknown escapes are kept verbatim; the next segment
                        // starts at the escaped character.
                        _ => {
                            value.push('\\');
                            self.pos += 1;
                            segment = self.pos;
                            continue;
                        }
                    }
                    self.pos += 2;
                    segment = self.pos;
                }
                Some(_) => self.pos += 1,
            }
        }

        self.push(TokenKind::Str(value), start);
        Ok(())
    }

    fn lex_ident(&mut self) {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.pos += 1;
        }
        let kind = match &self.src[start..self.pos] {
            "True" => TokenKind::True,
            "False" => TokenKind::False,
            "None" => TokenKind::None,
            name => TokenKind::Ident(name.to_string()),
        };
        self.push(kind, start);
    }
}
