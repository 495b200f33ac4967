//! Pyrite Parse - reference parser for the expression subset.
//!
//! Turns source bytes into a [`ParsedExpr`]: an arena of expression nodes
//! plus the root id. The grammar covers literals, names, calls and the six
//! binary operators with Python precedence. Anything else is a
//! `SyntaxError`; the supported AST subset is decided downstream.

mod grammar;
mod lexer;

use pyrite_ir::{ParsedExpr, Span};
use pyrite_value::{syntax_error, EvalError};

pub use lexer::{lex, Token, TokenKind};

use grammar::Parser;

/// Parse one expression from `source`.
///
/// The input must be UTF-8 and contain exactly one expression, optionally
/// surrounded by whitespace and `#` comments.
pub fn parse(source: &[u8]) -> Result<ParsedExpr, EvalError> {
    let text = std::str::from_utf8(source).map_err(|err| {
        let at = err.valid_up_to();
        let span = Span::try_from_range(at..at + 1).unwrap_or(Span::DUMMY);
        syntax_error("source is not valid UTF-8", span)
    })?;

    let tokens = lex(text)?;
    let mut parser = Parser::new(&tokens, text.len());
    let root = parser.parse_expr()?;
    parser.expect_eof()?;
    Ok(ParsedExpr::new(parser.arena, root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use pyrite_value::ErrorCategory;

    #[test]
    fn rejects_invalid_utf8() {
        let err = parse(b"1 + \xff").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::SyntaxError);
        assert_eq!(err.span, Some(Span::new(4, 5)));
    }

    #[test]
    fn rejects_empty_input() {
        for source in ["", "   ", "# only a comment"] {
            let err = parse(source.as_bytes()).unwrap_err();
            assert_eq!(err.category(), ErrorCategory::SyntaxError, "{source:?}");
        }
    }
}
