//! Recursive-descent expression parser.
//!
//! One function per precedence level, lowest first:
//!
//! ```text
//! expr           := additive
//! additive       := multiplicative (("+" | "-") multiplicative)*
//! multiplicative := unary (("*" | "/" | "//" | "%") unary)*
//! unary          := ("-" | "+") NUMBER | call
//! call           := primary ("(" args? ")")*
//! primary        := INT | FLOAT | STRING | True | False | None | NAME | "(" expr ")"
//! ```

use pyrite_ir::stack::ensure_sufficient_stack;
use pyrite_ir::{BinaryOp, Expr, ExprArena, ExprId, ExprKind, Literal, Span};
use pyrite_value::{syntax_error, EvalError};

use crate::lexer::{Token, TokenKind};

/// Absolute value of `i64::MIN` as `u64` (for negation folding).
const I64_MIN_ABS: u64 = 9_223_372_036_854_775_808;

pub(crate) struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    pub(crate) arena: ExprArena,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(tokens: &'t [Token], source_len: usize) -> Self {
        Parser {
            tokens,
            pos: 0,
            arena: ExprArena::with_capacity(source_len),
        }
    }

    #[inline]
    fn current(&self) -> &Token {
        // The lexer always terminates the stream with `Eof`.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    #[inline]
    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.current().span
    }

    #[inline]
    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    fn unexpected(&self, expected: &str) -> EvalError {
        syntax_error(
            format!(
                "expected {expected}, found {}",
                self.current_kind().describe()
            ),
            self.current_span(),
        )
    }

    fn span_of(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }

    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    fn alloc_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        let span = self.span_of(left).merge(self.span_of(right));
        self.alloc(ExprKind::Binary { op, left, right }, span)
    }

    /// Require that the whole input was consumed.
    pub(crate) fn expect_eof(&self) -> Result<(), EvalError> {
        if self.check(&TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }

    /// Parse an expression.
    ///
    /// Uses `ensure_sufficient_stack` so deeply parenthesized input cannot
    /// overflow the native stack.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, EvalError> {
        ensure_sufficient_stack(|| self.parse_additive())
    }

    /// Parse `+` and `-`.
    fn parse_additive(&mut self) -> Result<ExprId, EvalError> {
        let mut left = self.parse_multiplicative()?;

        while let Some(op) = self.match_additive_op() {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = self.alloc_binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse `*`, `/`, `//`, `%`.
    fn parse_multiplicative(&mut self) -> Result<ExprId, EvalError> {
        let mut left = self.parse_unary()?;

        while let Some(op) = self.match_multiplicative_op() {
            self.advance();
            let right = self.parse_unary()?;
            left = self.alloc_binary(op, left, right);
        }

        Ok(left)
    }

    fn match_additive_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }
    }

    fn match_multiplicative_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::SlashSlash => Some(BinaryOp::FloorDiv),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    /// Parse a signed numeric literal.
    ///
    /// The AST has no unary operator node, so a sign is only accepted in
    /// front of a number and is folded into the constant: `-7` becomes
    /// `Constant(Int(-7))`. This also lets `-9223372036854775808`
    /// (`i64::MIN`) be written directly.
    fn parse_unary(&mut self) -> Result<ExprId, EvalError> {
        let negate = match self.current_kind() {
            TokenKind::Minus => true,
            TokenKind::Plus => false,
            _ => return self.parse_call(),
        };
        let start = self.current_span();
        self.advance();

        let literal_span = self.current_span();
        let span = start.merge(literal_span);
        let literal = match *self.current_kind() {
            TokenKind::Int(n) if negate && n == I64_MIN_ABS => Literal::Int(i64::MIN),
            TokenKind::Int(n) => {
                let value = i64::try_from(n)
                    .map_err(|_| syntax_error("integer literal too large", span))?;
                Literal::Int(if negate { -value } else { value })
            }
            TokenKind::Float(x) => Literal::float(if negate { -x } else { x }),
            _ => {
                return Err(syntax_error(
                    format!(
                        "unary operator is only supported before a number, found {}",
                        self.current_kind().describe()
                    ),
                    literal_span,
                ));
            }
        };
        self.advance();
        Ok(self.alloc(ExprKind::Constant(literal), span))
    }

    /// Parse a primary followed by any number of call suffixes.
    fn parse_call(&mut self) -> Result<ExprId, EvalError> {
        let mut callee = self.parse_primary()?;

        while self.check(&TokenKind::LParen) {
            self.advance();
            let args = self.parse_args()?;
            let end = self.current_span();
            if !self.check(&TokenKind::RParen) {
                return Err(self.unexpected("`,` or `)`"));
            }
            self.advance();

            let span = self.span_of(callee).merge(end);
            let args = self.arena.alloc_expr_list(args);
            callee = self.alloc(ExprKind::Call { callee, args }, span);
        }

        Ok(callee)
    }

    /// Parse a comma-separated argument list up to (not including) `)`.
    fn parse_args(&mut self) -> Result<Vec<ExprId>, EvalError> {
        let mut args = Vec::new();
        while !self.check(&TokenKind::RParen) {
            if args.len() == usize::from(u16::MAX) {
                return Err(syntax_error("too many arguments", self.current_span()));
            }
            args.push(self.parse_expr()?);
            if self.check(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<ExprId, EvalError> {
        let span = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::Int(n) => {
                let value = i64::try_from(*n)
                    .map_err(|_| syntax_error("integer literal too large", span))?;
                ExprKind::Constant(Literal::Int(value))
            }
            TokenKind::Float(x) => ExprKind::Constant(Literal::float(*x)),
            TokenKind::Str(text) => {
                let text = text.clone();
                ExprKind::Constant(Literal::Str(self.arena.intern(&text)))
            }
            TokenKind::True => ExprKind::Constant(Literal::Bool(true)),
            TokenKind::False => ExprKind::Constant(Literal::Bool(false)),
            TokenKind::None => ExprKind::Constant(Literal::None),
            TokenKind::Ident(name) => {
                let name = name.clone();
                ExprKind::Ident(self.arena.intern(&name))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                if !self.check(&TokenKind::RParen) {
                    return Err(self.unexpected("`)`"));
                }
                self.advance();
                return Ok(inner);
            }
            _ => return Err(self.unexpected("an expression")),
        };
        self.advance();
        Ok(self.alloc(kind, span))
    }
}
