//! Parser seam for the evaluation cache.

use pyrite_ir::ParsedExpr;
use pyrite_value::EvalError;

/// Turns source bytes into an expression tree.
///
/// The cache only ever calls this on a miss. Implementations must be
/// shareable across threads because one cache serves all of them.
pub trait SourceParser: Send + Sync {
    fn parse(&self, source: &[u8]) -> Result<ParsedExpr, EvalError>;
}

/// The bundled expression parser (`pyrite_parse`).
#[derive(Copy, Clone, Debug, Default)]
pub struct ReferenceParser;

impl SourceParser for ReferenceParser {
    fn parse(&self, source: &[u8]) -> Result<ParsedExpr, EvalError> {
        pyrite_parse::parse(source)
    }
}
