//! Pyrite - dynamic execution core.
//!
//! `eval`/`exec`-style execution for expressions static compilation cannot
//! resolve. Source text is parsed, compiled to bytecode once, cached, and
//! run on a stack VM:
//!
//! ```
//! let value = pyrite::evaluate(b"1 + 2 * 3").unwrap();
//! assert_eq!(value.as_int().unwrap(), 7);
//! ```
//!
//! - [`EvalCache`]: the source-to-program cache; [`global_cache`] is the
//!   process-wide instance behind [`evaluate`] and [`execute_statement`].
//! - [`SourceParser`]: the parser seam; [`ReferenceParser`] by default.
//! - [`Value`] / [`EvalError`]: re-exported from `pyrite_value`.

mod cache;
mod config;
mod parser;

use std::sync::{Once, OnceLock};

pub use cache::{CacheStats, EvalCache};
pub use config::CacheConfig;
pub use parser::{ReferenceParser, SourceParser};

pub use pyrite_bytecode::BytecodeProgram;
pub use pyrite_value::{ErrorCategory, EvalError, EvalErrorKind, EvalResult, Value};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=pyrite=debug` or `RUST_LOG=pyrite_bytecode=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

static GLOBAL_CACHE: OnceLock<EvalCache> = OnceLock::new();

/// Process-wide cache, created on first use.
pub fn global_cache() -> &'static EvalCache {
    GLOBAL_CACHE.get_or_init(EvalCache::new)
}

/// Evaluate an expression through the process-wide cache.
pub fn evaluate(source: &[u8]) -> EvalResult {
    global_cache().evaluate(source)
}

/// Run a statement through the process-wide cache, discarding its value.
pub fn execute_statement(source: &[u8]) -> Result<(), EvalError> {
    global_cache().execute_statement(source)
}
