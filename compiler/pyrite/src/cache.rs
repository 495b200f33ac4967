//! Compilation cache for `eval`/`exec`-style execution.
//!
//! Maps source bytes to a compiled [`BytecodeProgram`]. The first
//! evaluation of a source parses and compiles it; every later evaluation
//! of the same bytes only runs the stored program on a fresh VM.
//!
//! # Concurrency
//!
//! Double-checked locking over one `RwLock`:
//!
//! 1. Read lock: return the stored program on a hit.
//! 2. Write lock: look again (another thread may have just inserted it),
//!    then parse, compile and insert while still holding the lock.
//!
//! Holding the write lock across the compile guarantees one compilation per
//! distinct source even when many threads race on it first. Programs are
//! handed out as `Arc` clones, so execution never holds the lock.
//!
//! Entries are never updated or removed. Failed parses and compiles are
//! not stored: retrying the same source does the work again.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use pyrite_bytecode::{compile, BytecodeProgram, Vm};
use pyrite_eval::InterpreterBuilder;
use pyrite_value::{EvalError, EvalResult};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::config::CacheConfig;
use crate::parser::{ReferenceParser, SourceParser};

/// Point-in-time snapshot of cache counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to parse and compile.
    pub misses: u64,
    /// Successful compilations.
    pub compiles: u64,
    pub parse_failures: u64,
    pub compile_failures: u64,
    /// Programs currently stored.
    pub entries: usize,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    compiles: AtomicU64,
    parse_failures: AtomicU64,
    compile_failures: AtomicU64,
}

#[inline]
fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

/// Source-keyed cache of compiled programs.
pub struct EvalCache<P: SourceParser = ReferenceParser> {
    parser: P,
    config: CacheConfig,
    programs: RwLock<FxHashMap<Box<[u8]>, Arc<BytecodeProgram>>>,
    counters: Counters,
    limit_warned: AtomicBool,
}

impl EvalCache {
    /// Unbounded cache using the bundled parser.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self::with_parser(ReferenceParser, config)
    }
}

impl Default for EvalCache {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SourceParser> EvalCache<P> {
    /// Cache using a custom parser.
    pub fn with_parser(parser: P, config: CacheConfig) -> Self {
        EvalCache {
            parser,
            config,
            programs: RwLock::new(FxHashMap::default()),
            counters: Counters::default(),
            limit_warned: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Evaluate an expression and return its value.
    ///
    /// Parses and compiles on the first call for `source`; later calls run
    /// the cached program.
    #[tracing::instrument(level = "debug", skip_all, fields(source_len = source.len()))]
    pub fn evaluate(&self, source: &[u8]) -> EvalResult {
        let program = self.compile(source)?;
        self.execute_program(&program)
    }

    /// Run `source` for its effect, discarding the value.
    #[tracing::instrument(level = "debug", skip_all, fields(source_len = source.len()))]
    pub fn execute_statement(&self, source: &[u8]) -> Result<(), EvalError> {
        self.evaluate(source).map(drop)
    }

    /// Compiled program ("code object") for `source`, from the cache when
    /// present.
    pub fn compile(&self, source: &[u8]) -> Result<Arc<BytecodeProgram>, EvalError> {
        if let Some(program) = self.programs.read().get(source) {
            bump(&self.counters.hits);
            return Ok(Arc::clone(program));
        }

        let mut programs = self.programs.write();
        if let Some(program) = programs.get(source) {
            bump(&self.counters.hits);
            return Ok(Arc::clone(program));
        }

        bump(&self.counters.misses);
        debug!(source_len = source.len(), "cache miss");
        let program = Arc::new(self.parse_and_compile(source)?);

        if let Some(limit) = self.config.entry_limit() {
            if programs.len() >= limit {
                if !self.limit_warned.swap(true, Ordering::Relaxed) {
                    warn!(limit, "evaluation cache is full; new sources will not be cached");
                }
                return Ok(program);
            }
        }

        programs.insert(source.into(), Arc::clone(&program));
        debug!(entries = programs.len(), "cached program");
        Ok(program)
    }

    /// Run a compiled program on a fresh VM.
    pub fn execute_program(&self, program: &BytecodeProgram) -> EvalResult {
        Vm::new().execute(program)
    }

    /// Parse `source` and evaluate it with the tree interpreter.
    ///
    /// Nothing is compiled or cached. This path accepts calls to builtins,
    /// which the bytecode path does not.
    #[tracing::instrument(level = "debug", skip_all, fields(source_len = source.len()))]
    pub fn interpret_source(&self, source: &[u8]) -> EvalResult {
        let parsed = self.parser.parse(source)?;
        InterpreterBuilder::new(parsed.arena())
            .print_handler(Arc::clone(self.config.shared_print_handler()))
            .build()
            .eval(parsed.root())
    }

    fn parse_and_compile(&self, source: &[u8]) -> Result<BytecodeProgram, EvalError> {
        let parsed = self.parser.parse(source).inspect_err(|err| {
            bump(&self.counters.parse_failures);
            debug!(%err, "parse failed");
        })?;
        let program = compile(parsed.arena(), parsed.root()).inspect_err(|err| {
            bump(&self.counters.compile_failures);
            debug!(%err, "compile failed");
        })?;
        bump(&self.counters.compiles);
        Ok(program)
    }

    /// Whether a program for `source` is stored.
    pub fn contains(&self, source: &[u8]) -> bool {
        self.programs.read().contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.programs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.read().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            compiles: self.counters.compiles.load(Ordering::Relaxed),
            parse_failures: self.counters.parse_failures.load(Ordering::Relaxed),
            compile_failures: self.counters.compile_failures.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

#[cfg(test)]
mod tests;
