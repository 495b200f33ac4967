use super::*;
use pretty_assertions::assert_eq;
use pyrite_eval::buffer_handler;
use pyrite_ir::ParsedExpr;
use pyrite_value::{live_values, ErrorCategory, Value};
use std::sync::atomic::AtomicUsize;

/// Parser that counts how often the cache asks it for work.
#[derive(Default)]
struct CountingParser {
    calls: AtomicUsize,
}

impl CountingParser {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SourceParser for CountingParser {
    fn parse(&self, source: &[u8]) -> Result<ParsedExpr, EvalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        pyrite_parse::parse(source)
    }
}

fn counting_cache() -> EvalCache<CountingParser> {
    EvalCache::with_parser(CountingParser::default(), CacheConfig::default())
}

#[test]
fn second_evaluation_skips_parse_and_compile() {
    let cache = counting_cache();

    assert_eq!(cache.evaluate(b"1 + 2 * 3").unwrap(), Value::int(7));
    assert_eq!(cache.parser.calls(), 1);
    assert_eq!(cache.stats().compiles, 1);

    assert_eq!(cache.evaluate(b"1 + 2 * 3").unwrap(), Value::int(7));
    assert_eq!(cache.parser.calls(), 1);
    assert_eq!(
        cache.stats(),
        CacheStats {
            hits: 1,
            misses: 1,
            compiles: 1,
            parse_failures: 0,
            compile_failures: 0,
            entries: 1,
        }
    );
}

#[test]
fn distinct_sources_get_distinct_entries() {
    let cache = counting_cache();
    assert_eq!(cache.evaluate(b"7 // 2").unwrap(), Value::int(3));
    assert_eq!(cache.evaluate(b"-7 // 2").unwrap(), Value::int(-4));
    // Keys are exact bytes: whitespace makes a different source.
    assert_eq!(cache.evaluate(b"7 //  2").unwrap(), Value::int(3));
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.parser.calls(), 3);
}

#[test]
fn code_objects_are_shared() {
    let cache = EvalCache::new();
    let first = cache.compile(b"40 + 2").unwrap();
    let second = cache.compile(b"40 + 2").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.execute_program(&first).unwrap(), Value::int(42));
}

#[test]
fn parse_failures_are_not_cached() {
    let cache = counting_cache();
    for _ in 0..2 {
        let err = cache.evaluate(b"1 +").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::SyntaxError);
    }
    assert_eq!(cache.parser.calls(), 2);
    let stats = cache.stats();
    assert_eq!(stats.parse_failures, 2);
    assert_eq!(stats.entries, 0);
    assert!(!cache.contains(b"1 +"));
}

#[test]
fn compile_failures_are_not_cached() {
    let cache = counting_cache();
    for _ in 0..2 {
        let err = cache.evaluate(b"x + 1").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotImplemented);
    }
    assert_eq!(cache.parser.calls(), 2);
    assert_eq!(cache.stats().compile_failures, 2);
    assert!(cache.is_empty());
}

#[test]
fn runtime_errors_still_cache_the_program() {
    let cache = counting_cache();
    for _ in 0..2 {
        let err = cache.evaluate(b"5 % 0").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::ZeroDivisionError);
    }
    assert_eq!(cache.parser.calls(), 1);
    assert!(cache.contains(b"5 % 0"));
}

#[test]
fn execute_statement_discards_value() {
    let cache = EvalCache::new();
    cache.execute_statement(b"1 + 1").unwrap();
    assert!(cache.contains(b"1 + 1"));

    let err = cache.execute_statement(b"print(42)").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NotImplemented);
}

#[test]
fn interpret_source_bypasses_the_cache() {
    let handler = buffer_handler();
    let cache = EvalCache::with_config(CacheConfig::new().print_handler(handler.clone()));

    assert!(cache.interpret_source(b"print(len('abc'))").unwrap().is_none());
    assert_eq!(handler.get_output(), "3\n");
    assert!(cache.is_empty());
    assert_eq!(cache.stats(), CacheStats::default());
}

#[test]
fn bounded_cache_stops_storing() {
    let cache = EvalCache::with_parser(
        CountingParser::default(),
        CacheConfig::new().max_entries(1),
    );
    assert_eq!(cache.evaluate(b"1").unwrap(), Value::int(1));
    assert_eq!(cache.evaluate(b"2").unwrap(), Value::int(2));
    assert_eq!(cache.evaluate(b"2").unwrap(), Value::int(2));

    assert_eq!(cache.len(), 1);
    assert!(cache.contains(b"1"));
    // The uncached source is compiled each time.
    assert_eq!(cache.parser.calls(), 3);

    // The stored entry keeps hitting.
    assert_eq!(cache.evaluate(b"1").unwrap(), Value::int(1));
    assert_eq!(cache.parser.calls(), 3);
}

#[test]
fn cached_evaluation_releases_values() {
    let cache = EvalCache::new();
    let baseline = live_values();
    for _ in 0..3 {
        drop(cache.evaluate(b"'s'"));
        drop(cache.evaluate(b"1 + 2"));
        drop(cache.evaluate(b"1 // 0"));
        drop(cache.evaluate(b"2.5 + 1.0"));
    }
    assert_eq!(live_values(), baseline);
}
