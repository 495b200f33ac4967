//! Evaluation cache configuration.

use pyrite_eval::{stdout_handler, SharedPrintHandler};

/// Settings for an [`EvalCache`](crate::EvalCache).
///
/// ```
/// use pyrite::CacheConfig;
///
/// let config = CacheConfig::new().max_entries(1024);
/// assert_eq!(config.entry_limit(), Some(1024));
/// ```
#[derive(Clone)]
pub struct CacheConfig {
    max_entries: Option<usize>,
    print_handler: SharedPrintHandler,
}

impl CacheConfig {
    /// Unbounded cache, `print` to stdout.
    pub fn new() -> Self {
        CacheConfig {
            max_entries: None,
            print_handler: stdout_handler(),
        }
    }

    /// Stop storing new programs once `limit` sources are cached.
    ///
    /// Sources beyond the limit are still compiled and run, just not kept.
    /// Stored entries are never evicted.
    #[must_use]
    pub fn max_entries(mut self, limit: usize) -> Self {
        self.max_entries = Some(limit);
        self
    }

    /// Print sink for the tree interpreter path
    /// ([`EvalCache::interpret_source`](crate::EvalCache::interpret_source)).
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = handler;
        self
    }

    pub fn entry_limit(&self) -> Option<usize> {
        self.max_entries
    }

    pub(crate) fn shared_print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new()
    }
}
