use std::fmt;
use std::sync::Arc;

/// Callback that rewrites a captured backtrace before it is emitted.
///
/// The returned lines are used verbatim, including an empty result.
pub type BacktraceCleaner = Arc<dyn Fn(Vec<String>) -> Vec<String> + Send + Sync>;

/// Settings consulted by the formatters. Owned by the device and
/// read-only for the duration of a single transformation call; the
/// owner may change it between calls.
#[derive(Clone, Default)]
pub struct FormatterConfig {
    /// Hard upper bound on the rendered message length, in characters.
    /// Unset means unlimited.
    pub max_message_length: Option<usize>,
    pub backtrace_cleaner: Option<BacktraceCleaner>,
}

impl FormatterConfig {
    pub fn new() -> Self {
        FormatterConfig::default()
    }

    pub fn max_message_length(mut self, limit: usize) -> Self {
        self.max_message_length = Some(limit);
        self
    }

    pub fn backtrace_cleaner(
        mut self,
        cleaner: impl Fn(Vec<String>) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.backtrace_cleaner = Some(Arc::new(cleaner));
        self
    }
}

impl fmt::Debug for FormatterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterConfig")
            .field("max_message_length", &self.max_message_length)
            .field("backtrace_cleaner", &self.backtrace_cleaner.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
