/// Default limit on nested user function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// Host stack reserved per allowed user function call when the evaluator
/// stack size is derived from the call depth limit.
pub const STACK_BYTES_PER_CALL: usize = 64 * 1024;

/// Host stack every evaluator thread gets on top of the per-call share.
pub const BASE_STACK_BYTES: usize = 8 * 1024 * 1024;

/// Settings that shape a single evaluation run.
///
/// ## Example
/// ```
/// use subc::config::InterpreterConfig;
///
/// let config = InterpreterConfig::default().with_max_call_depth(64);
/// assert_eq!(config.max_call_depth, 64);
/// assert!(config.evaluator_stack_size() > 64 * 64 * 1024);
///
/// let fixed = config.with_stack_size(32 * 1024 * 1024);
/// assert_eq!(fixed.evaluator_stack_size(), 32 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// How many user function calls may be active at once. Going deeper is a
    /// `StackOverflow` runtime error.
    pub max_call_depth: usize,
    /// Host stack in bytes for the evaluator thread. `None` derives it from
    /// `max_call_depth`.
    pub stack_size:     Option<usize>,
}

impl InterpreterConfig {
    /// Replaces the call depth limit.
    #[must_use]
    pub const fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    /// Fixes the evaluator thread's stack size in bytes.
    #[must_use]
    pub const fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// The stack size the evaluator thread is spawned with.
    ///
    /// Without an explicit size this is [`BASE_STACK_BYTES`] plus
    /// [`STACK_BYTES_PER_CALL`] for every call the depth limit allows, so
    /// the limit is reached before the host stack runs out.
    #[must_use]
    pub const fn evaluator_stack_size(&self) -> usize {
        match self.stack_size {
            Some(bytes) => bytes,
            None => BASE_STACK_BYTES.saturating_add(self.max_call_depth
                                                        .saturating_mul(STACK_BYTES_PER_CALL)),
        }
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self { max_call_depth: DEFAULT_MAX_CALL_DEPTH,
               stack_size:     None, }
    }
}
