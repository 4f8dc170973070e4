//! Query-cache invalidation signals.
//!
//! Views that cache API reads subscribe to named keys elsewhere; workflows
//! here only ever fire the signal after a successful write.

use std::sync::Mutex;

/// Cache key for every cached list of performance goals.
pub const PERFORMANCE_GOALS: &str = "performanceGoals";

pub trait QueryInvalidator: Send + Sync {
    fn invalidate(&self, key: &str);
}

/// Invalidator for contexts with no query cache; records the signal in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingInvalidator;

impl QueryInvalidator for LoggingInvalidator {
    fn invalidate(&self, key: &str) {
        tracing::debug!(key, "query cache invalidated");
    }
}

/// Remembers which keys were invalidated, in order.
#[derive(Debug, Default)]
pub struct InvalidationLog {
    keys: Mutex<Vec<String>>,
}

impl InvalidationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().map(|k| k.clone()).unwrap_or_default()
    }
}

impl QueryInvalidator for InvalidationLog {
    fn invalidate(&self, key: &str) {
        if let Ok(mut keys) = self.keys.lock() {
            keys.push(key.to_string());
        }
    }
}
