//! Observability hooks carried by lines.

use crate::interpreter::error::EvalError;
use crate::interpreter::resolver::ResolveResult;
use crate::types::LineKey;

/// Receives every resolution outcome and every caught evaluation error.
pub trait ResolutionLogger: Send + Sync {
    fn resolved(&self, result: &ResolveResult);

    fn failed(&self, key: &LineKey, error: &EvalError) {
        let _ = (key, error);
    }
}

/// Forwards resolution outcomes to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ResolutionLogger for TracingLogger {
    fn resolved(&self, result: &ResolveResult) {
        if result.status.is_ok() {
            tracing::info!(key = %result.key, status = %result.status, "line resolved");
        } else {
            tracing::warn!(key = %result.key, status = %result.status, "line resolved with errors");
        }
    }

    fn failed(&self, key: &LineKey, error: &EvalError) {
        tracing::error!(%key, %error, "placeholder evaluation failed");
    }
}
