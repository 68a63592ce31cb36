//! Cooperative cancellation for in-flight renders.
//!
//! [`CancellationRegistry`] issues one [`CancellationToken`] per render,
//! keyed by block id. Starting a new render for a block aborts the token of
//! any render still registered for that block; [`cancel_all`] aborts
//! everything, e.g. on teardown.
//!
//! Cancellation is cooperative: an aborted token does not interrupt work in
//! progress, it makes the next checkpoint fail with [`RenderAborted`].
//!
//! [`cancel_all`]: CancellationRegistry::cancel_all

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crate::error::RenderAborted;

/// Abort reason for a render replaced by a newer render of the same block.
pub const REASON_SUPERSEDED: &str = "superseded by a newer render of the same block";

/// Abort reason used by [`CancellationRegistry::cancel_all`].
pub const REASON_CANCEL_ALL: &str = "all renders cancelled";

#[derive(Debug, Default)]
struct TokenState {
    aborted: AtomicBool,
    reason: OnceLock<String>,
}

/// Read-only view of one operation's abort signal.
///
/// Clones share the same signal. Only the [`CancellationRegistry`] that
/// issued a token can abort it.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    state: Arc<TokenState>,
}

impl CancellationToken {
    /// Create a standalone token, not tracked by any registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the operation has been aborted.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.state.aborted.load(Ordering::Acquire)
    }

    /// Why the operation was aborted, if it was.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        if self.is_aborted() {
            self.state.reason.get().map(String::as_str)
        } else {
            None
        }
    }

    /// Cancellation checkpoint.
    ///
    /// # Errors
    ///
    /// Returns [`RenderAborted`] if the token has been aborted.
    pub fn check(&self) -> Result<(), RenderAborted> {
        if self.is_aborted() {
            return Err(RenderAborted {
                reason: self.reason().unwrap_or("aborted").to_owned(),
            });
        }
        Ok(())
    }

    /// Abort the operation. The first reason wins.
    pub(crate) fn abort(&self, reason: &str) {
        // Reason is published before the flag so observers of the flag see it
        let _ = self.state.reason.set(reason.to_owned());
        self.state.aborted.store(true, Ordering::Release);
    }

    fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

/// Tracks the live cancellation token of every in-flight render.
///
/// # Example
///
/// ```
/// use seqdraw_diagrams::CancellationRegistry;
///
/// let registry = CancellationRegistry::new();
/// let first = registry.start("block-1");
/// let second = registry.start("block-1");
///
/// assert!(first.is_aborted());
/// assert!(!second.is_aborted());
///
/// registry.complete("block-1");
/// assert!(registry.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct CancellationRegistry {
    tokens: Mutex<HashMap<String, CancellationToken>>,
}

impl CancellationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CancellationToken>> {
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue a fresh token for `block_id`.
    ///
    /// Any token still registered for the same block is aborted and replaced.
    pub fn start(&self, block_id: &str) -> CancellationToken {
        let token = CancellationToken::new();
        let previous = self.lock().insert(block_id.to_owned(), token.clone());
        if let Some(previous) = previous {
            tracing::debug!(block_id, "superseding in-flight render");
            previous.abort(REASON_SUPERSEDED);
        }
        token
    }

    /// Mark the render for `block_id` finished and forget its token.
    ///
    /// No-op if nothing is registered for the block.
    pub fn complete(&self, block_id: &str) {
        self.lock().remove(block_id);
    }

    /// Forget the token for `block_id` only if it is still `token`.
    ///
    /// Lets a superseded render finish without unregistering its successor.
    pub fn complete_token(&self, block_id: &str, token: &CancellationToken) {
        let mut tokens = self.lock();
        if tokens.get(block_id).is_some_and(|live| live.same_as(token)) {
            tokens.remove(block_id);
        }
    }

    /// Abort every tracked token and stop tracking them.
    ///
    /// Idempotent; safe with nothing in flight.
    pub fn cancel_all(&self) {
        let drained: Vec<_> = self.lock().drain().collect();
        if !drained.is_empty() {
            tracing::debug!(count = drained.len(), "cancelling all in-flight renders");
        }
        for (_, token) in drained {
            token.abort(REASON_CANCEL_ALL);
        }
    }

    /// Whether a render is registered for `block_id`.
    #[must_use]
    pub fn is_tracked(&self, block_id: &str) -> bool {
        self.lock().contains_key(block_id)
    }

    /// Number of tracked renders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
