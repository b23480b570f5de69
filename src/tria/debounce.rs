//! Debounced query input.
//!
//! Keystrokes land faster than a search pass is worth running. The debouncer
//! models the classic trailing-edge timer as an explicit cancellable task:
//! each [`QueryDebouncer::arm`] supersedes the previous pending query and
//! restarts the window, so a search never fires on stale text. The owner
//! polls from its event loop; nothing here spawns threads.

use std::time::{Duration, Instant};

/// Quiescence window applied to free-text query input.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
struct PendingQuery {
    text: String,
    armed_at: Instant,
}

/// Coalesces rapid query edits into a single dispatch.
#[derive(Debug)]
pub struct QueryDebouncer {
    pending: Option<PendingQuery>,
    window: Duration,
}

impl QueryDebouncer {
    pub fn new() -> Self {
        Self::with_window(DEBOUNCE_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            pending: None,
            window,
        }
    }

    /// Schedule `text` for dispatch, cancelling any pending query and
    /// restarting the window.
    pub fn arm(&mut self, text: impl Into<String>) {
        self.pending = Some(PendingQuery {
            text: text.into(),
            armed_at: Instant::now(),
        });
    }

    /// Drop the pending query without dispatching it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// The raw text awaiting dispatch, for immediate display.
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.text.as_str())
    }

    /// Release the pending query once its window has elapsed uncancelled.
    /// Returns `None` while the window is still open or nothing is armed.
    pub fn poll(&mut self) -> Option<String> {
        let elapsed = self
            .pending
            .as_ref()
            .is_some_and(|p| p.armed_at.elapsed() >= self.window);
        if elapsed {
            self.pending.take().map(|p| p.text)
        } else {
            None
        }
    }
}

impl Default for QueryDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
