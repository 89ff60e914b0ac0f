//! Search-term state and debounced remote-search dispatch.
//!
//! The controller never owns a timer. It records a deadline and the host
//! pumps [`SearchController::poll`] (each frame, or from its own timer),
//! the same way the host drives any other deferred work in this crate.

use std::time::Duration;
use web_time::Instant;

/// Whether filtering happens against the in-memory collection or through a
/// remote callback. Chosen once at construction and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Local,
    Remote,
}

#[derive(Debug, Clone)]
struct PendingSearch {
    term: String,
    due: Instant,
}

/// Owns the search term and the single-flight debounce for remote mode.
#[derive(Debug)]
pub struct SearchController {
    mode: SearchMode,
    delay: Duration,
    term: String,
    last_submitted: String,
    pending: Option<PendingSearch>,
}

impl SearchController {
    pub fn new(mode: SearchMode, delay: Duration) -> Self {
        Self {
            mode,
            delay,
            term: String::new(),
            last_submitted: String::new(),
            pending: None,
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn is_remote(&self) -> bool {
        self.mode == SearchMode::Remote
    }

    /// The raw term as typed (used for display and local filtering).
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Record a new term. In remote mode this cancels any pending
    /// submission and, unless the trimmed term equals the last submitted
    /// one, schedules a new submission: immediately for an empty term,
    /// after the configured delay otherwise.
    pub fn set_term(&mut self, raw: &str, now: Instant) {
        self.term = raw.to_string();
        if self.mode != SearchMode::Remote {
            return;
        }

        if self.pending.take().is_some() {
            log::trace!("search: cancelled pending submission");
        }

        let trimmed = raw.trim();
        if trimmed == self.last_submitted {
            return;
        }

        // An empty term clears results and should not wait out the delay.
        let delay = if trimmed.is_empty() {
            Duration::ZERO
        } else {
            self.delay
        };
        log::debug!("search: scheduling '{}' in {:?}", trimmed, delay);
        self.pending = Some(PendingSearch {
            term: trimmed.to_string(),
            due: now + delay,
        });
    }

    /// Fire the pending submission if its deadline has passed. Returns the
    /// term to hand to the remote callback, at most once per scheduling.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if !self.pending.as_ref().is_some_and(|p| p.due <= now) {
            return None;
        }
        let pending = self.pending.take()?;
        log::debug!("search: submitting '{}'", pending.term);
        self.last_submitted = pending.term.clone();
        Some(pending.term)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Opening the dropdown resets the term in local mode only; remote mode
    /// deliberately keeps the term (and the host's last results) across
    /// opens.
    pub fn open_reset(&mut self) {
        if self.mode == SearchMode::Local {
            self.term.clear();
        }
    }

    /// A committed selection clears the term in both modes. A still-pending
    /// remote submission is not cancelled; only `set_term` cancels.
    pub fn commit_reset(&mut self) {
        self.term.clear();
    }
}
