//! Deadline queue driven by host time.

use cascade_core::{NodeId, Point, Timestamp};

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

/// What happens when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerKind {
    /// Open a submenu after the hover dwell
    OpenSubmenu(NodeId),
    /// Open a context menu after a touch/pen long press
    LongPress(Point),
    /// Clear the typeahead buffer
    TypeaheadReset,
}

/// A scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    /// Handle used for cancellation
    pub token: TimerToken,
    /// When the timer fires
    pub deadline: Timestamp,
    /// Action on firing
    pub kind: TimerKind,
    /// Node whose lifetime bounds the timer
    pub owner: NodeId,
    /// Owner generation when scheduled; a mismatch at firing makes it a no-op
    pub generation: u64,
}

/// Pending timers, fired in deadline order.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    next_token: u64,
    pending: Vec<Timer>,
}

impl TimerQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timer.
    pub fn schedule(
        &mut self,
        deadline: Timestamp,
        kind: TimerKind,
        owner: NodeId,
        generation: u64,
    ) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending.push(Timer {
            token,
            deadline,
            kind,
            owner,
            generation,
        });
        token
    }

    /// Cancel a timer; `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.token != token);
        self.pending.len() != before
    }

    /// Cancel every timer matching a predicate; returns how many were dropped.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&Timer) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| !predicate(t));
        before - self.pending.len()
    }

    /// Remove and return the earliest timer due at `now`.
    ///
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self, now: Timestamp) -> Option<Timer> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| (t.deadline, t.token))
            .map(|(i, _)| i)?;
        Some(self.pending.remove(idx))
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.pending.iter().map(|t| t.deadline).min()
    }

    /// Whether a timer is still pending.
    #[must_use]
    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.iter().any(|t| t.token == token)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
