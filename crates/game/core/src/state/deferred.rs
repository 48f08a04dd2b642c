//! Deferred actions: state changes scheduled for a later tick.
//!
//! The combat loop never mutates the world "in N seconds" inline. It pushes
//! an entry here and the engine drains whatever has come due at the start of
//! each tick, so a despawn or a loss screen lands on a tick boundary and
//! replays identically.

use crate::state::common::{EntityId, GameTime};
use crate::state::objective::MatchOutcome;

/// A state change waiting for its due time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeferredAction {
    /// Remove a lingering monster corpse from the state.
    Despawn(EntityId),
    /// Settle the match verdict (used for the delayed loss after the hero
    /// falls).
    Conclude(MatchOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Entry {
    due: GameTime,
    action: DeferredAction,
}

/// FIFO-per-instant queue of scheduled actions.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeferredQueue {
    entries: Vec<Entry>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: GameTime, action: DeferredAction) {
        self.entries.push(Entry { due, action });
    }

    /// Remove and return everything due at `now`, ordered by due time with
    /// insertion order breaking ties.
    pub fn drain_due(&mut self, now: GameTime) -> Vec<DeferredAction> {
        let mut due: Vec<Entry> = Vec::new();
        self.entries.retain(|entry| {
            if now.has_reached(entry.due) {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due.0.total_cmp(&b.due.0));
        due.into_iter().map(|entry| entry.action).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
