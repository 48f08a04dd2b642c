//! Kill-count objective and the match verdict.

use strum::Display;

/// Terminal state of the match. Transitions away from `InProgress` happen
/// exactly once; later conclude calls are ignored.
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchOutcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

/// Progress toward the arena's kill objective.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveState {
    pub required_kills: u32,
    pub kills: u32,
    pub outcome: MatchOutcome,
}

impl ObjectiveState {
    pub fn new(required_kills: u32) -> Self {
        Self {
            required_kills,
            kills: 0,
            outcome: MatchOutcome::InProgress,
        }
    }

    /// Count one kill and return the new total.
    pub fn record_kill(&mut self) -> u32 {
        self.kills += 1;
        self.kills
    }

    pub fn is_complete(&self) -> bool {
        self.kills >= self.required_kills
    }

    /// Settle the match. Returns true only for the call that actually
    /// changed the outcome.
    pub fn conclude(&mut self, outcome: MatchOutcome) -> bool {
        if self.outcome != MatchOutcome::InProgress || outcome == MatchOutcome::InProgress {
            return false;
        }
        self.outcome = outcome;
        true
    }
}
