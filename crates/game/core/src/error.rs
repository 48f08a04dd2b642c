//! Validation errors raised when assembling a simulation.
//!
//! The tick pipeline itself never fails: a missing oracle or a malformed
//! intent downgrades to a skipped effect, matching the tolerant posture of
//! the combat loop. Errors exist only at the boundary where content is
//! turned into an initial [`GameState`](crate::state::GameState).

use thiserror::Error;

use crate::ability::AbilityKind;
use crate::state::{EntityId, SpawnerId};

/// Errors produced while validating a simulation setup.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimError {
    /// An ability's payload variant does not agree with its declared kind.
    #[error("ability '{name}' carries a payload that does not match kind {kind}")]
    PayloadMismatch { name: String, kind: AbilityKind },

    /// Activation fraction must lie in `(0, 1]` so the effect lands inside
    /// the cast window.
    #[error("ability '{name}' has activation fraction {value} outside (0, 1]")]
    ActivationFraction { name: String, value: f32 },

    /// Fixed cast times and cooldowns must be positive and finite.
    #[error("ability '{name}' has a non-positive or non-finite timing value")]
    InvalidTiming { name: String },

    /// Actor stats must be finite, with positive maximum health and attack
    /// rate (cast time is derived as `1 / attacks_per_second`).
    #[error("actor {actor} has invalid stats")]
    InvalidStats { actor: EntityId },

    /// Two spawners share the same identifier.
    #[error("duplicate spawner id {0}")]
    DuplicateSpawner(SpawnerId),

    /// An actor carries more than one slot for the same ability kind.
    #[error("actor {actor} has multiple {kind} slots")]
    DuplicateAbility { actor: EntityId, kind: AbilityKind },
}
