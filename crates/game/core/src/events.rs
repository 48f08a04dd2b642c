//! Events emitted during a tick for hosts and front-ends to observe.
//!
//! Events record what happened; they carry no obligation back into the
//! simulation. Within one tick their order follows phase order and, inside
//! a phase, actor iteration order, so a log of events replays
//! deterministically.

use glam::Vec3;

use crate::ability::AbilityKind;
use crate::state::{EntityId, GameTime, MatchOutcome, PickupId, SpawnerId, TemplateId};

/// Something the simulation did this tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// An actor committed to a cast.
    AbilityStarted {
        actor: EntityId,
        ability: AbilityKind,
        target: Vec3,
    },
    /// A cast reached its activation instant and its effect was applied.
    AbilityResolved { actor: EntityId, ability: AbilityKind },
    /// Damage was applied to an actor. `amount` is post-reduction.
    DamageDealt {
        source: Option<EntityId>,
        target: EntityId,
        amount: f32,
        defeated: bool,
    },
    /// An actor's health reached zero.
    ActorDefeated {
        actor: EntityId,
        by: Option<EntityId>,
    },
    /// A lingering corpse was removed from the state.
    ActorDespawned { actor: EntityId },
    /// A self-buff took effect.
    BuffApplied {
        actor: EntityId,
        expires_at: GameTime,
    },
    /// A self-buff ran out and its modifiers were reverted.
    BuffExpired { actor: EntityId },
    /// A spawner produced a monster at `position`.
    MonsterSpawned {
        actor: EntityId,
        template: TemplateId,
        spawner: SpawnerId,
        position: Vec3,
    },
    /// A spawner was destroyed, either by kill count or because the match
    /// was won.
    SpawnerCollapsed { spawner: SpawnerId },
    /// The hero walked over a pickup. `healed` is the clamped amount
    /// actually restored.
    PickupCollected {
        pickup: PickupId,
        actor: EntityId,
        healed: f32,
    },
    /// The match verdict settled.
    MatchConcluded { outcome: MatchOutcome },
}
