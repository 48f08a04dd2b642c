//! Canonical match state.
//!
//! [`GameState`] owns everything the simulation is allowed to remember
//! between ticks. Positions are deliberately absent: the host's navigator
//! owns actor poses and exposes them back through
//! [`SceneOracle`](crate::env::SceneOracle). Only immobile things (spawners,
//! pickups) keep a position here.

mod actor;
mod common;
mod deferred;
mod entities;
mod objective;
mod pickup;
mod spawner;

pub use actor::{
    ActorKind, ActorState, ActorStats, BuffState, Buttons, CastState, IntentState, LifeState,
    Loadout,
};
pub use common::{
    EntityId, Frame, GameTime, PickupId, ResourceMeter, SpawnerId, TemplateId,
};
pub use deferred::{DeferredAction, DeferredQueue};
pub use entities::EntitiesState;
pub use objective::{MatchOutcome, ObjectiveState};
pub use pickup::PickupState;
pub use spawner::{SpawnPool, SpawnerState};

use std::collections::HashSet;

use crate::error::SimError;

/// Simulation clock advanced by the engine each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameClock {
    pub now: GameTime,
    /// Ticks processed so far. Feeds the deterministic RNG as a nonce.
    pub frame: u64,
}

impl GameClock {
    /// Zero-dt frames replay the current instant and do not count as a
    /// processed tick, so replays keep the RNG nonce stable.
    pub fn advance(&mut self, frame: Frame) {
        self.now = frame.now;
        if frame.dt > 0.0 {
            self.frame += 1;
        }
    }
}

/// Complete match state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Base seed for every deterministic roll in this match.
    pub seed: u64,
    pub clock: GameClock,
    pub entities: EntitiesState,
    pub spawners: Vec<SpawnerState>,
    pub pickups: Vec<PickupState>,
    pub objective: ObjectiveState,
    pub deferred: DeferredQueue,
    next_entity: u32,
}

impl GameState {
    pub fn new(seed: u64, hero: ActorState, objective: ObjectiveState) -> Self {
        Self {
            seed,
            clock: GameClock::default(),
            entities: EntitiesState::new(hero),
            spawners: Vec::new(),
            pickups: Vec::new(),
            objective,
            deferred: DeferredQueue::new(),
            next_entity: EntityId::HERO.0 + 1,
        }
    }

    /// Hand out the next monster identifier.
    pub fn allocate_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        id
    }

    pub fn spawner(&self, id: SpawnerId) -> Option<&SpawnerState> {
        self.spawners.iter().find(|s| s.id == id)
    }

    pub fn spawner_mut(&mut self, id: SpawnerId) -> Option<&mut SpawnerState> {
        self.spawners.iter_mut().find(|s| s.id == id)
    }

    pub fn remove_pickup(&mut self, id: PickupId) -> Option<PickupState> {
        let index = self.pickups.iter().position(|p| p.id == id)?;
        Some(self.pickups.remove(index))
    }

    pub fn outcome(&self) -> MatchOutcome {
        self.objective.outcome
    }

    /// Validate a freshly assembled state before the first tick.
    ///
    /// The tick pipeline assumes these hold (positive attack rates, one
    /// slot per ability kind, unique spawner ids) and never re-checks them.
    pub fn validate(&self) -> Result<(), SimError> {
        for actor in self.entities.iter() {
            if !actor.stats.is_valid() {
                return Err(SimError::InvalidStats { actor: actor.id });
            }
            let mut kinds = HashSet::new();
            for slot in &actor.loadout {
                slot.profile.validate()?;
                if !kinds.insert(slot.profile.kind) {
                    return Err(SimError::DuplicateAbility {
                        actor: actor.id,
                        kind: slot.profile.kind,
                    });
                }
            }
        }

        let mut spawner_ids = HashSet::new();
        for spawner in &self.spawners {
            if !spawner_ids.insert(spawner.id) {
                return Err(SimError::DuplicateSpawner(spawner.id));
            }
        }

        Ok(())
    }
}
