//! Actor collection: the hero plus every live or lingering monster.

use crate::state::actor::ActorState;
use crate::state::common::EntityId;

/// All actors in the match. The hero is fixed; monsters come and go through
/// spawners and deferred despawns.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    pub hero: ActorState,
    pub monsters: Vec<ActorState>,
}

impl EntitiesState {
    pub fn new(hero: ActorState) -> Self {
        Self {
            hero,
            monsters: Vec::new(),
        }
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        if id == self.hero.id {
            Some(&self.hero)
        } else {
            self.monsters.iter().find(|actor| actor.id == id)
        }
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        if id == self.hero.id {
            Some(&mut self.hero)
        } else {
            self.monsters.iter_mut().find(|actor| actor.id == id)
        }
    }

    /// Hero first, then monsters in spawn order. Iteration order is part of
    /// the deterministic tick contract.
    pub fn iter(&self) -> impl Iterator<Item = &ActorState> {
        std::iter::once(&self.hero).chain(self.monsters.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ActorState> {
        std::iter::once(&mut self.hero).chain(self.monsters.iter_mut())
    }

    /// Identifiers in iteration order, for phases that need to re-borrow
    /// per actor while mutating others.
    pub fn ids(&self) -> Vec<EntityId> {
        self.iter().map(|actor| actor.id).collect()
    }

    pub fn push_monster(&mut self, monster: ActorState) {
        self.monsters.push(monster);
    }

    pub fn remove_monster(&mut self, id: EntityId) -> Option<ActorState> {
        let index = self.monsters.iter().position(|actor| actor.id == id)?;
        Some(self.monsters.remove(index))
    }

    pub fn monsters_alive(&self) -> usize {
        self.monsters.iter().filter(|m| m.is_alive()).count()
    }
}
