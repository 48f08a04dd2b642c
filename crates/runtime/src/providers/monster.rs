//! The monster seat: every template shares one pursue-and-claw doctrine.

use async_trait::async_trait;

use obelisk_core::{Buttons, EntityId, GameState, IntentState, SceneOracle};

use super::IntentProvider;
use crate::error::Result;

/// Walk at the hero; claw once in reach. Monsters never dodge or buff.
pub struct MonsterDoctrine;

#[async_trait]
impl IntentProvider for MonsterDoctrine {
    async fn provide_intent(
        &self,
        actor: EntityId,
        state: &GameState,
        scene: &dyn SceneOracle,
    ) -> Result<IntentState> {
        let hero = &state.entities.hero;
        let Some(monster) = state.entities.actor(actor) else {
            return Ok(IntentState::idle());
        };
        if !monster.is_alive() || !hero.is_alive() {
            return Ok(IntentState::idle());
        }
        let (Some(me), Some(prey)) = (scene.pose(actor), scene.pose(hero.id)) else {
            return Ok(IntentState::idle());
        };

        let reach = monster.stats.attack_range;
        if me.position.distance_squared(prey.position) <= reach * reach {
            Ok(IntentState::new(Buttons::ATTACK, prey.position))
        } else {
            Ok(IntentState::new(Buttons::MOVE, prey.position))
        }
    }
}
