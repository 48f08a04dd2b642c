//! A self-sufficient hero seat for headless matches and soak runs.

use async_trait::async_trait;

use obelisk_core::{AbilityKind, Buttons, EntityId, GameState, IntentState, SceneOracle};

use super::IntentProvider;
use crate::error::Result;

/// Crowd size around the hero that justifies spending the buff.
const RALLY_COUNT: usize = 3;
/// Radius of the crowd check, in world units.
const RALLY_RADIUS: f32 = 6.0;
/// Health fraction below which the bot dodges away instead of trading.
const FLEE_FRACTION: f32 = 0.35;

/// Stock hero policy: chase the nearest monster and strike in range, buff
/// when a crowd closes in, dodge out when health runs low.
pub struct HeroBot;

#[async_trait]
impl IntentProvider for HeroBot {
    async fn provide_intent(
        &self,
        actor: EntityId,
        state: &GameState,
        scene: &dyn SceneOracle,
    ) -> Result<IntentState> {
        let hero = &state.entities.hero;
        if actor != hero.id || !hero.is_alive() {
            return Ok(IntentState::idle());
        }
        let Some(pose) = scene.pose(hero.id) else {
            return Ok(IntentState::idle());
        };

        let now = state.clock.now;
        let nearest = state
            .entities
            .monsters
            .iter()
            .filter(|monster| monster.is_alive())
            .filter_map(|monster| {
                scene.pose(monster.id).map(|at| {
                    let distance_sq = at.position.distance_squared(pose.position);
                    (at.position, distance_sq)
                })
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));
        let Some((target, distance_sq)) = nearest else {
            return Ok(IntentState::idle());
        };

        // Low health: dash straight away from the closest threat.
        if hero.stats.health.fraction() < FLEE_FRACTION
            && hero
                .slot(AbilityKind::Dodge)
                .is_some_and(|slot| slot.is_off_cooldown(now))
        {
            let away = (pose.position - target)
                .try_normalize()
                .unwrap_or(pose.forward);
            return Ok(IntentState::new(Buttons::DODGE, pose.position + away * 5.0));
        }

        // Crowded and still healthy: open the buff before trading hits.
        let crowd = scene
            .hostiles_within(hero.id, pose.position, RALLY_RADIUS)
            .len();
        if crowd >= RALLY_COUNT
            && hero.buff.is_none()
            && hero
                .slot(AbilityKind::Buff)
                .is_some_and(|slot| slot.is_off_cooldown(now))
        {
            return Ok(IntentState::new(Buttons::BUFF, pose.position));
        }

        let reach = hero.stats.attack_range;
        if distance_sq <= reach * reach {
            Ok(IntentState::new(Buttons::ATTACK, target))
        } else {
            Ok(IntentState::new(Buttons::MOVE, target))
        }
    }
}
