//! Intent providers: who decides what each actor wants this tick.
//!
//! The session polls one provider for the hero seat and one for every
//! living monster, then writes the answers into actor state before the
//! engine runs. Providers are async so a seat can be backed by a network
//! peer or an external process, not just the local bots shipped here.

mod hero;
mod monster;

pub use hero::HeroBot;
pub use monster::MonsterDoctrine;

use async_trait::async_trait;

use obelisk_core::{EntityId, GameState, IntentState, SceneOracle};

use crate::error::Result;

/// Supplies one actor's intent for the upcoming tick.
///
/// Implementations get read-only access to the full state and the scene,
/// and must stay deterministic for replay: same state and poses, same
/// intent.
#[async_trait]
pub trait IntentProvider: Send + Sync {
    async fn provide_intent(
        &self,
        actor: EntityId,
        state: &GameState,
        scene: &dyn SceneOracle,
    ) -> Result<IntentState>;
}

/// Presses nothing, ever. Fills a seat that should stand still.
pub struct IdleProvider;

#[async_trait]
impl IntentProvider for IdleProvider {
    async fn provide_intent(
        &self,
        _actor: EntityId,
        _state: &GameState,
        _scene: &dyn SceneOracle,
    ) -> Result<IntentState> {
        Ok(IntentState::idle())
    }
}

/// Replays a fixed intent timeline keyed on match time.
///
/// Each step takes effect at its timestamp and holds until the next one,
/// so a script reads as "from 1.0s, hold MOVE; from 3.0s, hold ATTACK".
pub struct ScriptedProvider {
    steps: Vec<(f32, IntentState)>,
}

impl ScriptedProvider {
    pub fn new(mut steps: Vec<(f32, IntentState)>) -> Self {
        steps.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { steps }
    }
}

#[async_trait]
impl IntentProvider for ScriptedProvider {
    async fn provide_intent(
        &self,
        _actor: EntityId,
        state: &GameState,
        _scene: &dyn SceneOracle,
    ) -> Result<IntentState> {
        let now = state.clock.now.0;
        Ok(self
            .steps
            .iter()
            .take_while(|(at, _)| *at <= now)
            .last()
            .map(|(_, intent)| *intent)
            .unwrap_or_else(IntentState::idle))
    }
}
