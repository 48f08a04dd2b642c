//! Deterministic arena combat rules shared across clients.
//!
//! `obelisk-core` defines the canonical simulation (ability timing, damage,
//! spawners, objectives) and exposes pure APIs that can be reused by both the
//! runtime and offline tools. All state mutation flows through
//! [`engine::Engine::tick`]; the crate itself never reads a clock, spawns a
//! task, or touches I/O. Scene queries and randomness arrive through the
//! oracle traits in [`env`], and every side effect the simulation wants from
//! the host leaves the tick as a [`Directive`].
pub mod ability;
pub(crate) mod combat;
pub mod config;
pub mod directive;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub(crate) mod spawn;
pub mod state;
pub mod view;

pub use ability::{
    AbilityKind, AbilityPayload, AbilityProfile, AbilitySlot, BuffPayload, CastProfile, CastTime,
    Cooldown, DodgePayload, StrikePayload,
};
pub use config::GameConfig;
pub use directive::{AnimationCue, Directive, EffectAnchor, EffectCue, PresentationCue, SoundCue};
pub use engine::{Engine, TickOutcome};
pub use env::{
    BestiaryOracle, Env, GameEnv, MonsterTemplate, PcgRng, Pose, RngOracle, SceneOracle,
    compute_seed,
};
pub use error::SimError;
pub use events::GameEvent;
pub use state::{
    ActorKind, ActorState, ActorStats, BuffState, Buttons, CastState, DeferredAction,
    DeferredQueue, EntitiesState, EntityId, Frame, GameClock, GameState, GameTime, IntentState,
    LifeState, Loadout, MatchOutcome, ObjectiveState, PickupId, PickupState, ResourceMeter,
    SpawnPool, SpawnerId, SpawnerState, TemplateId,
};
pub use view::{AbilityReadout, HudSnapshot};
