//! Data-driven encounter definitions and loaders.
//!
//! This crate houses the content side of the simulation:
//! - encounter specs (hero, monster catalog, spawners, pickups, rules)
//! - built-in presets used as the tuning baseline
//! - the bestiary oracle the spawn system reads templates from
//! - RON loaders for encounter files
//!
//! Content describes a match before it starts; once
//! [`EncounterSpec::assemble`] has produced an [`EncounterSetup`], the
//! running simulation never reads content again except through the
//! [`Bestiary`] oracle.

pub mod bestiary;
pub mod presets;
pub mod spec;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use bestiary::Bestiary;
pub use spec::{
    ArenaSpec, EncounterSetup, EncounterSpec, HeroSpec, MonsterSpec, PickupSpec, RulesSpec,
    SpawnerSpec, SpecError, StatsSpec,
};

#[cfg(feature = "loaders")]
pub use loaders::{EncounterLoader, LoadResult};
