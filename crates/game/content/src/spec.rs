//! Serializable encounter definitions.
//!
//! An [`EncounterSpec`] is the complete data description of one arena match:
//! rule knobs, the hero, the monster catalog, spawner and pickup placements.
//! Specs come from [`crate::presets`] or from RON files via
//! [`crate::loaders`], and [`assemble`](EncounterSpec::assemble) turns one
//! into live simulation state.

use std::collections::HashSet;

use glam::Vec3;
use thiserror::Error;

use obelisk_core::{
    AbilityProfile, ActorState, ActorStats, GameConfig, GameState, ObjectiveState, PickupId,
    PickupState, SimError, SpawnPool, SpawnerId, SpawnerState, TemplateId,
};

use crate::bestiary::Bestiary;

/// Errors produced while turning a spec into simulation state.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SpecError {
    #[error("spawner {spawner} has an empty template pool")]
    EmptyPool { spawner: SpawnerId },

    #[error("spawner {spawner} references {template}, but the encounter defines {known} templates")]
    UnknownTemplate {
        spawner: SpawnerId,
        template: TemplateId,
        known: usize,
    },

    #[error("spawner {spawner} exceeds the pool capacity of {capacity}")]
    PoolOverflow { spawner: SpawnerId, capacity: usize },

    #[error("monster template '{name}' has invalid stats")]
    TemplateStats { name: String },

    #[error("monster template '{name}' repeats an ability kind")]
    TemplateDuplicateAbility { name: String },

    #[error(transparent)]
    Sim(#[from] SimError),
}

/// Rule knobs applied to the whole match. Mirrors [`GameConfig`] so data
/// files can override any of them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RulesSpec {
    pub turning_speed: f32,
    pub pickup_radius: f32,
    pub corpse_linger: f32,
    pub defeat_screen_delay: f32,
}

impl Default for RulesSpec {
    fn default() -> Self {
        let config = GameConfig::new();
        Self {
            turning_speed: config.turning_speed,
            pickup_radius: config.pickup_radius,
            corpse_linger: config.corpse_linger,
            defeat_screen_delay: config.defeat_screen_delay,
        }
    }
}

impl RulesSpec {
    pub fn to_config(self) -> GameConfig {
        GameConfig {
            turning_speed: self.turning_speed,
            pickup_radius: self.pickup_radius,
            corpse_linger: self.corpse_linger,
            defeat_screen_delay: self.defeat_screen_delay,
        }
    }
}

/// Flat stat block as written in data files.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSpec {
    pub max_health: f32,
    pub movement_speed: f32,
    pub attacks_per_second: f32,
    pub attack_range: f32,
    pub attack_damage: f32,
}

impl StatsSpec {
    pub fn to_stats(self) -> ActorStats {
        ActorStats::new(
            self.max_health,
            self.movement_speed,
            self.attacks_per_second,
            self.attack_range,
            self.attack_damage,
        )
    }
}

/// The player character for this encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroSpec {
    pub spawn: Vec3,
    pub stats: StatsSpec,
    pub abilities: Vec<AbilityProfile>,
}

/// One monster archetype. Its [`TemplateId`] is its index in
/// [`EncounterSpec::monsters`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterSpec {
    pub name: String,
    pub stats: StatsSpec,
    pub abilities: Vec<AbilityProfile>,
}

/// A spawner placement. Tuning fields default to the stock spawner values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SpawnerSpec {
    pub position: Vec3,
    /// Dormant spawners wait for the hero to come close before emitting.
    pub dormant: bool,
    pub activation_radius: f32,
    pub interval: f32,
    pub spawn_radius: f32,
    pub max_alive: u32,
    pub collapse_after: u32,
    /// Indices into [`EncounterSpec::monsters`].
    pub pool: Vec<u16>,
}

impl Default for SpawnerSpec {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            dormant: false,
            activation_radius: SpawnerState::DEFAULT_ACTIVATION_RADIUS,
            interval: SpawnerState::DEFAULT_INTERVAL,
            spawn_radius: SpawnerState::DEFAULT_SPAWN_RADIUS,
            max_alive: SpawnerState::DEFAULT_MAX_ALIVE,
            collapse_after: SpawnerState::DEFAULT_COLLAPSE_AFTER,
            pool: Vec::new(),
        }
    }
}

/// A healing orb placement.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupSpec {
    pub position: Vec3,
    pub heal_amount: f32,
}

/// Playable area bounds, used by intent providers to pick roam points.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaSpec {
    /// The arena is a square of side `2 * half_extent` centred on origin.
    pub half_extent: f32,
}

impl Default for ArenaSpec {
    fn default() -> Self {
        Self { half_extent: 20.0 }
    }
}

/// Complete description of one arena match.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterSpec {
    pub name: String,
    /// Default seed; sessions may override it per run.
    pub seed: u64,
    pub required_kills: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: RulesSpec,
    #[cfg_attr(feature = "serde", serde(default))]
    pub arena: ArenaSpec,
    pub hero: HeroSpec,
    pub monsters: Vec<MonsterSpec>,
    pub spawners: Vec<SpawnerSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pickups: Vec<PickupSpec>,
}

/// Everything a host needs to run one match.
#[derive(Clone, Debug, PartialEq)]
pub struct EncounterSetup {
    pub name: String,
    pub config: GameConfig,
    pub state: GameState,
    pub bestiary: Bestiary,
    pub hero_spawn: Vec3,
    pub arena_half_extent: f32,
}

impl EncounterSpec {
    /// Build live simulation state from this spec.
    ///
    /// Validates templates and the assembled state, so a setup that comes
    /// back `Ok` is safe to tick without further checks.
    pub fn assemble(&self, seed: u64) -> Result<EncounterSetup, SpecError> {
        for monster in &self.monsters {
            if !monster.stats.to_stats().is_valid() {
                return Err(SpecError::TemplateStats {
                    name: monster.name.clone(),
                });
            }
            let mut kinds = HashSet::new();
            for ability in &monster.abilities {
                ability.validate()?;
                if !kinds.insert(ability.kind) {
                    return Err(SpecError::TemplateDuplicateAbility {
                        name: monster.name.clone(),
                    });
                }
            }
        }

        let hero = ActorState::hero(self.hero.stats.to_stats(), self.hero.abilities.iter().cloned());
        let mut state = GameState::new(seed, hero, ObjectiveState::new(self.required_kills));

        for (index, spec) in self.spawners.iter().enumerate() {
            let id = SpawnerId(index as u16);
            if spec.pool.is_empty() {
                return Err(SpecError::EmptyPool { spawner: id });
            }
            let mut pool = SpawnPool::new();
            for &template in &spec.pool {
                if usize::from(template) >= self.monsters.len() {
                    return Err(SpecError::UnknownTemplate {
                        spawner: id,
                        template: TemplateId(template),
                        known: self.monsters.len(),
                    });
                }
                if pool.try_push(TemplateId(template)).is_err() {
                    return Err(SpecError::PoolOverflow {
                        spawner: id,
                        capacity: GameConfig::MAX_SPAWN_POOL,
                    });
                }
            }

            let mut spawner = if spec.dormant {
                SpawnerState::dormant(id, spec.position, pool)
            } else {
                SpawnerState::new(id, spec.position, pool)
            };
            spawner.activation_radius = spec.activation_radius;
            spawner.interval = spec.interval;
            spawner.spawn_radius = spec.spawn_radius;
            spawner.max_alive = spec.max_alive;
            spawner.collapse_after = spec.collapse_after;
            state.spawners.push(spawner);
        }

        for (index, spec) in self.pickups.iter().enumerate() {
            let mut pickup = PickupState::new(PickupId(index as u16), spec.position);
            pickup.heal_amount = spec.heal_amount;
            state.pickups.push(pickup);
        }

        state.validate()?;

        Ok(EncounterSetup {
            name: self.name.clone(),
            config: self.rules.to_config(),
            state,
            bestiary: Bestiary::from_specs(&self.monsters),
            hero_spawn: self.hero.spawn,
            arena_half_extent: self.arena.half_extent,
        })
    }
}
