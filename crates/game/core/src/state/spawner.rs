//! Wave spawner state.

use arrayvec::ArrayVec;
use glam::Vec3;

use crate::config::GameConfig;
use crate::state::common::{GameTime, SpawnerId, TemplateId};

/// Templates a spawner draws from, picked uniformly per spawn.
pub type SpawnPool = ArrayVec<TemplateId, { GameConfig::MAX_SPAWN_POOL }>;

/// A monster spawner placed in the arena.
///
/// Dormant spawners wake when the hero comes within `activation_radius`.
/// Awake ones emit a monster every `interval` seconds while fewer than
/// `max_alive` of their monsters are alive, and collapse for good after
/// crediting `collapse_after` kills or once the match is won.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnerState {
    pub id: SpawnerId,
    pub position: Vec3,
    pub active: bool,
    pub activation_radius: f32,
    pub interval: f32,
    /// Spawn positions are scattered uniformly on a disc of this radius.
    pub spawn_radius: f32,
    pub max_alive: u32,
    pub collapse_after: u32,
    pub pool: SpawnPool,

    pub next_spawn_at: GameTime,
    /// Monsters from this spawner currently alive.
    pub live: u32,
    /// Kills credited back to this spawner.
    pub kills: u32,
    pub collapsed: bool,
}

impl SpawnerState {
    pub const DEFAULT_INTERVAL: f32 = 2.0;
    pub const DEFAULT_SPAWN_RADIUS: f32 = 10.0;
    pub const DEFAULT_MAX_ALIVE: u32 = 5;
    pub const DEFAULT_COLLAPSE_AFTER: u32 = 10;
    pub const DEFAULT_ACTIVATION_RADIUS: f32 = 8.0;

    /// A spawner with stock tuning that starts awake. Content overrides
    /// fields as needed.
    pub fn new(id: SpawnerId, position: Vec3, pool: SpawnPool) -> Self {
        Self {
            id,
            position,
            active: true,
            activation_radius: Self::DEFAULT_ACTIVATION_RADIUS,
            interval: Self::DEFAULT_INTERVAL,
            spawn_radius: Self::DEFAULT_SPAWN_RADIUS,
            max_alive: Self::DEFAULT_MAX_ALIVE,
            collapse_after: Self::DEFAULT_COLLAPSE_AFTER,
            pool,
            next_spawn_at: GameTime::ZERO,
            live: 0,
            kills: 0,
            collapsed: false,
        }
    }

    /// Same, but dormant until the hero walks into `activation_radius`.
    pub fn dormant(id: SpawnerId, position: Vec3, pool: SpawnPool) -> Self {
        Self {
            active: false,
            ..Self::new(id, position, pool)
        }
    }

    /// One of this spawner's monsters went down.
    pub fn credit_kill(&mut self) {
        self.kills += 1;
        self.live = self.live.saturating_sub(1);
    }

    pub fn should_collapse(&self) -> bool {
        self.kills >= self.collapse_after
    }

    pub fn can_spawn(&self, now: GameTime) -> bool {
        self.active
            && !self.collapsed
            && !self.pool.is_empty()
            && self.live < self.max_alive
            && now.has_reached(self.next_spawn_at)
    }
}
