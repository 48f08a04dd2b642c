//! Simulation-wide tuning constants and capacity bounds.

/// Tunable parameters shared by every system in the simulation.
///
/// Capacity bounds are associated constants because they size fixed-capacity
/// collections ([`arrayvec::ArrayVec`]) inside the state; the remaining knobs
/// are plain fields so content can override them per encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Turn rate applied by the host when smoothing an actor toward a
    /// [`FaceToward`](crate::directive::Directive::FaceToward) point, in
    /// lerp-factor units per second.
    pub turning_speed: f32,

    /// Distance at which the hero automatically collects a pickup.
    pub pickup_radius: f32,

    /// Seconds a defeated monster lingers before its despawn is scheduled.
    pub corpse_linger: f32,

    /// Seconds between the hero's defeat and the match concluding as lost.
    pub defeat_screen_delay: f32,
}

impl GameConfig {
    /// Maximum live monsters across all spawners.
    pub const MAX_MONSTERS: usize = 64;

    /// Maximum spawners in one arena.
    pub const MAX_SPAWNERS: usize = 16;

    /// Maximum pickups placed in one arena.
    pub const MAX_PICKUPS: usize = 32;

    /// Maximum monster templates one spawner can draw from.
    pub const MAX_SPAWN_POOL: usize = 8;

    /// Maximum ability slots per actor.
    pub const MAX_ABILITIES: usize = 8;

    pub const DEFAULT_TURNING_SPEED: f32 = 10.0;
    pub const DEFAULT_PICKUP_RADIUS: f32 = 1.2;
    pub const DEFAULT_CORPSE_LINGER: f32 = 3.0;
    pub const DEFAULT_DEFEAT_SCREEN_DELAY: f32 = 5.0;

    pub fn new() -> Self {
        Self {
            turning_speed: Self::DEFAULT_TURNING_SPEED,
            pickup_radius: Self::DEFAULT_PICKUP_RADIUS,
            corpse_linger: Self::DEFAULT_CORPSE_LINGER,
            defeat_screen_delay: Self::DEFAULT_DEFEAT_SCREEN_DELAY,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
