//! Read-side environment: everything the tick consults but does not own.
//!
//! The simulation keeps no positions and no entropy. Both live behind
//! oracle traits implemented by the host (the runtime's navigator and its
//! RNG), aggregated into an [`Env`] that is handed to every tick. Oracles
//! are optional: a missing oracle downgrades the systems that need it to a
//! no-op instead of failing the tick.

mod rng;

pub use rng::{PcgRng, RngOracle, compute_seed};

use glam::Vec3;

use crate::ability::AbilityProfile;
use crate::state::{ActorStats, EntityId, TemplateId};

/// Position and facing of one actor, as tracked by the host navigator.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position: Vec3,
    /// Unit-length facing direction on the ground plane.
    pub forward: Vec3,
}

impl Pose {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }
}

/// Spatial queries answered by the host's movement layer.
pub trait SceneOracle: Send + Sync {
    /// Current pose of `actor`, if the host is tracking it.
    fn pose(&self, actor: EntityId) -> Option<Pose>;

    /// Damageable actors hostile to `of` within `radius` of `center`.
    ///
    /// Defeated actors are excluded. Order must be deterministic for a
    /// given scene (the engine applies damage in the returned order).
    fn hostiles_within(&self, of: EntityId, center: Vec3, radius: f32) -> Vec<EntityId>;
}

/// A monster archetype the spawn system can instantiate.
#[derive(Clone, Debug, PartialEq)]
pub struct MonsterTemplate {
    pub stats: ActorStats,
    pub abilities: Vec<AbilityProfile>,
}

/// Lookup from template id to archetype, backed by encounter content.
pub trait BestiaryOracle: Send + Sync {
    fn template(&self, id: TemplateId) -> Option<MonsterTemplate>;
}

/// Aggregates the read-only oracles a tick may consult.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, S, R, B>
where
    S: SceneOracle + ?Sized,
    R: RngOracle + ?Sized,
    B: BestiaryOracle + ?Sized,
{
    scene: Option<&'a S>,
    rng: Option<&'a R>,
    bestiary: Option<&'a B>,
}

/// Type-erased environment as consumed by the engine.
pub type GameEnv<'a> =
    Env<'a, dyn SceneOracle + 'a, dyn RngOracle + 'a, dyn BestiaryOracle + 'a>;

impl<'a, S, R, B> Env<'a, S, R, B>
where
    S: SceneOracle + ?Sized,
    R: RngOracle + ?Sized,
    B: BestiaryOracle + ?Sized,
{
    pub fn new(scene: Option<&'a S>, rng: Option<&'a R>, bestiary: Option<&'a B>) -> Self {
        Self {
            scene,
            rng,
            bestiary,
        }
    }

    pub fn with_all(scene: &'a S, rng: &'a R, bestiary: &'a B) -> Self {
        Self::new(Some(scene), Some(rng), Some(bestiary))
    }

    pub fn empty() -> Self {
        Self {
            scene: None,
            rng: None,
            bestiary: None,
        }
    }

    pub fn scene(&self) -> Option<&'a S> {
        self.scene
    }

    pub fn rng(&self) -> Option<&'a R> {
        self.rng
    }

    pub fn bestiary(&self) -> Option<&'a B> {
        self.bestiary
    }
}

impl<'a, S, R, B> Env<'a, S, R, B>
where
    S: SceneOracle + 'a,
    R: RngOracle + 'a,
    B: BestiaryOracle + 'a,
{
    pub fn into_game_env(self) -> GameEnv<'a> {
        let scene: Option<&'a dyn SceneOracle> = self.scene.map(|scene| scene as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        let bestiary: Option<&'a dyn BestiaryOracle> =
            self.bestiary.map(|bestiary| bestiary as _);
        Env::new(scene, rng, bestiary)
    }
}
