//! Directives: side effects the simulation asks of its host.
//!
//! The core owns timing and damage; the host owns positions, animation and
//! audio. Each tick returns the directives produced this step and the host
//! applies them in order. Directives are fire-and-forget: the simulation
//! never learns whether one was honoured, and a host without a movement or
//! presentation layer may drop them wholesale.

use glam::Vec3;
use strum::Display;

use crate::state::EntityId;

/// A side effect requested from the host.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Directive {
    /// Steer an actor toward a world-space point.
    SetDestination { actor: EntityId, point: Vec3 },
    /// Cancel an actor's current path.
    StopMovement { actor: EntityId },
    /// Override travel speed and acceleration (dodge dash).
    SetSpeed {
        actor: EntityId,
        speed: f32,
        acceleration: f32,
    },
    /// Restore the actor's template movement profile after an override.
    ResetSpeed { actor: EntityId },
    /// Turn an actor toward a point (cast targeting).
    FaceToward { actor: EntityId, point: Vec3 },
    /// Cosmetic-only request.
    Cue(PresentationCue),
}

/// Where a visual effect attaches.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectAnchor {
    /// Fixed world position.
    At(Vec3),
    /// Follows an actor.
    On(EntityId),
}

/// Named animation states the presenter maps onto its rigs.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationCue {
    Attack,
    Buff,
    Die,
}

/// Visual effect kinds.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectCue {
    /// Melee swing arc.
    Slash,
    /// Ranged strike impact.
    Bolt,
    /// Brief flare when a buff lands.
    BuffStart,
    /// Aura held for the buff duration.
    BuffAura,
    /// Dash trail.
    DodgeTrail,
    /// Brief tint when an actor takes damage.
    HitFlash,
    /// Puff where a monster appears.
    SpawnFlash,
    /// Spawner destruction burst.
    SpawnerCollapse,
    /// Full-screen desaturation after the hero falls.
    ScreenDesaturate,
}

/// Sound effect kinds.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoundCue {
    Buff,
    Dodge,
}

/// A cosmetic request. Dropping every cue leaves the simulation outcome
/// unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PresentationCue {
    /// Play an animation state on an actor's rig. `speed` scales playback
    /// (attack animations track attack speed).
    Animation {
        actor: EntityId,
        name: AnimationCue,
        speed: f32,
    },
    /// Show a visual effect. `ttl` is a presenter-side lifetime hint in
    /// seconds; `None` means the presenter's default for that kind.
    Effect {
        kind: EffectCue,
        anchor: EffectAnchor,
        ttl: Option<f32>,
    },
    /// Play a one-shot sound.
    Sound { kind: SoundCue },
}
