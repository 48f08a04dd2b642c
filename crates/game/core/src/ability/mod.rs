//! Ability definitions: what an actor can cast and on what timetable.
//!
//! An [`AbilityProfile`] is pure data. Content files describe profiles, the
//! state holds one [`AbilitySlot`] per learned ability, and the controller in
//! [`controller`] walks every actor through the shared windup / activation /
//! recovery timeline. Nothing here mutates state.

pub mod controller;

use strum::Display;

use crate::error::SimError;
use crate::state::{ActorStats, GameTime};

/// The four ability archetypes the combat loop understands.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityKind {
    /// Swing centred ahead of the caster; damages all hostiles in the arc.
    MeleeStrike,
    /// Instant hit around the aimed point.
    RangedStrike,
    /// Self-buff: damage multiplier plus incoming-damage reduction.
    Buff,
    /// Dash with an immunity window.
    Dodge,
}

impl AbilityKind {
    pub fn is_strike(self) -> bool {
        matches!(self, Self::MeleeStrike | Self::RangedStrike)
    }
}

/// How a cast's total duration is derived.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastTime {
    /// `1 / attacks_per_second`, so faster attackers cycle faster.
    FromAttackSpeed,
    /// Fixed duration in seconds, independent of stats.
    Fixed(f32),
}

/// What must have elapsed before the ability can start again.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cooldown {
    /// Gated only by the caster's shared `can_cast_at` deadline.
    SharedAttack,
    /// Additionally keeps its own deadline, `cast start + seconds`.
    Dedicated(f32),
}

/// Timing shape of one cast.
///
/// Starting a cast at `t0` with total duration `d` fixes three deadlines:
///
/// * effect lands at `t0 + d * activation_fraction`
/// * the caster may cast again at `t0 + d`
/// * the caster may move again at activation `+ movement_lockout`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastProfile {
    pub cast_time: CastTime,
    /// Fraction of the cast duration after which the effect resolves, in
    /// `(0, 1]`.
    pub activation_fraction: f32,
    /// Seconds past the activation instant during which movement stays
    /// locked.
    pub movement_lockout: f32,
    pub cooldown: Cooldown,
}

impl CastProfile {
    /// Total cast duration in seconds for a caster with `stats`.
    pub fn cast_seconds(&self, stats: &ActorStats) -> f32 {
        match self.cast_time {
            CastTime::FromAttackSpeed => 1.0 / stats.attacks_per_second,
            CastTime::Fixed(seconds) => seconds,
        }
    }
}

/// Geometry of a strike's hit circle, expressed relative to the caster's
/// attack range so one payload serves actors of different reach.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikePayload {
    /// Centre offset ahead of the caster as a fraction of attack range.
    /// Ranged strikes ignore this and centre on the aimed point instead.
    pub reach: f32,
    /// Hit circle radius as a fraction of attack range.
    pub spread: f32,
}

/// Self-buff parameters. Duration counts from the cast start, not from the
/// activation instant.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffPayload {
    pub duration: f32,
    /// Outgoing damage is multiplied by this while the buff holds.
    pub damage_multiplier: f32,
    /// Incoming damage is scaled by `1 - damage_reduction`.
    pub damage_reduction: f32,
}

/// Dash parameters. The caster is immune from the cast start until its
/// movement lockout expires.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DodgePayload {
    /// Travel speed during the dash.
    pub speed: f32,
    /// Acceleration handed to the host navigator for the dash.
    pub acceleration: f32,
    /// Dash distance along the aimed direction.
    pub length: f32,
    /// Seconds a press stays buffered while the dodge is still on cooldown.
    pub buffer_window: f32,
}

/// Effect-specific data attached to a profile.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityPayload {
    Strike(StrikePayload),
    Buff(BuffPayload),
    Dodge(DodgePayload),
}

/// A complete ability definition as loaded from content.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityProfile {
    pub name: String,
    pub kind: AbilityKind,
    pub cast: CastProfile,
    pub payload: AbilityPayload,
}

impl AbilityProfile {
    /// Check internal consistency. Called once when a simulation is
    /// assembled; the tick pipeline assumes profiles are valid.
    pub fn validate(&self) -> Result<(), SimError> {
        let matches = matches!(
            (self.kind, &self.payload),
            (AbilityKind::MeleeStrike, AbilityPayload::Strike(_))
                | (AbilityKind::RangedStrike, AbilityPayload::Strike(_))
                | (AbilityKind::Buff, AbilityPayload::Buff(_))
                | (AbilityKind::Dodge, AbilityPayload::Dodge(_))
        );
        if !matches {
            return Err(SimError::PayloadMismatch {
                name: self.name.clone(),
                kind: self.kind,
            });
        }

        let fraction = self.cast.activation_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(SimError::ActivationFraction {
                name: self.name.clone(),
                value: fraction,
            });
        }

        let mut timings_ok = self.cast.movement_lockout.is_finite() && self.cast.movement_lockout >= 0.0;
        if let CastTime::Fixed(seconds) = self.cast.cast_time {
            timings_ok &= seconds.is_finite() && seconds > 0.0;
        }
        if let Cooldown::Dedicated(seconds) = self.cast.cooldown {
            timings_ok &= seconds.is_finite() && seconds > 0.0;
        }
        if let AbilityPayload::Buff(buff) = &self.payload {
            timings_ok &= buff.duration.is_finite() && buff.duration > 0.0;
        }
        if !timings_ok {
            return Err(SimError::InvalidTiming {
                name: self.name.clone(),
            });
        }

        Ok(())
    }
}

/// One learned ability plus its per-actor cooldown deadline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySlot {
    pub profile: AbilityProfile,
    /// Absolute deadline for [`Cooldown::Dedicated`] abilities. Always in
    /// the past for [`Cooldown::SharedAttack`] ones.
    pub cooldown_until: GameTime,
}

impl AbilitySlot {
    pub fn new(profile: AbilityProfile) -> Self {
        Self {
            profile,
            cooldown_until: GameTime::ZERO,
        }
    }

    pub fn is_off_cooldown(&self, now: GameTime) -> bool {
        now.has_reached(self.cooldown_until)
    }
}
