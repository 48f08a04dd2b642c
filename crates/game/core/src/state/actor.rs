//! Per-actor combat state: stats, intent, cast timeline, buff and life.

use arrayvec::ArrayVec;
use bitflags::bitflags;
use glam::Vec3;

use crate::ability::{AbilityKind, AbilityProfile, AbilitySlot};
use crate::config::GameConfig;
use crate::state::common::{EntityId, GameTime, ResourceMeter, SpawnerId, TemplateId};

/// Fixed-capacity ability list carried by each actor.
pub type Loadout = ArrayVec<AbilitySlot, { GameConfig::MAX_ABILITIES }>;

/// What an actor is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    Hero,
    Monster { template: TemplateId },
}

impl ActorKind {
    pub fn is_hero(self) -> bool {
        matches!(self, Self::Hero)
    }
}

/// Whether an actor still participates in combat.
///
/// Defeat is recorded exactly once; a defeated actor stays in the state as a
/// corpse until its deferred despawn runs, and every system skips it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LifeState {
    Alive,
    Defeated { at: GameTime },
}

impl LifeState {
    pub fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }
}

/// Combat statistics. Health is the only mutable meter; the rest are fixed
/// by the actor's template.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorStats {
    pub health: ResourceMeter,
    pub movement_speed: f32,
    pub attacks_per_second: f32,
    pub attack_range: f32,
    pub attack_damage: f32,
}

impl ActorStats {
    pub fn new(
        max_health: f32,
        movement_speed: f32,
        attacks_per_second: f32,
        attack_range: f32,
        attack_damage: f32,
    ) -> Self {
        Self {
            health: ResourceMeter::new(max_health),
            movement_speed,
            attacks_per_second,
            attack_range,
            attack_damage,
        }
    }

    /// Stats the timing math can safely divide by and compare against.
    pub fn is_valid(&self) -> bool {
        self.health.maximum > 0.0
            && self.health.maximum.is_finite()
            && self.movement_speed.is_finite()
            && self.movement_speed >= 0.0
            && self.attacks_per_second.is_finite()
            && self.attacks_per_second > 0.0
            && self.attack_range.is_finite()
            && self.attack_range > 0.0
            && self.attack_damage.is_finite()
            && self.attack_damage >= 0.0
    }
}

/// An in-flight cast. Present only between the cast start and its activation
/// instant; the recovery tail is tracked by `can_cast_at` on the actor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastState {
    pub ability: AbilityKind,
    pub started_at: GameTime,
    /// When the effect lands. Invariant: `started_at <= resolves_at` and
    /// `resolves_at <= can_cast_at` on the owning actor.
    pub resolves_at: GameTime,
    /// Aim point snapshotted at the cast start.
    pub target: Vec3,
}

/// An active self-buff.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffState {
    pub started_at: GameTime,
    pub expires_at: GameTime,
    pub damage_multiplier: f32,
    pub damage_reduction: f32,
}

bitflags! {
    /// Intent buttons held for the current tick.
    ///
    /// `DODGE` behaves as an edge press: the controller converts it into a
    /// buffered timestamp, so a press survives a short cooldown tail.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Buttons: u8 {
        const MOVE   = 1 << 0;
        const ATTACK = 1 << 1;
        const BUFF   = 1 << 2;
        const DODGE  = 1 << 3;
    }
}

/// What an actor wants to do this tick, written by its provider.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntentState {
    pub held: Buttons,
    /// World-space point the intent aims at: movement destination for
    /// `MOVE`, strike/dash direction anchor for the rest.
    pub aim: Vec3,
}

impl IntentState {
    pub fn new(held: Buttons, aim: Vec3) -> Self {
        Self { held, aim }
    }

    /// No buttons, aim wherever it last was.
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Complete combat state for one actor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub kind: ActorKind,
    pub stats: ActorStats,
    pub intent: IntentState,

    /// Windup in flight, if any.
    pub cast: Option<CastState>,
    /// Shared attack gate: no cast may start before this instant.
    pub can_cast_at: GameTime,
    /// Movement gate: movement intents are ignored before this instant.
    pub can_move_at: GameTime,

    pub buff: Option<BuffState>,
    /// Damage is skipped entirely while set (dodge window).
    pub immune: bool,
    /// Most recent dodge press, kept until consumed or the buffer lapses.
    pub buffered_dodge_at: Option<GameTime>,
    /// A dash speed boost is active and must be reset once movement
    /// unlocks.
    pub dodge_boost: bool,

    pub life: LifeState,
    pub loadout: Loadout,
    /// Spawner that owes this monster a kill credit, if any.
    pub spawned_by: Option<SpawnerId>,
}

impl ActorState {
    /// The player-controlled hero. Always entity zero.
    pub fn hero(stats: ActorStats, abilities: impl IntoIterator<Item = AbilityProfile>) -> Self {
        Self::with_kind(EntityId::HERO, ActorKind::Hero, stats, abilities, None)
    }

    pub fn monster(
        id: EntityId,
        template: TemplateId,
        stats: ActorStats,
        abilities: impl IntoIterator<Item = AbilityProfile>,
        spawned_by: Option<SpawnerId>,
    ) -> Self {
        Self::with_kind(id, ActorKind::Monster { template }, stats, abilities, spawned_by)
    }

    fn with_kind(
        id: EntityId,
        kind: ActorKind,
        stats: ActorStats,
        abilities: impl IntoIterator<Item = AbilityProfile>,
        spawned_by: Option<SpawnerId>,
    ) -> Self {
        let mut loadout = Loadout::new();
        for profile in abilities {
            // Past capacity the rest are dropped; validation reports the
            // duplicate-kind case that actually matters.
            let _ = loadout.try_push(AbilitySlot::new(profile));
        }
        Self {
            id,
            kind,
            stats,
            intent: IntentState::idle(),
            cast: None,
            can_cast_at: GameTime::ZERO,
            can_move_at: GameTime::ZERO,
            buff: None,
            immune: false,
            buffered_dodge_at: None,
            dodge_boost: false,
            life: LifeState::Alive,
            loadout,
            spawned_by,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life.is_alive()
    }

    pub fn is_casting(&self) -> bool {
        self.cast.is_some()
    }

    pub fn can_move(&self, now: GameTime) -> bool {
        !self.is_casting() && now.has_reached(self.can_move_at)
    }

    /// First slot holding a strike ability, if the loadout has one.
    pub fn strike_slot(&self) -> Option<usize> {
        self.loadout
            .iter()
            .position(|slot| slot.profile.kind.is_strike())
    }

    pub fn slot_of(&self, kind: AbilityKind) -> Option<usize> {
        self.loadout
            .iter()
            .position(|slot| slot.profile.kind == kind)
    }

    pub fn slot(&self, kind: AbilityKind) -> Option<&AbilitySlot> {
        self.loadout.iter().find(|slot| slot.profile.kind == kind)
    }

    /// Outgoing damage with the active buff applied.
    pub fn attack_damage(&self) -> f32 {
        match &self.buff {
            Some(buff) => self.stats.attack_damage * buff.damage_multiplier,
            None => self.stats.attack_damage,
        }
    }

    /// Fraction of incoming damage absorbed by the active buff.
    pub fn damage_reduction(&self) -> f32 {
        self.buff.map_or(0.0, |buff| buff.damage_reduction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityPayload, BuffPayload, CastProfile, CastTime, Cooldown};

    fn buffed_actor() -> ActorState {
        let mut actor = ActorState::hero(ActorStats::new(500.0, 3.5, 1.5, 2.0, 10.0), []);
        actor.buff = Some(BuffState {
            started_at: GameTime::ZERO,
            expires_at: GameTime::new(10.0),
            damage_multiplier: 2.0,
            damage_reduction: 0.2,
        });
        actor
    }

    #[test]
    fn buff_scales_outgoing_damage() {
        let actor = buffed_actor();
        assert_eq!(actor.attack_damage(), 20.0);
        assert_eq!(actor.damage_reduction(), 0.2);
    }

    #[test]
    fn unbuffed_actor_uses_base_damage() {
        let actor = ActorState::hero(ActorStats::new(500.0, 3.5, 1.5, 2.0, 10.0), []);
        assert_eq!(actor.attack_damage(), 10.0);
        assert_eq!(actor.damage_reduction(), 0.0);
    }

    #[test]
    fn loadout_lookup_by_kind() {
        let buff = AbilityProfile {
            name: "warcry".into(),
            kind: AbilityKind::Buff,
            cast: CastProfile {
                cast_time: CastTime::Fixed(0.5),
                activation_fraction: 0.8,
                movement_lockout: 0.2,
                cooldown: Cooldown::Dedicated(30.0),
            },
            payload: AbilityPayload::Buff(BuffPayload {
                duration: 10.0,
                damage_multiplier: 2.0,
                damage_reduction: 0.2,
            }),
        };
        let actor = ActorState::hero(ActorStats::new(500.0, 3.5, 1.5, 2.0, 10.0), [buff]);
        assert_eq!(actor.slot_of(AbilityKind::Buff), Some(0));
        assert_eq!(actor.strike_slot(), None);
    }
}
