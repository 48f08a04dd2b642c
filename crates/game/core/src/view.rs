//! Read-only projections of [`GameState`] for HUDs and logs.
//!
//! Snapshots carry raw numbers; presenters decide how to round them (the
//! reference client ceils cooldown seconds, for instance).

use std::fmt;

use crate::ability::{AbilityKind, AbilitySlot};
use crate::state::{GameState, GameTime, MatchOutcome, ResourceMeter};

/// HUD state of one cooldown-gated ability.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityReadout {
    pub ready: bool,
    /// Seconds until the ability can start again, zero when ready.
    pub remaining: f32,
    /// The ability's effect is currently live (buff running, dash boost on).
    pub active: bool,
}

impl AbilityReadout {
    fn capture(slot: &AbilitySlot, now: GameTime, active: bool) -> Self {
        Self {
            ready: slot.is_off_cooldown(now),
            remaining: slot.cooldown_until.since(now).max(0.0),
            active,
        }
    }
}

/// Everything the reference HUD draws, captured after a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HudSnapshot {
    pub time: GameTime,
    pub health: ResourceMeter,
    pub kills: u32,
    pub required_kills: u32,
    pub outcome: MatchOutcome,
    /// Absent when the hero's loadout has no buff slot.
    pub buff: Option<AbilityReadout>,
    /// Absent when the hero's loadout has no dodge slot.
    pub dodge: Option<AbilityReadout>,
}

impl HudSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let now = state.clock.now;
        let hero = &state.entities.hero;
        Self {
            time: now,
            health: hero.stats.health,
            kills: state.objective.kills,
            required_kills: state.objective.required_kills,
            outcome: state.outcome(),
            buff: hero
                .slot(AbilityKind::Buff)
                .map(|slot| AbilityReadout::capture(slot, now, hero.buff.is_some())),
            dodge: hero
                .slot(AbilityKind::Dodge)
                .map(|slot| AbilityReadout::capture(slot, now, hero.dodge_boost || hero.immune)),
        }
    }
}

impl fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hp {:.0}/{:.0} | kills {}/{}",
            self.health.current, self.health.maximum, self.kills, self.required_kills
        )?;
        if let Some(buff) = &self.buff {
            write!(f, " | {}", readout_label("buff", buff))?;
        }
        if let Some(dodge) = &self.dodge {
            write!(f, " | {}", readout_label("dodge", dodge))?;
        }
        if self.outcome != MatchOutcome::InProgress {
            write!(f, " | {}", self.outcome)?;
        }
        Ok(())
    }
}

fn readout_label(name: &str, readout: &AbilityReadout) -> String {
    if readout.active {
        format!("{name} active")
    } else if readout.ready {
        format!("{name} ready")
    } else {
        // Ceil so "0.2s left" never reads as an already-ready 0.
        format!("{name} {:.0}s", readout.remaining.ceil())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{
        AbilityPayload, AbilityProfile, BuffPayload, CastProfile, CastTime, Cooldown,
    };
    use crate::state::{ActorState, ActorStats, BuffState, Frame, ObjectiveState};

    fn buff_profile() -> AbilityProfile {
        AbilityProfile {
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
        }
    }

    #[test]
    fn snapshot_tracks_cooldown_and_active_buff() {
        let hero = ActorState::hero(ActorStats::new(500.0, 3.5, 1.5, 2.0, 10.0), [buff_profile()]);
        let mut state = GameState::new(7, hero, ObjectiveState::new(30));
        state.clock.advance(Frame::new(GameTime::new(2.0), 2.0));
        state.entities.hero.loadout[0].cooldown_until = GameTime::new(30.0);
        state.entities.hero.buff = Some(BuffState {
            started_at: GameTime::ZERO,
            expires_at: GameTime::new(10.0),
            damage_multiplier: 2.0,
            damage_reduction: 0.2,
        });
        state.entities.hero.stats.health.current = 480.0;
        state.objective.kills = 4;

        let hud = HudSnapshot::capture(&state);
        let buff = hud.buff.expect("hero has a buff slot");
        assert!(!buff.ready);
        assert!(buff.active);
        assert_eq!(buff.remaining, 28.0);
        assert!(hud.dodge.is_none());
        assert_eq!(hud.kills, 4);
        assert_eq!(format!("{hud}"), "hp 480/500 | kills 4/30 | buff active");
    }

    #[test]
    fn snapshot_of_a_fresh_hero_reads_ready() {
        let hero = ActorState::hero(ActorStats::new(500.0, 3.5, 1.5, 2.0, 10.0), [buff_profile()]);
        let state = GameState::new(7, hero, ObjectiveState::new(30));

        let hud = HudSnapshot::capture(&state);
        assert_eq!(format!("{hud}"), "hp 500/500 | kills 0/30 | buff ready");
    }
}
