//! Cast lifecycle: intent selection, windup bookkeeping, effect resolution.
//!
//! Starting a cast at `t0` with duration `d` and activation fraction `f`
//! pins three deadlines on the actor:
//!
//! ```text
//! t0 ──────── t0 + d*f ───────────── t0 + d
//!    windup       │      recovery       │
//!                 └ effect lands        └ next cast may start
//!                 └ movement unlocks at  t0 + d*f + lockout
//! ```
//!
//! A cast in flight is never interrupted; new intents wait for the gates.
//! Resolution consumes the cast first and applies the effect second, so a
//! resolution that itself deals damage walks a state with no stale windup.

use crate::ability::{AbilityKind, AbilityPayload, Cooldown};
use crate::combat;
use crate::config::GameConfig;
use crate::directive::{
    AnimationCue, Directive, EffectAnchor, EffectCue, PresentationCue, SoundCue,
};
use crate::engine::TickOutcome;
use crate::env::GameEnv;
use crate::events::GameEvent;
use crate::state::{
    ActorState, BuffState, Buttons, CastState, EntityId, Frame, GameState, GameTime,
};

/// Start casts for every actor whose intent and gates allow one.
pub(crate) fn begin_casts(state: &mut GameState, frame: Frame, out: &mut TickOutcome) {
    let now = frame.now;
    for id in state.entities.ids() {
        let Some(actor) = state.entities.actor_mut(id) else {
            continue;
        };
        if !actor.is_alive() {
            continue;
        }

        // A dodge press is buffered even mid-cast, so mashing the key just
        // before the cooldown ends still dashes.
        if actor.intent.held.contains(Buttons::DODGE) {
            actor.buffered_dodge_at = Some(now);
        }
        if actor.is_casting() {
            continue;
        }

        if let Some(index) = select(actor, now) {
            begin(actor, index, now, out);
        }
    }
}

/// Pick the slot to cast this tick. Attack outranks buff outranks dodge
/// when several intents are live at once.
fn select(actor: &ActorState, now: GameTime) -> Option<usize> {
    let held = actor.intent.held;

    if held.contains(Buttons::ATTACK)
        && now.has_reached(actor.can_cast_at)
        && let Some(index) = actor.strike_slot()
    {
        return Some(index);
    }

    if held.contains(Buttons::BUFF)
        && now.has_reached(actor.can_cast_at)
        && let Some(index) = actor.slot_of(AbilityKind::Buff)
        && actor.loadout[index].is_off_cooldown(now)
    {
        return Some(index);
    }

    // Dodge runs off the buffered press and skips the shared attack gate,
    // so it can cut attack recovery short.
    if let Some(index) = actor.slot_of(AbilityKind::Dodge)
        && let AbilityPayload::Dodge(payload) = actor.loadout[index].profile.payload
        && let Some(pressed_at) = actor.buffered_dodge_at
        && now.since(pressed_at) < payload.buffer_window
        && actor.loadout[index].is_off_cooldown(now)
    {
        return Some(index);
    }

    None
}

fn begin(actor: &mut ActorState, index: usize, now: GameTime, out: &mut TickOutcome) {
    let cast = actor.loadout[index].profile.cast;
    let kind = actor.loadout[index].profile.kind;
    let aim = actor.intent.aim;

    let seconds = cast.cast_seconds(&actor.stats);
    let resolves_at = now.after(seconds * cast.activation_fraction);
    actor.cast = Some(CastState {
        ability: kind,
        started_at: now,
        resolves_at,
        target: aim,
    });
    actor.can_cast_at = now.after(seconds);
    actor.can_move_at = resolves_at.after(cast.movement_lockout);
    if let Cooldown::Dedicated(cooldown) = cast.cooldown {
        actor.loadout[index].cooldown_until = now.after(cooldown);
    }

    out.directive(Directive::StopMovement { actor: actor.id });
    match kind {
        AbilityKind::MeleeStrike | AbilityKind::RangedStrike => {
            out.cue(PresentationCue::Animation {
                actor: actor.id,
                name: AnimationCue::Attack,
                speed: actor.stats.attacks_per_second,
            });
        }
        AbilityKind::Buff => {
            out.cue(PresentationCue::Animation {
                actor: actor.id,
                name: AnimationCue::Buff,
                speed: 1.0,
            });
        }
        AbilityKind::Dodge => {
            actor.buffered_dodge_at = None;
            // Immunity opens at the cast start and holds until movement
            // unlocks; the expiry phase clears it.
            actor.immune = true;
            out.cue(PresentationCue::Sound {
                kind: SoundCue::Dodge,
            });
        }
    }
    out.event(GameEvent::AbilityStarted {
        actor: actor.id,
        ability: kind,
        target: aim,
    });
}

/// Resolve every cast whose activation instant has arrived.
pub(crate) fn resolve_casts(
    state: &mut GameState,
    config: &GameConfig,
    frame: Frame,
    env: &GameEnv<'_>,
    out: &mut TickOutcome,
) {
    let now = frame.now;

    // Consume due casts first so effect application sees no stale windups.
    let mut due: Vec<(EntityId, CastState)> = Vec::new();
    for actor in state.entities.iter_mut() {
        if !actor.is_alive() {
            continue;
        }
        let Some(cast) = actor.cast else {
            continue;
        };
        if now.has_reached(cast.resolves_at) {
            actor.cast = None;
            due.push((actor.id, cast));
        }
    }

    for (id, cast) in due {
        out.event(GameEvent::AbilityResolved {
            actor: id,
            ability: cast.ability,
        });
        match cast.ability {
            AbilityKind::MeleeStrike | AbilityKind::RangedStrike => {
                resolve_strike(state, config, env, id, cast, now, out);
            }
            AbilityKind::Buff => resolve_buff(state, id, cast, now, out),
            AbilityKind::Dodge => resolve_dodge(state, env, id, cast, out),
        }
    }
}

fn resolve_strike(
    state: &mut GameState,
    config: &GameConfig,
    env: &GameEnv<'_>,
    id: EntityId,
    cast: CastState,
    now: GameTime,
    out: &mut TickOutcome,
) {
    let Some((damage, range, payload)) = state.entities.actor(id).and_then(|actor| {
        let slot = actor.slot(cast.ability)?;
        let AbilityPayload::Strike(payload) = slot.profile.payload else {
            return None;
        };
        Some((actor.attack_damage(), actor.stats.attack_range, payload))
    }) else {
        return;
    };

    // Without a scene there is nothing to hit; the cast still cycled its
    // gates, which is the tolerant-degradation contract for missing hosts.
    let Some(scene) = env.scene() else {
        return;
    };
    let Some(pose) = scene.pose(id) else {
        return;
    };

    let melee = cast.ability == AbilityKind::MeleeStrike;
    let (center, radius) = if melee {
        let dir = (cast.target - pose.position)
            .try_normalize()
            .unwrap_or(pose.forward);
        (
            pose.position + dir * (payload.reach * range),
            payload.spread * range,
        )
    } else {
        (cast.target, payload.spread * range)
    };

    for target in scene.hostiles_within(id, center, radius) {
        combat::apply_damage(state, config, target, damage, Some(id), now, out);
    }

    out.cue(PresentationCue::Effect {
        kind: if melee { EffectCue::Slash } else { EffectCue::Bolt },
        anchor: EffectAnchor::At(if melee { pose.position } else { center }),
        ttl: Some(1.0),
    });
}

fn resolve_buff(
    state: &mut GameState,
    id: EntityId,
    cast: CastState,
    now: GameTime,
    out: &mut TickOutcome,
) {
    let Some(actor) = state.entities.actor_mut(id) else {
        return;
    };
    let Some(payload) = actor.slot(AbilityKind::Buff).and_then(|slot| {
        let AbilityPayload::Buff(payload) = slot.profile.payload else {
            return None;
        };
        Some(payload)
    }) else {
        return;
    };

    // Duration counts from the cast start, so the windup eats into it.
    let expires_at = cast.started_at.after(payload.duration);
    actor.buff = Some(BuffState {
        started_at: cast.started_at,
        expires_at,
        damage_multiplier: payload.damage_multiplier,
        damage_reduction: payload.damage_reduction,
    });

    out.event(GameEvent::BuffApplied {
        actor: id,
        expires_at,
    });
    out.cue(PresentationCue::Sound {
        kind: SoundCue::Buff,
    });
    out.cue(PresentationCue::Effect {
        kind: EffectCue::BuffStart,
        anchor: EffectAnchor::On(id),
        ttl: Some(1.0),
    });
    out.cue(PresentationCue::Effect {
        kind: EffectCue::BuffAura,
        anchor: EffectAnchor::On(id),
        ttl: Some(expires_at.since(now).max(0.0)),
    });
}

fn resolve_dodge(
    state: &mut GameState,
    env: &GameEnv<'_>,
    id: EntityId,
    cast: CastState,
    out: &mut TickOutcome,
) {
    let Some(actor) = state.entities.actor_mut(id) else {
        return;
    };
    let Some(payload) = actor.slot(AbilityKind::Dodge).and_then(|slot| {
        let AbilityPayload::Dodge(payload) = slot.profile.payload else {
            return None;
        };
        Some(payload)
    }) else {
        return;
    };

    actor.dodge_boost = true;
    out.directive(Directive::SetSpeed {
        actor: id,
        speed: payload.speed,
        acceleration: payload.acceleration,
    });
    if let Some(pose) = env.scene().and_then(|scene| scene.pose(id)) {
        let dir = (cast.target - pose.position)
            .try_normalize()
            .unwrap_or(pose.forward);
        out.directive(Directive::SetDestination {
            actor: id,
            point: pose.position + dir * payload.length,
        });
    }
    out.cue(PresentationCue::Effect {
        kind: EffectCue::DodgeTrail,
        anchor: EffectAnchor::On(id),
        ttl: Some(1.0),
    });
}
