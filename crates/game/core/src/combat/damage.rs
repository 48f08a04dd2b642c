//! The single damage funnel.
//!
//! Every hit in the simulation lands through [`apply_damage`], so the
//! immunity check, buff reduction, clamping and the defeat transition exist
//! exactly once. Defeat fans out into kill credit, objective progress and
//! deferred cleanup.

use crate::config::GameConfig;
use crate::directive::{
    AnimationCue, Directive, EffectAnchor, EffectCue, PresentationCue,
};
use crate::engine::TickOutcome;
use crate::events::GameEvent;
use crate::state::{
    ActorKind, DeferredAction, EntityId, GameState, GameTime, LifeState, MatchOutcome,
};

/// Apply `amount` raw damage to `target`.
///
/// Order of checks mirrors the intake contract: defeated and immune targets
/// absorb nothing and emit nothing; otherwise the buff reduction scales the
/// amount, the health meter clamps it, and depletion triggers the one-shot
/// defeat transition.
pub(crate) fn apply_damage(
    state: &mut GameState,
    config: &GameConfig,
    target: EntityId,
    amount: f32,
    source: Option<EntityId>,
    now: GameTime,
    out: &mut TickOutcome,
) {
    let Some(actor) = state.entities.actor_mut(target) else {
        return;
    };
    if !actor.is_alive() || actor.immune {
        return;
    }

    let reduced = amount * (1.0 - actor.damage_reduction());
    let dealt = actor.stats.health.damage(reduced);
    let defeated = actor.stats.health.is_depleted();

    out.event(GameEvent::DamageDealt {
        source,
        target,
        amount: dealt,
        defeated,
    });
    if dealt > 0.0 {
        out.cue(PresentationCue::Effect {
            kind: EffectCue::HitFlash,
            anchor: EffectAnchor::On(target),
            ttl: Some(0.1),
        });
    }

    if defeated {
        defeat(state, config, target, source, now, out);
    }
}

/// Transition an actor to `Defeated`. Runs at most once per actor: callers
/// reach this only from the alive branch of [`apply_damage`].
fn defeat(
    state: &mut GameState,
    config: &GameConfig,
    target: EntityId,
    source: Option<EntityId>,
    now: GameTime,
    out: &mut TickOutcome,
) {
    let Some(actor) = state.entities.actor_mut(target) else {
        return;
    };
    actor.life = LifeState::Defeated { at: now };
    actor.cast = None;
    actor.immune = false;
    let kind = actor.kind;
    let spawned_by = actor.spawned_by;

    out.directive(Directive::StopMovement { actor: target });
    out.cue(PresentationCue::Animation {
        actor: target,
        name: AnimationCue::Die,
        speed: 1.0,
    });
    out.event(GameEvent::ActorDefeated {
        actor: target,
        by: source,
    });

    match kind {
        ActorKind::Monster { .. } => {
            if let Some(spawner) = spawned_by.and_then(|id| state.spawner_mut(id)) {
                spawner.credit_kill();
            }
            state.objective.record_kill();
            if state.objective.is_complete() && state.objective.conclude(MatchOutcome::Won) {
                out.event(GameEvent::MatchConcluded {
                    outcome: MatchOutcome::Won,
                });
            }
            state
                .deferred
                .schedule(now.after(config.corpse_linger), DeferredAction::Despawn(target));
        }
        ActorKind::Hero => {
            out.cue(PresentationCue::Effect {
                kind: EffectCue::ScreenDesaturate,
                anchor: EffectAnchor::On(target),
                ttl: None,
            });
            state.deferred.schedule(
                now.after(config.defeat_screen_delay),
                DeferredAction::Conclude(MatchOutcome::Lost),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorState, ActorStats, BuffState, ObjectiveState, TemplateId};

    fn harness(monster_health: f32) -> GameState {
        let hero = ActorState::hero(ActorStats::new(500.0, 3.5, 1.5, 2.0, 10.0), []);
        let mut state = GameState::new(1, hero, ObjectiveState::new(2));
        let id = state.allocate_entity();
        state.entities.push_monster(ActorState::monster(
            id,
            TemplateId(0),
            ActorStats::new(monster_health, 2.5, 1.0, 2.0, 10.0),
            [],
            None,
        ));
        state
    }

    #[test]
    fn immune_target_takes_nothing() {
        let mut state = harness(40.0);
        state.entities.hero.immune = true;
        let mut out = TickOutcome::new();

        apply_damage(
            &mut state,
            &GameConfig::new(),
            EntityId::HERO,
            100.0,
            None,
            GameTime::ZERO,
            &mut out,
        );

        assert_eq!(state.entities.hero.stats.health.current, 500.0);
        assert!(out.events.is_empty());
    }

    #[test]
    fn buff_reduction_scales_incoming_damage() {
        let mut state = harness(40.0);
        state.entities.hero.buff = Some(BuffState {
            started_at: GameTime::ZERO,
            expires_at: GameTime::new(10.0),
            damage_multiplier: 2.0,
            damage_reduction: 0.2,
        });
        let mut out = TickOutcome::new();

        apply_damage(
            &mut state,
            &GameConfig::new(),
            EntityId::HERO,
            50.0,
            Some(EntityId(1)),
            GameTime::ZERO,
            &mut out,
        );

        assert_eq!(state.entities.hero.stats.health.current, 460.0);
        assert!(matches!(
            out.events[0],
            GameEvent::DamageDealt { amount, .. } if (amount - 40.0).abs() < 1e-6
        ));
    }

    #[test]
    fn lethal_damage_defeats_once() {
        let mut state = harness(40.0);
        let mut out = TickOutcome::new();
        let config = GameConfig::new();

        apply_damage(
            &mut state,
            &config,
            EntityId(1),
            100.0,
            Some(EntityId::HERO),
            GameTime::new(1.0),
            &mut out,
        );
        // A second lethal hit on the corpse is a no-op.
        apply_damage(
            &mut state,
            &config,
            EntityId(1),
            100.0,
            Some(EntityId::HERO),
            GameTime::new(1.0),
            &mut out,
        );

        let defeats = out
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::ActorDefeated { .. }))
            .count();
        assert_eq!(defeats, 1);
        assert_eq!(state.objective.kills, 1);
        assert_eq!(state.deferred.len(), 1);

        let monster = state.entities.actor(EntityId(1)).expect("corpse remains");
        assert_eq!(monster.stats.health.current, 0.0);
        assert!(!monster.is_alive());
    }

    #[test]
    fn final_kill_wins_the_match() {
        let mut state = harness(40.0);
        state.objective.kills = 1;
        let mut out = TickOutcome::new();

        apply_damage(
            &mut state,
            &GameConfig::new(),
            EntityId(1),
            40.0,
            Some(EntityId::HERO),
            GameTime::new(1.0),
            &mut out,
        );

        assert_eq!(state.outcome(), MatchOutcome::Won);
        assert!(out.events.iter().any(|e| matches!(
            e,
            GameEvent::MatchConcluded {
                outcome: MatchOutcome::Won
            }
        )));
    }

    #[test]
    fn hero_defeat_schedules_delayed_loss() {
        let mut state = harness(40.0);
        state.entities.hero.stats.health.current = 5.0;
        let mut out = TickOutcome::new();

        apply_damage(
            &mut state,
            &GameConfig::new(),
            EntityId::HERO,
            10.0,
            Some(EntityId(1)),
            GameTime::new(2.0),
            &mut out,
        );

        // Verdict is still open until the deferred conclude runs.
        assert_eq!(state.outcome(), MatchOutcome::InProgress);
        assert!(!state.entities.hero.is_alive());
        assert_eq!(state.deferred.len(), 1);
    }
}
