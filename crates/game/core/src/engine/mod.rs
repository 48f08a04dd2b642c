//! The tick pipeline.
//!
//! [`Engine`] is the authoritative reducer for [`GameState`]. One call to
//! [`tick`](Engine::tick) advances the clock and runs the phases in a fixed
//! order:
//!
//! 1. drain deferred actions that came due
//! 2. expire timed per-actor states (buffs, immunity, dash boost)
//! 3. begin casts from intents
//! 4. resolve casts whose activation instant arrived
//! 5. emit movement directives from gated intents
//! 6. collect pickups under the hero
//! 7. run spawners
//!
//! The phase order is part of the contract: a kill that wins the match in
//! phase 4 collapses every spawner in phase 7 of the same tick. All phases
//! are gated on absolute deadlines, so re-running a tick with `dt = 0`
//! leaves the state unchanged and emits no events.

use crate::ability::controller;
use crate::combat;
use crate::config::GameConfig;
use crate::directive::{Directive, PresentationCue};
use crate::env::GameEnv;
use crate::events::GameEvent;
use crate::spawn;
use crate::state::{
    Buttons, DeferredAction, EntityId, Frame, GameState, GameTime, PickupId,
};

/// Everything one tick produced: events for observers, directives for the
/// host to apply.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    pub events: Vec<GameEvent>,
    pub directives: Vec<Directive>,
}

impl TickOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn directive(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    pub(crate) fn cue(&mut self, cue: PresentationCue) {
        self.directives.push(Directive::Cue(cue));
    }
}

/// Authoritative reducer borrowing externally-owned state for one or more
/// ticks.
pub struct Engine<'a> {
    state: &'a mut GameState,
    config: &'a GameConfig,
}

impl<'a> Engine<'a> {
    pub fn new(state: &'a mut GameState, config: &'a GameConfig) -> Self {
        Self { state, config }
    }

    /// Advance the simulation by one frame.
    pub fn tick(&mut self, frame: Frame, env: GameEnv<'_>) -> TickOutcome {
        let mut out = TickOutcome::new();
        self.state.clock.advance(frame);
        let now = frame.now;

        drain_deferred(self.state, now, &mut out);
        expire_timed_states(self.state, now, &mut out);
        controller::begin_casts(self.state, frame, &mut out);
        controller::resolve_casts(self.state, self.config, frame, &env, &mut out);
        update_movement(self.state, now, &mut out);
        collect_pickups(self.state, self.config, &env, &mut out);
        spawn::update_spawners(self.state, frame, &env, &mut out);

        out
    }
}

fn drain_deferred(state: &mut GameState, now: GameTime, out: &mut TickOutcome) {
    for action in state.deferred.drain_due(now) {
        match action {
            DeferredAction::Despawn(id) => {
                if state.entities.remove_monster(id).is_some() {
                    out.event(GameEvent::ActorDespawned { actor: id });
                }
            }
            DeferredAction::Conclude(outcome) => {
                if state.objective.conclude(outcome) {
                    out.event(GameEvent::MatchConcluded { outcome });
                }
            }
        }
    }
}

/// Clear per-actor states whose deadlines have passed. Runs before casts
/// begin so a dodge started this tick re-arms immunity after the clear.
fn expire_timed_states(state: &mut GameState, now: GameTime, out: &mut TickOutcome) {
    for actor in state.entities.iter_mut() {
        if !actor.is_alive() {
            continue;
        }

        if let Some(buff) = actor.buff
            && now.has_reached(buff.expires_at)
        {
            actor.buff = None;
            out.event(GameEvent::BuffExpired { actor: actor.id });
        }

        if now.has_reached(actor.can_move_at) {
            actor.immune = false;
            if actor.dodge_boost {
                actor.dodge_boost = false;
                out.directive(Directive::ResetSpeed { actor: actor.id });
            }
        }
    }
}

/// Turn gated movement intents into navigator directives. Casting actors
/// only rotate toward their target.
fn update_movement(state: &GameState, now: GameTime, out: &mut TickOutcome) {
    for actor in state.entities.iter() {
        if !actor.is_alive() {
            continue;
        }
        if let Some(cast) = actor.cast {
            out.directive(Directive::FaceToward {
                actor: actor.id,
                point: cast.target,
            });
            continue;
        }
        if now.has_reached(actor.can_move_at) && actor.intent.held.contains(Buttons::MOVE) {
            out.directive(Directive::SetDestination {
                actor: actor.id,
                point: actor.intent.aim,
            });
        }
    }
}

fn collect_pickups(
    state: &mut GameState,
    config: &GameConfig,
    env: &GameEnv<'_>,
    out: &mut TickOutcome,
) {
    if !state.entities.hero.is_alive() {
        return;
    }
    let Some(pose) = env.scene().and_then(|scene| scene.pose(EntityId::HERO)) else {
        return;
    };

    let radius_sq = config.pickup_radius * config.pickup_radius;
    let under_hero: Vec<PickupId> = state
        .pickups
        .iter()
        .filter(|pickup| pickup.position.distance_squared(pose.position) <= radius_sq)
        .map(|pickup| pickup.id)
        .collect();

    for id in under_hero {
        let Some(pickup) = state.remove_pickup(id) else {
            continue;
        };
        let healed = state.entities.hero.stats.health.heal(pickup.heal_amount);
        out.event(GameEvent::PickupCollected {
            pickup: id,
            actor: EntityId::HERO,
            healed,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{
        AbilityKind, AbilityPayload, AbilityProfile, BuffPayload, CastProfile, CastTime, Cooldown,
        DodgePayload, StrikePayload,
    };
    use crate::env::{BestiaryOracle, Env, MonsterTemplate, PcgRng, Pose, SceneOracle};
    use crate::state::{
        ActorState, ActorStats, IntentState, MatchOutcome, ObjectiveState, PickupState,
        SpawnPool, SpawnerId, SpawnerState, TemplateId,
    };
    use glam::Vec3;
    use std::collections::HashMap;

    // ------------------------------------------------------------------
    // Fixtures
    // ------------------------------------------------------------------

    struct StubScene {
        poses: HashMap<EntityId, Pose>,
    }

    impl StubScene {
        fn new() -> Self {
            Self {
                poses: HashMap::new(),
            }
        }

        fn place(mut self, id: EntityId, at: Vec3) -> Self {
            self.poses.insert(id, Pose::new(at, Vec3::X));
            self
        }
    }

    impl SceneOracle for StubScene {
        fn pose(&self, actor: EntityId) -> Option<Pose> {
            self.poses.get(&actor).copied()
        }

        fn hostiles_within(&self, of: EntityId, center: Vec3, radius: f32) -> Vec<EntityId> {
            let mut ids: Vec<EntityId> = self
                .poses
                .iter()
                .filter(|(id, _)| (**id == EntityId::HERO) != (of == EntityId::HERO))
                .filter(|(_, pose)| pose.position.distance(center) <= radius)
                .map(|(id, _)| *id)
                .collect();
            ids.sort();
            ids
        }
    }

    struct StubBestiary;

    impl BestiaryOracle for StubBestiary {
        fn template(&self, _id: TemplateId) -> Option<MonsterTemplate> {
            Some(MonsterTemplate {
                stats: ActorStats::new(40.0, 2.5, 1.0, 2.0, 10.0),
                abilities: vec![melee_profile()],
            })
        }
    }

    fn melee_profile() -> AbilityProfile {
        AbilityProfile {
            name: "cleave".into(),
            kind: AbilityKind::MeleeStrike,
            cast: CastProfile {
                cast_time: CastTime::FromAttackSpeed,
                activation_fraction: 0.4,
                movement_lockout: 0.2,
                cooldown: Cooldown::SharedAttack,
            },
            payload: AbilityPayload::Strike(StrikePayload {
                reach: 1.0,
                spread: 1.0,
            }),
        }
    }

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

    fn dodge_profile() -> AbilityProfile {
        AbilityProfile {
            name: "roll".into(),
            kind: AbilityKind::Dodge,
            cast: CastProfile {
                cast_time: CastTime::Fixed(1.0),
                activation_fraction: 0.2,
                movement_lockout: 0.8,
                cooldown: Cooldown::Dedicated(1.5),
            },
            payload: AbilityPayload::Dodge(DodgePayload {
                speed: 7.0,
                acceleration: 15.0,
                length: 3.0,
                buffer_window: 0.1,
            }),
        }
    }

    /// Hero at the origin, one melee monster two units away. Attack speed
    /// 1.0 keeps the cast math readable.
    fn duel() -> (GameState, StubScene) {
        let hero = ActorState::hero(
            ActorStats::new(500.0, 3.5, 1.0, 2.0, 10.0),
            [melee_profile(), buff_profile(), dodge_profile()],
        );
        let mut state = GameState::new(7, hero, ObjectiveState::new(30));
        let monster_id = state.allocate_entity();
        state.entities.push_monster(ActorState::monster(
            monster_id,
            TemplateId(0),
            ActorStats::new(40.0, 2.5, 1.0, 2.0, 10.0),
            [melee_profile()],
            None,
        ));
        let scene = StubScene::new()
            .place(EntityId::HERO, Vec3::ZERO)
            .place(monster_id, Vec3::new(2.0, 0.0, 0.0));
        (state, scene)
    }

    fn tick(state: &mut GameState, scene: &StubScene, now: f32, dt: f32) -> TickOutcome {
        let config = GameConfig::new();
        let rng = PcgRng;
        let bestiary = StubBestiary;
        let env = Env::with_all(scene, &rng, &bestiary).into_game_env();
        Engine::new(state, &config).tick(Frame::new(GameTime::new(now), dt), env)
    }

    fn hero_intent(state: &mut GameState, held: Buttons, aim: Vec3) {
        state.entities.hero.intent = IntentState::new(held, aim);
    }

    fn monster_health(state: &GameState) -> f32 {
        state.entities.monsters[0].stats.health.current
    }

    fn count_started(out: &TickOutcome) -> usize {
        out.events
            .iter()
            .filter(|e| matches!(e, GameEvent::AbilityStarted { .. }))
            .count()
    }

    // ------------------------------------------------------------------
    // Cast timing
    // ------------------------------------------------------------------

    #[test]
    fn melee_damage_lands_at_the_activation_instant() {
        let (mut state, scene) = duel();
        hero_intent(&mut state, Buttons::ATTACK, Vec3::new(2.0, 0.0, 0.0));

        let out = tick(&mut state, &scene, 0.0, 0.0);
        assert_eq!(count_started(&out), 1);
        assert_eq!(monster_health(&state), 40.0);

        // Before the activation fraction nothing lands.
        let out = tick(&mut state, &scene, 0.2, 0.2);
        assert!(out.events.is_empty());
        assert_eq!(monster_health(&state), 40.0);

        // cast time 1.0 * fraction 0.4: the hit lands at 0.4s.
        let out = tick(&mut state, &scene, 0.4, 0.2);
        assert!(out.events.iter().any(|e| matches!(
            e,
            GameEvent::DamageDealt { amount, .. } if (amount - 10.0).abs() < 1e-6
        )));
        assert_eq!(monster_health(&state), 30.0);
    }

    #[test]
    fn recast_waits_for_the_recovery_gate() {
        let (mut state, scene) = duel();
        hero_intent(&mut state, Buttons::ATTACK, Vec3::new(2.0, 0.0, 0.0));

        tick(&mut state, &scene, 0.0, 0.0);
        tick(&mut state, &scene, 0.4, 0.4);

        // Attack still held at 0.5s: inside recovery, no new cast.
        let out = tick(&mut state, &scene, 0.5, 0.1);
        assert_eq!(count_started(&out), 0);

        // Past can_cast_at (= 1.0s) the held intent fires again.
        let out = tick(&mut state, &scene, 1.1, 0.6);
        assert_eq!(count_started(&out), 1);
    }

    #[test]
    fn cast_deadlines_are_ordered() {
        let (mut state, scene) = duel();
        hero_intent(&mut state, Buttons::ATTACK, Vec3::new(2.0, 0.0, 0.0));
        tick(&mut state, &scene, 0.0, 0.0);

        let hero = &state.entities.hero;
        let cast = hero.cast.expect("cast in flight");
        assert!(cast.started_at.0 <= cast.resolves_at.0);
        assert!(cast.resolves_at.0 <= hero.can_cast_at.0);
    }

    // ------------------------------------------------------------------
    // Buff lifecycle
    // ------------------------------------------------------------------

    #[test]
    fn buff_applies_lasts_and_reverts_exactly() {
        let (mut state, scene) = duel();

        hero_intent(&mut state, Buttons::BUFF, Vec3::ZERO);
        tick(&mut state, &scene, 0.0, 0.0);

        // Fixed 0.5s cast, fraction 0.8: the buff lands at 0.4s.
        let out = tick(&mut state, &scene, 0.4, 0.4);
        assert!(out.events.iter().any(|e| matches!(
            e,
            GameEvent::BuffApplied { expires_at, .. } if (expires_at.0 - 10.0).abs() < 1e-6
        )));

        // Buffed swing deals double damage.
        hero_intent(&mut state, Buttons::ATTACK, Vec3::new(2.0, 0.0, 0.0));
        tick(&mut state, &scene, 0.6, 0.2);
        tick(&mut state, &scene, 1.0, 0.4);
        assert_eq!(monster_health(&state), 20.0);

        // At exactly start + duration the buff reverts.
        hero_intent(&mut state, Buttons::empty(), Vec3::ZERO);
        let out = tick(&mut state, &scene, 10.0, 9.0);
        assert!(
            out.events
                .iter()
                .any(|e| matches!(e, GameEvent::BuffExpired { .. }))
        );
        assert!(state.entities.hero.buff.is_none());
        assert_eq!(state.entities.hero.attack_damage(), 10.0);

        // Post-expiry swing is back to base damage.
        hero_intent(&mut state, Buttons::ATTACK, Vec3::new(2.0, 0.0, 0.0));
        tick(&mut state, &scene, 10.1, 0.1);
        tick(&mut state, &scene, 10.5, 0.4);
        assert_eq!(monster_health(&state), 10.0);
    }

    #[test]
    fn buff_reduces_incoming_damage_while_active() {
        let (mut state, scene) = duel();
        hero_intent(&mut state, Buttons::BUFF, Vec3::ZERO);
        tick(&mut state, &scene, 0.0, 0.0);
        tick(&mut state, &scene, 0.4, 0.4);

        // Monster swings into the buff window.
        state.entities.monsters[0].intent = IntentState::new(Buttons::ATTACK, Vec3::ZERO);
        tick(&mut state, &scene, 0.5, 0.1);
        tick(&mut state, &scene, 0.9, 0.4);

        // 10 raw, 20% absorbed.
        assert_eq!(state.entities.hero.stats.health.current, 492.0);
    }

    // ------------------------------------------------------------------
    // Dodge
    // ------------------------------------------------------------------

    #[test]
    fn dodge_grants_immunity_until_movement_unlocks() {
        let (mut state, scene) = duel();
        let config = GameConfig::new();

        hero_intent(&mut state, Buttons::DODGE, Vec3::new(5.0, 0.0, 0.0));
        let out = tick(&mut state, &scene, 0.0, 0.0);
        assert!(state.entities.hero.immune);
        assert_eq!(count_started(&out), 1);

        // A hit inside the window is skipped entirely, whatever its size.
        let mut scratch = TickOutcome::new();
        combat::apply_damage(
            &mut state,
            &config,
            EntityId::HERO,
            100.0,
            None,
            GameTime::new(0.5),
            &mut scratch,
        );
        assert_eq!(state.entities.hero.stats.health.current, 500.0);
        assert!(scratch.events.is_empty());

        // Movement unlocks at 0.2 + 0.8 = 1.0s; immunity falls with it.
        hero_intent(&mut state, Buttons::empty(), Vec3::ZERO);
        tick(&mut state, &scene, 1.0, 1.0);
        assert!(!state.entities.hero.immune);

        combat::apply_damage(
            &mut state,
            &config,
            EntityId::HERO,
            100.0,
            None,
            GameTime::new(1.1),
            &mut scratch,
        );
        assert_eq!(state.entities.hero.stats.health.current, 400.0);
    }

    #[test]
    fn dodge_resolution_emits_the_dash() {
        let (mut state, scene) = duel();
        hero_intent(&mut state, Buttons::DODGE, Vec3::new(10.0, 0.0, 0.0));
        tick(&mut state, &scene, 0.0, 0.0);

        let out = tick(&mut state, &scene, 0.2, 0.2);
        let boosted = out.directives.iter().any(|d| {
            matches!(d, Directive::SetSpeed { speed, .. } if (*speed - 7.0).abs() < 1e-6)
        });
        assert!(boosted);
        let dash = out.directives.iter().find_map(|d| match d {
            Directive::SetDestination { point, .. } => Some(*point),
            _ => None,
        });
        // Dash length 3.0 along +X from the origin.
        assert_eq!(dash, Some(Vec3::new(3.0, 0.0, 0.0)));

        // The boost resets when movement unlocks.
        hero_intent(&mut state, Buttons::empty(), Vec3::ZERO);
        let out = tick(&mut state, &scene, 1.0, 0.8);
        assert!(
            out.directives
                .iter()
                .any(|d| matches!(d, Directive::ResetSpeed { .. }))
        );
        assert!(!state.entities.hero.dodge_boost);
    }

    #[test]
    fn dodge_press_buffers_across_the_cooldown_edge() {
        let (mut state, scene) = duel();

        // First dodge at t = 0; dedicated cooldown runs to 1.5s.
        hero_intent(&mut state, Buttons::DODGE, Vec3::new(5.0, 0.0, 0.0));
        tick(&mut state, &scene, 0.0, 0.0);
        tick(&mut state, &scene, 0.2, 0.2);
        hero_intent(&mut state, Buttons::empty(), Vec3::ZERO);
        tick(&mut state, &scene, 1.2, 1.0);

        // A press at 1.45s is still on cooldown...
        hero_intent(&mut state, Buttons::DODGE, Vec3::new(5.0, 0.0, 0.0));
        let out = tick(&mut state, &scene, 1.45, 0.25);
        assert_eq!(count_started(&out), 0);

        // ...but the buffered press fires once the cooldown opens.
        hero_intent(&mut state, Buttons::empty(), Vec3::ZERO);
        let out = tick(&mut state, &scene, 1.5, 0.05);
        assert_eq!(count_started(&out), 1);
        assert!(state.entities.hero.immune);
    }

    #[test]
    fn stale_dodge_press_lapses() {
        let (mut state, scene) = duel();

        hero_intent(&mut state, Buttons::DODGE, Vec3::new(5.0, 0.0, 0.0));
        tick(&mut state, &scene, 0.0, 0.0);
        tick(&mut state, &scene, 0.2, 0.2);

        // Press at 1.2s, more than a buffer window before the cooldown
        // opens at 1.5s.
        hero_intent(&mut state, Buttons::DODGE, Vec3::new(5.0, 0.0, 0.0));
        tick(&mut state, &scene, 1.2, 1.0);
        hero_intent(&mut state, Buttons::empty(), Vec3::ZERO);

        let out = tick(&mut state, &scene, 1.5, 0.3);
        assert_eq!(count_started(&out), 0);
    }

    // ------------------------------------------------------------------
    // Movement gating
    // ------------------------------------------------------------------

    #[test]
    fn casting_locks_movement_and_faces_the_target() {
        let (mut state, scene) = duel();
        let aim = Vec3::new(2.0, 0.0, 0.0);
        hero_intent(&mut state, Buttons::ATTACK | Buttons::MOVE, aim);

        let out = tick(&mut state, &scene, 0.0, 0.0);
        assert!(out.directives.iter().any(|d| matches!(
            d,
            Directive::FaceToward { actor: EntityId::HERO, .. }
        )));
        assert!(!out.directives.iter().any(|d| matches!(
            d,
            Directive::SetDestination { actor: EntityId::HERO, .. }
        )));

        // Resolution at 0.4s; movement stays locked until 0.6s.
        tick(&mut state, &scene, 0.4, 0.4);
        hero_intent(&mut state, Buttons::MOVE, Vec3::new(9.0, 0.0, 0.0));
        let out = tick(&mut state, &scene, 0.5, 0.1);
        assert!(!out.directives.iter().any(|d| matches!(
            d,
            Directive::SetDestination { actor: EntityId::HERO, .. }
        )));

        let out = tick(&mut state, &scene, 0.6, 0.1);
        assert!(out.directives.iter().any(|d| matches!(
            d,
            Directive::SetDestination { actor: EntityId::HERO, point } if *point == Vec3::new(9.0, 0.0, 0.0)
        )));
    }

    // ------------------------------------------------------------------
    // Defeat and match verdicts
    // ------------------------------------------------------------------

    #[test]
    fn monster_defeat_credits_lingers_then_despawns() {
        let (mut state, scene) = duel();
        let monster_id = state.entities.monsters[0].id;
        state.entities.monsters[0].stats.health.current = 10.0;
        hero_intent(&mut state, Buttons::ATTACK, Vec3::new(2.0, 0.0, 0.0));

        tick(&mut state, &scene, 0.0, 0.0);
        let out = tick(&mut state, &scene, 0.4, 0.4);
        assert!(out.events.iter().any(|e| matches!(
            e,
            GameEvent::ActorDefeated { actor, .. } if *actor == monster_id
        )));
        assert_eq!(state.objective.kills, 1);

        // Corpse lingers until corpse_linger (3s) elapses.
        hero_intent(&mut state, Buttons::empty(), Vec3::ZERO);
        tick(&mut state, &scene, 2.0, 1.6);
        assert_eq!(state.entities.monsters.len(), 1);

        let out = tick(&mut state, &scene, 3.4, 1.4);
        assert!(out.events.iter().any(|e| matches!(
            e,
            GameEvent::ActorDespawned { actor } if *actor == monster_id
        )));
        assert!(state.entities.monsters.is_empty());
    }

    #[test]
    fn final_kill_wins_and_collapses_spawners_in_the_same_tick() {
        let (mut state, scene) = duel();
        state.objective = ObjectiveState::new(1);
        let mut pool = SpawnPool::new();
        pool.push(TemplateId(0));
        let mut spawner = SpawnerState::new(SpawnerId(0), Vec3::new(50.0, 0.0, 0.0), pool);
        // Keep the spawner quiet during the duel.
        spawner.next_spawn_at = GameTime::new(100.0);
        state.spawners.push(spawner);

        state.entities.monsters[0].stats.health.current = 10.0;
        hero_intent(&mut state, Buttons::ATTACK, Vec3::new(2.0, 0.0, 0.0));
        tick(&mut state, &scene, 0.0, 0.0);
        let out = tick(&mut state, &scene, 0.4, 0.4);

        assert_eq!(state.outcome(), MatchOutcome::Won);
        let concluded = out
            .events
            .iter()
            .position(|e| matches!(e, GameEvent::MatchConcluded { .. }));
        let collapsed = out
            .events
            .iter()
            .position(|e| matches!(e, GameEvent::SpawnerCollapsed { .. }));
        assert!(concluded.is_some());
        assert!(collapsed.is_some());
        assert!(concluded < collapsed);
    }

    #[test]
    fn hero_defeat_concludes_lost_after_the_delay() {
        let (mut state, scene) = duel();
        state.entities.hero.stats.health.current = 5.0;
        state.entities.monsters[0].intent =
            IntentState::new(Buttons::ATTACK, Vec3::ZERO);

        tick(&mut state, &scene, 0.0, 0.0);
        let out = tick(&mut state, &scene, 0.4, 0.4);
        assert!(out.events.iter().any(|e| matches!(
            e,
            GameEvent::ActorDefeated { actor: EntityId::HERO, .. }
        )));
        assert_eq!(state.outcome(), MatchOutcome::InProgress);

        // Loss lands defeat_screen_delay (5s) later.
        tick(&mut state, &scene, 3.0, 2.6);
        assert_eq!(state.outcome(), MatchOutcome::InProgress);

        let out = tick(&mut state, &scene, 5.4, 2.4);
        assert_eq!(state.outcome(), MatchOutcome::Lost);
        assert!(out.events.iter().any(|e| matches!(
            e,
            GameEvent::MatchConcluded {
                outcome: MatchOutcome::Lost
            }
        )));
    }

    // ------------------------------------------------------------------
    // Pickups
    // ------------------------------------------------------------------

    #[test]
    fn pickup_heals_clamped_and_disappears() {
        let (mut state, scene) = duel();
        state.entities.hero.stats.health.current = 490.0;
        state
            .pickups
            .push(PickupState::new(PickupId(0), Vec3::new(0.5, 0.0, 0.0)));

        let out = tick(&mut state, &scene, 0.0, 0.0);
        assert!(out.events.iter().any(|e| matches!(
            e,
            GameEvent::PickupCollected { healed, .. } if (healed - 10.0).abs() < 1e-6
        )));
        assert_eq!(state.entities.hero.stats.health.current, 500.0);
        assert!(state.pickups.is_empty());
    }

    // ------------------------------------------------------------------
    // Replay safety
    // ------------------------------------------------------------------

    #[test]
    fn zero_dt_replay_changes_nothing() {
        let (mut state, scene) = duel();
        let mut pool = SpawnPool::new();
        pool.push(TemplateId(0));
        state
            .spawners
            .push(SpawnerState::new(SpawnerId(0), Vec3::new(5.0, 0.0, 0.0), pool));
        hero_intent(&mut state, Buttons::ATTACK | Buttons::MOVE, Vec3::new(2.0, 0.0, 0.0));

        tick(&mut state, &scene, 0.0, 0.0);
        tick(&mut state, &scene, 0.4, 0.4);
        let snapshot = state.clone();

        // Same instant again with dt = 0: no new events, no state drift.
        let out = tick(&mut state, &scene, 0.4, 0.0);
        assert!(out.events.is_empty());
        assert_eq!(state, snapshot);
    }
}
