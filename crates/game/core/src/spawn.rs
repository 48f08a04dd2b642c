//! Spawner system: activation, wave emission, collapse.
//!
//! Spawn rolls draw their seeds from the match seed, the tick counter and
//! the spawner id, so a replay with the same seed produces the same
//! monsters in the same spots. Spawning silently skips a tick when the RNG
//! or bestiary oracle is absent or a template is unknown.

use glam::Vec3;

use crate::config::GameConfig;
use crate::directive::{EffectAnchor, EffectCue, PresentationCue};
use crate::engine::TickOutcome;
use crate::env::{GameEnv, compute_seed};
use crate::events::GameEvent;
use crate::state::{ActorState, EntityId, Frame, GameState, MatchOutcome};

/// Seed contexts for the rolls one spawn makes.
const ROLL_TEMPLATE: u32 = 0;
const ROLL_ANGLE: u32 = 1;
const ROLL_DISTANCE: u32 = 2;

pub(crate) fn update_spawners(
    state: &mut GameState,
    frame: Frame,
    env: &GameEnv<'_>,
    out: &mut TickOutcome,
) {
    let now = frame.now;
    let won = state.objective.outcome == MatchOutcome::Won;
    let hero_pose = env.scene().and_then(|scene| scene.pose(EntityId::HERO));

    for index in 0..state.spawners.len() {
        {
            let spawner = &mut state.spawners[index];
            if spawner.collapsed {
                continue;
            }

            if won || spawner.should_collapse() {
                spawner.collapsed = true;
                let spawner_id = spawner.id;
                let position = spawner.position;
                out.event(GameEvent::SpawnerCollapsed {
                    spawner: spawner_id,
                });
                out.cue(PresentationCue::Effect {
                    kind: EffectCue::SpawnerCollapse,
                    anchor: EffectAnchor::At(position),
                    ttl: Some(2.0),
                });
                continue;
            }

            // Dormant spawners wake when the hero closes in.
            if !spawner.active {
                let near = hero_pose.is_some_and(|pose| {
                    pose.position.distance_squared(spawner.position)
                        <= spawner.activation_radius * spawner.activation_radius
                });
                if near {
                    spawner.active = true;
                } else {
                    continue;
                }
            }

            if !spawner.can_spawn(now) {
                continue;
            }
        }

        let Some(rng) = env.rng() else {
            continue;
        };
        let Some(bestiary) = env.bestiary() else {
            continue;
        };
        if state.entities.monsters.len() >= GameConfig::MAX_MONSTERS {
            break;
        }

        let (spawner_id, template, position) = {
            let spawner = &state.spawners[index];
            let roll = |context: u32| {
                compute_seed(state.seed, state.clock.frame, spawner.id.0 as u32, context)
            };
            let pick = rng.range(roll(ROLL_TEMPLATE), 0, spawner.pool.len() as u32 - 1);
            let template = spawner.pool[pick as usize];

            // Uniform scatter on a disc around the spawner.
            let angle = rng.unit(roll(ROLL_ANGLE)) * std::f32::consts::TAU;
            let distance = spawner.spawn_radius * rng.unit(roll(ROLL_DISTANCE)).sqrt();
            let position = spawner.position
                + Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance);

            (spawner.id, template, position)
        };

        let Some(archetype) = bestiary.template(template) else {
            continue;
        };

        let id = state.allocate_entity();
        state.entities.push_monster(ActorState::monster(
            id,
            template,
            archetype.stats,
            archetype.abilities,
            Some(spawner_id),
        ));

        let spawner = &mut state.spawners[index];
        spawner.live += 1;
        spawner.next_spawn_at = now.after(spawner.interval);

        out.event(GameEvent::MonsterSpawned {
            actor: id,
            template,
            spawner: spawner_id,
            position,
        });
        out.cue(PresentationCue::Effect {
            kind: EffectCue::SpawnFlash,
            anchor: EffectAnchor::At(position),
            ttl: Some(2.0),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        BestiaryOracle, Env, MonsterTemplate, PcgRng, Pose, SceneOracle,
    };
    use crate::state::{
        ActorStats, GameTime, ObjectiveState, SpawnPool, SpawnerId, SpawnerState, TemplateId,
    };

    struct StubScene {
        hero_at: Vec3,
    }

    impl SceneOracle for StubScene {
        fn pose(&self, actor: EntityId) -> Option<Pose> {
            (actor == EntityId::HERO).then(|| Pose::new(self.hero_at, Vec3::Z))
        }

        fn hostiles_within(&self, _of: EntityId, _center: Vec3, _radius: f32) -> Vec<EntityId> {
            Vec::new()
        }
    }

    struct StubBestiary;

    impl BestiaryOracle for StubBestiary {
        fn template(&self, id: TemplateId) -> Option<MonsterTemplate> {
            (id.0 < 4).then(|| MonsterTemplate {
                stats: ActorStats::new(40.0, 2.5, 1.0, 2.0, 10.0),
                abilities: Vec::new(),
            })
        }
    }

    fn arena(spawner: SpawnerState) -> GameState {
        let hero = ActorState::hero(ActorStats::new(500.0, 3.5, 1.5, 2.0, 10.0), []);
        let mut state = GameState::new(99, hero, ObjectiveState::new(30));
        state.spawners.push(spawner);
        state
    }

    fn pool() -> SpawnPool {
        let mut pool = SpawnPool::new();
        pool.push(TemplateId(0));
        pool
    }

    fn tick_spawners(state: &mut GameState, now: f32) -> TickOutcome {
        let scene = StubScene { hero_at: Vec3::ZERO };
        let rng = PcgRng;
        let bestiary = StubBestiary;
        let env = Env::with_all(&scene, &rng, &bestiary).into_game_env();
        let mut out = TickOutcome::new();
        let frame = Frame::new(GameTime::new(now), 0.1);
        state.clock.advance(frame);
        update_spawners(state, frame, &env, &mut out);
        out
    }

    #[test]
    fn active_spawner_emits_on_schedule() {
        let mut state = arena(SpawnerState::new(SpawnerId(0), Vec3::new(3.0, 0.0, 0.0), pool()));

        let out = tick_spawners(&mut state, 0.0);
        assert_eq!(state.entities.monsters.len(), 1);
        assert_eq!(state.spawners[0].live, 1);
        assert!(out.events.iter().any(|e| matches!(
            e,
            GameEvent::MonsterSpawned { spawner: SpawnerId(0), .. }
        )));

        // Interval not yet elapsed.
        tick_spawners(&mut state, 1.0);
        assert_eq!(state.entities.monsters.len(), 1);

        tick_spawners(&mut state, 2.0);
        assert_eq!(state.entities.monsters.len(), 2);

        let monster = &state.entities.monsters[0];
        assert_eq!(monster.spawned_by, Some(SpawnerId(0)));
    }

    #[test]
    fn live_cap_pauses_emission() {
        let mut spawner = SpawnerState::new(SpawnerId(0), Vec3::ZERO, pool());
        spawner.max_alive = 2;
        spawner.interval = 0.5;
        let mut state = arena(spawner);

        for step in 0..8 {
            tick_spawners(&mut state, step as f32 * 0.5);
        }
        assert_eq!(state.entities.monsters.len(), 2);
    }

    #[test]
    fn scatter_stays_on_the_spawn_disc() {
        let center = Vec3::new(10.0, 0.0, -4.0);
        let mut spawner = SpawnerState::new(SpawnerId(0), center, pool());
        spawner.interval = 0.1;
        spawner.max_alive = 16;
        let mut state = arena(spawner);

        let mut positions = Vec::new();
        for step in 0..10 {
            let out = tick_spawners(&mut state, step as f32 * 0.1);
            for event in out.events {
                if let GameEvent::MonsterSpawned { position, .. } = event {
                    positions.push(position);
                }
            }
        }
        assert!(!positions.is_empty());
        for position in positions {
            assert!(position.distance(center) <= SpawnerState::DEFAULT_SPAWN_RADIUS + 1e-3);
            assert_eq!(position.y, 0.0);
        }
    }

    #[test]
    fn dormant_spawner_wakes_near_the_hero() {
        let far = Vec3::new(100.0, 0.0, 0.0);
        let mut state = arena(SpawnerState::dormant(SpawnerId(0), far, pool()));

        tick_spawners(&mut state, 0.0);
        assert!(!state.spawners[0].active);
        assert!(state.entities.monsters.is_empty());

        // Move the spawner into range instead of the stub hero; activation
        // only compares the distance.
        state.spawners[0].position = Vec3::new(4.0, 0.0, 0.0);
        tick_spawners(&mut state, 0.1);
        assert!(state.spawners[0].active);
        assert_eq!(state.entities.monsters.len(), 1);
    }

    #[test]
    fn kill_threshold_collapses_the_spawner() {
        let mut spawner = SpawnerState::new(SpawnerId(0), Vec3::ZERO, pool());
        spawner.collapse_after = 3;
        spawner.kills = 3;
        let mut state = arena(spawner);

        let out = tick_spawners(&mut state, 0.0);
        assert!(state.spawners[0].collapsed);
        assert!(out.events.iter().any(|e| matches!(
            e,
            GameEvent::SpawnerCollapsed { spawner: SpawnerId(0) }
        )));
        // Collapsed spawners never emit again.
        tick_spawners(&mut state, 5.0);
        assert!(state.entities.monsters.is_empty());
    }

    #[test]
    fn winning_collapses_every_spawner() {
        let mut state = arena(SpawnerState::new(SpawnerId(0), Vec3::ZERO, pool()));
        state.objective.conclude(MatchOutcome::Won);

        tick_spawners(&mut state, 0.0);
        assert!(state.spawners[0].collapsed);
        assert!(state.entities.monsters.is_empty());
    }

    #[test]
    fn missing_oracles_skip_spawning() {
        let mut state = arena(SpawnerState::new(SpawnerId(0), Vec3::ZERO, pool()));
        let env = GameEnv::empty();
        let mut out = TickOutcome::new();
        let frame = Frame::new(GameTime::ZERO, 0.1);
        state.clock.advance(frame);
        update_spawners(&mut state, frame, &env, &mut out);

        assert!(state.entities.monsters.is_empty());
        assert!(out.events.is_empty());
    }

    #[test]
    fn same_seed_replays_the_same_spawns() {
        let mut a = arena(SpawnerState::new(SpawnerId(0), Vec3::ZERO, pool()));
        let mut b = arena(SpawnerState::new(SpawnerId(0), Vec3::ZERO, pool()));

        let out_a = tick_spawners(&mut a, 0.0);
        let out_b = tick_spawners(&mut b, 0.0);
        assert_eq!(out_a.events, out_b.events);
    }
}
