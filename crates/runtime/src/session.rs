//! The session: one match from assembly to verdict.
//!
//! A [`Session`] owns the simulation state, the navigator, the event bus
//! and the provider seats, and advances everything with a fixed timestep.
//! Each [`step`](Session::step) polls intents, runs one engine tick,
//! routes the resulting directives into the navigator and the cue sink,
//! and republishes the tick's events on the bus.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use obelisk_content::{Bestiary, EncounterSetup, EncounterSpec};
use obelisk_core::{
    Directive, Engine, EntityId, Env, Frame, GameConfig, GameEvent, GameState, HudSnapshot,
    MatchOutcome, PcgRng,
};

use crate::error::{ProviderKind, Result, RuntimeError};
use crate::events::{EventBus, NullSink, PresentationSink, SessionEvent, Topic};
use crate::navigator::Navigator;
use crate::providers::IntentProvider;

/// Seconds between HUD lines while a match runs.
const HUD_LOG_PERIOD: f32 = 1.0;

/// How [`Session::run`] spends wall-clock time between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep so simulated time tracks wall-clock time.
    Realtime,
    /// Tick as fast as the loop turns. Headless runs and tests.
    Uncapped,
}

/// Host loop knobs. Everything about the match itself lives in the
/// encounter spec; this only shapes how the loop drives it.
#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    pub tick_hz: u32,
    /// Per-topic buffer of the event bus.
    pub event_capacity: usize,
    /// Stop an unconcluded match after this much simulated time.
    pub time_limit: Option<f32>,
    pub pacing: Pacing,
}

impl SessionConfig {
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_hz.max(1) as f32
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60,
            event_capacity: 100,
            time_limit: None,
            pacing: Pacing::Uncapped,
        }
    }
}

/// Summary of a finished (or abandoned) match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub encounter: String,
    pub seed: u64,
    pub outcome: MatchOutcome,
    /// Simulated seconds covered.
    pub duration: f32,
    pub ticks: u64,
    pub kills: u32,
    pub required_kills: u32,
    pub hero_health: f32,
}

/// A running match. Single-owner: all mutation happens through
/// [`step`](Session::step), observers hang off the event bus.
pub struct Session {
    config: SessionConfig,
    rules: GameConfig,
    state: GameState,
    bestiary: Bestiary,
    navigator: Navigator,
    rng: PcgRng,
    bus: EventBus,
    sink: Box<dyn PresentationSink>,
    hero_provider: Option<Box<dyn IntentProvider>>,
    monster_provider: Option<Box<dyn IntentProvider>>,
    encounter: String,
    next_hud_log: f32,
}

impl Session {
    pub fn builder(setup: EncounterSetup) -> SessionBuilder {
        SessionBuilder::new(setup)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn outcome(&self) -> MatchOutcome {
        self.state.outcome()
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::capture(&self.state)
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<SessionEvent> {
        self.bus.subscribe(topic)
    }

    pub fn set_hero_provider(&mut self, provider: Box<dyn IntentProvider>) {
        self.hero_provider = Some(provider);
    }

    pub fn set_monster_provider(&mut self, provider: Box<dyn IntentProvider>) {
        self.monster_provider = Some(provider);
    }

    /// Advance the match by one tick and return the events it produced.
    pub async fn step(&mut self) -> Result<Vec<SessionEvent>> {
        let hero_provider =
            self.hero_provider
                .as_deref()
                .ok_or(RuntimeError::ProviderNotSet {
                    kind: ProviderKind::Hero,
                })?;
        let monster_provider =
            self.monster_provider
                .as_deref()
                .ok_or(RuntimeError::ProviderNotSet {
                    kind: ProviderKind::Monster,
                })?;

        // Poll every living seat against the pre-tick state.
        let mut intents = Vec::with_capacity(1 + self.state.entities.monsters.len());
        if self.state.entities.hero.is_alive() {
            let id = self.state.entities.hero.id;
            let intent = hero_provider
                .provide_intent(id, &self.state, &self.navigator)
                .await?;
            intents.push((id, intent));
        }
        let monster_ids: Vec<EntityId> = self
            .state
            .entities
            .monsters
            .iter()
            .filter(|monster| monster.is_alive())
            .map(|monster| monster.id)
            .collect();
        for id in monster_ids {
            let intent = monster_provider
                .provide_intent(id, &self.state, &self.navigator)
                .await?;
            intents.push((id, intent));
        }
        for (id, intent) in intents {
            if let Some(actor) = self.state.entities.actor_mut(id) {
                actor.intent = intent;
            }
        }

        let dt = self.config.dt();
        let frame = Frame::new(self.state.clock.now.after(dt), dt);
        let outcome = {
            let env = Env::with_all(&self.navigator, &self.rng, &self.bestiary).into_game_env();
            Engine::new(&mut self.state, &self.rules).tick(frame, env)
        };

        for directive in &outcome.directives {
            match directive {
                Directive::Cue(cue) => self.sink.present(*cue),
                movement => self.navigator.apply(movement),
            }
        }

        // Keep the navigator roster in step with the actor roster.
        for event in &outcome.events {
            match event {
                GameEvent::MonsterSpawned {
                    actor, position, ..
                } => {
                    if let Some(monster) = self.state.entities.actor(*actor) {
                        self.navigator.insert_monster(
                            *actor,
                            *position,
                            monster.stats.movement_speed,
                        );
                    }
                }
                GameEvent::ActorDefeated { actor, .. } => self.navigator.set_defeated(*actor),
                GameEvent::ActorDespawned { actor } => self.navigator.remove(*actor),
                _ => {}
            }
        }

        self.navigator.advance(dt);

        let tick = self.state.clock.frame;
        let time = self.state.clock.now;
        let events: Vec<SessionEvent> = outcome
            .events
            .into_iter()
            .map(|event| SessionEvent { tick, time, event })
            .collect();
        for event in &events {
            self.bus.publish(event.clone());
        }
        Ok(events)
    }

    /// Drive the match to a verdict (or the configured time limit).
    pub async fn run(&mut self) -> Result<MatchReport> {
        let dt = self.config.dt();
        let mut ticker = match self.config.pacing {
            Pacing::Realtime => Some(tokio::time::interval(Duration::from_secs_f32(dt))),
            Pacing::Uncapped => None,
        };

        loop {
            if let Some(ticker) = ticker.as_mut() {
                ticker.tick().await;
            }
            self.step().await?;

            let now = self.state.clock.now.0;
            if now >= self.next_hud_log {
                tracing::info!("[{}] {}", self.encounter, self.hud());
                self.next_hud_log += HUD_LOG_PERIOD;
            }
            if self.state.outcome() != MatchOutcome::InProgress {
                break;
            }
            if let Some(limit) = self.config.time_limit
                && now >= limit
            {
                tracing::info!(
                    "[{}] time limit of {:.1}s reached with the match still open",
                    self.encounter,
                    limit
                );
                break;
            }
        }

        let report = self.report();
        tracing::info!(
            "[{}] match over: {} after {:.2}s and {} kills",
            self.encounter,
            report.outcome,
            report.duration,
            report.kills
        );
        Ok(report)
    }

    /// Snapshot the match as a report, whether or not it has concluded.
    pub fn report(&self) -> MatchReport {
        MatchReport {
            encounter: self.encounter.clone(),
            seed: self.state.seed,
            outcome: self.state.outcome(),
            duration: self.state.clock.now.0,
            ticks: self.state.clock.frame,
            kills: self.state.objective.kills,
            required_kills: self.state.objective.required_kills,
            hero_health: self.state.entities.hero.stats.health.current,
        }
    }
}

/// Assembles a [`Session`] from an encounter setup plus host options.
pub struct SessionBuilder {
    setup: EncounterSetup,
    config: SessionConfig,
    hero_provider: Option<Box<dyn IntentProvider>>,
    monster_provider: Option<Box<dyn IntentProvider>>,
    sink: Option<Box<dyn PresentationSink>>,
}

impl fmt::Debug for SessionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionBuilder")
            .field("setup", &self.setup)
            .field("config", &self.config)
            .field("hero_provider", &self.hero_provider.is_some())
            .field("monster_provider", &self.monster_provider.is_some())
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl SessionBuilder {
    pub fn new(setup: EncounterSetup) -> Self {
        Self {
            setup,
            config: SessionConfig::default(),
            hero_provider: None,
            monster_provider: None,
            sink: None,
        }
    }

    /// Assemble an [`EncounterSpec`] with an explicit seed and start a
    /// builder from it.
    pub fn from_spec(spec: &EncounterSpec, seed: u64) -> Result<Self> {
        Ok(Self::new(spec.assemble(seed)?))
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn hero_provider(mut self, provider: Box<dyn IntentProvider>) -> Self {
        self.hero_provider = Some(provider);
        self
    }

    pub fn monster_provider(mut self, provider: Box<dyn IntentProvider>) -> Self {
        self.monster_provider = Some(provider);
        self
    }

    pub fn sink(mut self, sink: Box<dyn PresentationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self) -> Session {
        let EncounterSetup {
            name,
            config: rules,
            state,
            bestiary,
            hero_spawn,
            arena_half_extent,
        } = self.setup;

        let mut navigator = Navigator::new(rules.turning_speed, arena_half_extent);
        navigator.insert_hero(hero_spawn, state.entities.hero.stats.movement_speed);

        tracing::info!(
            "[{}] session ready: seed {}, {} required kills, arena half-extent {:.0}",
            name,
            state.seed,
            state.objective.required_kills,
            arena_half_extent
        );

        Session {
            bus: EventBus::with_capacity(self.config.event_capacity),
            config: self.config,
            rules,
            state,
            bestiary,
            navigator,
            rng: PcgRng,
            sink: self.sink.unwrap_or_else(|| Box::new(NullSink)),
            hero_provider: self.hero_provider,
            monster_provider: self.monster_provider,
            encounter: name,
            next_hud_log: HUD_LOG_PERIOD,
        }
    }
}
