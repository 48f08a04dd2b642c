//! Topic-based fan-out for tick events, plus the presentation seam.
//!
//! Every event the engine emits is stamped with the tick that produced it
//! and republished on the session's [`EventBus`]. Consumers subscribe per
//! [`Topic`], so a kill feed can ignore spawner bookkeeping and a verdict
//! screen can ignore damage ticks. Presentation cues never touch the bus;
//! they land in whichever [`PresentationSink`] the session was built with.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, broadcast};

use obelisk_core::{GameEvent, GameTime, PresentationCue};

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Casts, damage, buffs, defeats, pickups.
    Combat,
    /// Roster churn: spawns, despawns, spawner collapse.
    Population,
    /// Match verdicts.
    Match,
}

/// One engine event stamped with the tick that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub tick: u64,
    pub time: GameTime,
    pub event: GameEvent,
}

impl SessionEvent {
    pub fn topic(&self) -> Topic {
        match self.event {
            GameEvent::AbilityStarted { .. }
            | GameEvent::AbilityResolved { .. }
            | GameEvent::DamageDealt { .. }
            | GameEvent::ActorDefeated { .. }
            | GameEvent::BuffApplied { .. }
            | GameEvent::BuffExpired { .. }
            | GameEvent::PickupCollected { .. } => Topic::Combat,
            GameEvent::MonsterSpawned { .. }
            | GameEvent::ActorDespawned { .. }
            | GameEvent::SpawnerCollapsed { .. } => Topic::Population,
            GameEvent::MatchConcluded { .. } => Topic::Match,
        }
    }
}

/// Topic-based event bus.
///
/// Publishing is best-effort: a tick never blocks on slow subscribers, and
/// a topic without subscribers simply drops its events.
pub struct EventBus {
    channels: Arc<RwLock<HashMap<Topic, broadcast::Sender<SessionEvent>>>>,
}

impl EventBus {
    const TOPICS: [Topic; 3] = [Topic::Combat, Topic::Population, Topic::Match];

    /// Creates a bus with the default capacity per topic.
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut channels = HashMap::new();
        for topic in Self::TOPICS {
            channels.insert(topic, broadcast::channel(capacity).0);
        }
        Self {
            channels: Arc::new(RwLock::new(channels)),
        }
    }

    /// Publish an event to its topic.
    pub fn publish(&self, event: SessionEvent) {
        let topic = event.topic();

        // try_read keeps the tick from ever blocking here; a contended bus
        // just drops the event.
        match self.channels.try_read() {
            Ok(channels) => {
                if let Some(tx) = channels.get(&topic)
                    && tx.send(event).is_err()
                {
                    tracing::trace!("No subscribers for topic {:?}", topic);
                }
            }
            Err(_) => {
                tracing::debug!("Event bus contended, dropping event for topic {:?}", topic);
            }
        }
    }

    /// Subscribe to a single topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<SessionEvent> {
        let channels = self
            .channels
            .try_read()
            .expect("Failed to acquire read lock on event channels");
        channels
            .get(&topic)
            .expect("Topic channel not initialized")
            .subscribe()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Where presentation cues land.
///
/// Cues are fire-and-forget cosmetics; sinks must not block and must not
/// feed anything back into the simulation.
pub trait PresentationSink: Send + Sync {
    fn present(&self, cue: PresentationCue);
}

/// Drops every cue. Headless sessions and most tests want this.
pub struct NullSink;

impl PresentationSink for NullSink {
    fn present(&self, _cue: PresentationCue) {}
}

/// Logs cues through `tracing`, standing in for a renderer.
pub struct TracingSink;

impl PresentationSink for TracingSink {
    fn present(&self, cue: PresentationCue) {
        match cue {
            PresentationCue::Animation { actor, name, speed } => {
                tracing::debug!("stage: {} plays {} at x{:.2}", actor, name, speed);
            }
            PresentationCue::Effect { kind, anchor, .. } => {
                tracing::debug!("stage: effect {} anchored {:?}", kind, anchor);
            }
            PresentationCue::Sound { kind } => {
                tracing::debug!("stage: sound {}", kind);
            }
        }
    }
}

/// Collects cues for later inspection. Meant for tests and replay capture.
#[derive(Clone, Default)]
pub struct RecordingSink {
    cues: Arc<Mutex<Vec<PresentationCue>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues captured so far, in arrival order.
    pub fn captured(&self) -> Vec<PresentationCue> {
        self.cues.lock().expect("cue recorder poisoned").clone()
    }
}

impl PresentationSink for RecordingSink {
    fn present(&self, cue: PresentationCue) {
        self.cues.lock().expect("cue recorder poisoned").push(cue);
    }
}
