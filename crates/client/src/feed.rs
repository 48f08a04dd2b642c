//! Narrates session events into the log as a running combat feed.

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use obelisk_core::GameEvent;
use obelisk_runtime::{Session, SessionEvent, Topic};

/// Follow one topic and narrate its events until the bus closes.
pub fn spawn(session: &Session, topic: Topic) -> JoinHandle<()> {
    let mut events = session.subscribe(topic);
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => announce(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Dropped {} stale events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn announce(event: &SessionEvent) {
    match &event.event {
        GameEvent::ActorDefeated { actor, by } => match by {
            Some(by) => tracing::info!("[{}] {} felled by {}", event.time, actor, by),
            None => tracing::info!("[{}] {} falls", event.time, actor),
        },
        GameEvent::PickupCollected { actor, healed, .. } => {
            tracing::info!("[{}] {} recovers {:.0} health", event.time, actor, healed);
        }
        GameEvent::MonsterSpawned { actor, spawner, .. } => {
            tracing::debug!("[{}] {} emerges from {}", event.time, actor, spawner);
        }
        GameEvent::SpawnerCollapsed { spawner } => {
            tracing::info!("[{}] {} collapses", event.time, spawner);
        }
        GameEvent::MatchConcluded { outcome } => {
            tracing::info!("[{}] match concluded: {}", event.time, outcome);
        }
        _ => {}
    }
}
