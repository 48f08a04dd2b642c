//! Real-time session host for the deterministic combat simulation.
//!
//! This crate wires intent providers, the host navigator, and an event bus
//! around [`obelisk_core::Engine`] into a fixed-timestep loop. Consumers
//! embed [`Session`] to drive a match, subscribe to its events, and collect
//! the final [`MatchReport`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the loop, its builder and the final report
//! - [`navigator`] owns actor poses and answers the engine's scene queries
//! - [`providers`] sources per-actor intent (bots, scripts, fixtures)
//! - [`events`] fans tick events out to topic subscribers and carries the
//!   presentation seam
//! - [`error`] is the failure surface shared across the crate
pub mod error;
pub mod events;
pub mod navigator;
pub mod providers;
pub mod session;

pub use error::{ProviderKind, Result, RuntimeError};
pub use events::{
    EventBus, NullSink, PresentationSink, RecordingSink, SessionEvent, Topic, TracingSink,
};
pub use navigator::{NavAgent, Navigator, Side};
pub use providers::{HeroBot, IdleProvider, IntentProvider, MonsterDoctrine, ScriptedProvider};
pub use session::{MatchReport, Pacing, Session, SessionBuilder, SessionConfig};
