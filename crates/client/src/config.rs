//! Client configuration sourced from the process environment.

use std::env;
use std::path::PathBuf;

use obelisk_runtime::{Pacing, SessionConfig};

/// Everything the binary needs to stage a match.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Explicit seed; a random one is drawn when unset.
    pub seed: Option<u64>,
    /// Path to an encounter RON file; the built-in preset when unset.
    pub encounter: Option<PathBuf>,
    pub tick_hz: Option<u32>,
    pub time_limit: Option<f32>,
    pub realtime: bool,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `OBELISK_SEED` - Seed for the deterministic match (default: random)
    /// - `OBELISK_ENCOUNTER` - Encounter RON file (default: built-in preset)
    /// - `OBELISK_TICK_HZ` - Simulation rate in ticks per second (default: 60)
    /// - `OBELISK_TIME_LIMIT` - Abandon an open match after this many seconds
    /// - `OBELISK_REALTIME` - Pace ticks against the wall clock (default: false)
    pub fn from_env() -> Self {
        let mut config = Self {
            seed: read_env::<u64>("OBELISK_SEED"),
            encounter: env::var("OBELISK_ENCOUNTER").ok().map(PathBuf::from),
            tick_hz: read_env::<u32>("OBELISK_TICK_HZ"),
            time_limit: read_env::<f32>("OBELISK_TIME_LIMIT"),
            realtime: false,
        };

        if let Some(enable) = read_env::<bool>("OBELISK_REALTIME") {
            config.realtime = enable;
        } else if env::var("OBELISK_REALTIME").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.realtime = true;
        }

        config
    }

    /// Session knobs derived from this configuration.
    pub fn session_config(&self) -> SessionConfig {
        let mut session = SessionConfig::default();
        if let Some(tick_hz) = self.tick_hz {
            session.tick_hz = tick_hz.max(1);
        }
        session.time_limit = self.time_limit;
        if self.realtime {
            session.pacing = Pacing::Realtime;
        }
        session
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
