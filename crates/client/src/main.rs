//! Obelisk match host binary.
//!
//! Composition root for a headless match: it picks an encounter, seats the
//! stock bots, narrates the fight through `tracing` on stderr, and prints
//! the final report as JSON on stdout.
//!
//! ```bash
//! OBELISK_SEED=7 cargo run -p obelisk-client
//! OBELISK_ENCOUNTER=custom.ron OBELISK_REALTIME=1 cargo run -p obelisk-client
//! ```

mod config;
mod feed;

use anyhow::Result;
use rand::Rng;

use obelisk_content::{EncounterLoader, EncounterSpec, presets};
use obelisk_runtime::{HeroBot, MonsterDoctrine, SessionBuilder, Topic, TracingSink};

use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();

    // 1. Pick the encounter and seed
    let spec = load_encounter(&config)?;
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    tracing::info!("Hosting '{}' with seed {}", spec.name, seed);

    // 2. Assemble the session with the stock seats
    let mut session = SessionBuilder::from_spec(&spec, seed)?
        .config(config.session_config())
        .hero_provider(Box::new(HeroBot))
        .monster_provider(Box::new(MonsterDoctrine))
        .sink(Box::new(TracingSink))
        .build();

    // 3. Narrate the match while it runs
    let feeds = [
        feed::spawn(&session, Topic::Combat),
        feed::spawn(&session, Topic::Population),
        feed::spawn(&session, Topic::Match),
    ];

    // 4. Drive it to a verdict
    let report = session.run().await?;

    // Closing the session closes the bus, which lets the feeds drain
    // everything before the report prints.
    drop(session);
    for feed in feeds {
        let _ = feed.await;
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_encounter(config: &ClientConfig) -> Result<EncounterSpec> {
    match &config.encounter {
        Some(path) => {
            tracing::info!("Loading encounter from {}", path.display());
            EncounterLoader::load(path)
        }
        None => Ok(presets::reference()),
    }
}
