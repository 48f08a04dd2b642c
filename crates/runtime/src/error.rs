//! Unified error types surfaced by the session API.

use std::fmt;

use thiserror::Error;

use obelisk_content::SpecError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{kind} intent provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error(transparent)]
    Encounter(#[from] SpecError),
}

/// Which provider seat an error refers to.
#[derive(Debug, Copy, Clone)]
pub enum ProviderKind {
    Hero,
    Monster,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Hero => "hero",
            ProviderKind::Monster => "monster",
        };
        write!(f, "{}", label)
    }
}
