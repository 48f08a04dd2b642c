//! Encounter file loading.
//!
//! Encounters are stored as RON and deserialize straight into
//! [`EncounterSpec`]; nothing in a data file bypasses
//! [`EncounterSpec::assemble`]'s validation.

use std::path::Path;

use crate::spec::EncounterSpec;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Loader for encounter definitions from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<EncounterSpec> {
        let content = read_file(path)?;
        let spec: EncounterSpec = ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse encounter RON {}: {}", path.display(), e)
        })?;
        Ok(spec)
    }
}
