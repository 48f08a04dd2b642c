//! Monster template catalog backing the spawn oracle.

use obelisk_core::{BestiaryOracle, MonsterTemplate, TemplateId};

use crate::spec::MonsterSpec;

/// Immutable monster catalog for one encounter. Template identifiers are
/// indices into the encounter's monster list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bestiary {
    templates: Vec<MonsterTemplate>,
    names: Vec<String>,
}

impl Bestiary {
    pub fn from_specs(specs: &[MonsterSpec]) -> Self {
        Self {
            templates: specs
                .iter()
                .map(|spec| MonsterTemplate {
                    stats: spec.stats.to_stats(),
                    abilities: spec.abilities.clone(),
                })
                .collect(),
            names: specs.iter().map(|spec| spec.name.clone()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Display name for a template, for logs and HUDs.
    pub fn name(&self, id: TemplateId) -> Option<&str> {
        self.names.get(usize::from(id.0)).map(String::as_str)
    }
}

impl BestiaryOracle for Bestiary {
    fn template(&self, id: TemplateId) -> Option<MonsterTemplate> {
        self.templates.get(usize::from(id.0)).cloned()
    }
}
