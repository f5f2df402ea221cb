//! Validated, shareable effect definitions keyed by code.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, bail};
use status_core::{EffectCode, StatusEffectDefinition};

/// Every known effect definition, at most one per [`EffectCode`].
///
/// Definitions are wrapped in `Arc` once here; ledgers clone the `Arc`, not
/// the definition.
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    definitions: BTreeMap<EffectCode, Arc<StatusEffectDefinition>>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry, rejecting invalid definitions and duplicate codes.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = StatusEffectDefinition>,
    ) -> anyhow::Result<Self> {
        let mut registry = Self::new();
        for definition in definitions {
            registry.insert(definition)?;
        }
        Ok(registry)
    }

    pub fn insert(&mut self, definition: StatusEffectDefinition) -> anyhow::Result<()> {
        let code = definition.code;
        definition
            .validate()
            .with_context(|| format!("effect '{code}' failed validation"))?;

        if self.definitions.contains_key(&code) {
            bail!("effect '{code}' is defined more than once");
        }
        self.definitions.insert(code, Arc::new(definition));
        Ok(())
    }

    pub fn get(&self, code: EffectCode) -> Option<&Arc<StatusEffectDefinition>> {
        self.definitions.get(&code)
    }

    /// Like [`EffectRegistry::get`], but a missing code is an error.
    pub fn require(&self, code: EffectCode) -> anyhow::Result<&Arc<StatusEffectDefinition>> {
        self.get(code)
            .with_context(|| format!("effect '{code}' is not in the registry"))
    }

    pub fn contains(&self, code: EffectCode) -> bool {
        self.definitions.contains_key(&code)
    }

    pub fn codes(&self) -> impl Iterator<Item = EffectCode> + '_ {
        self.definitions.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<StatusEffectDefinition>> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use status_core::Seconds;

    #[test]
    fn duplicate_codes_are_rejected() {
        let err = EffectRegistry::from_definitions([
            StatusEffectDefinition::new(EffectCode::Burn, Seconds(5.0)),
            StatusEffectDefinition::new(EffectCode::Burn, Seconds(3.0)),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn invalid_definitions_are_rejected() {
        let err = EffectRegistry::from_definitions([StatusEffectDefinition::new(
            EffectCode::Stun,
            Seconds(-2.0),
        )])
        .unwrap_err();
        assert!(err.to_string().contains("stun"));
    }

    #[test]
    fn require_reports_missing_codes() {
        let registry = EffectRegistry::from_definitions([StatusEffectDefinition::new(
            EffectCode::Haste,
            Seconds(1.0),
        )])
        .unwrap();
        assert!(registry.require(EffectCode::Haste).is_ok());
        assert!(registry.require(EffectCode::Fear).is_err());
    }
}
