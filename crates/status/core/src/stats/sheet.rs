//! Generic per-stat sink: a base value and a bonus stack per tracked stat.

use std::collections::BTreeMap;

use crate::error::SinkError;

use super::bonus::BonusStack;
use super::kind::StatKind;
use super::modifier::StatModifier;
use super::sink::StatSink;

/// One stat's base value plus its live bonuses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifiableStat {
    pub base: i32,
    bonuses: BonusStack,
}

impl ModifiableStat {
    pub fn new(base: i32) -> Self {
        Self {
            base,
            bonuses: BonusStack::new(),
        }
    }

    /// Base with every live bonus applied, clamped to the stat's bounds.
    pub fn value(&self, kind: StatKind) -> i32 {
        self.bonuses.apply(self.base, kind.bounds())
    }

    pub fn bonuses(&self) -> &BonusStack {
        &self.bonuses
    }
}

/// Stats tracked for one subject, keyed by [`StatKind`].
///
/// Only stats registered with [`StatSheet::track`] accept modifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatSheet {
    stats: BTreeMap<StatKind, ModifiableStat>,
}

impl StatSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`StatSheet::track`].
    pub fn with_stat(mut self, kind: StatKind, base: i32) -> Self {
        self.track(kind, base);
        self
    }

    /// Starts tracking `kind`, or resets its base if already tracked.
    pub fn track(&mut self, kind: StatKind, base: i32) {
        self.stats
            .entry(kind)
            .and_modify(|stat| stat.base = base)
            .or_insert_with(|| ModifiableStat::new(base));
    }

    pub fn get(&self, kind: StatKind) -> Option<&ModifiableStat> {
        self.stats.get(&kind)
    }

    pub fn value(&self, kind: StatKind) -> Option<i32> {
        self.stats.get(&kind).map(|stat| stat.value(kind))
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKind, &ModifiableStat)> {
        self.stats.iter().map(|(kind, stat)| (*kind, stat))
    }

    fn tracked_mut(&mut self, kind: StatKind) -> Result<&mut ModifiableStat, SinkError> {
        self.stats
            .get_mut(&kind)
            .ok_or(SinkError::UnknownStat { stat: kind })
    }
}

impl StatSink for StatSheet {
    fn push(&mut self, modifier: &StatModifier) -> Result<(), SinkError> {
        self.tracked_mut(modifier.stat)?.bonuses.add(modifier.bonus);
        Ok(())
    }

    fn pop(&mut self, modifier: &StatModifier) -> Result<(), SinkError> {
        if self.tracked_mut(modifier.stat)?.bonuses.remove(&modifier.bonus) {
            Ok(())
        } else {
            Err(SinkError::ModifierNotFound {
                modifier: *modifier,
            })
        }
    }
}
