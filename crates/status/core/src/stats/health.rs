//! Health sink.
//!
//! Health splits into a stored part and a modified part:
//! - `base`: damage and healing the host applies directly (persistent)
//! - bonuses: revocable adjustments pushed by status effects
//!
//! `current = clamp(base ⊕ bonuses, 0, max)`

use crate::error::SinkError;

use super::bonus::{BonusStack, StatBounds};
use super::kind::StatKind;
use super::modifier::StatModifier;
use super::sink::StatSink;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthPool {
    max: i32,
    base: i32,
    bonuses: BonusStack,
}

impl HealthPool {
    /// A full pool with the given maximum.
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self {
            max,
            base: max,
            bonuses: BonusStack::new(),
        }
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn base(&self) -> i32 {
        self.base
    }

    pub fn current(&self) -> i32 {
        self.bonuses.apply(
            self.base,
            StatBounds {
                min: 0,
                max: self.max,
            },
        )
    }

    pub fn is_depleted(&self) -> bool {
        self.current() == 0
    }

    pub fn damage(&mut self, amount: u32) {
        self.base = self.base.saturating_sub_unsigned(amount).max(0);
    }

    pub fn heal(&mut self, amount: u32) {
        self.base = self.base.saturating_add_unsigned(amount).min(self.max);
    }

    pub fn bonuses(&self) -> &BonusStack {
        &self.bonuses
    }

    fn accept(modifier: &StatModifier) -> Result<(), SinkError> {
        match modifier.stat {
            StatKind::Health => Ok(()),
            stat => Err(SinkError::Rejected {
                sink: "health",
                stat,
            }),
        }
    }
}

impl Default for HealthPool {
    fn default() -> Self {
        Self::new(100)
    }
}

impl StatSink for HealthPool {
    fn push(&mut self, modifier: &StatModifier) -> Result<(), SinkError> {
        Self::accept(modifier)?;
        self.bonuses.add(modifier.bonus);
        Ok(())
    }

    fn pop(&mut self, modifier: &StatModifier) -> Result<(), SinkError> {
        Self::accept(modifier)?;
        if self.bonuses.remove(&modifier.bonus) {
            Ok(())
        } else {
            Err(SinkError::ModifierNotFound {
                modifier: *modifier,
            })
        }
    }
}
