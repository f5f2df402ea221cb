//! Immutable, shareable description of a status effect kind.

use crate::error::EffectError;
use crate::stats::StatModifier;
use crate::time::Seconds;

use super::EffectCode;

/// What an effect does over its lifetime.
///
/// Definitions are authored once (in code or in a content catalog) and
/// shared between every subject they are applied to.
///
/// | list                | pushed                    | popped on removal      |
/// |---------------------|---------------------------|------------------------|
/// | `entry_modifiers`   | on activation             | yes (if removable)     |
/// | `passive_modifiers` | on activation             | yes (if removable)     |
/// | `tick_modifiers`    | every `tick_interval`     | every live batch       |
/// | `exit_modifiers`    | on removal                | never                  |
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffectDefinition {
    pub code: EffectCode,

    /// How long the effect lasts from its (re-)application.
    pub duration: Seconds,

    /// Period of `tick_modifiers`. Absent or zero means the effect never ticks.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tick_interval: Option<Seconds>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub entry_modifiers: Vec<StatModifier>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub passive_modifiers: Vec<StatModifier>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub tick_modifiers: Vec<StatModifier>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub exit_modifiers: Vec<StatModifier>,

    /// Non-removable effects leave every pushed modifier in place when they end.
    #[cfg_attr(feature = "serde", serde(default = "removable_by_default"))]
    pub removable: bool,
}

#[cfg(feature = "serde")]
fn removable_by_default() -> bool {
    true
}

impl StatusEffectDefinition {
    /// A removable effect with no modifiers and no tick.
    pub fn new(code: EffectCode, duration: Seconds) -> Self {
        Self {
            code,
            duration,
            tick_interval: None,
            entry_modifiers: Vec::new(),
            passive_modifiers: Vec::new(),
            tick_modifiers: Vec::new(),
            exit_modifiers: Vec::new(),
            removable: true,
        }
    }

    pub fn with_entry(mut self, modifiers: impl IntoIterator<Item = StatModifier>) -> Self {
        self.entry_modifiers.extend(modifiers);
        self
    }

    pub fn with_passive(mut self, modifiers: impl IntoIterator<Item = StatModifier>) -> Self {
        self.passive_modifiers.extend(modifiers);
        self
    }

    pub fn with_tick(
        mut self,
        interval: Seconds,
        modifiers: impl IntoIterator<Item = StatModifier>,
    ) -> Self {
        self.tick_interval = Some(interval);
        self.tick_modifiers.extend(modifiers);
        self
    }

    pub fn with_exit(mut self, modifiers: impl IntoIterator<Item = StatModifier>) -> Self {
        self.exit_modifiers.extend(modifiers);
        self
    }

    pub fn non_removable(mut self) -> Self {
        self.removable = false;
        self
    }

    /// The tick period, if this effect ticks at all.
    pub fn tick_period(&self) -> Option<Seconds> {
        match self.tick_interval {
            Some(interval) if interval > Seconds::ZERO && !self.tick_modifiers.is_empty() => {
                Some(interval)
            }
            _ => None,
        }
    }

    /// Rejects definitions the ledger cannot schedule.
    pub fn validate(&self) -> Result<(), EffectError> {
        let invalid = |reason| EffectError::InvalidDefinition {
            code: self.code,
            reason,
        };

        if !self.duration.is_finite() || self.duration < Seconds::ZERO {
            return Err(invalid("duration must be a finite, non-negative number of seconds"));
        }

        match self.tick_interval {
            Some(interval) if !interval.is_finite() || interval < Seconds::ZERO => {
                Err(invalid("tick interval must be a finite, non-negative number of seconds"))
            }
            Some(interval) if interval > Seconds::ZERO => Ok(()),
            _ if !self.tick_modifiers.is_empty() => {
                Err(invalid("tick modifiers require a positive tick interval"))
            }
            _ => Ok(()),
        }
    }
}
