//! The modifier payload pushed to and popped from stat sinks.

use core::fmt;

use super::bonus::Bonus;
use super::kind::StatKind;

/// A revocable adjustment to one stat.
///
/// Identity is value equality: popping removes one live modifier equal to
/// the argument, so the same descriptor pushed twice must be popped twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub stat: StatKind,
    pub bonus: Bonus,
}

impl StatModifier {
    pub const fn new(stat: StatKind, bonus: Bonus) -> Self {
        Self { stat, bonus }
    }

    pub const fn flat(stat: StatKind, value: i32) -> Self {
        Self::new(stat, Bonus::Flat(value))
    }

    pub const fn increased(stat: StatKind, percent: i32) -> Self {
        Self::new(stat, Bonus::Increased(percent))
    }

    pub const fn more(stat: StatKind, percent: i32) -> Self {
        Self::new(stat, Bonus::More(percent))
    }

    pub const fn less(stat: StatKind, percent: i32) -> Self {
        Self::new(stat, Bonus::Less(percent))
    }
}

impl fmt::Display for StatModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.bonus, self.stat)
    }
}
