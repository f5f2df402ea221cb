//! Stat identifiers and the touched-stat mask reported by the ledger.

use bitflags::bitflags;

use super::bonus::StatBounds;

/// Identifies the stat a modifier targets.
///
/// [`StatKind::Health`] is routed to the health sink; every other kind goes
/// to the per-stat sink.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    Health,
    Armor,
    Damage,
    AttackSpeed,
    MoveSpeed,
    Resistance,
}

impl StatKind {
    /// Clamp range applied when the stat's bonus stack is evaluated.
    pub const fn bounds(self) -> StatBounds {
        match self {
            StatKind::Health => StatBounds::POOL,
            StatKind::Armor | StatKind::Damage => StatBounds::RATING,
            StatKind::AttackSpeed | StatKind::MoveSpeed => StatBounds::SPEED,
            StatKind::Resistance => StatBounds::PERCENT,
        }
    }

    pub const fn mask(self) -> StatMask {
        match self {
            StatKind::Health => StatMask::HEALTH,
            StatKind::Armor => StatMask::ARMOR,
            StatKind::Damage => StatMask::DAMAGE,
            StatKind::AttackSpeed => StatMask::ATTACK_SPEED,
            StatKind::MoveSpeed => StatMask::MOVE_SPEED,
            StatKind::Resistance => StatMask::RESISTANCE,
        }
    }
}

bitflags! {
    /// Stats whose modifier stacks changed during one ledger call.
    ///
    /// Hosts use this to refresh only the affected displays.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct StatMask: u8 {
        const HEALTH       = 1 << 0;
        const ARMOR        = 1 << 1;
        const DAMAGE       = 1 << 2;
        const ATTACK_SPEED = 1 << 3;
        const MOVE_SPEED   = 1 << 4;
        const RESISTANCE   = 1 << 5;
    }
}

impl StatMask {
    pub fn touches(self, stat: StatKind) -> bool {
        self.contains(stat.mask())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_stat_has_a_distinct_mask_bit() {
        let combined = StatKind::iter().fold(StatMask::empty(), |acc, stat| {
            assert!(!acc.touches(stat));
            acc | stat.mask()
        });
        assert_eq!(combined, StatMask::all());
    }

    #[test]
    fn parses_snake_case_names() {
        assert_eq!("move_speed".parse::<StatKind>().ok(), Some(StatKind::MoveSpeed));
        assert_eq!("ARMOR".parse::<StatKind>().ok(), Some(StatKind::Armor));
    }
}
