//! Bonus values and the stack that folds them onto a base stat.
//!
//! Every stat uses the same calculation order:
//! Flat → %Inc → More → Less → Clamp

use core::fmt;

/// A single adjustment carried by a stat modifier.
///
/// - **Flat**: additive, applied first (e.g. -2 armor)
/// - **Increased**: percentage points, summed then applied once (20 = +20%)
/// - **More**: sequential multiplier (50 = ×1.5)
/// - **Less**: sequential reduction (10 = ×0.9)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    Flat(i32),
    Increased(i32),
    More(i32),
    Less(i32),
}

impl fmt::Display for Bonus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bonus::Flat(v) => write!(f, "{v:+}"),
            Bonus::Increased(p) => write!(f, "{p:+}% increased"),
            Bonus::More(p) => write!(f, "{p:+}% more"),
            Bonus::Less(p) => write!(f, "{p}% less"),
        }
    }
}

/// Inclusive clamp range for a stat's final value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// Health and other pools: never negative.
    pub const POOL: Self = Self { min: 0, max: 99_999 };

    /// Armor, damage: wide non-negative range.
    pub const RATING: Self = Self { min: 0, max: 9_999 };

    /// Speeds: 2x slower to 2x faster.
    pub const SPEED: Self = Self { min: 50, max: 200 };

    /// Resistances are percentages and may go negative (vulnerability).
    pub const PERCENT: Self = Self {
        min: -100,
        max: 100,
    };

    pub const UNCLAMPED: Self = Self {
        min: i32::MIN,
        max: i32::MAX,
    };
}

/// The live bonuses on one stat, in push order.
///
/// Order only matters for removal (the earliest equal bonus is removed
/// first); evaluation always follows the fixed layer order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    /// Removes one bonus equal to `bonus`. Returns false if none is live.
    pub fn remove(&mut self, bonus: &Bonus) -> bool {
        match self.bonuses.iter().position(|b| b == bonus) {
            Some(index) => {
                self.bonuses.remove(index);
                true
            }
            None => false,
        }
    }

    /// Folds the stack onto `base` and clamps the result to `bounds`.
    ///
    /// ```text
    /// result = clamp((base + Σflat) × (1 + Σinc/100) × Π(1 + more/100) × Π(1 - less/100))
    /// ```
    pub fn apply(&self, base: i32, bounds: StatBounds) -> i32 {
        let (flat, increased) =
            self.bonuses
                .iter()
                .fold((0i64, 0i64), |(flat, inc), bonus| match bonus {
                    Bonus::Flat(v) => (flat + i64::from(*v), inc),
                    Bonus::Increased(p) => (flat, inc + i64::from(*p)),
                    _ => (flat, inc),
                });

        let mut value = (i64::from(base) + flat) * (100 + increased) / 100;

        for bonus in &self.bonuses {
            if let Bonus::More(p) = bonus {
                value = value * (100 + i64::from(*p)) / 100;
            }
        }
        for bonus in &self.bonuses {
            if let Bonus::Less(p) = bonus {
                value = value * (100 - i64::from(*p)) / 100;
            }
        }

        value.clamp(i64::from(bounds.min), i64::from(bounds.max)) as i32
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bonus> {
        self.bonuses.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }
}
