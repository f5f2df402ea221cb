/// Identifies a status effect kind; the uniqueness key within a ledger.
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
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectCode {
    // ========================================================================
    // Damage over time
    // ========================================================================
    Burn,
    Poison,
    Bleed,

    // ========================================================================
    // Crowd control
    // ========================================================================
    Freeze,
    Stun,
    Root,
    Silence,
    Slow,

    // ========================================================================
    // Buffs
    // ========================================================================
    Haste,
    Shield,
    Regeneration,

    // ========================================================================
    // Debuffs and special states
    // ========================================================================
    Weaken,
    Berserk,
    Fear,
}
