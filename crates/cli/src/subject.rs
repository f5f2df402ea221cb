//! The simulated subject: a health pool plus a sheet of the other stats.

use std::str::FromStr;

use status_core::{
    Clock, EffectLedger, HealthPool, ManualClock, StatKind, StatSheet, SubjectStats,
};
use strum::IntoEnumIterator;

pub type SubjectLedger = EffectLedger<SubjectStats, ManualClock>;

/// Base value a stat starts at when no override is given.
fn default_base(kind: StatKind) -> i32 {
    match kind {
        StatKind::Health => 100,
        StatKind::Armor => 10,
        StatKind::Damage => 20,
        StatKind::AttackSpeed | StatKind::MoveSpeed => 100,
        StatKind::Resistance => 0,
    }
}

/// `<stat>=<base>` on the command line, e.g. `armor=25`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatOverride {
    pub kind: StatKind,
    pub base: i32,
}

impl FromStr for StatOverride {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, base) = s
            .split_once('=')
            .ok_or_else(|| format!("expected <stat>=<base>, got '{s}'"))?;
        let kind = StatKind::from_str(kind.trim())
            .map_err(|_| format!("unknown stat '{}'", kind.trim()))?;
        let base = base
            .trim()
            .parse()
            .map_err(|_| format!("invalid base value '{}'", base.trim()))?;
        Ok(Self { kind, base })
    }
}

/// Builds the subject's sinks; later overrides of the same stat win.
pub fn build_subject(overrides: &[StatOverride]) -> SubjectStats {
    let base = |kind: StatKind| {
        overrides
            .iter()
            .rev()
            .find(|o| o.kind == kind)
            .map_or_else(|| default_base(kind), |o| o.base)
    };

    let health = HealthPool::new(base(StatKind::Health));
    let sheet = StatKind::iter()
        .filter(|kind| *kind != StatKind::Health)
        .fold(StatSheet::new(), |sheet, kind| sheet.with_stat(kind, base(kind)));

    SubjectStats::new(health, sheet)
}

/// Prints the final stat table and any effects still active.
pub fn print_summary(ledger: &SubjectLedger) {
    let subject = ledger.sink();
    let health = subject.health();

    println!("{:<14} {:>6} {:>6}", "stat", "base", "value");
    let name: &str = StatKind::Health.as_ref();
    println!("{:<14} {:>6} {:>6}", name, health.max(), health.current());
    for (kind, stat) in subject.stats().iter() {
        let name: &str = kind.as_ref();
        println!("{:<14} {:>6} {:>6}", name, stat.base, stat.value(kind));
    }

    if ledger.is_empty() {
        return;
    }
    println!();
    println!("{:<14} {:>10} {:>6}", "active", "remaining", "ticks");
    let now = ledger.clock().now();
    for instance in ledger.iter() {
        let code = instance.code();
        let name: &str = code.as_ref();
        println!(
            "{:<14} {:>10} {:>6}",
            name,
            instance.remaining(now).to_string(),
            instance.ticks_fired()
        );
    }
}
