//! Run a scripted timeline against one subject

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Parser;
use status_content::ConfigLoader;
use status_core::{
    EffectCode, EffectError, ErrorSeverity, LedgerConfig, LedgerError, ManualClock, Seconds,
    StatKind, StatusEffectDefinition, TickCadence, TickPolicy, TickReport,
};
use tracing::{info, warn};

use super::load_registry;
use crate::subject::{StatOverride, SubjectLedger, build_subject, print_summary};

/// Run a scripted timeline and print the final stats
#[derive(Parser, Debug)]
pub struct Run {
    /// Effect catalog (RON). Defaults to the bundled catalog
    #[arg(short, long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Ledger configuration (TOML). Defaults to stack + fixed
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the configured tick policy (stack, refresh)
    #[arg(long, value_parser = parse_tick_policy)]
    tick_policy: Option<TickPolicy>,

    /// Override the configured tick cadence (fixed, drift)
    #[arg(long, value_parser = parse_tick_cadence)]
    tick_cadence: Option<TickCadence>,

    /// Apply an effect at a time, e.g. `burn@0` (repeatable)
    #[arg(short, long, value_name = "CODE@T")]
    apply: Vec<ScheduledEffect>,

    /// Dispel an effect at a time, e.g. `burn@2.5` (repeatable)
    #[arg(short, long, value_name = "CODE@T")]
    remove: Vec<ScheduledEffect>,

    /// Override a base stat, e.g. `armor=25` (repeatable)
    #[arg(short, long, value_name = "STAT=BASE")]
    stat: Vec<StatOverride>,

    /// Simulated time to stop at, in seconds
    #[arg(short, long, default_value_t = 10.0)]
    until: f64,

    /// Time between steps, in seconds
    #[arg(long, default_value_t = 0.1)]
    step: f64,
}

/// `<code>@<seconds>` on the command line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledEffect {
    pub code: EffectCode,
    pub at: Seconds,
}

impl FromStr for ScheduledEffect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (code, at) = s
            .split_once('@')
            .ok_or_else(|| format!("expected <code>@<seconds>, got '{s}'"))?;
        let code = EffectCode::from_str(code.trim())
            .map_err(|_| format!("unknown effect '{}'", code.trim()))?;
        let at: f64 = at
            .trim()
            .parse()
            .map_err(|_| format!("invalid time '{}'", at.trim()))?;
        if !at.is_finite() || at < 0.0 {
            return Err(format!("time must be a non-negative number, got {at}"));
        }
        Ok(Self {
            code,
            at: Seconds(at),
        })
    }
}

fn parse_tick_policy(s: &str) -> Result<TickPolicy, String> {
    TickPolicy::from_str(s).map_err(|_| format!("unknown tick policy '{s}'"))
}

fn parse_tick_cadence(s: &str) -> Result<TickCadence, String> {
    TickCadence::from_str(s).map_err(|_| format!("unknown tick cadence '{s}'"))
}

/// Step grid of one simulation: `0, step, 2·step, ..` up to `until`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Timeline {
    step: f64,
    steps: u64,
}

impl Timeline {
    fn new(until: f64, step: f64) -> Result<Self> {
        if !step.is_finite() || step <= 0.0 {
            bail!("--step must be a positive number of seconds, got {step}");
        }
        if !until.is_finite() || until < 0.0 {
            bail!("--until must be a non-negative number of seconds, got {until}");
        }
        // Small epsilon keeps `until` itself on the grid despite rounding
        let steps = (until / step + 1e-9).floor() as u64;
        Ok(Self { step, steps })
    }

    fn at(&self, index: u64) -> Seconds {
        Seconds(index as f64 * self.step)
    }
}

impl Run {
    pub fn execute(self) -> Result<()> {
        let timeline = Timeline::new(self.until, self.step)?;
        let registry = load_registry(self.catalog.as_deref())?;

        let mut config = match &self.config {
            Some(path) => ConfigLoader::load(path)?,
            None => LedgerConfig::default(),
        };
        if let Some(policy) = self.tick_policy {
            config = config.with_tick_policy(policy);
        }
        if let Some(cadence) = self.tick_cadence {
            config = config.with_tick_cadence(cadence);
        }

        let mut applies = self
            .apply
            .iter()
            .map(|scheduled| Ok((scheduled.at, Arc::clone(registry.require(scheduled.code)?))))
            .collect::<Result<Vec<_>>>()?;
        applies.sort_by(|a, b| a.0.as_f64().total_cmp(&b.0.as_f64()));

        let mut removals = self.remove.clone();
        removals.sort_by(|a, b| a.at.as_f64().total_cmp(&b.at.as_f64()));

        info!(
            effects = registry.len(),
            tick_policy = %config.tick_policy,
            tick_cadence = %config.tick_cadence,
            until = self.until,
            step = self.step,
            "starting simulation"
        );

        let mut ledger = SubjectLedger::with_config(
            build_subject(&self.stat),
            ManualClock::new(Seconds::ZERO),
            config,
        );
        drive(&mut ledger, timeline, &applies, &removals)?;

        print_summary(&ledger);
        Ok(())
    }
}

/// Steps the ledger across the timeline.
///
/// At each step, due dispels run first, then due applications in one batch,
/// then the tick.
fn drive(
    ledger: &mut SubjectLedger,
    timeline: Timeline,
    applies: &[(Seconds, Arc<StatusEffectDefinition>)],
    removals: &[ScheduledEffect],
) -> Result<()> {
    let mut next_apply = 0;
    let mut next_removal = 0;

    for index in 0..=timeline.steps {
        let now = timeline.at(index);
        ledger.clock_mut().set(now);

        while let Some(removal) = removals.get(next_removal).filter(|r| r.at <= now) {
            next_removal += 1;
            match tolerate(ledger.remove(removal.code))? {
                Some(Some(outcome)) => info!(
                    t = %now,
                    code = %outcome.code,
                    batches_popped = outcome.tick_batches_popped,
                    "effect dispelled"
                ),
                Some(None) => info!(t = %now, code = %removal.code, "nothing to dispel"),
                None => {}
            }
        }

        let due = applies[next_apply..]
            .iter()
            .take_while(|(at, _)| *at <= now)
            .count();
        if due > 0 {
            let batch = &applies[next_apply..next_apply + due];
            next_apply += due;
            if let Some(outcomes) = tolerate(ledger.apply_many(batch.iter().map(|(_, d)| d)))? {
                for ((_, definition), outcome) in batch.iter().zip(outcomes) {
                    info!(t = %now, code = %definition.code, ?outcome, "effect applied");
                }
            }
        }

        if let Some(report) = tolerate(ledger.tick())? {
            log_report(ledger, &report);
        }
    }

    Ok(())
}

/// Sink failures are logged and the run continues; anything else aborts.
fn tolerate<T>(result: Result<T, EffectError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(error) if error.severity() == ErrorSeverity::Collaborator => {
            warn!(code = error.error_code(), %error, "stat sink rejected a change");
            Ok(None)
        }
        Err(error) => Err(error.into()),
    }
}

fn log_report(ledger: &SubjectLedger, report: &TickReport) {
    if report.is_quiet() {
        return;
    }

    for (code, batches) in &report.ticked {
        info!(t = %report.now, %code, batches, "tick");
    }
    for removal in &report.expired {
        info!(
            t = %report.now,
            code = %removal.code,
            reason = %removal.reason,
            revoked = removal.modifiers_revoked,
            batches_popped = removal.tick_batches_popped,
            "effect ended"
        );
    }
    if report.touched.touches(StatKind::Health) {
        info!(t = %report.now, health = ledger.sink().health().current(), "health changed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use status_content::ContentFactory;

    fn burn() -> Arc<StatusEffectDefinition> {
        let registry = ContentFactory::bundled().load_effects().unwrap();
        Arc::clone(registry.require(EffectCode::Burn).unwrap())
    }

    fn ledger() -> SubjectLedger {
        SubjectLedger::new(build_subject(&[]), ManualClock::new(Seconds::ZERO))
    }

    #[test]
    fn scheduled_effects_parse() {
        let parsed: ScheduledEffect = "Burn@1.5".parse().unwrap();
        assert_eq!(parsed.code, EffectCode::Burn);
        assert_eq!(parsed.at, Seconds(1.5));

        assert!("burn".parse::<ScheduledEffect>().is_err());
        assert!("lightning@1".parse::<ScheduledEffect>().is_err());
        assert!("burn@-1".parse::<ScheduledEffect>().is_err());
        assert!("burn@soon".parse::<ScheduledEffect>().is_err());
    }

    #[test]
    fn timeline_includes_until() {
        let timeline = Timeline::new(6.0, 0.1).unwrap();
        assert_eq!(timeline.steps, 60);
        assert!(Timeline::new(1.0, 0.0).is_err());
        assert!(Timeline::new(-1.0, 0.1).is_err());
    }

    #[test]
    fn burn_mid_run_and_after_expiry() {
        let applies = [(Seconds::ZERO, burn())];

        let mut mid = ledger();
        drive(&mut mid, Timeline::new(4.5, 0.1).unwrap(), &applies, &[]).unwrap();
        assert_eq!(mid.sink().health().current(), 96);
        assert_eq!(mid.sink().stats().value(StatKind::Armor), Some(8));
        assert_eq!(mid.get(EffectCode::Burn).unwrap().ticks_fired(), 4);

        let mut done = ledger();
        drive(&mut done, Timeline::new(6.0, 0.1).unwrap(), &applies, &[]).unwrap();
        assert_eq!(done.sink().health().current(), 100);
        assert_eq!(done.sink().stats().value(StatKind::Armor), Some(10));
        assert!(done.is_empty());
    }

    #[test]
    fn dispel_restores_stats_early() {
        let applies = [(Seconds::ZERO, burn())];
        let removals = [ScheduledEffect {
            code: EffectCode::Burn,
            at: Seconds(2.5),
        }];

        let mut ledger = ledger();
        drive(&mut ledger, Timeline::new(3.0, 0.5).unwrap(), &applies, &removals).unwrap();
        assert!(!ledger.contains(EffectCode::Burn));
        assert_eq!(ledger.sink().health().current(), 100);
        assert_eq!(ledger.sink().stats().value(StatKind::Armor), Some(10));
    }
}
