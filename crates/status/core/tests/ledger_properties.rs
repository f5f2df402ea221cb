use std::sync::Arc;

use status_core::{
    ApplyOutcome, EffectCode, EffectError, EffectLedger, ErrorSeverity, LedgerConfig, LedgerError,
    ManualClock, RecordingSink, Seconds, SinkError, StatKind, StatModifier,
    StatusEffectDefinition, TickCadence, TickPolicy,
};

const DRAIN: StatModifier = StatModifier::flat(StatKind::Health, -3);
const SLOWED: StatModifier = StatModifier::less(StatKind::MoveSpeed, 30);
const WARD: StatModifier = StatModifier::flat(StatKind::Resistance, 25);
const CHILL: StatModifier = StatModifier::flat(StatKind::AttackSpeed, -10);

type TestLedger = EffectLedger<RecordingSink, ManualClock>;

fn ledger_with(config: LedgerConfig) -> TestLedger {
    EffectLedger::with_config(RecordingSink::new(), ManualClock::default(), config)
}

fn ledger() -> TestLedger {
    ledger_with(LedgerConfig::default())
}

fn poison(duration: f64) -> Arc<StatusEffectDefinition> {
    Arc::new(
        StatusEffectDefinition::new(EffectCode::Poison, Seconds(duration))
            .with_passive([SLOWED])
            .with_tick(Seconds(1.0), [DRAIN]),
    )
}

fn at(ledger: &mut TestLedger, t: f64) {
    ledger.clock_mut().set(Seconds(t));
}

#[test]
fn reapplying_a_code_never_creates_a_second_instance() {
    let mut ledger = ledger();
    for t in [0.0, 0.5, 1.5, 2.0] {
        at(&mut ledger, t);
        ledger.apply(&poison(5.0)).unwrap();
        ledger.tick().unwrap();
        assert_eq!(ledger.iter().filter(|i| i.code() == EffectCode::Poison).count(), 1);
    }
}

#[test]
fn shorter_reapplication_leaves_expiry_alone() {
    let mut ledger = ledger();
    ledger.apply(&poison(10.0)).unwrap();

    at(&mut ledger, 3.0);
    let outcome = ledger.apply(&poison(2.0)).unwrap();

    assert_eq!(
        outcome,
        ApplyOutcome::Unchanged {
            expires_at: Seconds(10.0)
        }
    );
    assert_eq!(ledger.expires_at(EffectCode::Poison), Some(Seconds(10.0)));
}

#[test]
fn longer_reapplication_extends_to_now_plus_duration() {
    let mut ledger = ledger();
    ledger.apply(&poison(4.0)).unwrap();

    at(&mut ledger, 3.0);
    let outcome = ledger.apply(&poison(5.0)).unwrap();

    assert_eq!(
        outcome,
        ApplyOutcome::Extended {
            previous: Seconds(4.0),
            expires_at: Seconds(8.0)
        }
    );
    assert_eq!(ledger.remaining(EffectCode::Poison), Some(Seconds(5.0)));
}

#[test]
fn reapplication_pushes_nothing_and_keeps_the_tick_schedule() {
    let mut ledger = ledger();
    ledger.apply(&poison(5.0)).unwrap();

    at(&mut ledger, 0.5);
    ledger.apply(&poison(5.0)).unwrap();
    ledger.apply(&poison(5.0)).unwrap();

    assert_eq!(ledger.sink().push_count(&SLOWED), 1);
    assert_eq!(
        ledger.get(EffectCode::Poison).unwrap().next_tick_at(),
        Some(Seconds(1.0))
    );
}

#[test]
fn one_batch_per_interval_boundary() {
    let mut ledger = ledger();
    ledger.apply(&poison(100.0)).unwrap();

    // Steps of exactly one interval, offset from the boundaries
    for k in 1..=10 {
        let report = ledger.tick_at(Seconds(k as f64 + 0.25)).unwrap();
        assert_eq!(report.batches_fired(EffectCode::Poison), 1);
    }
    // Many small steps inside one interval fire once
    for t in [11.3, 11.6, 11.9, 12.0] {
        ledger.tick_at(Seconds(t)).unwrap();
    }
    assert_eq!(ledger.sink().push_count(&DRAIN), 11);
}

#[test]
fn fixed_cadence_is_independent_of_step_size() {
    let mut coarse = ledger();
    let mut fine = ledger();
    coarse.apply(&poison(6.0)).unwrap();
    fine.apply(&poison(6.0)).unwrap();

    coarse.tick_at(Seconds(3.5)).unwrap();
    coarse.tick_at(Seconds(7.0)).unwrap();
    for k in 1..=70 {
        fine.tick_at(Seconds(k as f64 * 0.1)).unwrap();
    }

    assert_eq!(coarse.sink().push_count(&DRAIN), 5);
    assert_eq!(fine.sink().push_count(&DRAIN), 5);
}

#[test]
fn drift_cadence_fires_at_most_once_per_step() {
    let mut ledger = ledger_with(LedgerConfig::new().with_tick_cadence(TickCadence::Drift));
    ledger.apply(&poison(10.0)).unwrap();

    let report = ledger.tick_at(Seconds(3.5)).unwrap();
    assert_eq!(report.batches_fired(EffectCode::Poison), 1);
    assert_eq!(
        ledger.get(EffectCode::Poison).unwrap().next_tick_at(),
        Some(Seconds(4.5))
    );
}

#[test]
fn expiry_pops_everything_that_was_pushed() {
    let frost = Arc::new(
        StatusEffectDefinition::new(EffectCode::Freeze, Seconds(2.5))
            .with_entry([CHILL])
            .with_passive([SLOWED])
            .with_tick(Seconds(0.5), [DRAIN])
            .with_exit([WARD]),
    );
    let mut ledger = ledger();
    ledger.apply(&frost).unwrap();

    for k in 1..=5 {
        ledger.tick_at(Seconds(k as f64 * 0.6)).unwrap();
    }

    assert!(!ledger.contains(EffectCode::Freeze));
    let sink = ledger.sink();
    assert_eq!(sink.push_count(&DRAIN), 4);
    for modifier in [CHILL, SLOWED, DRAIN] {
        assert_eq!(sink.live_count(&modifier), 0, "{modifier} still live");
    }
    assert_eq!(sink.push_count(&WARD), 1);
    assert_eq!(sink.pop_count(&WARD), 0);

    // Gone for good
    ledger.tick_at(Seconds(10.0)).unwrap();
    assert!(ledger.is_empty());
    assert_eq!(ledger.sink().push_count(&WARD), 1);
}

#[test]
fn non_removable_effects_leave_their_modifiers_behind() {
    let curse = Arc::new(
        StatusEffectDefinition::new(EffectCode::Weaken, Seconds(2.0))
            .with_entry([CHILL])
            .with_tick(Seconds(1.0), [DRAIN])
            .with_exit([WARD])
            .non_removable(),
    );
    let mut ledger = ledger();
    ledger.apply(&curse).unwrap();

    ledger.tick_at(Seconds(1.5)).unwrap();
    let report = ledger.tick_at(Seconds(2.0)).unwrap();

    let removal = report.expired[0];
    assert!(!removal.modifiers_revoked);
    assert_eq!(removal.tick_batches_popped, 0);
    assert!(ledger.is_empty());

    let sink = ledger.sink();
    assert!(sink.pushes().count() > 0);
    assert_eq!(sink.pops().count(), 0);
    assert_eq!(sink.live_count(&CHILL), 1);
    assert_eq!(sink.live_count(&DRAIN), 1);
    assert_eq!(sink.push_count(&WARD), 1);
}

#[test]
fn refresh_policy_keeps_one_batch_live() {
    let mut ledger = ledger_with(LedgerConfig::new().with_tick_policy(TickPolicy::Refresh));
    ledger.apply(&poison(5.0)).unwrap();

    for t in [1.1, 2.1, 3.1] {
        ledger.tick_at(Seconds(t)).unwrap();
        assert_eq!(ledger.sink().live_count(&DRAIN), 1);
    }
    assert_eq!(ledger.sink().push_count(&DRAIN), 3);

    let report = ledger.tick_at(Seconds(6.0)).unwrap();
    assert_eq!(report.expired[0].tick_batches_popped, 1);
    assert_eq!(ledger.sink().live_count(&DRAIN), 0);
}

#[test]
fn one_now_per_tick_call() {
    // Both effects share a boundary at t=2; neither may see a different now.
    let short = Arc::new(
        StatusEffectDefinition::new(EffectCode::Bleed, Seconds(2.0))
            .with_tick(Seconds(1.0), [DRAIN]),
    );
    let mut ledger = ledger();
    ledger.apply_many([&short, &poison(2.0)]).unwrap();

    let report = ledger.tick_at(Seconds(2.0)).unwrap();
    assert_eq!(report.batches_fired(EffectCode::Bleed), 1);
    assert_eq!(report.batches_fired(EffectCode::Poison), 1);
    assert!(report.did_expire(EffectCode::Bleed));
    assert!(report.did_expire(EffectCode::Poison));
    assert!(ledger.is_empty());
}

#[test]
fn apply_many_applies_in_order_without_merging() {
    let haste = Arc::new(
        StatusEffectDefinition::new(EffectCode::Haste, Seconds(3.0)).with_entry([SLOWED]),
    );
    let mut ledger = ledger();
    let outcomes = ledger.apply_many([&haste, &poison(4.0), &haste]).unwrap();

    assert!(outcomes[0].is_activation());
    assert!(outcomes[1].is_activation());
    assert_eq!(
        outcomes[2],
        ApplyOutcome::Unchanged {
            expires_at: Seconds(3.0)
        }
    );
    let codes: Vec<_> = ledger.iter().map(|i| i.code()).collect();
    assert_eq!(codes, vec![EffectCode::Haste, EffectCode::Poison]);
}

#[test]
fn ill_formed_definitions_are_rejected_before_any_change() {
    let broken = Arc::new(StatusEffectDefinition::new(
        EffectCode::Stun,
        Seconds(f64::INFINITY),
    ));
    let mut ledger = ledger();

    let err = ledger.apply_many([&poison(3.0), &broken]).unwrap_err();

    assert_eq!(err.severity(), ErrorSeverity::Validation);
    assert_eq!(err.error_code(), "EFFECT_INVALID_DEFINITION");
    assert!(ledger.is_empty());
    assert!(ledger.sink().calls().is_empty());
}

#[test]
fn sink_failures_surface_but_ledger_state_moves_on() {
    let mut ledger = EffectLedger::new(
        RecordingSink::refusing(StatKind::MoveSpeed),
        ManualClock::default(),
    );

    let err = ledger.apply(&poison(2.0)).unwrap_err();
    assert_eq!(
        err,
        EffectError::Sink {
            code: EffectCode::Poison,
            source: SinkError::Rejected {
                sink: "recording",
                stat: StatKind::MoveSpeed,
            },
        }
    );
    assert_eq!(err.severity(), ErrorSeverity::Collaborator);
    assert!(ledger.contains(EffectCode::Poison));

    // Ticks still fire for the other stats, and expiry still removes it
    ledger.tick_at(Seconds(1.5)).unwrap();
    assert!(ledger.tick_at(Seconds(2.0)).is_err());
    assert!(ledger.is_empty());
    assert_eq!(ledger.sink().live_count(&DRAIN), 0);
}

#[test]
fn sub_ulp_tick_interval_does_not_stall_the_ledger() {
    let flicker = Arc::new(
        StatusEffectDefinition::new(EffectCode::Bleed, Seconds(5.0))
            .with_tick(Seconds(1e-20), [DRAIN]),
    );
    let mut ledger = ledger();
    at(&mut ledger, 1000.0);
    ledger.apply(&flicker).unwrap();

    let report = ledger.tick_at(Seconds(1001.0)).unwrap();
    assert_eq!(
        report.batches_fired(EffectCode::Bleed),
        LedgerConfig::MAX_TICK_BATCHES_PER_CALL
    );

    // The schedule moved past the reading, so a repeat reading fires nothing
    let report = ledger.tick_at(Seconds(1001.0)).unwrap();
    assert_eq!(report.batches_fired(EffectCode::Bleed), 0);
}

#[test]
fn huge_catch_up_is_capped_and_fully_revoked() {
    let seep = StatModifier::flat(StatKind::Health, 0);
    let bleed = Arc::new(
        StatusEffectDefinition::new(EffectCode::Bleed, Seconds(10.0))
            .with_tick(Seconds(1e-9), [seep]),
    );
    let mut ledger = ledger();
    ledger.apply(&bleed).unwrap();

    let report = ledger.tick_at(Seconds(20.0)).unwrap();

    let cap = LedgerConfig::MAX_TICK_BATCHES_PER_CALL;
    assert_eq!(report.batches_fired(EffectCode::Bleed), cap);
    assert!(report.did_expire(EffectCode::Bleed));
    assert_eq!(report.expired[0].tick_batches_popped, cap);
    assert_eq!(ledger.sink().push_count(&seep), cap as usize);
    assert_eq!(ledger.sink().live_count(&seep), 0);
}

#[test]
fn apply_cannot_work_from_a_time_before_the_last_tick() {
    let burn = Arc::new(
        StatusEffectDefinition::new(EffectCode::Burn, Seconds(5.0))
            .with_entry([CHILL])
            .with_tick(Seconds(1.0), [DRAIN]),
    );
    let mut ledger = ledger();
    ledger.tick_at(Seconds(10.0)).unwrap();

    // The clock was never advanced past 0
    let err = ledger.apply(&burn).unwrap_err();
    assert_eq!(
        err,
        EffectError::ClockRegressed {
            now: Seconds::ZERO,
            previous: Seconds(10.0)
        }
    );
    assert_eq!(err.severity(), ErrorSeverity::Validation);
    assert!(ledger.apply_many([&burn]).is_err());
    assert!(ledger.is_empty());
    assert!(ledger.sink().calls().is_empty());

    // An explicit time shares the tick's timeline
    let outcome = ledger.apply_at(&burn, Seconds(10.0)).unwrap();
    assert_eq!(outcome.expires_at(), Seconds(15.0));
    let report = ledger.tick_at(Seconds(10.1)).unwrap();
    assert!(!report.did_expire(EffectCode::Burn));
    assert_eq!(ledger.sink().live_count(&CHILL), 1);

    // And ticks cannot go back behind an apply
    assert!(ledger.tick_at(Seconds(10.05)).is_err());
}
