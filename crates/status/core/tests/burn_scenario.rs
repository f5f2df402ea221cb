use std::sync::Arc;

use status_core::{
    EffectCode, EffectLedger, HealthPool, ManualClock, RecordingSink, Seconds, SinkCall, StatKind,
    StatModifier, StatSheet, StatusEffectDefinition, SubjectStats,
};

const ARMOR_SHRED: StatModifier = StatModifier::flat(StatKind::Armor, -2);
const SCORCH: StatModifier = StatModifier::flat(StatKind::Health, -1);

fn burn() -> Arc<StatusEffectDefinition> {
    Arc::new(
        StatusEffectDefinition::new(EffectCode::Burn, Seconds(5.0))
            .with_entry([ARMOR_SHRED])
            .with_tick(Seconds(1.0), [SCORCH]),
    )
}

#[test]
fn burn_lifecycle_matches_the_reference_timeline() {
    let mut ledger = EffectLedger::new(RecordingSink::new(), ManualClock::default());

    // t = 0: activation pushes the armor shred only
    ledger.apply(&burn()).unwrap();
    assert_eq!(ledger.sink().calls(), &[SinkCall::Push(ARMOR_SHRED)]);

    // t = 1.1 .. 4.1: one scorch per step, schedule advancing by one second
    for (step, t) in [1.1, 2.1, 3.1, 4.1].into_iter().enumerate() {
        ledger.clock_mut().set(Seconds(t));
        let report = ledger.tick().unwrap();

        assert_eq!(report.batches_fired(EffectCode::Burn), 1);
        assert_eq!(
            ledger.get(EffectCode::Burn).unwrap().next_tick_at(),
            Some(Seconds(step as f64 + 2.0))
        );
    }
    assert_eq!(ledger.sink().push_count(&SCORCH), 4);

    // t = 5.1: everything pushed is popped and the ledger empties
    ledger.clock_mut().set(Seconds(5.1));
    let report = ledger.tick().unwrap();

    assert_eq!(report.batches_fired(EffectCode::Burn), 0);
    assert!(report.did_expire(EffectCode::Burn));
    assert_eq!(report.expired[0].tick_batches_popped, 4);
    assert_eq!(ledger.sink().pop_count(&ARMOR_SHRED), 1);
    assert_eq!(ledger.sink().pop_count(&SCORCH), 4);
    assert_eq!(ledger.sink().live_count(&ARMOR_SHRED), 0);
    assert_eq!(ledger.sink().live_count(&SCORCH), 0);
    assert!(ledger.is_empty());
}

#[test]
fn burn_against_real_sinks_restores_stats_on_expiry() {
    let stats = SubjectStats::new(
        HealthPool::new(100),
        StatSheet::new().with_stat(StatKind::Armor, 10),
    );
    let mut ledger = EffectLedger::new(stats, ManualClock::default());

    ledger.apply(&burn()).unwrap();
    assert_eq!(ledger.sink().stats().value(StatKind::Armor), Some(8));

    for t in [1.1, 2.1, 3.1, 4.1] {
        ledger.tick_at(Seconds(t)).unwrap();
    }
    assert_eq!(ledger.sink().health().current(), 96);

    let report = ledger.tick_at(Seconds(5.1)).unwrap();
    assert!(report.touched.touches(StatKind::Health));
    assert!(report.touched.touches(StatKind::Armor));
    assert_eq!(ledger.sink().health().current(), 100);
    assert_eq!(ledger.sink().stats().value(StatKind::Armor), Some(10));
}
