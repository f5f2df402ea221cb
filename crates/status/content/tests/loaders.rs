use std::fs;

use status_content::{ConfigLoader, ContentFactory, EffectLoader};
use status_core::{
    Bonus, EffectCode, LedgerConfig, Seconds, StatKind, StatModifier, TickCadence, TickPolicy,
};

#[test]
fn bundled_catalog_loads() {
    let factory = ContentFactory::bundled();
    let registry = factory.load_effects().expect("bundled effects.ron should load");
    assert!(registry.contains(EffectCode::Burn));

    let burn = registry.require(EffectCode::Burn).unwrap();
    assert_eq!(burn.duration, Seconds(5.0));
    assert_eq!(burn.tick_interval, Some(Seconds(1.0)));
    assert_eq!(
        burn.entry_modifiers,
        vec![StatModifier::new(StatKind::Armor, Bonus::Flat(-2))]
    );
    assert_eq!(
        burn.tick_modifiers,
        vec![StatModifier::new(StatKind::Health, Bonus::Flat(-1))]
    );
    assert!(burn.removable);

    let fear = registry.require(EffectCode::Fear).unwrap();
    assert!(!fear.removable);

    let config = factory.load_config().expect("bundled ledger.toml should load");
    assert_eq!(config, LedgerConfig::default());
}

#[test]
fn omitted_fields_take_defaults() {
    let registry = EffectLoader::parse("(effects: [(code: Stun, duration: 1.5)])").unwrap();
    let stun = registry.require(EffectCode::Stun).unwrap();
    assert_eq!(stun.tick_interval, None);
    assert!(stun.entry_modifiers.is_empty());
    assert!(stun.exit_modifiers.is_empty());
    assert!(stun.removable);
}

#[test]
fn duplicate_codes_fail_the_whole_catalog() {
    let err = EffectLoader::parse(
        "(effects: [(code: Burn, duration: 5.0), (code: Burn, duration: 2.0)])",
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("more than once"));
}

#[test]
fn tick_modifiers_without_interval_fail() {
    let err = EffectLoader::parse(
        "(effects: [(code: Bleed, duration: 4.0, tick_modifiers: [(stat: Health, bonus: Flat(-1))])])",
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("positive tick interval"));
}

#[test]
fn malformed_ron_is_reported() {
    let err = EffectLoader::parse("(effects: [(code: Lightning, duration: 1.0)])").unwrap_err();
    assert!(err.to_string().contains("Failed to parse effect catalog RON"));
}

#[test]
fn config_keys_are_optional() {
    let config = ConfigLoader::parse("tick_policy = \"refresh\"").unwrap();
    assert_eq!(config.tick_policy, TickPolicy::Refresh);
    assert_eq!(config.tick_cadence, TickCadence::Fixed);

    let config = ConfigLoader::parse("").unwrap();
    assert_eq!(config, LedgerConfig::default());

    assert!(ConfigLoader::parse("tick_cadence = \"sometimes\"").is_err());
}

#[test]
fn factory_reads_a_custom_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("effects.ron"),
        "(effects: [(code: Haste, duration: 3.0, passive_modifiers: [(stat: MoveSpeed, bonus: Increased(25))])])",
    )
    .unwrap();

    let factory = ContentFactory::new(dir.path());
    let registry = factory.load_effects().unwrap();
    assert_eq!(registry.len(), 1);
    assert_eq!(factory.load_config().unwrap(), LedgerConfig::default());

    fs::write(dir.path().join("ledger.toml"), "tick_cadence = \"drift\"\n").unwrap();
    let config = factory.load_config().unwrap();
    assert_eq!(config.tick_cadence, TickCadence::Drift);
}

#[test]
fn missing_catalog_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = ContentFactory::new(dir.path()).load_effects().unwrap_err();
    assert!(err.to_string().contains("effects.ron"));
}
