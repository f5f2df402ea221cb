//! The effect ledger: active status effects on one subject.
//!
//! # Lifecycle
//!
//! ```text
//! apply ──▶ Activated ──tick──▶ (tick batches) ──tick, now >= expires_at──▶ removed
//!   │           ▲                                                            │
//!   └─ active ──┘ extend expiry only                         pop entry/passive/ticks
//!                                                                 push exit
//! ```
//!
//! # Guarantees
//!
//! - At most one instance per [`EffectCode`].
//! - Each call works from one clock reading; no instance sees a later `now`
//!   than another in the same call.
//! - Expiry is two-phase (collect, then remove), so the active set is never
//!   mutated while it is being scanned.
//! - Sink failures never roll back ledger state. The first failure of a call
//!   is returned after the call has finished all of its bookkeeping.

mod outcome;

pub use outcome::{ApplyOutcome, RemovalOutcome, RemovalReason, TickReport};

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::config::{LedgerConfig, TickPolicy};
use crate::effect::{EffectCode, StatusEffectDefinition, StatusEffectInstance};
use crate::error::{EffectError, SinkError};
use crate::stats::{StatMask, StatModifier, StatSink};
use crate::time::{Clock, Seconds};

/// Owns the active effects of one subject together with the subject's stat
/// sink and the clock that drives it.
#[derive(Debug)]
pub struct EffectLedger<S, C> {
    active: ArrayVec<StatusEffectInstance, { LedgerConfig::MAX_ACTIVE_EFFECTS }>,
    sink: S,
    clock: C,
    config: LedgerConfig,
    /// Latest time any call has worked from; later calls may not go back.
    last_seen: Option<Seconds>,
}

impl<S: StatSink, C: Clock> EffectLedger<S, C> {
    pub fn new(sink: S, clock: C) -> Self {
        Self::with_config(sink, clock, LedgerConfig::default())
    }

    pub fn with_config(sink: S, clock: C, config: LedgerConfig) -> Self {
        Self {
            active: ArrayVec::new(),
            sink,
            clock,
            config,
            last_seen: None,
        }
    }

    /// Applies one definition at the clock's current reading.
    ///
    /// A code that is already active only has its expiry extended; no
    /// modifiers are pushed and its tick schedule is left alone.
    pub fn apply(
        &mut self,
        definition: &Arc<StatusEffectDefinition>,
    ) -> Result<ApplyOutcome, EffectError> {
        let now = self.clock.now();
        self.apply_at(definition, now)
    }

    /// Applies one definition at an explicit time.
    ///
    /// `now` must not be earlier than any time the ledger has already
    /// worked from, whether through `apply*` or `tick*`.
    pub fn apply_at(
        &mut self,
        definition: &Arc<StatusEffectDefinition>,
        now: Seconds,
    ) -> Result<ApplyOutcome, EffectError> {
        definition.validate()?;
        self.observe(now)?;
        self.apply_validated(definition, now)
    }

    /// Applies each definition independently, in order, at one clock reading.
    ///
    /// Every definition is validated before any is applied, so an ill-formed
    /// batch changes nothing. Past validation, a failing entry does not stop
    /// the rest; the first error is returned once all have been processed.
    pub fn apply_many<'a, I>(&mut self, definitions: I) -> Result<Vec<ApplyOutcome>, EffectError>
    where
        I: IntoIterator<Item = &'a Arc<StatusEffectDefinition>>,
    {
        let definitions: Vec<_> = definitions.into_iter().collect();
        for definition in &definitions {
            definition.validate()?;
        }

        let now = self.clock.now();
        self.observe(now)?;
        let mut outcomes = Vec::with_capacity(definitions.len());
        let mut first_error = None;

        for definition in definitions {
            match self.apply_validated(definition, now) {
                Ok(outcome) => outcomes.push(outcome),
                Err(error) if first_error.is_none() => first_error = Some(error),
                Err(error) => {
                    tracing::warn!(code = %definition.code, %error, "additional apply failure");
                }
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(outcomes),
        }
    }

    /// Reads the clock once and advances the ledger to that reading.
    pub fn tick(&mut self) -> Result<TickReport, EffectError> {
        let now = self.clock.now();
        self.tick_at(now)
    }

    /// Fires due tick batches, then removes every effect expired at `now`.
    pub fn tick_at(&mut self, now: Seconds) -> Result<TickReport, EffectError> {
        self.observe(now)?;

        let mut report = TickReport::new(now);
        let mut failures = SinkFailures::default();

        // Phase 1: periodic batches
        for instance in self.active.iter_mut() {
            let due = instance.take_due_ticks(now, self.config.tick_cadence);
            if due == 0 {
                continue;
            }

            let code = instance.code();
            let definition = Arc::clone(instance.definition());
            for _ in 0..due {
                if self.config.tick_policy == TickPolicy::Refresh
                    && instance.live_tick_batches() > 0
                {
                    pop_all(
                        &mut self.sink,
                        &definition.tick_modifiers,
                        code,
                        &mut failures,
                        &mut report.touched,
                    );
                    instance.record_batch_popped();
                }
                push_all(
                    &mut self.sink,
                    &definition.tick_modifiers,
                    code,
                    &mut failures,
                    &mut report.touched,
                );
                instance.record_batch_pushed();
            }

            tracing::trace!(
                %code,
                batches = due,
                live = instance.live_tick_batches(),
                next_tick_at = ?instance.next_tick_at(),
                "tick batches fired"
            );
            report.ticked.push((code, due));
        }

        // Phase 2: collect expired codes before touching the active set
        let expired: Vec<EffectCode> = self
            .active
            .iter()
            .filter(|instance| instance.has_expired(now))
            .map(StatusEffectInstance::code)
            .collect();

        // Phase 3: retire them
        for code in expired {
            if let Some(removal) = self.retire(
                code,
                RemovalReason::Expired,
                &mut failures,
                &mut report.touched,
            ) {
                report.expired.push(removal);
            }
        }

        failures.finish(report)
    }

    /// Ends an active effect immediately through the normal exit path.
    ///
    /// Returns `Ok(None)` if the code is not active.
    pub fn remove(&mut self, code: EffectCode) -> Result<Option<RemovalOutcome>, EffectError> {
        let mut failures = SinkFailures::default();
        let mut touched = StatMask::empty();
        let removal = self.retire(code, RemovalReason::Dispelled, &mut failures, &mut touched);
        failures.finish(removal)
    }

    pub fn contains(&self, code: EffectCode) -> bool {
        self.get(code).is_some()
    }

    pub fn get(&self, code: EffectCode) -> Option<&StatusEffectInstance> {
        self.active.iter().find(|instance| instance.code() == code)
    }

    pub fn expires_at(&self, code: EffectCode) -> Option<Seconds> {
        self.get(code).map(StatusEffectInstance::expires_at)
    }

    /// Time left on `code` at the clock's current reading.
    pub fn remaining(&self, code: EffectCode) -> Option<Seconds> {
        let now = self.clock.now();
        self.get(code).map(|instance| instance.remaining(now))
    }

    /// Active effects in activation order.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffectInstance> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn into_parts(self) -> (S, C) {
        (self.sink, self.clock)
    }

    /// Rejects unusable readings and records `now` as the latest time seen.
    fn observe(&mut self, now: Seconds) -> Result<(), EffectError> {
        if !now.is_finite() {
            return Err(EffectError::InvalidClockReading { now });
        }
        if let Some(previous) = self.last_seen {
            if now < previous {
                return Err(EffectError::ClockRegressed { now, previous });
            }
        }
        self.last_seen = Some(now);
        Ok(())
    }

    fn apply_validated(
        &mut self,
        definition: &Arc<StatusEffectDefinition>,
        now: Seconds,
    ) -> Result<ApplyOutcome, EffectError> {
        let code = definition.code;

        if let Some(existing) = self.active.iter_mut().find(|i| i.code() == code) {
            let previous = existing.expires_at();
            let outcome = if existing.extend_to(now + definition.duration) {
                ApplyOutcome::Extended {
                    previous,
                    expires_at: existing.expires_at(),
                }
            } else {
                ApplyOutcome::Unchanged {
                    expires_at: previous,
                }
            };
            tracing::debug!(%code, ?outcome, "status effect re-applied");
            return Ok(outcome);
        }

        let instance = StatusEffectInstance::new(Arc::clone(definition), now);
        let expires_at = instance.expires_at();
        self.active
            .try_push(instance)
            .map_err(|_| EffectError::CapacityExceeded {
                code,
                capacity: LedgerConfig::MAX_ACTIVE_EFFECTS,
            })?;

        let mut failures = SinkFailures::default();
        let mut touched = StatMask::empty();
        push_all(
            &mut self.sink,
            &definition.entry_modifiers,
            code,
            &mut failures,
            &mut touched,
        );
        push_all(
            &mut self.sink,
            &definition.passive_modifiers,
            code,
            &mut failures,
            &mut touched,
        );

        tracing::debug!(%code, %now, %expires_at, "status effect activated");
        failures.finish(ApplyOutcome::Activated { expires_at })
    }

    fn retire(
        &mut self,
        code: EffectCode,
        reason: RemovalReason,
        failures: &mut SinkFailures,
        touched: &mut StatMask,
    ) -> Option<RemovalOutcome> {
        let index = self.active.iter().position(|i| i.code() == code)?;
        let instance = self.active.remove(index);
        let definition = instance.definition();

        let mut tick_batches_popped = 0;
        if definition.removable {
            pop_all(&mut self.sink, &definition.entry_modifiers, code, failures, touched);
            pop_all(&mut self.sink, &definition.passive_modifiers, code, failures, touched);
            for _ in 0..instance.live_tick_batches() {
                pop_all(&mut self.sink, &definition.tick_modifiers, code, failures, touched);
                tick_batches_popped += 1;
            }
        }
        push_all(&mut self.sink, &definition.exit_modifiers, code, failures, touched);

        tracing::debug!(
            %code,
            %reason,
            removable = definition.removable,
            tick_batches_popped,
            "status effect removed"
        );

        Some(RemovalOutcome {
            code,
            reason,
            modifiers_revoked: definition.removable,
            tick_batches_popped,
        })
    }
}

/// The first sink failure of one ledger call. Later failures are logged.
#[derive(Default)]
struct SinkFailures {
    first: Option<EffectError>,
}

impl SinkFailures {
    fn record(&mut self, code: EffectCode, result: Result<(), SinkError>) {
        let Err(source) = result else {
            return;
        };
        if self.first.is_none() {
            self.first = Some(EffectError::Sink { code, source });
        } else {
            tracing::warn!(%code, error = %source, "additional stat sink failure");
        }
    }

    fn finish<T>(self, value: T) -> Result<T, EffectError> {
        match self.first {
            Some(error) => Err(error),
            None => Ok(value),
        }
    }
}

fn push_all<S: StatSink>(
    sink: &mut S,
    modifiers: &[StatModifier],
    code: EffectCode,
    failures: &mut SinkFailures,
    touched: &mut StatMask,
) {
    for modifier in modifiers {
        *touched |= modifier.stat.mask();
        failures.record(code, sink.push(modifier));
    }
}

fn pop_all<S: StatSink>(
    sink: &mut S,
    modifiers: &[StatModifier],
    code: EffectCode,
    failures: &mut SinkFailures,
    touched: &mut StatMask,
) {
    for modifier in modifiers {
        *touched |= modifier.stat.mask();
        failures.record(code, sink.pop(modifier));
    }
}
