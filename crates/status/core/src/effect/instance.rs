//! Per-subject runtime state of an active effect.

use std::sync::Arc;

use crate::config::{LedgerConfig, TickCadence};
use crate::time::Seconds;

use super::{EffectCode, StatusEffectDefinition};

/// One active effect on one subject.
///
/// Effects expire once `now >= expires_at`. Re-application can only push
/// `expires_at` later, never earlier.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusEffectInstance {
    definition: Arc<StatusEffectDefinition>,
    applied_at: Seconds,
    expires_at: Seconds,
    next_tick_at: Option<Seconds>,
    /// Tick batches pushed to the sink and not yet popped.
    live_tick_batches: u32,
    ticks_fired: u32,
}

impl StatusEffectInstance {
    pub fn new(definition: Arc<StatusEffectDefinition>, now: Seconds) -> Self {
        let expires_at = now + definition.duration;
        let next_tick_at = definition.tick_period().map(|period| now + period);
        Self {
            definition,
            applied_at: now,
            expires_at,
            next_tick_at,
            live_tick_batches: 0,
            ticks_fired: 0,
        }
    }

    pub fn code(&self) -> EffectCode {
        self.definition.code
    }

    pub fn definition(&self) -> &Arc<StatusEffectDefinition> {
        &self.definition
    }

    pub fn applied_at(&self) -> Seconds {
        self.applied_at
    }

    pub fn expires_at(&self) -> Seconds {
        self.expires_at
    }

    pub fn next_tick_at(&self) -> Option<Seconds> {
        self.next_tick_at
    }

    pub fn live_tick_batches(&self) -> u32 {
        self.live_tick_batches
    }

    /// Total tick batches fired since activation.
    pub fn ticks_fired(&self) -> u32 {
        self.ticks_fired
    }

    pub fn has_expired(&self, now: Seconds) -> bool {
        now >= self.expires_at
    }

    pub fn remaining(&self, now: Seconds) -> Seconds {
        now.until(self.expires_at)
    }

    /// Moves expiry to `candidate` if that is later. Returns whether it moved.
    pub fn extend_to(&mut self, candidate: Seconds) -> bool {
        if candidate > self.expires_at {
            self.expires_at = candidate;
            true
        } else {
            false
        }
    }

    /// Advances the tick schedule to `now` and returns how many batches to fire.
    ///
    /// Only boundaries strictly before both `now` and `expires_at` count, so
    /// an effect never ticks on or after the instant it expires. At most
    /// [`LedgerConfig::MAX_TICK_BATCHES_PER_CALL`] batches fire per call; the
    /// schedule still moves past every boundary beyond that.
    pub(crate) fn take_due_ticks(&mut self, now: Seconds, cadence: TickCadence) -> u32 {
        let (Some(period), Some(next)) = (self.definition.tick_period(), self.next_tick_at)
        else {
            return 0;
        };

        let horizon = now.min(self.expires_at);
        if next >= horizon {
            return 0;
        }

        let (boundaries, advanced) = match cadence {
            TickCadence::Fixed => {
                let boundaries = boundaries_before(next, horizon, period);
                (boundaries, next + Seconds(period.as_f64() * boundaries))
            }
            TickCadence::Drift => (1.0, now + period),
        };

        // `advanced` falls short when `period` is below the float spacing of `next`
        self.next_tick_at = Some(if advanced.is_finite() && advanced >= horizon {
            advanced
        } else {
            horizon
        });

        let cap = LedgerConfig::MAX_TICK_BATCHES_PER_CALL;
        let due = if boundaries > f64::from(cap) {
            tracing::warn!(
                code = %self.code(),
                boundaries,
                fired = cap,
                "tick catch-up capped"
            );
            cap
        } else {
            boundaries as u32
        };

        self.ticks_fired = self.ticks_fired.saturating_add(due);
        due
    }

    pub(crate) fn record_batch_pushed(&mut self) {
        self.live_tick_batches = self.live_tick_batches.saturating_add(1);
    }

    pub(crate) fn record_batch_popped(&mut self) {
        self.live_tick_batches = self.live_tick_batches.saturating_sub(1);
    }
}

/// Number of boundaries `next + k * period` (k >= 0) strictly before `horizon`.
///
/// Caller guarantees `next < horizon` and `period > 0`.
fn boundaries_before(next: Seconds, horizon: Seconds, period: Seconds) -> f64 {
    let span = (horizon - next).as_f64();
    let mut count = (span / period.as_f64()).ceil().max(1.0);
    // Division can round up onto a boundary that sits exactly on the horizon
    if count > 1.0 && next.as_f64() + period.as_f64() * (count - 1.0) >= horizon.as_f64() {
        count -= 1.0;
    }
    count
}
