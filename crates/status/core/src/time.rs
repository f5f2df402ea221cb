//! Clock readings and the clock abstraction the ledger is driven by.
//!
//! Effects schedule themselves against absolute readings (`expires_at`,
//! `next_tick_at`), so every deadline is a [`Seconds`] value on the same
//! monotonic timeline the host's [`Clock`] reports.

use core::fmt;
use std::time::Instant;

/// A clock reading or a duration, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Seconds(pub f64);

impl Seconds {
    pub const ZERO: Self = Self(0.0);

    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn as_f64(self) -> f64 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Returns the later of two readings.
    pub fn max(self, other: Self) -> Self {
        if other > self { other } else { self }
    }

    pub fn min(self, other: Self) -> Self {
        if other < self { other } else { self }
    }

    /// Time left until `deadline`, saturating at zero.
    pub fn until(self, deadline: Self) -> Self {
        Self((deadline.0 - self.0).max(0.0))
    }
}

impl core::ops::Add for Seconds {
    type Output = Seconds;
    fn add(self, rhs: Seconds) -> Seconds {
        Seconds(self.0 + rhs.0)
    }
}

impl core::ops::Sub for Seconds {
    type Output = Seconds;
    fn sub(self, rhs: Seconds) -> Seconds {
        Seconds(self.0 - rhs.0)
    }
}

impl From<f64> for Seconds {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

/// Source of monotonic, non-decreasing time.
///
/// The ledger reads the clock once per `apply` and once per `tick`, never
/// per instance.
pub trait Clock {
    fn now(&self) -> Seconds;
}

/// Clock advanced explicitly by the host (fixed-step loops, tests, replays).
///
/// Requests to move the clock backwards are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ManualClock {
    now: Seconds,
}

impl ManualClock {
    pub fn new(start: Seconds) -> Self {
        Self { now: start }
    }

    /// Moves the clock to `at` unless that would move it backwards.
    pub fn set(&mut self, at: Seconds) {
        self.now = self.now.max(at);
    }

    pub fn advance(&mut self, by: Seconds) {
        self.set(self.now + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Seconds {
        self.now
    }
}

/// Wall-clock time elapsed since construction.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Seconds {
        Seconds(self.origin.elapsed().as_secs_f64())
    }
}
