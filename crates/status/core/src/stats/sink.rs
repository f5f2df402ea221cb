//! The stat sink contract and the sinks that do not own stat values.

use crate::error::SinkError;

use super::health::HealthPool;
use super::kind::StatKind;
use super::modifier::StatModifier;
use super::sheet::StatSheet;

/// Accepts and revokes stat modifiers on behalf of one subject.
///
/// `push` applies a modifier; `pop` revokes one previously pushed modifier
/// equal to the argument. Popping a modifier that is not live is reported as
/// [`SinkError::ModifierNotFound`] by the sinks in this crate.
pub trait StatSink {
    fn push(&mut self, modifier: &StatModifier) -> Result<(), SinkError>;

    fn pop(&mut self, modifier: &StatModifier) -> Result<(), SinkError>;
}

impl<T: StatSink + ?Sized> StatSink for Box<T> {
    fn push(&mut self, modifier: &StatModifier) -> Result<(), SinkError> {
        (**self).push(modifier)
    }

    fn pop(&mut self, modifier: &StatModifier) -> Result<(), SinkError> {
        (**self).pop(modifier)
    }
}

/// Routes health modifiers to a health sink and everything else to a
/// per-stat sink.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatRouter<H, S> {
    health: H,
    stats: S,
}

/// The usual subject: a health pool plus a sheet of other stats.
pub type SubjectStats = StatRouter<HealthPool, StatSheet>;

impl<H, S> StatRouter<H, S> {
    pub fn new(health: H, stats: S) -> Self {
        Self { health, stats }
    }

    pub fn health(&self) -> &H {
        &self.health
    }

    pub fn health_mut(&mut self) -> &mut H {
        &mut self.health
    }

    pub fn stats(&self) -> &S {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut S {
        &mut self.stats
    }

    pub fn into_parts(self) -> (H, S) {
        (self.health, self.stats)
    }
}

impl<H: StatSink, S: StatSink> StatSink for StatRouter<H, S> {
    fn push(&mut self, modifier: &StatModifier) -> Result<(), SinkError> {
        match modifier.stat {
            StatKind::Health => self.health.push(modifier),
            _ => self.stats.push(modifier),
        }
    }

    fn pop(&mut self, modifier: &StatModifier) -> Result<(), SinkError> {
        match modifier.stat {
            StatKind::Health => self.health.pop(modifier),
            _ => self.stats.pop(modifier),
        }
    }
}

/// One call observed by a [`RecordingSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkCall {
    Push(StatModifier),
    Pop(StatModifier),
}

/// Sink that accepts every call and keeps an ordered audit trail.
///
/// Optionally refuses pushes for one stat, to exercise failure paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingSink {
    calls: Vec<SinkCall>,
    refuse: Option<StatKind>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that rejects every push and pop targeting `stat`.
    pub fn refusing(stat: StatKind) -> Self {
        Self {
            calls: Vec::new(),
            refuse: Some(stat),
        }
    }

    pub fn calls(&self) -> &[SinkCall] {
        &self.calls
    }

    pub fn pushes(&self) -> impl Iterator<Item = &StatModifier> {
        self.calls.iter().filter_map(|call| match call {
            SinkCall::Push(m) => Some(m),
            SinkCall::Pop(_) => None,
        })
    }

    pub fn pops(&self) -> impl Iterator<Item = &StatModifier> {
        self.calls.iter().filter_map(|call| match call {
            SinkCall::Pop(m) => Some(m),
            SinkCall::Push(_) => None,
        })
    }

    pub fn push_count(&self, modifier: &StatModifier) -> usize {
        self.pushes().filter(|m| *m == modifier).count()
    }

    pub fn pop_count(&self, modifier: &StatModifier) -> usize {
        self.pops().filter(|m| *m == modifier).count()
    }

    /// Pushes not yet matched by a pop, per distinct modifier.
    pub fn live_count(&self, modifier: &StatModifier) -> usize {
        self.push_count(modifier).saturating_sub(self.pop_count(modifier))
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    fn check(&self, modifier: &StatModifier) -> Result<(), SinkError> {
        match self.refuse {
            Some(stat) if stat == modifier.stat => Err(SinkError::Rejected {
                sink: "recording",
                stat,
            }),
            _ => Ok(()),
        }
    }
}

impl StatSink for RecordingSink {
    fn push(&mut self, modifier: &StatModifier) -> Result<(), SinkError> {
        self.check(modifier)?;
        self.calls.push(SinkCall::Push(*modifier));
        Ok(())
    }

    fn pop(&mut self, modifier: &StatModifier) -> Result<(), SinkError> {
        self.check(modifier)?;
        self.calls.push(SinkCall::Pop(*modifier));
        Ok(())
    }
}
