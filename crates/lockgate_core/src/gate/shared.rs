use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::GateConfig;
use crate::error::Result;

use super::{Gate, GateState, SourceId, TransitionCallback};

/// A [`Gate`] behind a mutex, for callers on more than one thread.
///
/// Each request (bookkeeping plus callback) runs as a single critical section,
/// so two threads can never interleave a decision with another's callback.
pub struct SharedGate<C> {
    inner: Mutex<Gate<C>>,
}

impl<C: TransitionCallback> SharedGate<C> {
    pub fn new(callback: C) -> Self {
        Self::from(Gate::new(callback))
    }

    pub fn with_config(callback: C, config: GateConfig) -> Self {
        Self::from(Gate::with_config(callback, config))
    }

    pub fn request(&self, active: bool, source: impl Into<SourceId>) -> Option<C::Output> {
        self.guard().request(active, source)
    }

    pub fn request_default(&self, active: bool) -> Option<C::Output> {
        self.guard().request_default(active)
    }

    pub fn lock(&self, source: impl Into<SourceId>) -> Option<C::Output> {
        self.guard().lock(source)
    }

    pub fn release(&self, source: impl Into<SourceId>) -> Option<C::Output> {
        self.guard().release(source)
    }

    pub fn try_request(
        &self,
        active: bool,
        source: impl Into<SourceId>,
    ) -> Result<Option<C::Output>> {
        self.guard().try_request(active, source)
    }

    pub fn is_locked(&self) -> bool {
        self.guard().is_locked()
    }

    pub fn holders(&self) -> Vec<SourceId> {
        self.guard().holders()
    }

    pub fn state(&self) -> GateState {
        self.guard().state()
    }

    /// Run `f` with exclusive access to the inner gate.
    pub fn with_gate<R>(&self, f: impl FnOnce(&mut Gate<C>) -> R) -> R {
        f(&mut self.guard())
    }

    pub fn into_inner(self) -> Gate<C> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // The lock set is updated before the callback runs, so a panicking
    // callback leaves consistent bookkeeping behind.
    fn guard(&self) -> MutexGuard<'_, Gate<C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: TransitionCallback> From<Gate<C>> for SharedGate<C> {
    fn from(gate: Gate<C>) -> Self {
        Self {
            inner: Mutex::new(gate),
        }
    }
}

impl<C> fmt::Debug for SharedGate<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedGate")
            .field("inner", &self.inner)
            .finish()
    }
}
