use std::fmt;

use tracing::{debug, trace};

use crate::config::GateConfig;
use crate::error::{CoreError, Result};
use crate::logging::log_core_error;

use super::engine::{self, Decision};
use super::{GateState, LockSet, SourceId, TransitionCallback};

/// Multi-source lock gate around a two-state transition callback.
///
/// The gated condition is inactive while any source holds a lock and active
/// once all of them have released. The callback only sees a call when the
/// request moves the gate in the requested direction:
/// - lock: `on_transition(false)` on every lock request (see [`crate::RelockPolicy`])
/// - release: `on_transition(true)` only when the last holder lets go
pub struct Gate<C> {
    locks: LockSet,
    callback: C,
    config: GateConfig,
}

impl<C: TransitionCallback> Gate<C> {
    pub fn new(callback: C) -> Self {
        Self::with_config(callback, GateConfig::default())
    }

    pub fn with_config(callback: C, config: GateConfig) -> Self {
        Self {
            locks: LockSet::new(),
            callback,
            config,
        }
    }

    /// Lock (`active == false`) or release (`active == true`) on behalf of `source`.
    ///
    /// Returns the callback's output when it fired, `None` when the request
    /// was absorbed by the bookkeeping. Never fails: releasing a lock that
    /// `source` does not hold is a no-op.
    pub fn request(&mut self, active: bool, source: impl Into<SourceId>) -> Option<C::Output> {
        let source = source.into();
        let was_locked = self.is_locked();
        let decision = engine::apply(&mut self.locks, active, source.clone(), self.config.relock);

        self.observe(&source, decision, was_locked);

        decision
            .fires()
            .map(|value| self.callback.on_transition(value))
    }

    /// `request` on behalf of the configured default source (`"common"` unless overridden).
    pub fn request_default(&mut self, active: bool) -> Option<C::Output> {
        let source = self.config.default_source.clone();
        self.request(active, source)
    }

    pub fn lock(&mut self, source: impl Into<SourceId>) -> Option<C::Output> {
        self.request(false, source)
    }

    pub fn release(&mut self, source: impl Into<SourceId>) -> Option<C::Output> {
        self.request(true, source)
    }

    /// Strict variant of [`Gate::request`].
    ///
    /// Rejects a lock from a source that already holds one and a release from
    /// a source that holds none. A rejected request leaves the gate untouched
    /// and does not reach the callback.
    pub fn try_request(
        &mut self,
        active: bool,
        source: impl Into<SourceId>,
    ) -> Result<Option<C::Output>> {
        let source = source.into();
        let decision = engine::decide(&self.locks, active, &source, self.config.relock);

        if let Some(err) = redundancy_error(decision, &source, self.locks.len()) {
            return Err(err);
        }

        Ok(self.request(active, source))
    }

    // -------- Inspection --------

    pub fn lock_sources(&self) -> &LockSet {
        &self.locks
    }

    /// Sorted snapshot of the sources holding a lock.
    pub fn holders(&self) -> Vec<SourceId> {
        self.locks.holders()
    }

    pub fn is_locked(&self) -> bool {
        !self.locks.is_empty()
    }

    pub fn is_held_by(&self, source: &SourceId) -> bool {
        self.locks.contains(source)
    }

    pub fn state(&self) -> GateState {
        GateState::from_locked(self.is_locked())
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn callback(&self) -> &C {
        &self.callback
    }

    pub fn into_inner(self) -> C {
        self.callback
    }

    fn observe(&self, source: &SourceId, decision: Decision, was_locked: bool) {
        debug!(
            %source,
            decision = decision.label(),
            fires = ?decision.fires(),
            holders = self.locks.len(),
            relock = self.config.relock.label(),
            "gate request"
        );

        if was_locked != self.is_locked() {
            trace!(state = self.state().label(), "gate state changed");
        }

        if self.config.diagnostics {
            if let Some(err) = redundancy_error(decision, source, self.locks.len()) {
                log_core_error(&err);
            }
        }
    }
}

fn redundancy_error(decision: Decision, source: &SourceId, holders: usize) -> Option<CoreError> {
    match decision {
        Decision::Relock
        | Decision::Lock {
            newly_held: false,
            ..
        } => Some(CoreError::redundant_lock(source.clone(), holders)),
        Decision::NotHeld => Some(CoreError::not_held(source.clone(), holders)),
        _ => None,
    }
}

impl<C> fmt::Debug for Gate<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate")
            .field("locks", &self.locks)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RelockPolicy;
    use crate::error::{ErrorKind, Payload};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<bool>,
    }

    impl TransitionCallback for Recorder {
        type Output = usize;

        fn on_transition(&mut self, active: bool) -> usize {
            self.calls.push(active);
            self.calls.len()
        }
    }

    #[test]
    fn output_is_passed_through_only_when_fired() {
        let mut gate = Gate::new(Recorder::default());

        assert_eq!(gate.lock("a"), Some(1));
        assert_eq!(gate.lock("b"), Some(2));
        assert_eq!(gate.release("a"), None);
        assert_eq!(gate.release("b"), Some(3));
        assert_eq!(gate.callback().calls, vec![false, false, true]);
    }

    #[test]
    fn request_default_uses_common_slot() {
        let mut gate = Gate::new(Recorder::default());

        gate.request_default(false);
        assert!(gate.is_held_by(&SourceId::COMMON));

        gate.request(true, "common");
        assert!(!gate.is_locked());
        assert_eq!(gate.callback().calls, vec![false, true]);
    }

    #[test]
    fn request_default_follows_config() {
        let config = GateConfig::default().with_default_source("ui");
        let mut gate = Gate::with_config(Recorder::default(), config);

        gate.request_default(false);
        assert_eq!(gate.holders(), vec![SourceId::from("ui")]);
    }

    #[test]
    fn suppress_held_skips_repeat_locks() {
        let config = GateConfig::default().with_relock(RelockPolicy::SuppressHeld);
        let mut gate = Gate::with_config(Recorder::default(), config);

        assert_eq!(gate.lock("a"), Some(1));
        assert_eq!(gate.lock("a"), None);
        assert_eq!(gate.release("a"), Some(2));
        assert_eq!(gate.callback().calls, vec![false, true]);
    }

    #[test]
    fn try_request_rejects_redundant_lock_without_side_effects() {
        let mut gate = Gate::new(Recorder::default());
        gate.lock("a");

        let err = gate.try_request(false, "a").unwrap_err();
        assert_eq!(err.kind, ErrorKind::RedundantLock);
        assert_eq!(
            err.payload,
            Payload::Source {
                source: SourceId::from("a"),
                holders: 1
            }
        );
        assert_eq!(gate.callback().calls, vec![false]);
    }

    #[test]
    fn try_request_rejects_release_of_unheld_source() {
        let mut gate = Gate::new(Recorder::default());

        let err = gate.try_request(true, 9u64).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotHeld);
        assert!(gate.callback().calls.is_empty());

        assert_eq!(gate.try_request(false, 9u64).unwrap(), Some(1));
        assert_eq!(gate.try_request(true, 9u64).unwrap(), Some(2));
    }

    #[test]
    fn state_tracks_lock_set() {
        let mut gate = Gate::new(|_active: bool| ());
        assert_eq!(gate.state(), GateState::Active);

        gate.lock(1u32);
        assert_eq!(gate.state(), GateState::Inactive);

        gate.release(1u32);
        assert_eq!(gate.state(), GateState::Active);
    }

    #[test]
    fn debug_does_not_require_debug_callback() {
        let gate = Gate::new(|_active: bool| ());
        assert!(format!("{gate:?}").starts_with("Gate {"));
    }
}
