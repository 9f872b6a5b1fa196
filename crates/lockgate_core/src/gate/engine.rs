use crate::config::RelockPolicy;

use super::{LockSet, SourceId};

/// Verdict for a single request against a lock set.
///
/// Mirrors the gate contract:
/// - any lock request delivers `transition(false)` (unless suppressed by policy)
/// - a release delivers `transition(true)` only when it empties the set
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Decision {
    /// Lock recorded; `transition(false)` fires.
    Lock {
        /// The source did not hold a lock before this request.
        newly_held: bool,
        /// The set was empty before this request (gate flips to inactive).
        first_lock: bool,
    },
    /// Source already held a lock and policy suppresses the callback.
    Relock,
    /// Last holder released; `transition(true)` fires.
    Release,
    /// Holder released but other sources still hold locks.
    StillLocked { remaining: usize },
    /// Release from a source that held nothing.
    NotHeld,
}

impl Decision {
    /// Value delivered to the transition callback, or `None` when suppressed.
    pub const fn fires(self) -> Option<bool> {
        match self {
            Decision::Lock { .. } => Some(false),
            Decision::Release => Some(true),
            Decision::Relock | Decision::StillLocked { .. } | Decision::NotHeld => None,
        }
    }

    /// True when the request was redundant for its source.
    pub const fn is_redundant(self) -> bool {
        matches!(
            self,
            Decision::Relock
                | Decision::NotHeld
                | Decision::Lock {
                    newly_held: false,
                    ..
                }
        )
    }

    pub const fn label(self) -> &'static str {
        match self {
            Decision::Lock { .. } => "lock",
            Decision::Relock => "relock",
            Decision::Release => "release",
            Decision::StillLocked { .. } => "still_locked",
            Decision::NotHeld => "not_held",
        }
    }
}

/// Work out what `request(active, source)` would do, without touching `locks`.
pub fn decide(locks: &LockSet, active: bool, source: &SourceId, policy: RelockPolicy) -> Decision {
    let held = locks.contains(source);

    if !active {
        return match (held, policy) {
            (true, RelockPolicy::SuppressHeld) => Decision::Relock,
            _ => Decision::Lock {
                newly_held: !held,
                first_lock: locks.is_empty(),
            },
        };
    }

    if !held {
        // Nothing to remove; an empty set was already delivered `true`.
        return Decision::NotHeld;
    }

    match locks.len() - 1 {
        0 => Decision::Release,
        remaining => Decision::StillLocked { remaining },
    }
}

/// Decide and apply the bookkeeping for one request.
pub fn apply(
    locks: &mut LockSet,
    active: bool,
    source: SourceId,
    policy: RelockPolicy,
) -> Decision {
    let decision = decide(locks, active, &source, policy);

    match decision {
        Decision::Lock { .. } => {
            locks.insert(source);
        }
        Decision::Release | Decision::StillLocked { .. } => {
            locks.remove(&source);
        }
        Decision::Relock | Decision::NotHeld => {}
    }

    decision
}
