use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared on/off flag for gated resources.
///
/// Intended use:
/// - hand `flag.transition()` to a `Gate`; the gate drives the flag
/// - consumers poll `is_active()` to allow or block work
#[derive(Debug)]
pub struct ActivationFlag {
    active: AtomicBool,
}

impl ActivationFlag {
    /// A flag that starts enabled (no locks held).
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(true),
        }
    }

    pub fn set(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }

    pub fn activate(&self) {
        self.set(true);
    }

    pub fn deactivate(&self) {
        self.set(false);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Transition callback that stores every delivered value in this flag.
    pub fn transition(self: &Arc<Self>) -> impl FnMut(bool) + Send + Sync + 'static {
        let flag = Arc::clone(self);
        move |active| flag.set(active)
    }
}

impl Default for ActivationFlag {
    fn default() -> Self {
        Self::new()
    }
}
