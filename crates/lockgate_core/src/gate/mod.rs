//! lockgate_core::gate
//!
//! Multi-source locking over a single two-state toggle.
//!
//! Key ideas:
//! - A `LockSet` records which sources currently hold a lock
//! - `engine::decide()` turns (lock set, request, policy) into a `Decision`
//! - `Gate` applies the decision and fires the wrapped `TransitionCallback`
//! - `SharedGate` makes the whole request a critical section for threaded callers

mod callback;
pub mod engine;
mod flag;
mod lock_set;
mod shared;
mod source;
mod state;
mod wrapper;

pub use callback::TransitionCallback;
pub use engine::Decision;
pub use flag::ActivationFlag;
pub use lock_set::LockSet;
pub use shared::SharedGate;
pub use source::SourceId;
pub use state::GateState;
pub use wrapper::Gate;
