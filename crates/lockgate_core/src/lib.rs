//! lockgate_core: multi-source lock gate over a two-state toggle.
//!
//! A gate keeps a boolean condition inactive for as long as any source holds a
//! lock on it, and hands control back (`transition(true)`) only once every
//! source that locked it has released.
//!
//! Design goals:
//! - Pure, testable bookkeeping (no event system, no game model).
//! - Explicit types; no macro wizardry.
//! - Small, stable public API surface.

pub mod error;

/// Gate configuration (default source, relock policy, diagnostics).
pub mod config;

/// Routing of `CoreError`s onto `tracing`.
pub mod logging;

/// Lock bookkeeping, decision engine and the `Gate` wrapper itself.
pub mod gate;

pub use config::{GateConfig, RelockPolicy};
pub use error::{CoreError, Result};
pub use gate::{ActivationFlag, Gate, GateState, SharedGate, SourceId, TransitionCallback};
