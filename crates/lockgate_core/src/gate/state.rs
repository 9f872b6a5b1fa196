/// Aggregate state of a gate.
///
/// - Active: no source holds a lock; the gated condition is enabled
/// - Inactive: at least one source holds a lock
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum GateState {
    #[default]
    Active,
    Inactive,
}

/// Compact IDs used for telemetry.
impl GateState {
    pub const fn id(self) -> u8 {
        match self {
            GateState::Active => 0,
            GateState::Inactive => 1,
        }
    }

    pub const fn from_locked(locked: bool) -> Self {
        if locked {
            GateState::Inactive
        } else {
            GateState::Active
        }
    }

    pub const fn is_active(self) -> bool {
        matches!(self, GateState::Active)
    }

    /// Stable, human-readable label for logs.
    pub const fn label(self) -> &'static str {
        match self {
            GateState::Active => "active",
            GateState::Inactive => "inactive",
        }
    }
}
