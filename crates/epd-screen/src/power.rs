//! Panel power policy
//!
//! E-paper holds its image unpowered, so the panel rail can be cut
//! between refreshes. The engine tracks a small suspend/resume state
//! machine and, in automatic mode, drops power as soon as a flush
//! completes.

/// When the engine suspends the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerMode {
    /// The caller suspends and resumes explicitly.
    #[default]
    Manual,
    /// Suspend automatically after every flush.
    Auto,
}

/// Which resources a suspend releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerScope {
    /// Suspend is a no-op; the panel stays driven.
    #[default]
    None,
    /// Release the control lines and the switchable rail.
    GpioOnly,
}

/// Suspend/resume state of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PowerState {
    /// Control lines driven, rail on.
    Active,
    /// Control lines released, rail off.
    Suspended,
}

/// The active power policy plus the state machine position.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PowerSettings {
    pub mode: PowerMode,
    pub scope: PowerScope,
    pub state: PowerState,
}

impl Default for PowerSettings {
    fn default() -> Self {
        Self {
            mode: PowerMode::Manual,
            scope: PowerScope::None,
            state: PowerState::Active,
        }
    }
}
