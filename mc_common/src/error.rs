//! Alarm codes and gateway-level error types.
//!
//! Alarms are *latched state*, not `Result`/exception plumbing: raising
//! one transitions [`crate::state::MachineState`] to `Alarm` and requires
//! user acknowledgement. They are represented the same way the other
//! state enums here are — `#[repr(u8)]` with a `from_u8` round trip —
//! rather than as a `thiserror` enum.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Alarm codes the gateway may raise. No alarm outside this set is ever
/// raised by `mc_gateway`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AlarmCode {
    /// Soft-limit violation, or a pre-triggered limit switch at the start
    /// of homing.
    HardLimit = 0,
    /// Probe pin was already asserted before probing motion began.
    ProbeFailInitial = 1,
    /// Probe motion completed without a trigger and `is_no_error` was not
    /// set.
    ProbeFailContact = 2,
    /// Homing aborted mid-cycle by reset, with no other alarm pending.
    HomingFailReset = 3,
    /// Abort observed while the machine was mid-cycle.
    AbortCycle = 4,
}

impl AlarmCode {
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::HardLimit),
            1 => Some(Self::ProbeFailInitial),
            2 => Some(Self::ProbeFailContact),
            3 => Some(Self::HomingFailReset),
            4 => Some(Self::AbortCycle),
            _ => None,
        }
    }
}

/// Configuration loading/validation error.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("configuration file not found")]
    FileNotFound,

    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    #[error("configuration validation failed: {0}")]
    ValidationError(String),
}
