//! System-wide machine state.
//!
//! `#[repr(u8)]` enums with a `from_u8` round-trip constructor and a
//! `Default` impl, plus a single aggregate record rather than scattered
//! globals.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Exactly one of these is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MachineState {
    Idle = 0,
    Cycle = 1,
    Hold = 2,
    Homing = 3,
    Jog = 4,
    Check = 5,
    Alarm = 6,
    Sleep = 7,
    SafetyDoor = 8,
}

impl MachineState {
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Idle),
            1 => Some(Self::Cycle),
            2 => Some(Self::Hold),
            3 => Some(Self::Homing),
            4 => Some(Self::Jog),
            5 => Some(Self::Check),
            6 => Some(Self::Alarm),
            7 => Some(Self::Sleep),
            8 => Some(Self::SafetyDoor),
            _ => None,
        }
    }

    /// True for the states that indicate active motion.
    #[inline]
    pub const fn is_in_motion(&self) -> bool {
        matches!(self, Self::Cycle | Self::Homing | Self::Jog)
    }
}

impl Default for MachineState {
    fn default() -> Self {
        Self::Idle
    }
}

bitflags! {
    /// Control bits steering the step-segment executor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StepControl: u8 {
        /// A feed hold is in effect — executor should decelerate to a stop.
        const EXECUTE_HOLD       = 0x01;
        /// A system motion (parking, probing remainder) owns the executor.
        const EXECUTE_SYS_MOTION = 0x02;
        /// Motion has ended; executor should go idle on its next poll.
        const END_MOTION         = 0x04;
    }
}

/// Parking-override mode, gated by `enable_parking_override_control`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OverrideControl {
    /// Parking motion executes normally on feed hold.
    Normal = 0,
    /// Operator disabled parking for this hold.
    Disabled = 1,
    /// Operator commanded an immediate, un-parked stop.
    MotionForced = 2,
}

impl OverrideControl {
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Normal),
            1 => Some(Self::Disabled),
            2 => Some(Self::MotionForced),
            _ => None,
        }
    }
}

impl Default for OverrideControl {
    fn default() -> Self {
        Self::Normal
    }
}

/// Probe monitor state — mirrors the stepper module's probing-ISR-armed
/// flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ProbeState {
    /// Probe monitor disarmed.
    Off = 0,
    /// Probe monitor armed, awaiting pin trigger.
    Active = 1,
}

impl Default for ProbeState {
    fn default() -> Self {
        Self::Off
    }
}

/// Process-wide system state record.
///
/// The gateway owns exactly one instance, passed explicitly rather than
/// scattered as independent globals.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemState<const N: usize> {
    pub state: MachineState,
    pub step_control: StepControl,
    pub probe_succeeded: bool,
    pub probe_position: [f32; N],
    pub override_control: OverrideControl,
    pub probe_state: ProbeState,
}

impl<const N: usize> SystemState<N> {
    /// True if `state` indicates active motion or an ongoing hold/sys-motion
    /// sequence — the criterion for forcing steppers idle on reset.
    #[inline]
    pub fn is_mid_motion(&self) -> bool {
        self.state.is_in_motion()
            || self
                .step_control
                .intersects(StepControl::EXECUTE_HOLD | StepControl::EXECUTE_SYS_MOTION)
    }
}
