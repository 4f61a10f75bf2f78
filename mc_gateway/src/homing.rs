//! Homing cycle.
//!
//! A precondition check, a masked seek/back-off/re-seek sequence
//! delegated entirely to the limits collaborator, and a
//! clean-completion position sync — collapsed to a single function since
//! the limits collaborator already owns the seek/back-off state machine
//! itself.

use mc_common::config::GatewaySettings;
use mc_common::error::AlarmCode;
use mc_common::state::MachineState;

use crate::collaborators::Collaborators;
use crate::system::GatewaySystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomingError {
    /// A limit switch was already asserted before the cycle began, on a
    /// build configured with switches at both ends of travel.
    PreTriggeredLimit,
    /// Reset observed mid-cycle.
    Aborted,
}

/// Run the homing cycle: single-axis mode if `single_axis_cycle_mask` is
/// non-zero, otherwise the default up-to-three sequential cycles.
pub fn mc_homing_cycle<const N: usize>(
    system: &mut GatewaySystem<N>,
    collab: &mut dyn Collaborators<N>,
    settings: &GatewaySettings,
) -> Result<(), HomingError> {
    let full_mask = if settings.homing.single_axis_cycle_mask != 0 {
        settings.homing.single_axis_cycle_mask
    } else {
        settings
            .homing
            .default_cycles
            .iter()
            .fold(0u8, |acc, mask| acc | mask)
    };

    if settings.homing.limits_two_switches_on_axes && collab.limits_get_state() & full_mask != 0 {
        system.raise_alarm(AlarmCode::HardLimit);
        system.rt.request_abort();
        return Err(HomingError::PreTriggeredLimit);
    }

    system.sys.state = MachineState::Homing;
    collab.limits_disable();

    if settings.homing.single_axis_cycle_mask != 0 {
        run_cycle(system, collab, settings.homing.single_axis_cycle_mask)?;
    } else {
        for &mask in settings.homing.default_cycles.iter() {
            if mask == 0 {
                continue;
            }
            run_cycle(system, collab, mask)?;
        }
    }

    collab.limits_enable();
    collab.planner_sync_position(system.machine_position);
    system.sys.state = MachineState::Idle;
    Ok(())
}

fn run_cycle<const N: usize>(
    system: &mut GatewaySystem<N>,
    collab: &mut dyn Collaborators<N>,
    mask: u8,
) -> Result<(), HomingError> {
    if system.rt.is_aborted() {
        collab.limits_enable();
        return Err(HomingError::Aborted);
    }
    let homed = collab.limits_go_home(mask);
    for axis in 0..N {
        if mask & (1 << axis) != 0 {
            system.machine_position[axis] = homed[axis];
        }
    }
    if system.rt.is_aborted() {
        collab.limits_enable();
        return Err(HomingError::Aborted);
    }
    Ok(())
}
