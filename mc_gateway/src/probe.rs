//! Probe cycle.

use mc_common::condition::PlanLine;
use mc_common::config::GatewaySettings;
use mc_common::error::AlarmCode;
use mc_common::position::Position;
use mc_common::state::{MachineState, ProbeState};

use crate::collaborators::Collaborators;
use crate::executor::wait_for_planner_drain;
use crate::line::{mc_line, LineError};
use crate::system::GatewaySystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    /// Dry run — no probing motion was attempted.
    CheckMode,
    /// Reset observed mid-cycle.
    Aborted,
    /// The probe pin was already asserted before motion began.
    FailInitial,
    /// Motion completed without the probe triggering.
    FailNoContact,
    /// The probe triggered during motion; `probe_position` now holds the
    /// contact point.
    Found,
}

/// Run one probing move toward `target`.
///
/// `is_probe_away` selects the invert-mask direction (probing away from
/// the work versus toward it); `is_no_error` suppresses the
/// `ProbeFailContact` alarm when the probe never triggers (G38.3/G38.5).
pub fn mc_probe_cycle<const N: usize>(
    system: &mut GatewaySystem<N>,
    collab: &mut dyn Collaborators<N>,
    settings: &GatewaySettings,
    target: Position<N>,
    plan_line: PlanLine,
    is_probe_away: bool,
    is_no_error: bool,
) -> ProbeResult {
    if system.sys.state == MachineState::Check {
        return ProbeResult::CheckMode;
    }

    collab.probe_configure_invert_mask(is_probe_away);

    if collab.probe_get_state() {
        system.raise_alarm(AlarmCode::ProbeFailInitial);
        system.rt.request_abort();
        return ProbeResult::FailInitial;
    }

    system.sys.probe_state = ProbeState::Active;
    collab.stepper_set_probing_active(true);

    let submit_result = mc_line(system, collab, settings, target, plan_line);
    let drain_result = match submit_result {
        Ok(()) => wait_for_planner_drain(system, collab).map_err(|_| LineError::Aborted),
        Err(e) => Err(e),
    };

    collab.stepper_set_probing_active(false);
    system.sys.probe_state = ProbeState::Off;

    // Discard whatever remains of the probe segment's planned motion —
    // the pin trigger (or the abort) already stopped the machine short of
    // the commanded target, and the stepper/planner must not resume it.
    collab.stepper_reset();
    collab.planner_reset();

    if drain_result.is_err() {
        // Either the motion itself aborted, or a soft-limit violation
        // already raised its own alarm inside mc_line.
        return ProbeResult::Aborted;
    }

    match collab.probe_trigger_position() {
        Some(contact) => {
            system.sys.probe_succeeded = true;
            system.sys.probe_position = *contact.as_array();
            collab.planner_sync_position(contact);
            system.machine_position = contact;
            if settings.message_probe_coordinates {
                collab.report_probe_parameters(&contact);
            }
            ProbeResult::Found
        }
        None => {
            system.sys.probe_succeeded = false;
            system.sys.probe_position = *system.machine_position.as_array();
            collab.planner_sync_position(system.machine_position);
            if !is_no_error {
                system.raise_alarm(AlarmCode::ProbeFailContact);
                system.rt.request_abort();
            }
            ProbeResult::FailNoContact
        }
    }
}
