//! Reset.
//!
//! The ISR-safe half of a reset is [`mc_common::rt_exec::RtExec::request_abort`]
//! — callable from interrupt/signal context, just sets atomics. This
//! module is the foreground half: the cleanup the gateway runs once it
//! observes the abort. Idempotent — calling it twice, or calling it with
//! nothing in flight, must never panic or double-stop hardware that is
//! already stopped.

use mc_common::error::AlarmCode;
use mc_common::state::{MachineState, StepControl};

use crate::collaborators::Collaborators;
use crate::system::GatewaySystem;

/// Run the foreground reset sequence.
///
/// No-op once `system.reset_settled` is already true for the currently
/// latched abort — otherwise a second call (nothing having changed in
/// between) would recommand `spindle_stop`/`coolant_stop` on hardware the
/// first call already stopped.
pub fn mc_reset<const N: usize>(system: &mut GatewaySystem<N>, collab: &mut dyn Collaborators<N>) {
    if system.rt.is_aborted() && system.reset_settled {
        return;
    }

    collab.spindle_stop();
    collab.coolant_stop();
    collab.stepper_set_probing_active(false);
    system.sys.probe_state = mc_common::state::ProbeState::Off;

    if system.sys.is_mid_motion() {
        collab.stepper_reset();
        collab.planner_reset();

        if system.alarm.is_none() {
            if system.sys.state == MachineState::Homing {
                system.raise_alarm(AlarmCode::HomingFailReset);
            } else {
                system.raise_alarm(AlarmCode::AbortCycle);
            }
        }
    }

    system.sys.step_control = StepControl::empty();
    system.rt.request_abort();
    system.reset_settled = true;
}
