//! Dwell.

use std::time::{Duration, Instant};

use mc_common::consts::DWELL_POLL_INTERVAL_MS;
use mc_common::state::MachineState;

use crate::collaborators::Collaborators;
use crate::executor::{poll, wait_for_planner_drain, Aborted};
use crate::system::GatewaySystem;

/// Pause program execution for `seconds`, after draining everything
/// already queued. A no-op in check mode.
///
/// The wall-clock wait is a bounded deadline loop rather than a blocking
/// sleep: every iteration calls [`poll`] and re-checks `sys.abort`, so a
/// reset observed mid-dwell returns promptly instead of running out the
/// full duration.
pub fn mc_dwell<const N: usize>(
    system: &mut GatewaySystem<N>,
    collab: &mut dyn Collaborators<N>,
    seconds: f32,
) -> Result<(), Aborted> {
    if system.sys.state == MachineState::Check {
        return Ok(());
    }
    wait_for_planner_drain(system, collab)?;

    let deadline = Instant::now() + Duration::from_secs_f32(seconds.max(0.0));
    while Instant::now() < deadline {
        poll(system);
        if system.rt.is_aborted() {
            return Err(Aborted);
        }
        std::thread::sleep(Duration::from_millis(DWELL_POLL_INTERVAL_MS));
    }
    Ok(())
}
