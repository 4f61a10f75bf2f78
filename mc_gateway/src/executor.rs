//! Realtime executor hook.
//!
//! `poll` is the single non-blocking drain point every busy-wait in this
//! crate must call. It applies feed-hold/cycle-start bookkeeping to
//! [`GatewaySystem`] and leaves [`RtExec::is_aborted`] for the caller to
//! re-check immediately afterwards — `poll` never itself decides to abort
//! a caller's loop, it only surfaces what happened.

use mc_common::state::StepControl;

use crate::collaborators::Collaborators;
use crate::system::GatewaySystem;

/// Sentinel returned by every busy-wait helper when a reset was observed
/// mid-wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aborted;

/// Drain pending runtime-exec bits and apply their effect on `system`.
/// Non-blocking; safe to call every iteration of any busy-wait.
pub fn poll<const N: usize>(system: &mut GatewaySystem<N>) {
    let events = system.rt.drain();
    if events.feed_hold {
        system.sys.step_control.insert(StepControl::EXECUTE_HOLD);
    }
    if events.cycle_start {
        system.sys.step_control.remove(StepControl::EXECUTE_HOLD);
    }
    if events.status_report {
        tracing::debug!("status report requested");
    }
    if events.safety_door {
        tracing::warn!("safety door asserted");
    }
    if events.reset {
        tracing::debug!("reset observed by executor poll");
    }
}

/// Block the caller until the planner ring buffer is empty, calling
/// [`poll`] on every iteration.
pub fn wait_for_planner_drain<const N: usize>(
    system: &mut GatewaySystem<N>,
    collab: &mut dyn Collaborators<N>,
) -> Result<(), Aborted> {
    while !collab.planner_is_empty() {
        poll(system);
        if system.rt.is_aborted() {
            return Err(Aborted);
        }
    }
    Ok(())
}

/// Block the caller while the planner ring buffer is full, nudging
/// auto-cycle-start so queued work can drain. Shared by line submission's
/// back-pressure wait and parking's buffer redirection.
pub fn wait_while_planner_full<const N: usize>(
    system: &mut GatewaySystem<N>,
    collab: &mut dyn Collaborators<N>,
) -> Result<(), Aborted> {
    while collab.planner_is_full() {
        poll(system);
        if system.rt.is_aborted() {
            return Err(Aborted);
        }
        collab.auto_cycle_start();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockWorld;
    use std::sync::Arc;

    #[test]
    fn poll_applies_feed_hold_then_cycle_start() {
        let mut system: GatewaySystem<3> = GatewaySystem::new(Arc::new(mc_common::rt_exec::RtExec::new()));
        system.rt.raise(mc_common::rt_exec::RtExecState::FEED_HOLD);
        poll(&mut system);
        assert!(system.sys.step_control.contains(StepControl::EXECUTE_HOLD));

        system.rt.raise(mc_common::rt_exec::RtExecState::CYCLE_START);
        poll(&mut system);
        assert!(!system.sys.step_control.contains(StepControl::EXECUTE_HOLD));
    }

    #[test]
    fn wait_for_planner_drain_returns_aborted_on_reset() {
        let rt = Arc::new(mc_common::rt_exec::RtExec::new());
        let mut system: GatewaySystem<3> = GatewaySystem::new(rt.clone());
        let mut world = MockWorld::<3>::new();
        world.planner_never_empties = true;
        rt.request_abort();
        let result = wait_for_planner_drain(&mut system, &mut world);
        assert_eq!(result, Err(Aborted));
    }
}
