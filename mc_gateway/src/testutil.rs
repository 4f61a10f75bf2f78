//! In-memory simulation of every [`Collaborators`] method.
//!
//! Not behind `#[cfg(test)]`: the crate's own integration tests under
//! `tests/` compile as a separate crate and need a public mock to drive
//! the gateway without real planner/stepper/limit hardware.

use std::vec::Vec;

use mc_common::condition::PlanLine;
use mc_common::position::Position;

use crate::collaborators::{Collaborators, SubmitStatus};

/// One recorded planner submission, for test assertions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Submission<const N: usize> {
    pub target: Position<N>,
    pub plan_line: PlanLine,
}

/// A fully in-memory stand-in for the planner, stepper, limits, probe,
/// spindle, coolant, and protocol layers.
pub struct MockWorld<const N: usize> {
    pub planner_capacity: usize,
    pub planner_queued: usize,
    /// When set, `planner_is_empty` always reports `false` regardless of
    /// `planner_queued` — used to simulate a stalled drain under test.
    pub planner_never_empties: bool,
    pub submissions: Vec<Submission<N>>,
    pub soft_limit_ok: bool,
    pub limit_switch_state: u8,
    pub limits_enabled: bool,
    pub home_result: Position<N>,
    pub probe_triggered: bool,
    pub probe_trigger_position: Option<Position<N>>,
    pub probe_invert_mask_was_away: Option<bool>,
    pub spindle_sync_calls: Vec<(bool, f32)>,
    pub spindle_stopped: bool,
    pub coolant_stopped: bool,
    pub spindle_stop_calls: u32,
    pub coolant_stop_calls: u32,
    pub auto_cycle_start_calls: u32,
    pub stepper_wake_ups: u32,
    pub stepper_idles: u32,
    pub stepper_resets: u32,
    pub parking_setups: u32,
    pub parking_restores: u32,
    pub probing_active: bool,
    pub reported_probe_positions: Vec<Position<N>>,
}

impl<const N: usize> MockWorld<N> {
    pub fn new() -> Self {
        Self {
            planner_capacity: 16,
            planner_queued: 0,
            planner_never_empties: false,
            submissions: Vec::new(),
            soft_limit_ok: true,
            limit_switch_state: 0,
            limits_enabled: true,
            home_result: Position::ZERO,
            probe_triggered: false,
            probe_trigger_position: None,
            probe_invert_mask_was_away: None,
            spindle_sync_calls: Vec::new(),
            spindle_stopped: false,
            coolant_stopped: false,
            spindle_stop_calls: 0,
            coolant_stop_calls: 0,
            auto_cycle_start_calls: 0,
            stepper_wake_ups: 0,
            stepper_idles: 0,
            stepper_resets: 0,
            parking_setups: 0,
            parking_restores: 0,
            probing_active: false,
            reported_probe_positions: Vec::new(),
        }
    }
}

impl<const N: usize> Default for MockWorld<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Collaborators<N> for MockWorld<N> {
    fn planner_is_full(&self) -> bool {
        self.planner_queued >= self.planner_capacity
    }

    fn planner_is_empty(&self) -> bool {
        if self.planner_never_empties {
            return false;
        }
        self.planner_queued == 0
    }

    /// Submissions are treated as instantly drained — there is no
    /// concurrent stepper execution to model here. `planner_queued` is a
    /// separate knob tests set directly to simulate a busy or full ring
    /// buffer for the back-pressure and synchronize paths.
    fn planner_submit(&mut self, target: Position<N>, plan_line: PlanLine) -> SubmitStatus {
        self.submissions.push(Submission { target, plan_line });
        SubmitStatus::Accepted
    }

    fn planner_reset(&mut self) {
        self.planner_queued = 0;
        self.submissions.clear();
    }

    fn planner_sync_position(&mut self, _machine_position: Position<N>) {}

    fn stepper_wake_up(&mut self) {
        self.stepper_wake_ups += 1;
    }

    fn stepper_go_idle(&mut self) {
        self.stepper_idles += 1;
    }

    fn stepper_reset(&mut self) {
        self.stepper_resets += 1;
    }

    fn stepper_prep_buffer(&mut self) {}

    fn stepper_parking_setup_buffer(&mut self) {
        self.parking_setups += 1;
    }

    fn stepper_parking_restore_buffer(&mut self) {
        self.parking_restores += 1;
    }

    fn stepper_set_probing_active(&mut self, active: bool) {
        self.probing_active = active;
    }

    fn limits_soft_check(&mut self, _target: &Position<N>) -> bool {
        self.soft_limit_ok
    }

    fn limits_go_home(&mut self, _cycle_mask: u8) -> Position<N> {
        self.home_result
    }

    fn limits_disable(&mut self) {
        self.limits_enabled = false;
    }

    fn limits_enable(&mut self) {
        self.limits_enabled = true;
    }

    fn limits_get_state(&self) -> u8 {
        self.limit_switch_state
    }

    fn probe_configure_invert_mask(&mut self, is_away: bool) {
        self.probe_invert_mask_was_away = Some(is_away);
    }

    fn probe_get_state(&self) -> bool {
        self.probe_triggered
    }

    fn probe_trigger_position(&self) -> Option<Position<N>> {
        self.probe_trigger_position
    }

    fn spindle_sync(&mut self, clockwise: bool, rpm: f32) {
        self.spindle_sync_calls.push((clockwise, rpm));
    }

    fn spindle_stop(&mut self) {
        self.spindle_stopped = true;
        self.spindle_stop_calls += 1;
    }

    fn coolant_stop(&mut self) {
        self.coolant_stopped = true;
        self.coolant_stop_calls += 1;
    }

    fn auto_cycle_start(&mut self) {
        self.auto_cycle_start_calls += 1;
        // Simulate the executor draining one queued segment per nudge so
        // back-pressure tests make progress instead of looping forever.
        if self.planner_queued > 0 {
            self.planner_queued -= 1;
        }
    }

    fn report_probe_parameters(&mut self, probe_position: &Position<N>) {
        self.reported_probe_positions.push(*probe_position);
    }
}
