//! External collaborator interface.
//!
//! Everything the gateway consumes from the planner, stepper, limits,
//! probe pin, spindle, coolant, and protocol layers is gathered into one
//! trait rather than a pile of narrow per-peripheral traits — the gateway
//! talks to "the machine", not to eight separately-wired objects.
//!
//! Production code implements this trait once, over the real planner ring
//! buffer and stepper ISR state; tests and the demo binary implement it
//! over an in-memory simulation (see [`crate::testutil`]).

use mc_common::position::Position;
use mc_common::condition::PlanLine;

/// Outcome of a planner submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    /// Segment accepted into the ring buffer.
    Accepted,
    /// Segment had zero length in every axis and was discarded.
    EmptyBlock,
}

pub trait Collaborators<const N: usize> {
    // ── Planner buffer ──
    fn planner_is_full(&self) -> bool;
    fn planner_is_empty(&self) -> bool;
    fn planner_submit(&mut self, target: Position<N>, plan_line: PlanLine) -> SubmitStatus;
    fn planner_reset(&mut self);
    fn planner_sync_position(&mut self, machine_position: Position<N>);

    // ── Stepper / Step-segment executor ──
    fn stepper_wake_up(&mut self);
    fn stepper_go_idle(&mut self);
    fn stepper_reset(&mut self);
    fn stepper_prep_buffer(&mut self);
    fn stepper_parking_setup_buffer(&mut self);
    fn stepper_parking_restore_buffer(&mut self);
    fn stepper_set_probing_active(&mut self, active: bool);

    // ── Limits ──
    /// Validate `target` against soft-limit bounds. Pure: does not raise
    /// alarms or abort itself — the caller does that on `false`.
    fn limits_soft_check(&mut self, target: &Position<N>) -> bool;
    /// Seek, back off, and slow re-seek for the given axis mask. Returns
    /// the resulting homed position.
    fn limits_go_home(&mut self, cycle_mask: u8) -> Position<N>;
    /// Mask hard-limit faults for the duration of the homing sequence.
    fn limits_disable(&mut self);
    /// Re-arm hard-limit faults once homing completes or aborts.
    fn limits_enable(&mut self);
    /// Bitmask (bit per axis) of currently asserted limit switches.
    fn limits_get_state(&self) -> u8;

    // ── Probe pin ──
    fn probe_configure_invert_mask(&mut self, is_away: bool);
    /// True if the probe pin currently reads asserted.
    fn probe_get_state(&self) -> bool;
    /// Position at which the probe pin tripped during the most recently
    /// executed motion, or `None` if it never triggered.
    fn probe_trigger_position(&self) -> Option<Position<N>>;

    // ── Spindle / coolant ──
    fn spindle_sync(&mut self, clockwise: bool, rpm: f32);
    fn spindle_stop(&mut self);
    fn coolant_stop(&mut self);

    // ── Protocol ──
    /// Request that buffered work begin executing (used by the
    /// back-pressure loop to help drain a full planner).
    fn auto_cycle_start(&mut self);

    // ── Reporter ──
    fn report_probe_parameters(&mut self, probe_position: &Position<N>);
}
