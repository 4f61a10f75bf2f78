//! Plan-line condition bit-set and descriptor.

use bitflags::bitflags;

bitflags! {
    /// Condition bits carried alongside every plan-line descriptor.
    ///
    /// Invariant: if `INVERSE_TIME` is set, `feed_rate` is 1/minutes rather
    /// than mm/min. Exactly one of `SPINDLE_CW`/`SPINDLE_CCW` may be set —
    /// see [`PlanLine::validate`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PlanCondition: u16 {
        /// Rapid (G0) traversal.
        const RAPID             = 0x0001;
        /// System-generated motion (not directly commanded by the program).
        const SYSTEM_MOTION      = 0x0002;
        /// Feed override is disabled for this move.
        const NO_FEED_OVERRIDE   = 0x0004;
        /// `feed_rate` means 1/minutes rather than mm/min.
        const INVERSE_TIME       = 0x0008;
        /// Spindle on, clockwise (M3).
        const SPINDLE_CW         = 0x0010;
        /// Spindle on, counter-clockwise (M4).
        const SPINDLE_CCW        = 0x0020;
        /// Flood coolant on (M8).
        const COOLANT_FLOOD      = 0x0040;
        /// Mist coolant on (M7).
        const COOLANT_MIST       = 0x0080;
    }
}

/// Descriptor carried from parser to planner for each segment.
///
/// By-value and freely copyable; the arc decomposer mutates its own local
/// copy rather than the caller's.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanLine {
    /// mm/min, or 1/minutes when `INVERSE_TIME` is set.
    pub feed_rate: f32,
    /// Spindle speed, RPM.
    pub spindle_speed: f32,
    /// Condition bit-set.
    pub condition: PlanCondition,
}

impl PlanLine {
    /// Construct a descriptor, asserting the spindle-direction invariant.
    ///
    /// Returns `None` if both `SPINDLE_CW` and `SPINDLE_CCW` are set.
    pub fn new(feed_rate: f32, spindle_speed: f32, condition: PlanCondition) -> Option<Self> {
        let line = Self {
            feed_rate,
            spindle_speed,
            condition,
        };
        line.validate().then_some(line)
    }

    /// True iff at most one of `SPINDLE_CW`/`SPINDLE_CCW` is set.
    #[inline]
    pub const fn validate(&self) -> bool {
        !(self.condition.contains(PlanCondition::SPINDLE_CW)
            && self.condition.contains(PlanCondition::SPINDLE_CCW))
    }

    /// Multiply `feed_rate` by `segments` and clear `INVERSE_TIME`.
    ///
    /// Used by the arc decomposer: each emitted segment inherits a correct
    /// absolute feed rate for its share of the total
    /// inverse-time travel.
    pub fn absorb_inverse_time(&mut self, segments: u32) {
        if self.condition.contains(PlanCondition::INVERSE_TIME) {
            self.feed_rate *= segments as f32;
            self.condition.remove(PlanCondition::INVERSE_TIME);
        }
    }
}
