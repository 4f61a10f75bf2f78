//! The gateway's owned state record — one struct passed explicitly.
//!
//! `GatewaySystem` bundles the ISR/foreground boundary ([`RtExec`]), the
//! latched machine-state record ([`SystemState`]), and the tracked machine
//! position. Every operation takes `&mut GatewaySystem` rather than
//! reaching for ambient globals.

use std::sync::Arc;

use mc_common::error::AlarmCode;
use mc_common::position::Position;
use mc_common::rt_exec::RtExec;
use mc_common::state::SystemState;

/// Owns the machine's process-wide state plus the ISR-settable runtime-exec
/// flags.
///
/// `rt` is `Arc`-wrapped so a demo binary (or, on real hardware, the
/// interrupt vector) can hold its own clone and set bits without sharing a
/// `&mut` reference with the foreground loop.
pub struct GatewaySystem<const N: usize> {
    pub rt: Arc<RtExec>,
    pub sys: SystemState<N>,
    pub machine_position: Position<N>,
    /// Latched alarm code, if any is currently pending — alarms require
    /// acknowledgement; this is what reset consults to decide between
    /// `HomingFailReset` and `AbortCycle`.
    pub alarm: Option<AlarmCode>,
    /// Set once `mc_reset`'s foreground cleanup has fully run for the
    /// currently-latched abort. `RtExec::is_aborted` is sticky and only
    /// clears on a full re-initialisation this crate never performs, so a
    /// second reset observed against the same latched abort is a pure
    /// repeat of the first — this flag is what lets `mc_reset` recognise
    /// that and skip recommanding hardware that is already stopped.
    pub reset_settled: bool,
}

impl<const N: usize> GatewaySystem<N> {
    pub fn new(rt: Arc<RtExec>) -> Self {
        Self {
            rt,
            sys: SystemState::default(),
            machine_position: Position::ZERO,
            alarm: None,
            reset_settled: false,
        }
    }

    /// Raise an alarm: latch the code, transition to `Alarm`, and log at
    /// error level. Idempotent with respect to the latched code — the
    /// first alarm raised wins until acknowledged.
    pub fn raise_alarm(&mut self, code: AlarmCode) {
        if self.alarm.is_none() {
            self.alarm = Some(code);
        }
        self.sys.state = mc_common::state::MachineState::Alarm;
        tracing::error!(?code, "alarm raised");
    }

    /// Acknowledge and clear the latched alarm, returning to `Idle`. An
    /// alarm persists until the operator clears it.
    pub fn acknowledge_alarm(&mut self) {
        self.alarm = None;
        self.sys.state = mc_common::state::MachineState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_alarm_latches_first_code_only() {
        let mut system: GatewaySystem<3> = GatewaySystem::new(Arc::new(RtExec::new()));
        system.raise_alarm(AlarmCode::HardLimit);
        system.raise_alarm(AlarmCode::AbortCycle);
        assert_eq!(system.alarm, Some(AlarmCode::HardLimit));
    }

    #[test]
    fn acknowledge_alarm_returns_to_idle() {
        let mut system: GatewaySystem<3> = GatewaySystem::new(Arc::new(RtExec::new()));
        system.raise_alarm(AlarmCode::ProbeFailContact);
        system.acknowledge_alarm();
        assert!(system.alarm.is_none());
        assert_eq!(system.sys.state, mc_common::state::MachineState::Idle);
    }
}
