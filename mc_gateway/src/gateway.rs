//! Top-level wiring: the surface a G-code parser actually calls.

use mc_common::condition::PlanLine;
use mc_common::config::GatewaySettings;
use mc_common::position::{PlaneVec, Position};
use mc_common::rt_exec::RtExec;
use mc_common::state::OverrideControl;

use std::sync::Arc;

use crate::arc::{mc_arc, ArcParams};
use crate::collaborators::Collaborators;
use crate::dwell::mc_dwell;
use crate::executor::{self, Aborted};
use crate::homing::{mc_homing_cycle, HomingError};
use crate::line::{mc_line, LineError};
use crate::parking::{mc_override_ctrl_update, mc_parking_motion};
use crate::probe::{mc_probe_cycle, ProbeResult};
use crate::reset::mc_reset;
use crate::system::GatewaySystem;

/// The motion-command gateway: owns [`GatewaySystem`] and the resolved
/// configuration, and exposes exactly the operations a G-code parser
/// needs to drive motion.
pub struct MotionGateway<const N: usize> {
    pub settings: GatewaySettings,
    pub system: GatewaySystem<N>,
}

impl<const N: usize> MotionGateway<N> {
    pub fn new(settings: GatewaySettings) -> Self {
        Self {
            system: GatewaySystem::new(Arc::new(RtExec::new())),
            settings,
        }
    }

    /// Share this gateway's runtime-exec flags with an external
    /// interrupt/signal-handler context.
    pub fn rt_handle(&self) -> Arc<RtExec> {
        self.system.rt.clone()
    }

    pub fn line(
        &mut self,
        collab: &mut dyn Collaborators<N>,
        target: Position<N>,
        plan_line: PlanLine,
    ) -> Result<(), LineError> {
        mc_line(&mut self.system, collab, &self.settings, target, plan_line)
    }

    pub fn arc(
        &mut self,
        collab: &mut dyn Collaborators<N>,
        target: Position<N>,
        plan_line: PlanLine,
        offset: PlaneVec,
        axis0: usize,
        axis1: usize,
        axis_linear: usize,
        clockwise: bool,
    ) -> Result<(), LineError> {
        mc_arc(
            &mut self.system,
            collab,
            &self.settings,
            target,
            plan_line,
            ArcParams {
                offset,
                axis0,
                axis1,
                axis_linear,
                clockwise,
            },
        )
    }

    pub fn dwell(&mut self, collab: &mut dyn Collaborators<N>, seconds: f32) -> Result<(), Aborted> {
        mc_dwell(&mut self.system, collab, seconds)
    }

    pub fn homing_cycle(&mut self, collab: &mut dyn Collaborators<N>) -> Result<(), HomingError> {
        mc_homing_cycle(&mut self.system, collab, &self.settings)
    }

    pub fn probe_cycle(
        &mut self,
        collab: &mut dyn Collaborators<N>,
        target: Position<N>,
        plan_line: PlanLine,
        is_probe_away: bool,
        is_no_error: bool,
    ) -> ProbeResult {
        mc_probe_cycle(
            &mut self.system,
            collab,
            &self.settings,
            target,
            plan_line,
            is_probe_away,
            is_no_error,
        )
    }

    pub fn parking_motion(
        &mut self,
        collab: &mut dyn Collaborators<N>,
        park_target: Position<N>,
        plan_line: PlanLine,
    ) -> Result<(), crate::parking::Aborted> {
        mc_parking_motion(&mut self.system, collab, &self.settings, park_target, plan_line)
    }

    pub fn override_ctrl_update(&mut self, mode: OverrideControl) {
        mc_override_ctrl_update(&mut self.system, &self.settings, mode);
    }

    /// Run the foreground reset sequence. Callers typically invoke this
    /// once [`MotionGateway::rt_handle`]'s `is_aborted()` reports `true`.
    pub fn reset(&mut self, collab: &mut dyn Collaborators<N>) {
        mc_reset(&mut self.system, collab);
    }

    /// Non-blocking realtime-executor poll. Call this from the foreground
    /// idle loop between parser operations.
    pub fn poll(&mut self) {
        executor::poll(&mut self.system);
    }
}
