//! Parking motion and override control.

use mc_common::condition::PlanLine;
use mc_common::config::GatewaySettings;
use mc_common::position::Position;
use mc_common::state::{OverrideControl, StepControl};

use crate::collaborators::Collaborators;
use crate::line::{mc_line, LineError};
use crate::system::GatewaySystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aborted;

/// Redirect the stepper to a parking move during a feed hold.
///
/// A full planner buffer is not treated as an error: the hold is already
/// in effect, so skipping the parking move and logging it is preferable
/// to blocking indefinitely for buffer space that a held program will
/// never free up on its own.
pub fn mc_parking_motion<const N: usize>(
    system: &mut GatewaySystem<N>,
    collab: &mut dyn Collaborators<N>,
    settings: &GatewaySettings,
    park_target: Position<N>,
    plan_line: PlanLine,
) -> Result<(), Aborted> {
    if !settings.parking_enable {
        return Ok(());
    }

    if settings.enable_parking_override_control
        && system.sys.override_control == OverrideControl::Disabled
    {
        tracing::info!("parking motion skipped: operator override disabled parking");
        return Ok(());
    }

    if system.rt.is_aborted() {
        return Err(Aborted);
    }

    if collab.planner_is_full() {
        tracing::warn!("parking motion skipped: planner buffer full during feed hold");
        return Ok(());
    }

    system.sys.step_control.insert(StepControl::EXECUTE_SYS_MOTION);
    collab.stepper_parking_setup_buffer();

    let result = mc_line(system, collab, settings, park_target, plan_line);

    collab.stepper_parking_restore_buffer();
    system.sys.step_control.remove(StepControl::EXECUTE_SYS_MOTION);

    match result {
        Ok(()) => Ok(()),
        Err(LineError::Aborted | LineError::SoftLimit) => Err(Aborted),
    }
}

/// Update the operator-commanded parking override mode. A no-op unless
/// the build enables parking override control — otherwise the operator
/// has no lever to pull.
pub fn mc_override_ctrl_update<const N: usize>(
    system: &mut GatewaySystem<N>,
    settings: &GatewaySettings,
    mode: OverrideControl,
) {
    if !settings.enable_parking_override_control {
        return;
    }
    system.sys.override_control = mode;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockWorld;
    use mc_common::condition::PlanCondition;
    use mc_common::rt_exec::RtExec;
    use std::sync::Arc;

    fn system() -> GatewaySystem<3> {
        GatewaySystem::new(Arc::new(RtExec::new()))
    }

    #[test]
    fn disabled_setting_is_a_full_noop() {
        let mut sys = system();
        let mut world = MockWorld::<3>::new();
        let settings = GatewaySettings::default();
        let line = PlanLine::new(600.0, 0.0, PlanCondition::empty()).unwrap();

        let result = mc_parking_motion(&mut sys, &mut world, &settings, Position::ZERO, line);
        assert!(result.is_ok());
        assert_eq!(world.parking_setups, 0);
    }

    #[test]
    fn enabled_setting_redirects_the_stepper_buffer() {
        let mut sys = system();
        let mut world = MockWorld::<3>::new();
        let mut settings = GatewaySettings::default();
        settings.parking_enable = true;
        let line = PlanLine::new(600.0, 0.0, PlanCondition::empty()).unwrap();

        let result = mc_parking_motion(&mut sys, &mut world, &settings, Position::ZERO, line);
        assert!(result.is_ok());
        assert_eq!(world.parking_setups, 1);
        assert_eq!(world.parking_restores, 1);
        assert!(!sys.sys.step_control.contains(StepControl::EXECUTE_SYS_MOTION));
    }

    #[test]
    fn operator_disabled_override_skips_parking() {
        let mut sys = system();
        sys.sys.override_control = OverrideControl::Disabled;
        let mut world = MockWorld::<3>::new();
        let mut settings = GatewaySettings::default();
        settings.parking_enable = true;
        settings.enable_parking_override_control = true;
        let line = PlanLine::new(600.0, 0.0, PlanCondition::empty()).unwrap();

        let result = mc_parking_motion(&mut sys, &mut world, &settings, Position::ZERO, line);
        assert!(result.is_ok());
        assert_eq!(world.parking_setups, 0);
    }

    #[test]
    fn full_planner_skips_parking_without_error() {
        let mut sys = system();
        let mut world = MockWorld::<3>::new();
        world.planner_capacity = 1;
        world.planner_queued = 1;
        let mut settings = GatewaySettings::default();
        settings.parking_enable = true;
        let line = PlanLine::new(600.0, 0.0, PlanCondition::empty()).unwrap();

        let result = mc_parking_motion(&mut sys, &mut world, &settings, Position::ZERO, line);
        assert!(result.is_ok());
        assert_eq!(world.parking_setups, 0);
    }

    #[test]
    fn override_update_is_noop_when_feature_disabled() {
        let mut sys = system();
        let settings = GatewaySettings::default();
        mc_override_ctrl_update(&mut sys, &settings, OverrideControl::MotionForced);
        assert_eq!(sys.sys.override_control, OverrideControl::Normal);
    }

    #[test]
    fn override_update_applies_when_feature_enabled() {
        let mut sys = system();
        let mut settings = GatewaySettings::default();
        settings.enable_parking_override_control = true;
        mc_override_ctrl_update(&mut sys, &settings, OverrideControl::MotionForced);
        assert_eq!(sys.sys.override_control, OverrideControl::MotionForced);
    }
}
