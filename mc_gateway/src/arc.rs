//! Arc decomposition into chord segments.
//!
//! Geometry is always planar: `axis0`/`axis1` span the arc plane and
//! `axis_linear` carries the helical component. Everything here is `f32`
//! — do not widen to `f64` without re-deriving
//! [`mc_common::consts::ARC_TOLERANCE_DEFAULT`].

use core::f32::consts::PI;

use mc_common::condition::PlanLine;
use mc_common::config::GatewaySettings;
use mc_common::position::{PlaneVec, Position};

use crate::collaborators::Collaborators;
use crate::line::{mc_line, LineError};
use crate::system::GatewaySystem;

/// Geometric parameters for one arc move, as handed down from the parser.
/// `offset` is relative to the current position; radius is derived from
/// it, not carried separately.
pub struct ArcParams {
    /// Vector from the current position to the arc centre, in the plane.
    pub offset: PlaneVec,
    pub axis0: usize,
    pub axis1: usize,
    pub axis_linear: usize,
    pub clockwise: bool,
}

/// Decompose one arc into chord segments and submit each through
/// [`mc_line`].
pub fn mc_arc<const N: usize>(
    system: &mut GatewaySystem<N>,
    collab: &mut dyn Collaborators<N>,
    settings: &GatewaySettings,
    target: Position<N>,
    mut plan_line: PlanLine,
    params: ArcParams,
) -> Result<(), LineError> {
    let start = system.machine_position;
    let centre0 = start[params.axis0] + params.offset.x;
    let centre1 = start[params.axis1] + params.offset.y;
    let radius = (params.offset.x * params.offset.x + params.offset.y * params.offset.y).sqrt();

    let r0 = PlaneVec::new(-params.offset.x, -params.offset.y);
    let rt = PlaneVec::new(
        target[params.axis0] - centre0,
        target[params.axis1] - centre1,
    );

    let mut angular_travel = r0.cross(&rt).atan2(r0.dot(&rt));

    let epsilon = settings.arc_angular_travel_epsilon;
    if params.clockwise && angular_travel >= -epsilon {
        angular_travel -= 2.0 * PI;
    } else if !params.clockwise && angular_travel <= epsilon {
        angular_travel += 2.0 * PI;
    }

    let segments = ((0.5 * angular_travel * radius).abs()
        / (settings.arc_tolerance * (2.0 * radius - settings.arc_tolerance)).sqrt())
    .floor() as u32;

    // A collapsed arc (segments == 0) degenerates to the final exact-target
    // submission below, with feed_rate left untouched: the move is already
    // one segment, so there is nothing to scale by.
    if segments > 0 {
        plan_line.absorb_inverse_time(segments);
    }

    if segments > 0 {
        let theta = angular_travel / segments as f32;
        let mut cos_t = 2.0 - theta * theta;
        let mut sin_t = theta * 0.16666667 * (cos_t + 4.0);
        cos_t *= 0.5;

        let linear_total = target[params.axis_linear] - start[params.axis_linear];
        let linear_per_segment = linear_total / segments as f32;

        let mut r = r0;
        let mut position = start;
        let mut correction_count: u16 = 0;

        for i in 1..segments {
            if correction_count < settings.n_arc_correction {
                let r_x = r.x * cos_t - r.y * sin_t;
                let r_y = r.x * sin_t + r.y * cos_t;
                r = PlaneVec::new(r_x, r_y);
                correction_count += 1;
            } else {
                let angle = i as f32 * theta;
                let (sin_exact, cos_exact) = angle.sin_cos();
                r = PlaneVec::new(
                    r0.x * cos_exact - r0.y * sin_exact,
                    r0.x * sin_exact + r0.y * cos_exact,
                );
                correction_count = 0;
            }

            position[params.axis0] = centre0 + r.x;
            position[params.axis1] = centre1 + r.y;
            position[params.axis_linear] += linear_per_segment;

            mc_line(system, collab, settings, position, plan_line)?;
            if system.rt.is_aborted() {
                return Err(LineError::Aborted);
            }
        }
    }

    mc_line(system, collab, settings, target, plan_line)
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

    /// A full 10mm-radius circle in the XY plane, starting at (10, 0, 0)
    /// and returning to the same point.
    #[test]
    fn full_circle_decomposes_into_expected_segment_count_plus_final() {
        let mut sys = system();
        sys.machine_position = Position::new([10.0, 0.0, 0.0]);
        let mut world = MockWorld::<3>::new();
        let settings = GatewaySettings::default();
        let target = Position::new([10.0, 0.0, 0.0]);
        let line = PlanLine::new(600.0, 0.0, PlanCondition::empty()).unwrap();
        let params = ArcParams {
            offset: PlaneVec::new(-10.0, 0.0),
            axis0: 0,
            axis1: 1,
            axis_linear: 2,
            clockwise: false,
        };

        let result = mc_arc(&mut sys, &mut world, &settings, target, line, params);
        assert!(result.is_ok());
        // One submission per computed segment (intermediate + final).
        assert!(world.submissions.len() > 100);
        let last = world.submissions.last().unwrap();
        assert!(last.target.approx_eq(&target, 1e-4));
    }

    #[test]
    fn every_submitted_endpoint_stays_within_arc_tolerance_of_true_circle() {
        let mut sys = system();
        sys.machine_position = Position::new([10.0, 0.0, 0.0]);
        let mut world = MockWorld::<3>::new();
        let settings = GatewaySettings::default();
        let target = Position::new([10.0, 0.0, 0.0]);
        let line = PlanLine::new(600.0, 0.0, PlanCondition::empty()).unwrap();
        let params = ArcParams {
            offset: PlaneVec::new(-10.0, 0.0),
            axis0: 0,
            axis1: 1,
            axis_linear: 2,
            clockwise: false,
        };
        mc_arc(&mut sys, &mut world, &settings, target, line, params).unwrap();

        let centre = (0.0f32, 0.0f32);
        for sub in world.submissions.iter() {
            let dx = sub.target[0] - centre.0;
            let dy = sub.target[1] - centre.1;
            let r = (dx * dx + dy * dy).sqrt();
            assert!((r - 10.0).abs() < 0.01, "radius drifted to {r}");
        }
    }

    #[test]
    fn abort_mid_arc_stops_further_submissions() {
        let mut sys = system();
        sys.machine_position = Position::new([10.0, 0.0, 0.0]);
        let mut world = MockWorld::<3>::new();
        let settings = GatewaySettings::default();
        let target = Position::new([10.0, 0.0, 0.0]);
        let line = PlanLine::new(600.0, 0.0, PlanCondition::empty()).unwrap();
        let params = ArcParams {
            offset: PlaneVec::new(-10.0, 0.0),
            axis0: 0,
            axis1: 1,
            axis_linear: 2,
            clockwise: false,
        };
        sys.rt.request_abort();

        let result = mc_arc(&mut sys, &mut world, &settings, target, line, params);
        assert_eq!(result, Err(LineError::Aborted));
    }

    #[test]
    fn clockwise_flag_flips_travel_direction() {
        let mut sys_ccw = system();
        sys_ccw.machine_position = Position::new([10.0, 0.0, 0.0]);
        let mut world_ccw = MockWorld::<3>::new();
        let settings = GatewaySettings::default();
        let target = Position::new([0.0, 10.0, 0.0]);
        let line = PlanLine::new(600.0, 0.0, PlanCondition::empty()).unwrap();
        mc_arc(
            &mut sys_ccw,
            &mut world_ccw,
            &settings,
            target,
            line,
            ArcParams {
                offset: PlaneVec::new(-10.0, 0.0),
                axis0: 0,
                axis1: 1,
                axis_linear: 2,
                clockwise: false,
            },
        )
        .unwrap();

        let mut sys_cw = system();
        sys_cw.machine_position = Position::new([10.0, 0.0, 0.0]);
        let mut world_cw = MockWorld::<3>::new();
        mc_arc(
            &mut sys_cw,
            &mut world_cw,
            &settings,
            target,
            line,
            ArcParams {
                offset: PlaneVec::new(-10.0, 0.0),
                axis0: 0,
                axis1: 1,
                axis_linear: 2,
                clockwise: true,
            },
        )
        .unwrap();

        // The short way (CW, 90deg) needs far fewer segments than the
        // long way around (CCW, 270deg) for the same tolerance.
        assert!(world_cw.submissions.len() < world_ccw.submissions.len());
    }
}
