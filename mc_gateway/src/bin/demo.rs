//! Demo harness: runs a toy program through [`MotionGateway`] against the
//! in-memory [`mc_gateway::testutil::MockWorld`], wiring SIGINT/SIGTERM to
//! the same abort path real hardware reaches through an interrupt vector.
//!
//! Not a production entry point — there is no real planner or stepper on
//! a development machine. This exists so the reset path can be exercised
//! interactively (`cargo run --bin demo`, then Ctrl-C).

use std::sync::OnceLock;
use std::time::Duration;

use nix::sys::signal::{self, SigHandler, Signal};

use mc_common::condition::{PlanCondition, PlanLine};
use mc_common::config::GatewaySettings;
use mc_common::position::Position;
use mc_common::rt_exec::RtExec;

use mc_gateway::gateway::MotionGateway;
use mc_gateway::testutil::MockWorld;

static RT: OnceLock<std::sync::Arc<RtExec>> = OnceLock::new();

extern "C" fn on_signal(_: i32) {
    if let Some(rt) = RT.get() {
        rt.request_abort();
    }
}

fn install_signal_handlers() {
    let handler = SigHandler::Handler(on_signal);
    // SAFETY: `on_signal` only touches an `Arc<RtExec>` already initialised
    // before handlers are installed, and calls nothing beyond atomic
    // stores — safe to run in a signal handler.
    unsafe {
        signal::signal(Signal::SIGINT, handler).expect("install SIGINT handler");
        signal::signal(Signal::SIGTERM, handler).expect("install SIGTERM handler");
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let mut gateway: MotionGateway<3> = MotionGateway::new(GatewaySettings::default());
    RT.set(gateway.rt_handle())
        .unwrap_or_else(|_| panic!("rt handle already installed"));
    install_signal_handlers();

    let mut world = MockWorld::<3>::new();
    let feed = PlanLine::new(600.0, 0.0, PlanCondition::empty()).expect("valid descriptor");

    tracing::info!("running demo program; Ctrl-C to exercise the reset path");

    let waypoints = [
        Position::new([10.0, 0.0, 0.0]),
        Position::new([10.0, 10.0, 0.0]),
        Position::new([0.0, 10.0, 0.0]),
        Position::new([0.0, 0.0, 0.0]),
    ];

    for target in waypoints {
        if gateway.rt_handle().is_aborted() {
            break;
        }
        match gateway.line(&mut world, target, feed) {
            Ok(()) => tracing::info!(?target, "move submitted"),
            Err(err) => {
                tracing::warn!(?err, "move rejected");
                break;
            }
        }
        gateway.poll();
        std::thread::sleep(Duration::from_millis(50));
    }

    if gateway.rt_handle().is_aborted() {
        tracing::warn!("abort observed; running reset sequence");
        gateway.reset(&mut world);
    }

    tracing::info!(submissions = world.submissions.len(), "demo program finished");
}
