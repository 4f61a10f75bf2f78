//! Convenience re-exports: `use mc_common::prelude::*;`.

pub use crate::condition::{PlanCondition, PlanLine};
pub use crate::config::{ConfigLoader, GatewaySettings, HomingConfig};
pub use crate::error::{AlarmCode, ConfigError};
pub use crate::position::{PlaneVec, Position};
pub use crate::rt_exec::{DrainedEvents, RtExec, RtExecState};
pub use crate::state::{MachineState, OverrideControl, ProbeState, StepControl, SystemState};
