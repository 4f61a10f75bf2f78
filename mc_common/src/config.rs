//! TOML configuration loading.
//!
//! Every feature toggle a GRBL-style build would select at compile time —
//! soft-limit enable, laser mode, homing single-axis commands, two-switch
//! limits, parking enable/override, probe-coordinate messaging — is a field
//! here instead, loaded at construction rather than chosen by conditional
//! compilation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Load configuration from a TOML file. Blanket-implemented for any
/// `DeserializeOwned` type.
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn load_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

/// Homing cycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HomingConfig {
    /// Non-zero cycle mask runs exactly that mask (single-axis command
    /// mode). Zero falls back to the default up-to-three-cycle sequence.
    #[serde(default)]
    pub single_axis_cycle_mask: u8,
    /// Default sequential cycle masks, run in order when
    /// `single_axis_cycle_mask == 0`. Index 0 always runs; later entries
    /// are skipped if zero.
    #[serde(default = "default_homing_cycles")]
    pub default_cycles: [u8; 3],
    /// Build configures limit switches at both ends of travel, so a
    /// pre-triggered switch before homing starts is a hard fault.
    #[serde(default)]
    pub limits_two_switches_on_axes: bool,
}

fn default_homing_cycles() -> [u8; 3] {
    [0b0000_0100, 0b0000_0011, 0]
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            single_axis_cycle_mask: 0,
            default_cycles: default_homing_cycles(),
            limits_two_switches_on_axes: false,
        }
    }
}

/// Gateway-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewaySettings {
    /// Gate the soft-limit check in `mc_line`.
    #[serde(default)]
    pub soft_limit_enable: bool,
    /// Enable the zero-length spindle-sync behaviour in `mc_line`.
    #[serde(default)]
    pub laser_mode: bool,
    /// Chord-to-arc deviation tolerance, mm.
    #[serde(default = "default_arc_tolerance")]
    pub arc_tolerance: f32,
    /// Period of exact arc correction, in approximation steps.
    #[serde(default = "default_n_arc_correction")]
    pub n_arc_correction: u16,
    /// Angular-travel epsilon, rad.
    #[serde(default = "default_arc_epsilon")]
    pub arc_angular_travel_epsilon: f32,
    /// Enable parking motion during feed hold.
    #[serde(default)]
    pub parking_enable: bool,
    /// Enable operator override of the parking behaviour
    /// (`SystemState::override_control`).
    #[serde(default)]
    pub enable_parking_override_control: bool,
    /// Include probe coordinates in the status message stream — purely a
    /// reporter concern, carried here only so the flag has a home; the
    /// status reporter itself is out of scope for this crate.
    #[serde(default)]
    pub message_probe_coordinates: bool,
    /// Homing sub-configuration.
    #[serde(default)]
    pub homing: HomingConfig,
    /// Fixed capacity of the planner ring buffer — sized at build time,
    /// never grown dynamically.
    #[serde(default = "default_planner_capacity")]
    pub planner_capacity: usize,
}

fn default_arc_tolerance() -> f32 {
    crate::consts::ARC_TOLERANCE_DEFAULT
}
fn default_n_arc_correction() -> u16 {
    crate::consts::N_ARC_CORRECTION_DEFAULT
}
fn default_arc_epsilon() -> f32 {
    crate::consts::ARC_ANGULAR_TRAVEL_EPSILON
}
fn default_planner_capacity() -> usize {
    16
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            soft_limit_enable: false,
            laser_mode: false,
            arc_tolerance: default_arc_tolerance(),
            n_arc_correction: default_n_arc_correction(),
            arc_angular_travel_epsilon: default_arc_epsilon(),
            parking_enable: false,
            enable_parking_override_control: false,
            message_probe_coordinates: false,
            homing: HomingConfig::default(),
            planner_capacity: default_planner_capacity(),
        }
    }
}

impl GatewaySettings {
    /// Semantic validation beyond what serde's defaults give us.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arc_tolerance <= 0.0 {
            return Err(ConfigError::ValidationError(
                "arc_tolerance must be positive".into(),
            ));
        }
        if self.n_arc_correction == 0 {
            return Err(ConfigError::ValidationError(
                "n_arc_correction must be at least 1".into(),
            ));
        }
        if self.planner_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "planner_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
