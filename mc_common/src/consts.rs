//! System-wide constants for the motion-command gateway.
//!
//! Single source of truth for numeric limits and defaults. Imported by
//! `mc_gateway` — no duplication permitted.

/// Minimum number of axes a gateway instance may address.
pub const MIN_AXES: usize = 3;

/// Maximum number of axes a gateway instance may address.
pub const MAX_AXES: usize = 6;

static_assertions::const_assert!(MIN_AXES <= MAX_AXES);
static_assertions::const_assert!(MIN_AXES >= 1);

/// Default chord-to-arc tolerance [mm].
pub const ARC_TOLERANCE_DEFAULT: f32 = 0.002;

/// Default period (in approximation steps) of exact arc correction.
///
/// Recommended range 4-20.
pub const N_ARC_CORRECTION_DEFAULT: u16 = 12;

/// Angular travel epsilon [rad] that forces a full revolution for
/// near-zero commanded travel, so `I J` full circles behave correctly.
pub const ARC_ANGULAR_TRAVEL_EPSILON: f32 = 1e-6;

/// Number of consecutive cycle-start/reset signals the back-pressure loop
/// may observe without making progress before a diagnostic is logged (not
/// a hard limit — the loop must still either drain or observe abort, never
/// busy-spin silently).
pub const BACK_PRESSURE_LOG_THRESHOLD: u32 = 10_000;

/// Polling granularity of the dwell deadline loop, milliseconds.
pub const DWELL_POLL_INTERVAL_MS: u64 = 10;
