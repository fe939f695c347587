//! Void Runner - A neon arcade flight shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, fields, collisions, session state)
//! - `tuning`: Data-driven game balance
//! - `error`: Error taxonomy for the core
//!
//! Rendering, audio playback, UI layout and input devices live outside this
//! crate. Hosts feed a [`sim::TickInput`] per frame and read back a
//! [`sim::FrameSnapshot`] plus the queued [`sim::GameEvent`]s.

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::{SimError, TuningError};
pub use tuning::Tuning;

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Fixed step used by the native runner (60 Hz display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Undrained events kept by the simulation loop; older ones are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;

    /// Speed scalar can never drop below this
    pub const SPEED_FLOOR: f32 = 5.0;

    /// Hazard spawn volume at field construction
    pub const HAZARD_SPAWN_HALF_X: f32 = 15.0;
    pub const HAZARD_SPAWN_HALF_Y: f32 = 10.0;
    pub const HAZARD_SPAWN_NEAR: f32 = -20.0;
    pub const HAZARD_SPAWN_FAR: f32 = -270.0;

    /// Hazard respawn volume (after pass-through, shot down, or shield hit)
    pub const HAZARD_RESPAWN_HALF_X: f32 = 15.0;
    pub const HAZARD_RESPAWN_HALF_Y: f32 = 8.0;
    pub const HAZARD_RESPAWN_NEAR: f32 = -200.0;
    pub const HAZARD_RESPAWN_FAR: f32 = -300.0;

    /// Hazard per-instance ranges
    pub const HAZARD_MIN_SCALE: f32 = 0.5;
    pub const HAZARD_MAX_SCALE: f32 = 1.0;
    pub const HAZARD_MIN_DRIFT: f32 = 0.1;
    pub const HAZARD_MAX_DRIFT: f32 = 0.3;
    pub const HAZARD_MAX_SPIN: f32 = 0.05;

    /// Pickup spawn volume at field construction
    pub const PICKUP_SPAWN_HALF_X: f32 = 12.5;
    pub const PICKUP_SPAWN_HALF_Y: f32 = 7.5;
    pub const PICKUP_SPAWN_NEAR: f32 = -100.0;
    pub const PICKUP_SPAWN_FAR: f32 = -500.0;

    /// Pickup respawn volumes
    pub const PICKUP_RESPAWN_HALF_X: f32 = 10.0;
    pub const PICKUP_RESPAWN_HALF_Y: f32 = 5.0;
    /// Respawn depth after drifting past the ship
    pub const PICKUP_PASS_NEAR: f32 = -300.0;
    pub const PICKUP_PASS_FAR: f32 = -500.0;
    /// Respawn depth after being collected (further out)
    pub const PICKUP_COLLECT_NEAR: f32 = -400.0;
    pub const PICKUP_COLLECT_FAR: f32 = -700.0;

    /// HUD conversion: speed scalar to displayed km/s
    pub const DISPLAY_SPEED_FACTOR: f32 = 10.0;
    /// Speed scalar that fills the HUD gauge
    pub const GAUGE_MAX_SPEED: f32 = 50.0;
}

/// Linear interpolation from `a` toward `b` by factor `t`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Uniform sample in the half-open interval between `a` and `b`, in either order
#[inline]
pub fn random_in<R: Rng + ?Sized>(rng: &mut R, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if lo == hi {
        return lo;
    }
    rng.random_range(lo..hi)
}
