//! Data-driven game balance
//!
//! Every gameplay number the fields and the ship read lives here, so a
//! designer can swap in a JSON file without touching code. Missing keys fall
//! back to the shipped defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Projectiles ===
    /// Fixed projectile pool capacity
    pub projectile_pool_size: usize,
    /// Projectile travel speed (units/sec, toward -z)
    pub projectile_speed: f32,
    /// Projectiles beyond this depth are retired
    pub projectile_cull_depth: f32,
    /// Spawn distance ahead of the ship
    pub projectile_spawn_offset: f32,
    /// Minimum time between shots (milliseconds)
    pub fire_cooldown_ms: f64,

    // === Fields ===
    pub hazard_count: usize,
    pub pickup_count: usize,
    /// Entities past this depth are behind the camera and respawn
    pub pass_through_depth: f32,
    /// One-axis pre-check before any 3D distance test
    pub depth_gate: f32,
    /// Ship vs hazard contact radius (independent of hazard scale)
    pub ship_hazard_radius: f32,
    /// Hazard radius per unit of scale, for projectile hits
    pub hazard_base_radius: f32,
    /// Extra radius added to scaled hazards for projectile hits
    pub projectile_hit_margin: f32,
    /// Hazards are only shootable inside (near, far) -> (far, near) depth window
    pub projectile_hit_far: f32,
    pub projectile_hit_near: f32,
    /// Ship vs pickup contact radius
    pub pickup_radius: f32,

    // === Scoring ===
    pub pass_through_bonus: u64,
    pub hazard_destroy_bonus: u64,
    pub score_pickup_bonus: u64,
    /// Speed removed by a SLOW pickup
    pub slow_amount: f32,

    // === Difficulty ===
    /// Speed scalar at the start of each session
    pub start_speed: f32,
    /// Seconds between difficulty steps
    pub ramp_interval_secs: f32,
    /// Speed added per difficulty step
    pub ramp_step: f32,

    // === Ship handling ===
    pub ship_limit_x: f32,
    pub ship_limit_y: f32,
    /// Per-frame exponential smoothing factor toward the pointer target
    pub ship_smoothing: f32,
    pub bank_factor: f32,
    pub pitch_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            projectile_pool_size: 30,
            projectile_speed: 120.0,
            projectile_cull_depth: -250.0,
            projectile_spawn_offset: 1.5,
            fire_cooldown_ms: 150.0,

            hazard_count: 100,
            pickup_count: 10,
            pass_through_depth: 20.0,
            depth_gate: 2.0,
            ship_hazard_radius: 1.2,
            hazard_base_radius: 1.0,
            projectile_hit_margin: 0.2,
            projectile_hit_far: -250.0,
            projectile_hit_near: 0.0,
            pickup_radius: 1.5,

            pass_through_bonus: 1,
            hazard_destroy_bonus: 10,
            score_pickup_bonus: 500,
            slow_amount: 2.0,

            start_speed: 10.0,
            ramp_interval_secs: 5.0,
            ramp_step: 0.5,

            ship_limit_x: 8.0,
            ship_limit_y: 4.0,
            ship_smoothing: 0.1,
            bank_factor: 1.5,
            pitch_factor: 0.5,
        }
    }
}

impl Tuning {
    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Write tuning as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TuningError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(name: &str, value: f32) -> Result<(), TuningError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::Invalid(format!("{name} must be positive, got {value}")))
            }
        }

        if self.projectile_pool_size == 0 {
            return Err(TuningError::Invalid(
                "projectile_pool_size must be at least 1".into(),
            ));
        }
        positive("projectile_speed", self.projectile_speed)?;
        positive("depth_gate", self.depth_gate)?;
        positive("pass_through_depth", self.pass_through_depth)?;
        positive("ship_hazard_radius", self.ship_hazard_radius)?;
        positive("hazard_base_radius", self.hazard_base_radius)?;
        positive("pickup_radius", self.pickup_radius)?;
        positive("ramp_interval_secs", self.ramp_interval_secs)?;
        positive("ship_limit_x", self.ship_limit_x)?;
        positive("ship_limit_y", self.ship_limit_y)?;

        if !(self.ship_smoothing > 0.0 && self.ship_smoothing <= 1.0) {
            return Err(TuningError::Invalid(format!(
                "ship_smoothing must be in (0, 1], got {}",
                self.ship_smoothing
            )));
        }
        if self.fire_cooldown_ms < 0.0 {
            return Err(TuningError::Invalid("fire_cooldown_ms must not be negative".into()));
        }
        if !(self.projectile_hit_margin >= 0.0 && self.projectile_hit_margin.is_finite()) {
            return Err(TuningError::Invalid(format!(
                "projectile_hit_margin must not be negative, got {}",
                self.projectile_hit_margin
            )));
        }
        if self.projectile_hit_far >= self.projectile_hit_near {
            return Err(TuningError::Invalid(format!(
                "projectile hit window is inverted: ({}, {})",
                self.projectile_hit_far, self.projectile_hit_near
            )));
        }
        if self.start_speed < crate::consts::SPEED_FLOOR {
            return Err(TuningError::Invalid(format!(
                "start_speed {} is below the speed floor {}",
                self.start_speed,
                crate::consts::SPEED_FLOOR
            )));
        }
        Ok(())
    }
}
