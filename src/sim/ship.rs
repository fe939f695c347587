//! Player ship
//!
//! Only the controller writes the pose. Everything else gets a copy of it
//! (`ShipPose` is `Copy`) at the start of its update.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::state::GameStatus;
use crate::lerp;
use crate::tuning::Tuning;

/// Ship position plus cosmetic banking
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShipPose {
    pub position: Vec3,
    /// Rotation around z (banking into turns)
    pub roll: f32,
    /// Rotation around x (nose up/down)
    pub pitch: f32,
}

pub struct ShipController {
    pose: ShipPose,
    target: Vec2,
    /// Simulation time of the last accepted shot (ms)
    last_fire_ms: Option<f64>,
    limits: Vec2,
    smoothing: f32,
    bank_factor: f32,
    pitch_factor: f32,
    cooldown_ms: f64,
}

impl ShipController {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pose: ShipPose::default(),
            target: Vec2::ZERO,
            last_fire_ms: None,
            limits: Vec2::new(tuning.ship_limit_x, tuning.ship_limit_y),
            smoothing: tuning.ship_smoothing,
            bank_factor: tuning.bank_factor,
            pitch_factor: tuning.pitch_factor,
            cooldown_ms: tuning.fire_cooldown_ms,
        }
    }

    #[inline]
    pub fn pose(&self) -> ShipPose {
        self.pose
    }

    /// Pointer target in world units (last computed)
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Back to the origin with no fire history (new session)
    pub fn reset(&mut self) {
        self.pose = ShipPose::default();
        self.target = Vec2::ZERO;
        self.last_fire_ms = None;
    }

    /// Integrate one frame of input
    ///
    /// `pointer` is normalized to [-1, 1] on both axes; `elapsed` is total
    /// simulation time in seconds, used for the idle bob.
    pub fn update(&mut self, pointer: Vec2, status: GameStatus, elapsed: f64) {
        if status != GameStatus::Playing {
            let t = elapsed as f32;
            self.pose.roll = t.sin() * 0.1;
            self.pose.position.y = (t * 2.0).sin() * 0.2;
            return;
        }

        let pointer = pointer.clamp(Vec2::splat(-1.0), Vec2::ONE);
        self.target = pointer * self.limits;

        let s = self.smoothing;
        let pos = &mut self.pose.position;
        pos.x = lerp(pos.x, self.target.x, s);
        pos.y = lerp(pos.y, self.target.y, s);

        let bank = (self.target.x - pos.x) * self.bank_factor;
        let nose = (self.target.y - pos.y) * self.pitch_factor;
        self.pose.roll = lerp(self.pose.roll, -bank, s);
        self.pose.pitch = lerp(self.pose.pitch, nose, s);
    }

    /// Accept a fire trigger if playing and off cooldown
    ///
    /// Returns the muzzle origin (current ship position) when the shot is
    /// allowed. A rejected trigger leaves the cooldown untouched.
    pub fn try_fire(&mut self, status: GameStatus, now_ms: f64) -> Option<Vec3> {
        if status != GameStatus::Playing {
            return None;
        }
        let ready = self
            .last_fire_ms
            .is_none_or(|last| now_ms - last >= self.cooldown_ms);
        if !ready {
            return None;
        }
        self.last_fire_ms = Some(now_ms);
        Some(self.pose.position)
    }
}
