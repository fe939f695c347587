//! Read-only view of a frame for presentation layers

use glam::{Vec2, Vec3};
use serde::Serialize;

use super::hazard::HazardKind;
use super::pickup::PickupKind;
use super::ship::ShipPose;
use super::state::{GameStatus, SessionState};
use crate::consts::{DISPLAY_SPEED_FACTOR, GAUGE_MAX_SPEED};

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub score: u64,
    pub speed: f32,
    pub shield_active: bool,
    pub status: GameStatus,
    pub session_id: u64,
    /// Speed as shown on the HUD (km/s)
    pub display_speed: u32,
    /// HUD gauge fill in [0, 1]
    pub speed_gauge: f32,
}

impl From<&SessionState> for SessionSnapshot {
    fn from(state: &SessionState) -> Self {
        Self {
            score: state.score(),
            speed: state.speed(),
            shield_active: state.shield_active(),
            status: state.status(),
            session_id: state.session_id(),
            display_speed: (state.speed() * DISPLAY_SPEED_FACTOR).floor() as u32,
            speed_gauge: (state.speed() / GAUGE_MAX_SPEED).min(1.0),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub id: u32,
    pub position: Vec3,
}

#[derive(Debug, Clone, Serialize)]
pub struct HazardView {
    pub position: Vec3,
    pub kind: HazardKind,
    pub scale: f32,
    pub rotation: Vec2,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickupView {
    pub position: Vec3,
    pub kind: PickupKind,
    pub rotation: Vec2,
}

/// Everything a renderer/HUD needs after a tick
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub ship: ShipPose,
    pub projectiles: Vec<ProjectileView>,
    pub hazards: Vec<HazardView>,
    pub pickups: Vec<PickupView>,
    pub session: SessionSnapshot,
}
