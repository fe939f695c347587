//! Power-up field
//!
//! Pickups ride the global speed only (no drift of their own) and are
//! recycled exactly like hazards. Touching one applies its effect and sends
//! it back out, further than a plain pass-through would.

use glam::{Vec2, Vec3};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::gated_contact;
use super::events::GameEvent;
use super::pool::{EntityPool, Slot};
use super::ship::ShipPose;
use super::state::{RngState, SessionState};
use crate::consts::*;
use crate::random_in;
use crate::tuning::Tuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PickupKind {
    /// Absorbs the next hazard hit
    #[default]
    Shield,
    /// Flat score bonus
    Score,
    /// Knocks the speed scalar down
    Slow,
}

impl PickupKind {
    pub const ALL: [PickupKind; 3] = [PickupKind::Shield, PickupKind::Score, PickupKind::Slow];
}

/// A power-up entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pickup {
    pub position: Vec3,
    pub kind: PickupKind,
    /// Accumulated spin around y and z (visual only)
    pub rotation: Vec2,
}

impl Pickup {
    pub fn spawn(rng: &mut Pcg32) -> Self {
        let kind = PickupKind::ALL[rng.random_range(0..PickupKind::ALL.len())];
        Self {
            position: Vec3::new(
                random_in(rng, -PICKUP_SPAWN_HALF_X, PICKUP_SPAWN_HALF_X),
                random_in(rng, -PICKUP_SPAWN_HALF_Y, PICKUP_SPAWN_HALF_Y),
                random_in(rng, PICKUP_SPAWN_FAR, PICKUP_SPAWN_NEAR),
            ),
            kind,
            rotation: Vec2::ZERO,
        }
    }

    fn relocate(&mut self, rng: &mut Pcg32, near: f32, far: f32) {
        self.position = Vec3::new(
            random_in(rng, -PICKUP_RESPAWN_HALF_X, PICKUP_RESPAWN_HALF_X),
            random_in(rng, -PICKUP_RESPAWN_HALF_Y, PICKUP_RESPAWN_HALF_Y),
            random_in(rng, far, near),
        );
    }
}

/// Tallies from one field update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickupReport {
    pub passed: u32,
    pub collected: u32,
}

pub struct PickupField {
    pool: EntityPool<Pickup>,
    rng_state: RngState,
    rng: Pcg32,
    session_id: u64,
    tuning: Tuning,
}

impl PickupField {
    const STREAM: u64 = 2;

    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        let rng_state = RngState::new(seed, Self::STREAM);
        let mut field = Self {
            pool: EntityPool::new(tuning.pickup_count),
            rng: rng_state.to_rng(0),
            rng_state,
            session_id: 0,
            tuning: tuning.clone(),
        };
        field.reseed(0);
        field
    }

    pub fn reseed(&mut self, session_id: u64) {
        self.session_id = session_id;
        self.rng = self.rng_state.to_rng(session_id);
        self.pool.release_all();
        while let Ok(slot) = self.pool.acquire() {
            slot.item = Pickup::spawn(&mut self.rng);
        }
        log::info!(
            "Pickup field reseeded: {} pickups, session {}",
            self.pool.active_count(),
            session_id
        );
    }

    pub fn sync_session(&mut self, session_id: u64) -> bool {
        if session_id == self.session_id {
            return false;
        }
        self.reseed(session_id);
        true
    }

    pub fn len(&self) -> usize {
        self.pool.active_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot<Pickup>> {
        self.pool.iter_active()
    }

    pub fn pickup(&self, id: u32) -> Option<&Pickup> {
        self.pool.get(id).map(|s| &s.item)
    }

    pub fn pickup_mut(&mut self, id: u32) -> Option<&mut Pickup> {
        self.pool.get_mut(id).map(|s| &mut s.item)
    }

    /// Advance pickups and apply any the ship touches
    pub fn update(
        &mut self,
        dt: f32,
        ship: &ShipPose,
        state: &mut SessionState,
        events: &mut Vec<GameEvent>,
    ) -> PickupReport {
        let mut report = PickupReport::default();
        if !state.is_playing() {
            return report;
        }

        let t = &self.tuning;
        let rng = &mut self.rng;

        for slot in self.pool.iter_active_mut() {
            let pickup = &mut slot.item;

            pickup.position.z += state.speed() * dt;
            pickup.rotation += Vec2::new(2.0, 1.0) * dt;

            if pickup.position.z > t.pass_through_depth {
                pickup.relocate(rng, PICKUP_PASS_NEAR, PICKUP_PASS_FAR);
                report.passed += 1;
            }

            if gated_contact(pickup.position, ship.position, t.depth_gate, t.pickup_radius) {
                match pickup.kind {
                    PickupKind::Shield => state.activate_shield(),
                    PickupKind::Score => state.increase_score(t.score_pickup_bonus),
                    PickupKind::Slow => state.increase_speed(-t.slow_amount),
                }
                events.push(GameEvent::PickupCollected { kind: pickup.kind });
                log::debug!("Collected {:?}", pickup.kind);
                pickup.relocate(rng, PICKUP_COLLECT_NEAR, PICKUP_COLLECT_FAR);
                report.collected += 1;
            }
        }

        report
    }
}
