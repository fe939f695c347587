//! Asteroid field
//!
//! A fixed set of hazards streams toward the ship. Hazards are never
//! destroyed: passing the camera, being shot, or breaking the shield all
//! teleport them back out into the far field.
//!
//! Per-hazard order inside a frame is fixed:
//! 1. advance (global speed * dt + own drift) and spin
//! 2. pass-through respawn (+1 score)
//! 3. ship contact (shield absorbs, otherwise game over)
//! 4. projectile contact (first live bolt in id order wins)
//!
//! Hazards are visited in slot order and a bolt that hits is released on the
//! spot, so later hazards in the same frame never see it.

use glam::{Vec2, Vec3};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{gated_contact, hazard_hit_radius};
use super::events::GameEvent;
use super::pool::{EntityPool, Slot};
use super::projectile::ProjectileSystem;
use super::ship::ShipPose;
use super::state::{RngState, SessionState};
use crate::consts::*;
use crate::random_in;
use crate::tuning::Tuning;

/// Hazard shapes (cosmetic; collision treats them all as spheres)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HazardKind {
    #[default]
    Dodecahedron,
    Box,
    Tetrahedron,
    Octahedron,
}

impl HazardKind {
    pub const ALL: [HazardKind; 4] = [
        HazardKind::Dodecahedron,
        HazardKind::Box,
        HazardKind::Tetrahedron,
        HazardKind::Octahedron,
    ];
}

/// An asteroid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub position: Vec3,
    pub kind: HazardKind,
    /// Uniform scale in [0.5, 1.0)
    pub scale: f32,
    /// Extra depth added every frame on top of the global speed
    pub drift: f32,
    /// Spin per frame around x and y (visual only)
    pub spin: Vec2,
    /// Accumulated spin
    pub rotation: Vec2,
}

impl Default for Hazard {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, HAZARD_SPAWN_FAR),
            kind: HazardKind::default(),
            scale: 1.0,
            drift: HAZARD_MIN_DRIFT,
            spin: Vec2::ZERO,
            rotation: Vec2::ZERO,
        }
    }
}

impl Hazard {
    /// Roll a brand new hazard somewhere in the initial spawn volume
    pub fn spawn(rng: &mut Pcg32) -> Self {
        let kind = HazardKind::ALL[rng.random_range(0..HazardKind::ALL.len())];
        Self {
            position: Vec3::new(
                random_in(rng, -HAZARD_SPAWN_HALF_X, HAZARD_SPAWN_HALF_X),
                random_in(rng, -HAZARD_SPAWN_HALF_Y, HAZARD_SPAWN_HALF_Y),
                random_in(rng, HAZARD_SPAWN_FAR, HAZARD_SPAWN_NEAR),
            ),
            kind,
            scale: random_in(rng, HAZARD_MIN_SCALE, HAZARD_MAX_SCALE),
            drift: random_in(rng, HAZARD_MIN_DRIFT, HAZARD_MAX_DRIFT),
            spin: Vec2::new(
                random_in(rng, 0.0, HAZARD_MAX_SPIN),
                random_in(rng, 0.0, HAZARD_MAX_SPIN),
            ),
            rotation: Vec2::ZERO,
        }
    }

    /// Teleport to the far field, keeping shape, scale and speeds
    pub fn respawn(&mut self, rng: &mut Pcg32) {
        self.position = Vec3::new(
            random_in(rng, -HAZARD_RESPAWN_HALF_X, HAZARD_RESPAWN_HALF_X),
            random_in(rng, -HAZARD_RESPAWN_HALF_Y, HAZARD_RESPAWN_HALF_Y),
            random_in(rng, HAZARD_RESPAWN_FAR, HAZARD_RESPAWN_NEAR),
        );
    }
}

/// Tallies from one field update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HazardReport {
    pub passed: u32,
    pub destroyed: u32,
    pub shield_hits: u32,
    pub lethal_hit: bool,
}

pub struct HazardField {
    pool: EntityPool<Hazard>,
    rng_state: RngState,
    rng: Pcg32,
    session_id: u64,
    tuning: Tuning,
}

impl HazardField {
    /// RNG stream reserved for hazards
    const STREAM: u64 = 1;

    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        let rng_state = RngState::new(seed, Self::STREAM);
        let mut field = Self {
            pool: EntityPool::new(tuning.hazard_count),
            rng: rng_state.to_rng(0),
            rng_state,
            session_id: 0,
            tuning: tuning.clone(),
        };
        field.reseed(0);
        field
    }

    /// Re-roll every hazard for `session_id`
    pub fn reseed(&mut self, session_id: u64) {
        self.session_id = session_id;
        self.rng = self.rng_state.to_rng(session_id);
        self.pool.release_all();
        while let Ok(slot) = self.pool.acquire() {
            slot.item = Hazard::spawn(&mut self.rng);
        }
        log::info!(
            "Hazard field reseeded: {} hazards, session {}",
            self.pool.active_count(),
            session_id
        );
    }

    /// Reseed if the session changed since the last call
    pub fn sync_session(&mut self, session_id: u64) -> bool {
        if session_id == self.session_id {
            return false;
        }
        self.reseed(session_id);
        true
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn len(&self) -> usize {
        self.pool.active_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot<Hazard>> {
        self.pool.iter_active()
    }

    pub fn hazard(&self, id: u32) -> Option<&Hazard> {
        self.pool.get(id).map(|s| &s.item)
    }

    pub fn hazard_mut(&mut self, id: u32) -> Option<&mut Hazard> {
        self.pool.get_mut(id).map(|s| &mut s.item)
    }

    /// Advance every hazard and resolve its collisions
    ///
    /// Does nothing unless the session is playing. Stops at the first lethal
    /// hit, leaving the remaining hazards where they were.
    pub fn update(
        &mut self,
        dt: f32,
        ship: &ShipPose,
        projectiles: &mut ProjectileSystem,
        state: &mut SessionState,
        events: &mut Vec<GameEvent>,
    ) -> HazardReport {
        let mut report = HazardReport::default();
        if !state.is_playing() {
            return report;
        }

        let t = &self.tuning;
        let rng = &mut self.rng;

        for slot in self.pool.iter_active_mut() {
            let id = slot.id();
            let hazard = &mut slot.item;

            hazard.position.z += state.speed() * dt + hazard.drift;
            hazard.rotation += hazard.spin;

            if hazard.position.z > t.pass_through_depth {
                hazard.respawn(rng);
                state.increase_score(t.pass_through_bonus);
                report.passed += 1;
            }

            // Ship first: a lethal hit makes any same-frame bolt hit moot
            if gated_contact(
                hazard.position,
                ship.position,
                t.depth_gate,
                t.ship_hazard_radius,
            ) {
                if state.shield_active() {
                    state.deactivate_shield();
                    hazard.respawn(rng);
                    events.push(GameEvent::ShipHitShielded);
                    report.shield_hits += 1;
                    log::debug!("Shield absorbed hazard {id}");
                } else {
                    state.end_game();
                    events.push(GameEvent::ShipHitLethal);
                    report.lethal_hit = true;
                    break;
                }
            }

            let z = hazard.position.z;
            if z > t.projectile_hit_far && z < t.projectile_hit_near {
                let radius =
                    hazard_hit_radius(hazard.scale, t.hazard_base_radius, t.projectile_hit_margin);
                for bolt in projectiles.slots_mut() {
                    if !bolt.is_active() {
                        continue;
                    }
                    if gated_contact(bolt.item.position, hazard.position, t.depth_gate, radius) {
                        bolt.release();
                        state.increase_score(t.hazard_destroy_bonus);
                        events.push(GameEvent::HazardDestroyed { kind: hazard.kind });
                        hazard.respawn(rng);
                        report.destroyed += 1;
                        break;
                    }
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameStatus;

    fn tuning(hazards: usize) -> Tuning {
        Tuning {
            hazard_count: hazards,
            projectile_pool_size: 4,
            ..Tuning::default()
        }
    }

    fn playing() -> SessionState {
        let mut state = SessionState::default();
        state.start_game();
        state
    }

    fn place(field: &mut HazardField, id: u32, position: Vec3, scale: f32) {
        let hazard = field.hazard_mut(id).unwrap();
        hazard.position = position;
        hazard.scale = scale;
        hazard.drift = 0.0;
    }

    fn far_away(field: &mut HazardField, id: u32) {
        place(field, id, Vec3::new(0.0, 0.0, -260.0), 0.5);
    }

    #[test]
    fn test_spawn_volume() {
        let field = HazardField::new(&tuning(200), 3);
        assert_eq!(field.len(), 200);
        for slot in field.iter() {
            let h = &slot.item;
            assert!(h.position.x.abs() <= 15.0);
            assert!(h.position.y.abs() <= 10.0);
            assert!((-270.0..=-20.0).contains(&h.position.z));
            assert!((0.5..1.0).contains(&h.scale));
            assert!((0.1..0.3).contains(&h.drift));
        }
    }

    #[test]
    fn test_reseed_is_deterministic_per_session() {
        let a = HazardField::new(&tuning(20), 11);
        let b = HazardField::new(&tuning(20), 11);
        let pa: Vec<Vec3> = a.iter().map(|s| s.item.position).collect();
        let pb: Vec<Vec3> = b.iter().map(|s| s.item.position).collect();
        assert_eq!(pa, pb);

        let mut c = HazardField::new(&tuning(20), 11);
        assert!(c.sync_session(1));
        assert!(!c.sync_session(1));
        let pc: Vec<Vec3> = c.iter().map(|s| s.item.position).collect();
        assert_ne!(pa, pc);
    }

    #[test]
    fn test_frozen_when_not_playing() {
        let mut field = HazardField::new(&tuning(10), 5);
        let mut bolts = ProjectileSystem::new(&tuning(0));
        let before: Vec<Vec3> = field.iter().map(|s| s.item.position).collect();

        let mut state = SessionState::default();
        let mut events = Vec::new();
        field.update(0.5, &ShipPose::default(), &mut bolts, &mut state, &mut events);

        let after: Vec<Vec3> = field.iter().map(|s| s.item.position).collect();
        assert_eq!(before, after);
        assert!(events.is_empty());
    }

    #[test]
    fn test_advance_uses_global_speed_and_drift() {
        let mut field = HazardField::new(&tuning(1), 5);
        let mut bolts = ProjectileSystem::new(&tuning(1));
        place(&mut field, 0, Vec3::new(10.0, 0.0, -100.0), 1.0);
        field.hazard_mut(0).unwrap().drift = 0.25;

        let mut state = playing();
        field.update(0.1, &ShipPose::default(), &mut bolts, &mut state, &mut Vec::new());
        let z = field.hazard(0).unwrap().position.z;
        assert!((z - (-100.0 + 10.0 * 0.1 + 0.25)).abs() < 1e-4);
    }

    #[test]
    fn test_pass_through_scores_one_and_relocates() {
        let mut field = HazardField::new(&tuning(1), 5);
        let mut bolts = ProjectileSystem::new(&tuning(1));
        place(&mut field, 0, Vec3::new(10.0, 0.0, 19.99), 1.0);

        let mut state = playing();
        let report = field.update(0.01, &ShipPose::default(), &mut bolts, &mut state, &mut Vec::new());
        assert_eq!(report.passed, 1);
        assert_eq!(state.score(), 1);
        let z = field.hazard(0).unwrap().position.z;
        assert!(z < -20.0);
        assert!((-300.0..=-200.0).contains(&z));
    }

    #[test]
    fn test_unshielded_ship_hit_ends_game() {
        let mut field = HazardField::new(&tuning(1), 5);
        let mut bolts = ProjectileSystem::new(&tuning(1));
        place(&mut field, 0, Vec3::new(0.0, 0.0, 0.5), 1.0);

        let mut state = playing();
        let mut events = Vec::new();
        let report = field.update(0.0, &ShipPose::default(), &mut bolts, &mut state, &mut events);
        assert!(report.lethal_hit);
        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(events, vec![GameEvent::ShipHitLethal]);
    }

    #[test]
    fn test_shield_absorbs_hit() {
        let mut field = HazardField::new(&tuning(1), 5);
        let mut bolts = ProjectileSystem::new(&tuning(1));
        place(&mut field, 0, Vec3::new(0.0, 0.0, 0.5), 1.0);

        let mut state = playing();
        state.activate_shield();
        let mut events = Vec::new();
        field.update(0.0, &ShipPose::default(), &mut bolts, &mut state, &mut events);

        assert!(!state.shield_active());
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.score(), 0);
        assert!(field.hazard(0).unwrap().position.z <= -200.0);
        assert_eq!(events, vec![GameEvent::ShipHitShielded]);
    }

    #[test]
    fn test_depth_gate_blocks_ship_hit() {
        let mut field = HazardField::new(&tuning(1), 5);
        let mut bolts = ProjectileSystem::new(&tuning(1));
        // Within 1.2 would need |dz| < 1.2, so this is out of reach regardless
        place(&mut field, 0, Vec3::new(0.0, 0.0, -2.5), 1.0);

        let mut state = playing();
        field.update(0.0, &ShipPose::default(), &mut bolts, &mut state, &mut Vec::new());
        assert_eq!(state.status(), GameStatus::Playing);
    }

    #[test]
    fn test_projectile_destroys_hazard() {
        let mut field = HazardField::new(&tuning(1), 5);
        let mut bolts = ProjectileSystem::new(&tuning(1));
        place(&mut field, 0, Vec3::new(0.0, 0.0, -5.3), 1.0);
        let id = bolts.fire(Vec3::new(0.0, 0.0, -3.5)).unwrap();
        assert_eq!(bolts.get(id).unwrap().item.position.z, -5.0);

        let mut state = playing();
        let mut events = Vec::new();
        let report = field.update(0.0, &ShipPose::default(), &mut bolts, &mut state, &mut events);

        assert_eq!(report.destroyed, 1);
        assert!(!bolts.get(id).unwrap().is_active());
        assert_eq!(state.score(), 10);
        assert!(field.hazard(0).unwrap().position.z <= -200.0);
        assert_eq!(
            events,
            vec![GameEvent::HazardDestroyed {
                kind: field.hazard(0).unwrap().kind
            }]
        );
    }

    #[test]
    fn test_small_hazard_needs_closer_shot() {
        let mut field = HazardField::new(&tuning(1), 5);
        let mut bolts = ProjectileSystem::new(&tuning(1));
        // scale 0.5 -> hit radius 0.7
        place(&mut field, 0, Vec3::new(0.9, 0.0, -50.0), 0.5);
        bolts.fire(Vec3::new(0.0, 0.0, -48.5)).unwrap();

        let mut state = playing();
        let report = field.update(0.0, &ShipPose::default(), &mut bolts, &mut state, &mut Vec::new());
        assert_eq!(report.destroyed, 0);
        assert_eq!(bolts.active_count(), 1);
    }

    #[test]
    fn test_out_of_window_hazard_is_not_shootable() {
        let mut field = HazardField::new(&tuning(1), 5);
        let mut bolts = ProjectileSystem::new(&tuning(1));
        place(&mut field, 0, Vec3::new(5.0, 0.0, 0.5), 1.0);
        bolts.fire(Vec3::new(5.0, 0.0, 2.0)).unwrap();

        let mut state = playing();
        let report = field.update(0.0, &ShipPose::default(), &mut bolts, &mut state, &mut Vec::new());
        assert_eq!(report.destroyed, 0);
        assert_eq!(bolts.active_count(), 1);
    }

    #[test]
    fn test_one_bolt_per_hazard_per_frame() {
        let mut field = HazardField::new(&tuning(1), 5);
        let mut bolts = ProjectileSystem::new(&tuning(2));
        place(&mut field, 0, Vec3::new(0.0, 0.0, -30.0), 1.0);
        bolts.fire(Vec3::new(0.0, 0.0, -28.5)).unwrap();
        bolts.fire(Vec3::new(0.1, 0.0, -28.5)).unwrap();

        let mut state = playing();
        let report = field.update(0.0, &ShipPose::default(), &mut bolts, &mut state, &mut Vec::new());
        assert_eq!(report.destroyed, 1);
        assert_eq!(state.score(), 10);
        // Lowest id is consumed, the other keeps flying
        assert!(!bolts.get(0).unwrap().is_active());
        assert!(bolts.get(1).unwrap().is_active());
    }

    #[test]
    fn test_one_hazard_per_bolt_per_frame() {
        let mut field = HazardField::new(&tuning(2), 5);
        let mut bolts = ProjectileSystem::new(&tuning(1));
        place(&mut field, 0, Vec3::new(0.0, 0.0, -30.0), 1.0);
        place(&mut field, 1, Vec3::new(0.2, 0.0, -30.0), 1.0);
        bolts.fire(Vec3::new(0.1, 0.0, -28.5)).unwrap();

        let mut state = playing();
        let report = field.update(0.0, &ShipPose::default(), &mut bolts, &mut state, &mut Vec::new());
        assert_eq!(report.destroyed, 1);
        assert_eq!(state.score(), 10);
        assert!(field.hazard(0).unwrap().position.z <= -200.0);
        assert_eq!(field.hazard(1).unwrap().position, Vec3::new(0.2, 0.0, -30.0));
    }

    #[test]
    fn test_ship_check_wins_over_bolt() {
        let mut field = HazardField::new(&tuning(1), 5);
        let mut bolts = ProjectileSystem::new(&tuning(1));
        place(&mut field, 0, Vec3::new(0.0, 0.0, -0.5), 1.0);
        bolts.fire(Vec3::new(0.0, 0.0, 1.0)).unwrap();

        let mut state = playing();
        field.update(0.0, &ShipPose::default(), &mut bolts, &mut state, &mut Vec::new());
        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(state.score(), 0);
        assert_eq!(bolts.active_count(), 1);
    }

    #[test]
    fn test_game_over_freezes_rest_of_field() {
        let mut field = HazardField::new(&tuning(2), 5);
        let mut bolts = ProjectileSystem::new(&tuning(1));
        place(&mut field, 0, Vec3::new(0.0, 0.0, -0.8), 1.0);
        far_away(&mut field, 1);
        field.hazard_mut(1).unwrap().drift = 0.3;

        let mut state = playing();
        field.update(0.1, &ShipPose::default(), &mut bolts, &mut state, &mut Vec::new());
        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(field.hazard(1).unwrap().position.z, -260.0);
    }

    #[test]
    fn test_shield_only_absorbs_one_hit() {
        let mut field = HazardField::new(&tuning(2), 5);
        let mut bolts = ProjectileSystem::new(&tuning(1));
        place(&mut field, 0, Vec3::new(0.0, 0.0, 0.3), 1.0);
        place(&mut field, 1, Vec3::new(0.3, 0.0, -0.3), 1.0);

        let mut state = playing();
        state.activate_shield();
        let mut events = Vec::new();
        field.update(0.0, &ShipPose::default(), &mut bolts, &mut state, &mut events);
        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(
            events,
            vec![GameEvent::ShipHitShielded, GameEvent::ShipHitLethal]
        );
    }
}
