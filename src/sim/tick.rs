//! Per-frame simulation loop
//!
//! `SimulationLoop` owns every subsystem and runs them in one fixed order:
//!
//! 1. session sync (reseed fields, reset ship/projectiles on a new session)
//! 2. ship: pointer integration, then fire trigger
//! 3. projectiles: advance and cull
//! 4. hazards: advance, pass-through, ship hit, projectile hits
//! 5. pickups: advance, pass-through, collection
//! 6. difficulty ramp
//!
//! Later stages see every mutation made by earlier ones in the same frame:
//! a bolt released by a hazard is gone for the rest of the frame, and a
//! lethal hazard hit stops pickups from being collected.

use glam::Vec2;

use super::events::GameEvent;
use super::hazard::{HazardField, HazardReport};
use super::pickup::{PickupField, PickupReport};
use super::projectile::ProjectileSystem;
use super::ship::ShipController;
use super::snapshot::{FrameSnapshot, HazardView, PickupView, ProjectileView, SessionSnapshot};
use super::state::{DifficultyRamp, GameStatus, SessionState};
use crate::consts::MAX_PENDING_EVENTS;
use crate::tuning::Tuning;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer position, normalized to [-1, 1] on both axes
    pub pointer: Vec2,
    /// Fire trigger edge (press this frame)
    pub fire: bool,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// A shot cleared the cooldown (it may still have been dropped by a full pool)
    pub fired: bool,
    pub hazards: HazardReport,
    pub pickups: PickupReport,
}

pub struct SimulationLoop {
    state: SessionState,
    ramp: DifficultyRamp,
    /// Advance the ramp from frame time; disable when the host runs its own timer
    auto_ramp: bool,
    ship: ShipController,
    projectiles: ProjectileSystem,
    hazards: HazardField,
    pickups: PickupField,
    events: Vec<GameEvent>,
    /// Total simulated time (seconds)
    elapsed: f64,
    frame: u64,
    seen_session: u64,
}

impl SimulationLoop {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let state = SessionState::new(tuning.start_speed);
        let seen_session = state.session_id();
        Self {
            ramp: DifficultyRamp::new(tuning.ramp_interval_secs, tuning.ramp_step),
            auto_ramp: true,
            ship: ShipController::new(&tuning),
            projectiles: ProjectileSystem::new(&tuning),
            hazards: HazardField::new(&tuning, seed),
            pickups: PickupField::new(&tuning, seed),
            events: Vec::with_capacity(32),
            elapsed: 0.0,
            frame: 0,
            seen_session,
            state,
        }
    }

    pub fn set_auto_ramp(&mut self, enabled: bool) {
        self.auto_ramp = enabled;
    }

    /// Apply one difficulty step now (for hosts driving their own ramp timer)
    pub fn apply_ramp_step(&mut self) {
        self.ramp.fire(&mut self.state);
    }

    /// Begin a fresh run; also valid mid-run as a full restart
    pub fn start_game(&mut self) {
        self.state.start_game();
        self.enter_session();
    }

    /// End the run early (e.g. player quits). Ignored unless playing.
    pub fn end_game(&mut self) -> bool {
        let before = self.state.status();
        let ended = self.state.end_game();
        self.note_status(before);
        ended
    }

    pub fn reset_game(&mut self) {
        self.state.reset_game();
        self.enter_session();
    }

    /// Reseed for the new session and announce it, even when the status
    /// itself is unchanged (restart while playing, reset from the menu)
    fn enter_session(&mut self) {
        self.sync_session();
        let status = self.state.status();
        self.push_event(GameEvent::StatusChanged { status });
    }

    fn note_status(&mut self, before: GameStatus) {
        let status = self.state.status();
        if status != before {
            self.push_event(GameEvent::StatusChanged { status });
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
        self.trim_events();
    }

    /// Keep the queue bounded for hosts that never drain it
    fn trim_events(&mut self) {
        let excess = self.events.len().saturating_sub(MAX_PENDING_EVENTS);
        if excess > 0 {
            self.events.drain(..excess);
            log::debug!("Event queue full, dropped {excess} oldest events");
        }
    }

    /// Bring every subsystem in line with the current session id
    fn sync_session(&mut self) {
        let id = self.state.session_id();
        if id == self.seen_session {
            return;
        }
        self.seen_session = id;
        self.ship.reset();
        self.projectiles.clear();
        self.ramp.reset();
        self.hazards.sync_session(id);
        self.pickups.sync_session(id);
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> FrameReport {
        self.frame += 1;
        self.elapsed += f64::from(dt);
        self.sync_session();

        let before = self.state.status();
        let mut report = FrameReport::default();

        self.ship.update(input.pointer, before, self.elapsed);
        if input.fire {
            if let Some(origin) = self.ship.try_fire(before, self.elapsed * 1000.0) {
                report.fired = true;
                self.push_event(GameEvent::Fire);
                if let Err(err) = self.projectiles.fire(origin) {
                    log::debug!("Shot dropped: {err}");
                }
            }
        }

        if self.state.is_playing() {
            self.projectiles.update(dt);
        }

        let pose = self.ship.pose();
        report.hazards = self.hazards.update(
            dt,
            &pose,
            &mut self.projectiles,
            &mut self.state,
            &mut self.events,
        );
        report.pickups = self
            .pickups
            .update(dt, &pose, &mut self.state, &mut self.events);

        if self.auto_ramp {
            self.ramp.advance(dt, &mut self.state);
        }

        self.note_status(before);
        self.trim_events();
        report
    }

    /// Number of events waiting to be drained
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Take this frame's events
    ///
    /// At most `MAX_PENDING_EVENTS` are held between drains; when a host
    /// falls behind, the oldest are discarded first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn ship(&self) -> &ShipController {
        &self.ship
    }

    pub fn projectiles(&self) -> &ProjectileSystem {
        &self.projectiles
    }

    pub fn projectiles_mut(&mut self) -> &mut ProjectileSystem {
        &mut self.projectiles
    }

    pub fn hazards(&self) -> &HazardField {
        &self.hazards
    }

    pub fn hazards_mut(&mut self) -> &mut HazardField {
        &mut self.hazards
    }

    pub fn pickups(&self) -> &PickupField {
        &self.pickups
    }

    pub fn pickups_mut(&mut self) -> &mut PickupField {
        &mut self.pickups
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Read-only view of the current frame
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            ship: self.ship.pose(),
            projectiles: self
                .projectiles
                .iter_active()
                .map(|s| ProjectileView {
                    id: s.id(),
                    position: s.item.position,
                })
                .collect(),
            hazards: self
                .hazards
                .iter()
                .map(|s| HazardView {
                    position: s.item.position,
                    kind: s.item.kind,
                    scale: s.item.scale,
                    rotation: s.item.rotation,
                })
                .collect(),
            pickups: self
                .pickups
                .iter()
                .map(|s| PickupView {
                    position: s.item.position,
                    kind: s.item.kind,
                    rotation: s.item.rotation,
                })
                .collect(),
            session: SessionSnapshot::from(&self.state),
        }
    }
}
