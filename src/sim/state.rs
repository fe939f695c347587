//! Session state and its transitions
//!
//! One `SessionState` exists per simulation. Fields read it every frame and
//! change it only through the methods below.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::SPEED_FLOOR;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Title screen; ship idles, fields frozen
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run ended; positions frozen
    GameOver,
}

/// Score, speed and shield for the current session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    score: u64,
    speed: f32,
    shield_active: bool,
    status: GameStatus,
    /// Bumped on every entry into Playing or Menu; fields reseed when it changes
    session_id: u64,
    /// Speed restored by start/reset
    start_speed: f32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl SessionState {
    pub fn new(start_speed: f32) -> Self {
        let start_speed = start_speed.max(SPEED_FLOOR);
        Self {
            score: 0,
            speed: start_speed,
            shield_active: false,
            status: GameStatus::Menu,
            session_id: 0,
            start_speed,
        }
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn shield_active(&self) -> bool {
        self.shield_active
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    fn reset_run(&mut self) {
        self.score = 0;
        self.speed = self.start_speed;
        self.shield_active = false;
        self.session_id += 1;
    }

    /// Begin a fresh run from any state
    ///
    /// Calling it while already playing restarts cleanly.
    pub fn start_game(&mut self) {
        self.reset_run();
        self.status = GameStatus::Playing;
        log::info!("Session {} started", self.session_id);
    }

    /// End the current run. Returns false (and does nothing) unless playing.
    pub fn end_game(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            log::warn!("end_game ignored in {:?}", self.status);
            return false;
        }
        self.status = GameStatus::GameOver;
        log::info!(
            "Session {} over: score {}, speed {:.1}",
            self.session_id,
            self.score,
            self.speed
        );
        true
    }

    /// Return to the menu with a full reset
    pub fn reset_game(&mut self) {
        self.reset_run();
        self.status = GameStatus::Menu;
        log::info!("Back to menu (session {})", self.session_id);
    }

    pub fn increase_score(&mut self, amount: u64) {
        self.score = self.score.saturating_add(amount);
    }

    /// Add (or with a negative amount, remove) speed, never below the floor
    pub fn increase_speed(&mut self, amount: f32) {
        self.speed = (self.speed + amount).max(SPEED_FLOOR);
    }

    pub fn activate_shield(&mut self) {
        self.shield_active = true;
    }

    pub fn deactivate_shield(&mut self) {
        self.shield_active = false;
    }
}

/// Seed material for one field's spawn tables
///
/// Each field owns a stream; the session id picks the layout within it, so
/// a given seed always lays out session N the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64, stream: u64) -> Self {
        Self { seed, stream }
    }

    /// Fresh generator for `session_id`
    pub fn to_rng(&self, session_id: u64) -> Pcg32 {
        let state = self
            .seed
            .wrapping_add(session_id.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Pcg32::new(state, self.stream)
    }
}

/// Periodic difficulty increase while playing
///
/// Independent of the frame tick: hosts may drive it from its own timer, or
/// let the simulation loop advance it with frame time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyRamp {
    interval: f32,
    step: f32,
    elapsed: f32,
}

impl DifficultyRamp {
    pub fn new(interval: f32, step: f32) -> Self {
        Self {
            interval,
            step,
            elapsed: 0.0,
        }
    }

    /// Restart the interval (on session change)
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Apply one step immediately
    pub fn fire(&self, state: &mut SessionState) {
        if state.is_playing() {
            state.increase_speed(self.step);
        }
    }

    /// Advance the timer; returns how many steps were applied
    pub fn advance(&mut self, dt: f32, state: &mut SessionState) -> u32 {
        if !state.is_playing() || self.interval <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut steps = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            state.increase_speed(self.step);
            steps += 1;
        }
        if steps > 0 {
            log::debug!("Difficulty ramp: speed now {:.1}", state.speed());
        }
        steps
    }
}
