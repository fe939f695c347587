//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied dt only, no wall clock
//! - Seeded RNG only (one stream per field)
//! - Stable iteration order (by slot id)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod events;
pub mod hazard;
pub mod pickup;
pub mod pool;
pub mod projectile;
pub mod ship;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{depth_gate, gated_contact, within_radius};
pub use events::GameEvent;
pub use hazard::{Hazard, HazardField, HazardKind, HazardReport};
pub use pickup::{Pickup, PickupField, PickupKind, PickupReport};
pub use pool::{EntityPool, Slot};
pub use projectile::{Projectile, ProjectileSystem};
pub use ship::{ShipController, ShipPose};
pub use snapshot::{FrameSnapshot, SessionSnapshot};
pub use state::{DifficultyRamp, GameStatus, RngState, SessionState};
pub use tick::{FrameReport, SimulationLoop, TickInput};
