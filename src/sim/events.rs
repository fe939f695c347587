//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use super::hazard::HazardKind;
use super::pickup::PickupKind;
use super::state::GameStatus;

/// Discrete cues raised during a frame
///
/// The core never waits on consumers; hosts drain the queue once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Shot fired (raised even when the projectile pool is full)
    Fire,
    /// A hazard struck the ship and the shield absorbed it
    ShipHitShielded,
    /// A hazard struck the unshielded ship
    ShipHitLethal,
    /// A projectile destroyed a hazard
    HazardDestroyed { kind: HazardKind },
    /// The ship collected a pickup
    PickupCollected { kind: PickupKind },
    /// Session status changed
    StatusChanged { status: GameStatus },
}
