//! Player projectiles
//!
//! A fixed pool of bolts travelling toward -z. Hazards scan the pool and
//! release bolts that hit them, so the pool is exposed mutably to the field.

use glam::Vec3;

use super::pool::{EntityPool, Slot};
use crate::error::SimError;
use crate::tuning::Tuning;

/// A projectile's payload; `id` and `active` live on the pool slot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Projectile {
    pub position: Vec3,
}

pub struct ProjectileSystem {
    pool: EntityPool<Projectile>,
    speed: f32,
    cull_depth: f32,
    spawn_offset: f32,
}

impl ProjectileSystem {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pool: EntityPool::new(tuning.projectile_pool_size),
            speed: tuning.projectile_speed,
            cull_depth: tuning.projectile_cull_depth,
            spawn_offset: tuning.projectile_spawn_offset,
        }
    }

    /// Spawn a projectile just ahead of `origin`
    ///
    /// Cooldown is the ship's job. Fails only when every slot is in flight.
    pub fn fire(&mut self, origin: Vec3) -> Result<u32, SimError> {
        let offset = self.spawn_offset;
        let slot = self.pool.acquire()?;
        slot.item.position = origin - Vec3::Z * offset;
        Ok(slot.id())
    }

    /// Move every active projectile and retire those past the cull plane
    pub fn update(&mut self, dt: f32) {
        let step = self.speed * dt;
        for slot in self.pool.iter_active_mut() {
            slot.item.position.z -= step;
            if slot.item.position.z < self.cull_depth {
                slot.release();
            }
        }
    }

    /// Retire every projectile (session change)
    pub fn clear(&mut self) {
        self.pool.release_all();
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Slot<Projectile>> {
        self.pool.iter_active()
    }

    /// Scan for hit tests; releasing a slot removes it from the rest of the frame
    pub fn slots_mut(&mut self) -> impl Iterator<Item = &mut Slot<Projectile>> {
        self.pool.slots_mut()
    }

    pub fn get(&self, id: u32) -> Option<&Slot<Projectile>> {
        self.pool.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system(pool: usize) -> ProjectileSystem {
        let tuning = Tuning {
            projectile_pool_size: pool,
            ..Tuning::default()
        };
        ProjectileSystem::new(&tuning)
    }

    #[test]
    fn test_fire_spawns_ahead_of_ship() {
        let mut bolts = system(4);
        let id = bolts.fire(Vec3::new(1.0, 2.0, 0.0)).unwrap();
        let slot = bolts.get(id).unwrap();
        assert!(slot.is_active());
        assert_eq!(slot.item.position, Vec3::new(1.0, 2.0, -1.5));
    }

    #[test]
    fn test_update_moves_toward_negative_z() {
        let mut bolts = system(4);
        let id = bolts.fire(Vec3::ZERO).unwrap();
        bolts.update(0.5);
        let z = bolts.get(id).unwrap().item.position.z;
        assert!((z - (-61.5)).abs() < 1e-4);
    }

    #[test]
    fn test_cull_past_range() {
        let mut bolts = system(4);
        bolts.fire(Vec3::new(0.0, 0.0, -240.0)).unwrap();
        bolts.update(0.1);
        assert_eq!(bolts.active_count(), 0);
    }

    #[test]
    fn test_full_pool_is_an_error_for_callers_to_drop() {
        let mut bolts = system(2);
        bolts.fire(Vec3::ZERO).unwrap();
        bolts.fire(Vec3::ZERO).unwrap();
        assert!(matches!(
            bolts.fire(Vec3::ZERO),
            Err(SimError::PoolExhausted { capacity: 2 })
        ));
        assert_eq!(bolts.active_count(), 2);
    }

    #[test]
    fn test_retired_slot_is_reused() {
        let mut bolts = system(1);
        bolts.fire(Vec3::new(0.0, 0.0, -249.0)).unwrap();
        bolts.update(1.0);
        assert_eq!(bolts.active_count(), 0);
        let id = bolts.fire(Vec3::new(3.0, 0.0, 0.0)).unwrap();
        assert_eq!(id, 0);
        assert_eq!(bolts.get(0).unwrap().item.position.x, 3.0);
    }
}
