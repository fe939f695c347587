//! Fixed-capacity entity pool
//!
//! Slots are allocated once and recycled forever. Nothing is created or
//! dropped during play; entities are switched on and off and their data is
//! overwritten in place.

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// One recyclable slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot<T> {
    id: u32,
    active: bool,
    pub item: T,
}

impl<T> Slot<T> {
    /// Stable index of this slot in its pool
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Deactivate this slot (safe to call mid-iteration)
    #[inline]
    pub fn release(&mut self) {
        self.active = false;
    }
}

/// A pre-sized pool of homogeneous slots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityPool<T> {
    slots: Vec<Slot<T>>,
}

impl<T: Default> EntityPool<T> {
    /// Create a pool with every slot inactive and default-initialised
    pub fn new(capacity: usize) -> Self {
        Self::with_fill(capacity, |_| T::default())
    }
}

impl<T> EntityPool<T> {
    /// Create a pool, building each slot's initial data from its id
    pub fn with_fill(capacity: usize, mut fill: impl FnMut(u32) -> T) -> Self {
        let slots = (0..capacity as u32)
            .map(|id| Slot {
                id,
                active: false,
                item: fill(id),
            })
            .collect();
        Self { slots }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    /// Activate the first inactive slot
    ///
    /// The returned slot keeps its previous data; the caller overwrites it.
    pub fn acquire(&mut self) -> Result<&mut Slot<T>, SimError> {
        let capacity = self.slots.len();
        let slot = self
            .slots
            .iter_mut()
            .find(|s| !s.active)
            .ok_or(SimError::PoolExhausted { capacity })?;
        slot.active = true;
        Ok(slot)
    }

    /// Deactivate a slot by id. Returns whether it was active.
    pub fn release(&mut self, id: u32) -> bool {
        match self.slots.get_mut(id as usize) {
            Some(slot) if slot.active => {
                slot.active = false;
                true
            }
            _ => false,
        }
    }

    /// Deactivate every slot
    pub fn release_all(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
    }

    pub fn get(&self, id: u32) -> Option<&Slot<T>> {
        self.slots.get(id as usize)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Slot<T>> {
        self.slots.get_mut(id as usize)
    }

    /// Active slots in stable id order
    pub fn iter_active(&self) -> impl Iterator<Item = &Slot<T>> {
        self.slots.iter().filter(|s| s.active)
    }

    /// Mutable scan over every slot in id order
    ///
    /// Yields inactive slots too, so a slot released earlier in the scan is
    /// visible as inactive to anything that checks later in the same pass.
    pub fn slots_mut(&mut self) -> impl Iterator<Item = &mut Slot<T>> {
        self.slots.iter_mut()
    }

    /// Mutable scan over active slots in id order
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut Slot<T>> {
        self.slots.iter_mut().filter(|s| s.active)
    }
}
