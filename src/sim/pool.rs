//! Fixed-capacity entity pools
//!
//! Slots are allocated once and recycled forever. Acquisition scans for the
//! first dead slot, so the lowest free index always wins and iteration is in
//! stable slot order.

use glam::Vec2;

/// Reference to one pooled entity
///
/// Carries the slot generation at spawn time; once the slot is respawned the
/// old handle is stale and every pool operation treats it as dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle {
    index: u32,
    generation: u32,
}

impl EntityHandle {
    #[inline]
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

/// One pooled slot
#[derive(Debug, Clone)]
pub struct Entity<T> {
    pub pos: Vec2,
    pub data: T,
    alive: bool,
    generation: u32,
}

impl<T> Entity<T> {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark dead in place (for use inside [`EntityPool::for_each_alive`])
    #[inline]
    pub fn kill(&mut self) {
        self.alive = false;
    }
}

/// Bounded registry of reusable entities of one kind
#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    slots: Vec<Entity<T>>,
}

impl<T: Default> EntityPool<T> {
    /// Allocate `capacity` dormant slots
    pub fn new(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| Entity {
                pos: Vec2::ZERO,
                data: T::default(),
                alive: false,
                generation: 0,
            })
            .collect();
        Self { slots }
    }
}

impl<T> EntityPool<T> {
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn alive_count(&self) -> usize {
        self.slots.iter().filter(|s| s.alive).count()
    }

    pub fn is_exhausted(&self) -> bool {
        self.slots.iter().all(|s| s.alive)
    }

    /// First dormant slot in slot order, without marking it alive
    pub fn acquire_dormant(&self) -> Option<EntityHandle> {
        self.slots
            .iter()
            .position(|s| !s.alive)
            .map(|i| EntityHandle {
                index: i as u32,
                generation: self.slots[i].generation,
            })
    }

    /// Reset a dormant slot and bring it to life
    ///
    /// Returns the fresh handle, or `None` if the slot is already alive or the
    /// handle does not name a slot in this pool.
    pub fn spawn(&mut self, handle: EntityHandle, pos: Vec2, data: T) -> Option<EntityHandle> {
        let slot = self.slots.get_mut(handle.index())?;
        if slot.alive {
            return None;
        }
        slot.generation = slot.generation.wrapping_add(1);
        slot.pos = pos;
        slot.data = data;
        slot.alive = true;
        Some(EntityHandle {
            index: handle.index,
            generation: slot.generation,
        })
    }

    /// Acquire and spawn in one step
    pub fn try_spawn(&mut self, pos: Vec2, data: T) -> Option<EntityHandle> {
        let handle = self.acquire_dormant()?;
        self.spawn(handle, pos, data)
    }

    /// Mark dead. Returns `false` if it was already dead or the handle is stale.
    pub fn release(&mut self, handle: EntityHandle) -> bool {
        match self.slots.get_mut(handle.index()) {
            Some(slot) if slot.alive && slot.generation == handle.generation => {
                slot.alive = false;
                true
            }
            _ => false,
        }
    }

    pub fn is_alive(&self, handle: EntityHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Live entity behind `handle`
    pub fn get(&self, handle: EntityHandle) -> Option<&Entity<T>> {
        self.slots
            .get(handle.index())
            .filter(|s| s.alive && s.generation == handle.generation)
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity<T>> {
        self.slots
            .get_mut(handle.index())
            .filter(|s| s.alive && s.generation == handle.generation)
    }

    /// Handle of the live entity in slot `index`
    pub fn handle_at(&self, index: usize) -> Option<EntityHandle> {
        self.slots.get(index).filter(|s| s.alive).map(|s| EntityHandle {
            index: index as u32,
            generation: s.generation,
        })
    }

    /// Visit live slots in slot order
    ///
    /// Liveness is checked as each slot is reached, so `f` may kill the slot
    /// it is visiting.
    pub fn for_each_alive(&mut self, mut f: impl FnMut(EntityHandle, &mut Entity<T>)) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if !slot.alive {
                continue;
            }
            let handle = EntityHandle {
                index: i as u32,
                generation: slot.generation,
            };
            f(handle, slot);
        }
    }

    /// Read-only view of live entities, for rendering
    pub fn iter_alive(&self) -> impl Iterator<Item = (EntityHandle, &Entity<T>)> + '_ {
        self.slots.iter().enumerate().filter(|(_, s)| s.alive).map(|(i, s)| {
            (
                EntityHandle {
                    index: i as u32,
                    generation: s.generation,
                },
                s,
            )
        })
    }
}
