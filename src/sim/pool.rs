//! Fixed-capacity entity pools
//!
//! Bullets, asteroids and debris bits live in arrays sized at compile time.
//! A slot is free when its entity reports inactive; allocation takes the
//! first free slot and yields `None` when every slot is in use. Callers drop
//! the spawn in that case, nothing is queued or grown.

use serde::{Deserialize, Serialize};

/// An entity that can occupy a pool slot
pub trait Slot: Copy + Default {
    /// Whether the slot is in use
    fn is_active(&self) -> bool;
    /// Mark the slot free
    fn release(&mut self);
}

/// Index of an allocated slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle(pub usize);

/// Fixed-capacity slot array
#[derive(Debug, Clone)]
pub struct Pool<T: Slot, const N: usize> {
    slots: [T; N],
}

impl<T: Slot, const N: usize> Default for Pool<T, N> {
    fn default() -> Self {
        Self {
            slots: [T::default(); N],
        }
    }
}

impl<T: Slot, const N: usize> Pool<T, N> {
    pub const CAPACITY: usize = N;

    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the first inactive slot, if any
    ///
    /// The claimed slot still holds its stale (inactive) entity; the caller
    /// is expected to overwrite it through [`Pool::get_mut`] or [`Pool::insert`].
    pub fn allocate(&mut self) -> Option<Handle> {
        self.slots.iter().position(|s| !s.is_active()).map(Handle)
    }

    /// Place `entity` in the first inactive slot
    pub fn insert(&mut self, entity: T) -> Option<Handle> {
        let handle = self.allocate()?;
        self.slots[handle.0] = entity;
        Some(handle)
    }

    pub fn release(&mut self, handle: Handle) {
        if let Some(slot) = self.slots.get_mut(handle.0) {
            slot.release();
        }
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots.get_mut(handle.0)
    }

    /// Active entries in index order (also draw order)
    pub fn iter_active(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_active())
            .map(|(i, s)| (Handle(i), s))
    }

    pub fn for_each_active<F>(&mut self, mut f: F)
    where
        F: FnMut(Handle, &mut T),
    {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_active() {
                f(Handle(i), slot);
            }
        }
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.release();
        }
    }

    /// Raw slot access, active or not
    pub fn slots(&self) -> &[T; N] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    struct Spark {
        timer: i32,
    }

    impl Slot for Spark {
        fn is_active(&self) -> bool {
            self.timer > 0
        }
        fn release(&mut self) {
            self.timer = 0;
        }
    }

    #[test]
    fn test_allocate_first_free_slot() {
        let mut pool: Pool<Spark, 3> = Pool::new();
        assert_eq!(pool.insert(Spark { timer: 5 }), Some(Handle(0)));
        assert_eq!(pool.insert(Spark { timer: 5 }), Some(Handle(1)));

        pool.release(Handle(0));
        assert_eq!(pool.allocate(), Some(Handle(0)));
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn test_exhausted_pool_drops_spawn() {
        let mut pool: Pool<Spark, 2> = Pool::new();
        pool.insert(Spark { timer: 1 });
        pool.insert(Spark { timer: 1 });
        assert_eq!(pool.insert(Spark { timer: 9 }), None);
        assert!(pool.iter_active().all(|(_, s)| s.timer == 1));
    }

    #[test]
    fn test_iterates_active_in_index_order() {
        let mut pool: Pool<Spark, 4> = Pool::new();
        for t in 1..=4 {
            pool.insert(Spark { timer: t });
        }
        pool.release(Handle(1));

        let order: Vec<usize> = pool.iter_active().map(|(h, _)| h.0).collect();
        assert_eq!(order, vec![0, 2, 3]);

        pool.for_each_active(|_, s| s.timer -= 1);
        // slot 0 dropped to zero and went inactive
        assert_eq!(pool.active_count(), 2);

        pool.clear();
        assert!(pool.is_empty());
    }
}
