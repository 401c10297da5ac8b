//! Entity identifiers and allocation.
//!
//! An [`EntityId`] packs an index and a generation counter into one `u64`.
//! Despawning bumps the slot's generation, so any handle issued before the
//! despawn stops matching and reads through it miss instead of aliasing
//! whatever entity later reuses the index. The physics core depends on this
//! for its weak back-references: a `Shadow` or `Follower` keeps its owner's
//! `EntityId` across frames, and the owner may die at any time.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

// ---------------------------------------------------------------------------
// EntityId
// ---------------------------------------------------------------------------

/// A generational entity handle.
///
/// The low 32 bits are the slot index, the high 32 bits the generation the
/// slot had when this handle was issued. Two handles with equal indices but
/// different generations name different entity lifetimes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Assemble a handle from its parts.
    #[inline]
    pub fn new(index: u32, generation: u32) -> Self {
        Self((generation as u64) << 32 | index as u64)
    }

    /// Slot index (low 32 bits).
    #[inline]
    pub fn index(self) -> u32 {
        self.0 as u32
    }

    /// Generation at issue time (high 32 bits).
    #[inline]
    pub fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// The packed `u64`, for hosts that persist handles.
    #[inline]
    pub fn to_raw(self) -> u64 {
        self.0
    }

    /// Rebuild a handle from [`to_raw`](Self::to_raw) output.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({}v{})", self.index(), self.generation())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index(), self.generation())
    }
}

// ---------------------------------------------------------------------------
// EntityAllocator
// ---------------------------------------------------------------------------

/// Per-index lifecycle state.
#[derive(Debug, Clone, Copy)]
struct Slot {
    /// Generation a handle must carry to match this slot.
    generation: u32,
    /// Whether the slot currently backs a live entity.
    alive: bool,
}

/// Issues and recycles [`EntityId`]s.
///
/// Freed indices queue up FIFO and are handed out oldest-first, so a given
/// index rests as long as possible before reuse and generation churn spreads
/// across the slot table instead of hammering one index.
#[derive(Debug)]
pub struct EntityAllocator {
    slots: Vec<Slot>,
    free_queue: VecDeque<u32>,
    live: usize,
}

impl EntityAllocator {
    /// An allocator with no entities.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_queue: VecDeque::new(),
            live: 0,
        }
    }

    /// Issue a live [`EntityId`], recycling the oldest freed slot if one
    /// exists and growing the slot table otherwise.
    pub fn allocate(&mut self) -> EntityId {
        self.live += 1;
        match self.free_queue.pop_front() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.alive = true;
                // Generation was already bumped when the slot was freed.
                EntityId::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    alive: true,
                });
                EntityId::new(index, 0)
            }
        }
    }

    /// Retire an entity. The slot's generation advances immediately, so every
    /// outstanding copy of `id` (shadow owners, follower owners) turns stale
    /// in the same moment.
    ///
    /// Returns `false` without touching anything if `id` is already stale,
    /// already dead, or was never issued.
    pub fn deallocate(&mut self, id: EntityId) -> bool {
        let Some(slot) = self.slots.get_mut(id.index() as usize) else {
            return false;
        };
        if !slot.alive || slot.generation != id.generation() {
            return false;
        }
        slot.alive = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_queue.push_back(id.index());
        self.live -= 1;
        true
    }

    /// Whether `id` names a currently live entity (index in range, slot
    /// alive, generation unmoved since issue).
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.slots
            .get(id.index() as usize)
            .is_some_and(|slot| slot.alive && slot.generation == id.generation())
    }

    /// Number of live entities. Constant-time; the count is maintained on
    /// allocate/deallocate rather than derived from the slot table.
    pub fn alive_count(&self) -> usize {
        self.live
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
