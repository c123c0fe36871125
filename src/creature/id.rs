//! Generational part ids
//!
//! Every part of a creature lives in an arena slot. A `PartId` is the slot
//! index plus the slot's generation at allocation time, so an id held by
//! the edit session goes stale (instead of silently pointing at a new limb)
//! once its part is destroyed and the slot is reused.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartId {
    index: u32,
    generation: u32,
}

impl PartId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index, for arena access
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "part#{}v{}", self.index, self.generation)
    }
}

/// Hands out part ids and tracks which are alive.
///
/// Freed slots are reused LIFO with a bumped generation.
#[derive(Debug, Default)]
pub struct PartAllocator {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free_indices: Vec<u32>,
    alive_count: u32,
}

impl PartAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> PartId {
        self.alive_count += 1;

        if let Some(index) = self.free_indices.pop() {
            // Generation was already bumped on free
            self.alive[index as usize] = true;
            PartId::new(index, self.generations[index as usize])
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            self.alive.push(true);
            PartId::new(index, 0)
        }
    }

    /// Returns true if the id was alive and is now freed.
    pub fn free(&mut self, id: PartId) -> bool {
        if !self.is_alive(id) {
            return false;
        }

        let idx = id.index as usize;
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.alive[idx] = false;
        self.free_indices.push(id.index);
        self.alive_count -= 1;
        true
    }

    pub fn is_alive(&self, id: PartId) -> bool {
        let idx = id.index as usize;
        idx < self.generations.len() && self.alive[idx] && self.generations[idx] == id.generation
    }

    pub fn alive_count(&self) -> u32 {
        self.alive_count
    }
}
