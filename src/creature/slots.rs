//! Sparse arena storage
//!
//! `Slots<T>` maps a part's slot index to its data. Holes are `None`.
//! Liveness is the allocator's business; storage only checks generation
//! on the way in via the id it was given.

use super::id::PartId;

#[derive(Debug)]
pub struct Slots<T> {
    data: Vec<Option<(u32, T)>>,
}

impl<T> Slots<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    fn ensure_capacity(&mut self, index: usize) {
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
    }

    /// Replaces anything already in the slot.
    pub fn insert(&mut self, id: PartId, value: T) {
        let idx = id.index() as usize;
        self.ensure_capacity(idx);
        self.data[idx] = Some((id.generation(), value));
    }

    pub fn remove(&mut self, id: PartId) -> Option<T> {
        let idx = id.index() as usize;
        match self.data.get(idx) {
            Some(Some((generation, _))) if *generation == id.generation() => {
                self.data[idx].take().map(|(_, value)| value)
            }
            _ => None,
        }
    }

    pub fn get(&self, id: PartId) -> Option<&T> {
        match self.data.get(id.index() as usize) {
            Some(Some((generation, value))) if *generation == id.generation() => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: PartId) -> Option<&mut T> {
        match self.data.get_mut(id.index() as usize) {
            Some(Some((generation, value))) if *generation == id.generation() => Some(value),
            _ => None,
        }
    }

    pub fn contains(&self, id: PartId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate over all (id, value) pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (PartId, &T)> {
        self.data.iter().enumerate().filter_map(|(idx, slot)| {
            slot.as_ref()
                .map(|(generation, value)| (PartId::new(idx as u32, *generation), value))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PartId, &mut T)> {
        self.data.iter_mut().enumerate().filter_map(|(idx, slot)| {
            slot.as_mut()
                .map(|(generation, value)| (PartId::new(idx as u32, *generation), value))
        })
    }

    pub fn count(&self) -> usize {
        self.data.iter().filter(|slot| slot.is_some()).count()
    }
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut slots: Slots<i32> = Slots::new();
        let id = PartId::new(5, 0);

        slots.insert(id, 42);
        assert_eq!(slots.get(id), Some(&42));
        assert!(slots.contains(id));
        assert!(!slots.contains(PartId::new(2, 0)));
    }

    #[test]
    fn test_stale_generation_misses() {
        let mut slots: Slots<&str> = Slots::new();
        slots.insert(PartId::new(1, 3), "limb");

        assert_eq!(slots.get(PartId::new(1, 2)), None);
        assert_eq!(slots.remove(PartId::new(1, 2)), None);
        assert_eq!(slots.remove(PartId::new(1, 3)), Some("limb"));
        assert_eq!(slots.count(), 0);
    }

    #[test]
    fn test_iteration() {
        let mut slots: Slots<&str> = Slots::new();
        slots.insert(PartId::new(0, 0), "zero");
        slots.insert(PartId::new(4, 1), "four");

        let items: Vec<_> = slots.iter().collect();
        assert_eq!(items, vec![(PartId::new(0, 0), &"zero"), (PartId::new(4, 1), &"four")]);
    }
}
