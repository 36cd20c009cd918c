//! Per-pass texture slot table
//!
//! Maps small slot indices to texture handles for the duration of one pass,
//! letting multiple distinct textures participate in a single draw call.
//! Slot 0 permanently holds the placeholder texture; slots 1..31 are assigned
//! on first use and cleared at every flush. Assignment is append-only within
//! a pass; deduplication is a linear scan over at most 31 entries.

use crate::render::api::TextureId;
use crate::render::sprite::MAX_TEXTURE_SLOTS;

/// Slot index the placeholder texture permanently occupies
pub(crate) const PLACEHOLDER_SLOT: u32 = 0;

/// Fixed-capacity texture slot table for one pass
#[derive(Debug)]
pub(crate) struct TextureSlots {
    slots: [Option<TextureId>; MAX_TEXTURE_SLOTS],
    next_free: usize,
}

impl TextureSlots {
    /// Create a table with `placeholder` installed in slot 0
    pub(crate) fn new(placeholder: TextureId) -> Self {
        let mut slots = [None; MAX_TEXTURE_SLOTS];
        slots[PLACEHOLDER_SLOT as usize] = Some(placeholder);
        Self {
            slots,
            next_free: 1,
        }
    }

    /// Whether every slot is occupied and the next assignment would overflow
    pub(crate) fn is_full(&self) -> bool {
        self.next_free >= MAX_TEXTURE_SLOTS
    }

    /// Number of occupied slots, including the placeholder
    pub(crate) fn occupied_count(&self) -> usize {
        self.next_free
    }

    /// The texture occupying `slot`, if any
    pub(crate) fn get(&self, slot: usize) -> Option<TextureId> {
        self.slots.get(slot).copied().flatten()
    }

    /// Resolve a texture handle to its slot, assigning a new one on first use
    ///
    /// A handle appears in at most one slot at any time: repeated use within
    /// a pass reuses the slot found by the linear scan. Must not be called
    /// when the table is full.
    pub(crate) fn resolve(&mut self, texture: TextureId) -> u32 {
        for slot in 1..self.next_free {
            if self.slots[slot] == Some(texture) {
                return slot as u32;
            }
        }

        debug_assert!(!self.is_full(), "texture slot table overflow");
        let slot = self.next_free;
        self.slots[slot] = Some(texture);
        self.next_free += 1;
        slot as u32
    }

    /// Clear the dynamic entries; the placeholder in slot 0 persists
    pub(crate) fn reset(&mut self) {
        for slot in &mut self.slots[1..] {
            *slot = None;
        }
        self.next_free = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_occupies_slot_zero() {
        let slots = TextureSlots::new(TextureId(9));
        assert_eq!(slots.get(0), Some(TextureId(9)));
        assert_eq!(slots.occupied_count(), 1);
        assert!(!slots.is_full());
    }

    #[test]
    fn repeated_handles_share_a_slot() {
        let mut slots = TextureSlots::new(TextureId(1));
        let first = slots.resolve(TextureId(42));
        let second = slots.resolve(TextureId(42));
        assert_eq!(first, second);
        assert_eq!(slots.occupied_count(), 2);
    }

    #[test]
    fn distinct_handles_append_in_order() {
        let mut slots = TextureSlots::new(TextureId(1));
        assert_eq!(slots.resolve(TextureId(10)), 1);
        assert_eq!(slots.resolve(TextureId(11)), 2);
        assert_eq!(slots.resolve(TextureId(12)), 3);
    }

    #[test]
    fn table_fills_after_31_distinct_handles() {
        let mut slots = TextureSlots::new(TextureId(1));
        for i in 0..31 {
            slots.resolve(TextureId(100 + i));
        }
        assert!(slots.is_full());
    }

    #[test]
    fn reset_keeps_the_placeholder() {
        let mut slots = TextureSlots::new(TextureId(7));
        slots.resolve(TextureId(50));
        slots.resolve(TextureId(51));

        slots.reset();

        assert_eq!(slots.occupied_count(), 1);
        assert_eq!(slots.get(0), Some(TextureId(7)));
        assert_eq!(slots.get(1), None);
        assert_eq!(slots.resolve(TextureId(52)), 1);
    }
}
