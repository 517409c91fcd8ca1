//! 64-slot color history. Encoder and decoder each build their own and keep
//! them in lockstep through the opcode stream.

use crate::pixel::Rgba;

pub(crate) const CACHE_SLOTS: usize = 64;

/// Per-call color cache. Zeroed on creation; collisions overwrite.
pub(crate) struct ColorCache {
    slots: [Rgba; CACHE_SLOTS],
}

impl ColorCache {
    pub fn new() -> Self {
        Self {
            slots: [Rgba::default(); CACHE_SLOTS],
        }
    }

    /// Returns `(slot, true)` if `px` already sits in its slot, otherwise
    /// stores it there and returns `(slot, false)`.
    #[inline]
    pub fn lookup_or_insert(&mut self, px: Rgba) -> (usize, bool) {
        let slot = px.hash();
        if self.slots[slot] == px {
            (slot, true)
        } else {
            self.slots[slot] = px;
            (slot, false)
        }
    }

    #[inline]
    pub fn get(&self, slot: usize) -> Rgba {
        self.slots[slot % CACHE_SLOTS]
    }

    #[inline]
    pub fn store(&mut self, px: Rgba) {
        self.slots[px.hash()] = px;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_then_hit() {
        let mut cache = ColorCache::new();
        let px = Rgba::new(10, 20, 30, 255);
        let (slot, hit) = cache.lookup_or_insert(px);
        assert!(!hit);
        assert_eq!(slot, px.hash());
        assert_eq!(cache.lookup_or_insert(px), (slot, true));
    }

    #[test]
    fn collision_overwrites() {
        let mut cache = ColorCache::new();
        let a = Rgba::new(1, 1, 1, 1);
        let b = Rgba::new(65, 1, 1, 1); // +192 ≡ 0 mod 64
        assert_eq!(a.hash(), b.hash());
        cache.lookup_or_insert(a);
        assert_eq!(cache.lookup_or_insert(b), (a.hash(), false));
        assert_eq!(cache.get(a.hash()), b);
        assert_eq!(cache.lookup_or_insert(a), (a.hash(), false));
    }

    #[test]
    fn zeroed_cache_hits_transparent_black() {
        let mut cache = ColorCache::new();
        assert_eq!(cache.lookup_or_insert(Rgba::new(0, 0, 0, 0)), (0, true));
    }
}
