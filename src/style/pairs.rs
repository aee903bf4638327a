//! Bounded cache mapping resolved colors to backend color pair slots.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::backend::Backend;

use super::color::Color;

/// Upper bound on cached pairs, independent of what the backend offers.
pub const CACHE_CAPACITY: u16 = 128;

/// A backend color pair slot. Slot 0 is the terminal's default pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairId(pub u16);

impl PairId {
    /// The reserved default pair.
    pub const DEFAULT: PairId = PairId(0);
}

/// Allocates pair slots on demand and remembers them by color.
///
/// Slots are handed out in order starting at 1. Once the backend's limit (or
/// [`CACHE_CAPACITY`]) is reached, unknown colors fall back to
/// [`PairId::DEFAULT`] instead of failing.
#[derive(Debug)]
pub struct ColorPairs {
    lookup: HashMap<Color, PairId>,
    next: u16,
}

impl ColorPairs {
    pub fn new() -> Self {
        Self { lookup: HashMap::new(), next: 1 }
    }

    /// Number of registered pairs, not counting the default slot.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Slot for `color`, registering it with the backend on a miss.
    pub fn pair(&mut self, backend: &mut dyn Backend, color: Color) -> PairId {
        if color == Color::INHERIT {
            return PairId::DEFAULT;
        }
        if let Some(&pair) = self.lookup.get(&color) {
            return pair;
        }

        let limit = backend.max_color_pairs().min(CACHE_CAPACITY);
        if self.next >= limit {
            debug!(?color, limit, "color pairs exhausted, using default pair");
            return PairId::DEFAULT;
        }

        let pair = PairId(self.next);
        match backend.register_color_pair(pair, color) {
            Ok(()) => {
                self.next += 1;
                self.lookup.insert(color, pair);
                pair
            }
            Err(err) => {
                warn!(?color, %err, "backend refused color pair");
                PairId::DEFAULT
            }
        }
    }

    /// Forget every slot, e.g. after the backend was re-initialized.
    pub fn clear(&mut self) {
        self.lookup.clear();
        self.next = 1;
    }
}

impl Default for ColorPairs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::geometry::Size;
    use crate::style::Palette;

    fn backend(max_pairs: u16) -> HeadlessBackend {
        HeadlessBackend::new(Size::new(10, 4)).with_max_pairs(max_pairs)
    }

    #[test]
    fn hit_returns_same_slot() {
        let mut be = backend(16);
        let mut pairs = ColorPairs::new();
        let red = Color::new(Palette::Red, Palette::Black);
        let first = pairs.pair(&mut be, red);
        assert_eq!(first, PairId(1));
        assert_eq!(pairs.pair(&mut be, red), first);
        assert_eq!(pairs.len(), 1);
        assert_eq!(be.pair_color(first), Some(red));
    }

    #[test]
    fn misses_allocate_in_order() {
        let mut be = backend(16);
        let mut pairs = ColorPairs::new();
        let a = pairs.pair(&mut be, Color::new(Palette::Red, Palette::Black));
        let b = pairs.pair(&mut be, Color::new(Palette::Green, Palette::Black));
        assert_eq!((a, b), (PairId(1), PairId(2)));
    }

    #[test]
    fn fully_default_color_uses_slot_zero() {
        let mut be = backend(16);
        let mut pairs = ColorPairs::new();
        assert_eq!(pairs.pair(&mut be, Color::INHERIT), PairId::DEFAULT);
        assert!(pairs.is_empty());
    }

    #[test]
    fn exhaustion_degrades_to_default() {
        let mut be = backend(3);
        let mut pairs = ColorPairs::new();
        assert_eq!(pairs.pair(&mut be, Color::fg(Palette::Red)), PairId(1));
        assert_eq!(pairs.pair(&mut be, Color::fg(Palette::Blue)), PairId(2));
        assert_eq!(pairs.pair(&mut be, Color::fg(Palette::Cyan)), PairId::DEFAULT);
        // Cached entries still resolve after exhaustion.
        assert_eq!(pairs.pair(&mut be, Color::fg(Palette::Red)), PairId(1));
    }

    #[test]
    fn registration_failure_degrades_to_default() {
        let mut be = backend(16).failing_pairs();
        let mut pairs = ColorPairs::new();
        assert_eq!(pairs.pair(&mut be, Color::fg(Palette::Red)), PairId::DEFAULT);
        assert!(pairs.is_empty());
    }

    #[test]
    fn clear_restarts_allocation() {
        let mut be = backend(16);
        let mut pairs = ColorPairs::new();
        pairs.pair(&mut be, Color::fg(Palette::Red));
        pairs.clear();
        assert_eq!(pairs.pair(&mut be, Color::fg(Palette::Blue)), PairId(1));
    }
}
