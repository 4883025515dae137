//! RNG module - 7-bag piece generation.
//!
//! The bag holds a full shuffled permutation of the seven piece kinds and
//! is refilled exactly when it empties - never partially - so every window
//! between bag boundaries contains each kind exactly once.
//!
//! A small LCG keeps draws deterministic for a given seed.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG.
/// Uses constants from Numerical Recipes.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Avoid a 0 seed, which would produce all zeros.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[0, max)`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Shuffle-without-replacement generator over the seven piece kinds.
#[derive(Debug, Clone)]
pub struct SevenBag {
    bag: [PieceKind; 7],
    /// Next draw position; 7 means the bag is exhausted.
    next: usize,
    rng: SimpleRng,
}

impl SevenBag {
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            bag: PieceKind::ALL,
            next: 7,
            rng: SimpleRng::new(seed),
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.next = 0;
    }

    /// Pop the front of the bag, refilling with a fresh permutation first
    /// iff the bag is empty.
    pub fn draw(&mut self) -> PieceKind {
        if self.next >= self.bag.len() {
            self.refill();
        }
        let kind = self.bag[self.next];
        self.next += 1;
        kind
    }

    /// Kinds still in the current bag.
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.next..]
    }

    /// Current RNG state, usable as a seed for a replay.
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for SevenBag {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut a = SimpleRng::new(12345);
        let mut b = SimpleRng::new(12345);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_bag_draws_each_kind_once() {
        let mut bag = SevenBag::new(7);
        let mut drawn = Vec::new();
        for _ in 0..7 {
            drawn.push(bag.draw());
        }
        for kind in PieceKind::ALL {
            assert_eq!(drawn.iter().filter(|&&k| k == kind).count(), 1, "{:?}", kind);
        }
    }

    #[test]
    fn test_bag_refills_only_when_empty() {
        let mut bag = SevenBag::new(3);
        for expected_left in (0..7).rev() {
            bag.draw();
            assert_eq!(bag.remaining().len(), expected_left);
        }
        // Next draw triggers the refill.
        bag.draw();
        assert_eq!(bag.remaining().len(), 6);
    }

    #[test]
    fn test_consecutive_bags_are_both_fair() {
        let mut bag = SevenBag::new(99);
        for _ in 0..3 {
            let window: Vec<PieceKind> = (0..7).map(|_| bag.draw()).collect();
            for kind in PieceKind::ALL {
                assert_eq!(window.iter().filter(|&&k| k == kind).count(), 1);
            }
        }
    }
}
