//! Uniform selection over a bounded list, injected wherever the rules need
//! chance (dealing the wolf role, breaking a final tie).

use std::fmt::Debug;
use std::sync::Mutex;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait RandomSource: Send + Sync + Debug {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick_index(&self, len: usize) -> usize;
}

/// Thread-local OS-seeded generator; the production source.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Reproducible sequence for tests and simulations.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&self, len: usize) -> usize {
        match self.rng.lock() {
            Ok(mut rng) => rng.random_range(0..len),
            // A poisoned lock still holds a usable generator
            Err(poisoned) => poisoned.into_inner().random_range(0..len),
        }
    }
}

/// Always picks the same position, clamped into range.
#[derive(Debug, Clone, Copy)]
pub struct FixedPick(pub usize);

impl RandomSource for FixedPick {
    fn pick_index(&self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

/// Picks one element of `items` through `source`.
pub fn choose<'a, T>(source: &dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(source.pick_index(items.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_random_is_reproducible() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);
        let xs: Vec<usize> = (0..16).map(|_| a.pick_index(7)).collect();
        let ys: Vec<usize> = (0..16).map(|_| b.pick_index(7)).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|&i| i < 7));
    }

    #[test]
    fn test_fixed_pick_clamps() {
        assert_eq!(FixedPick(5).pick_index(3), 2);
        assert_eq!(FixedPick(1).pick_index(3), 1);
    }

    #[test]
    fn test_choose_empty_is_none() {
        let empty: [i64; 0] = [];
        assert_eq!(choose(&ThreadRandom, &empty), None);
        assert_eq!(choose(&FixedPick(0), &[10, 20]), Some(&10));
    }
}
