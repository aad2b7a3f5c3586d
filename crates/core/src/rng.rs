//! RNG module - injectable source of shape identifiers
//!
//! The engine never calls a global random function. It draws from a
//! [`ShapeSource`], so a game can be replayed from a seed and tests can feed
//! exact sequences.
//!
//! - [`SimpleRng`]: deterministic LCG drawing uniformly over the catalog
//! - [`SequenceSource`]: cycles through a fixed list (scripted scenarios)

use crate::types::ShapeKind;

/// Capability returning the next shape family to queue
pub trait ShapeSource {
    fn next_kind(&mut self) -> ShapeKind;
}

impl<S: ShapeSource + ?Sized> ShapeSource for &mut S {
    fn next_kind(&mut self) -> ShapeKind {
        (**self).next_kind()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state (restarting from it reproduces the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ShapeSource for SimpleRng {
    fn next_kind(&mut self) -> ShapeKind {
        let idx = self.next_range(ShapeKind::ALL.len() as u32) as usize;
        ShapeKind::ALL[idx]
    }
}

/// Deterministic source that repeats a fixed sequence forever
#[derive(Debug, Clone)]
pub struct SequenceSource {
    kinds: Vec<ShapeKind>,
    index: usize,
}

impl SequenceSource {
    /// Returns `None` for an empty sequence.
    pub fn new(kinds: impl Into<Vec<ShapeKind>>) -> Option<Self> {
        let kinds = kinds.into();
        if kinds.is_empty() {
            return None;
        }
        Some(Self { kinds, index: 0 })
    }

    /// Number of draws served so far
    pub fn draws(&self) -> usize {
        self.index
    }
}

impl ShapeSource for SequenceSource {
    fn next_kind(&mut self) -> ShapeKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index += 1;
        kind
    }
}
