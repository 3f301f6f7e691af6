//! RNG module - random piece generation
//!
//! Every piece is an independent uniform pick among the seven kinds. A small
//! LCG keeps games reproducible from a seed; the same generator also feeds the
//! cosmetic effects in the terminal layer.

use crate::types::PieceKind;

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
    /// Draws from the high half; the low bits of an LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u32() >> 16) % max
    }

    /// Uniform float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform float in [lo, hi)
    pub fn next_f32_range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// Current internal state, usable as a seed to fork a generator
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
    seed: u32,
}

impl PieceGenerator {
    /// Create a new generator with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Pick the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
