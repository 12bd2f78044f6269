//! RNG module - seeded random source for dealing the deck
//!
//! A 64-bit LCG is enough for shuffling: its period is far larger than the
//! number of orderings of a 16-card deck, so every deal is reachable. Range
//! draws use rejection sampling, which keeps the Fisher-Yates shuffle unbiased.

/// Simple 64-bit LCG (Knuth MMIX constants)
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate next random u32 (high half of the state, the low bits of an
    /// LCG have short periods)
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        (self.state >> 32) as u32
    }

    /// Uniform value in `[0, bound)`.
    ///
    /// Draws falling in the final partial block of the u32 range are rejected
    /// so that every residue is equally likely.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "next_below bound must be positive");
        let zone = u32::MAX - (u32::MAX % bound);
        loop {
            let v = self.next_u32();
            if v < zone {
                return v % bound;
            }
        }
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_below((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
