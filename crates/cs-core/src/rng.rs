//! Session-level RNG.
//!
//! The bridge needs very little randomness: a display colour per spawned Sim-B
//! entity and the choice of Sim-A player start.  Both come from one seeded
//! `SmallRng` so a session replayed with the same seed looks the same in both
//! GUIs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// An opaque RGBA display colour.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Deterministic RNG for one bridge session.
///
/// Used only from the loop's thread.  Components that need their own stream
/// (e.g. the Sim-A and Sim-B adapters) take a [`child`][Self::child].
pub struct SessionRng(SmallRng);

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        SessionRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent stream keyed by `offset`.
    pub fn child(&mut self, offset: u64) -> SessionRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SessionRng(SmallRng::seed_from_u64(child_seed))
    }

    /// A random fully opaque colour.
    pub fn color(&mut self) -> Rgba {
        Rgba::opaque(self.0.r#gen(), self.0.r#gen(), self.0.r#gen())
    }

    /// Uniform index in `0..n`.  Returns `None` when `n == 0`.
    pub fn pick_index(&mut self, n: usize) -> Option<usize> {
        (n > 0).then(|| self.0.gen_range(0..n))
    }
}
