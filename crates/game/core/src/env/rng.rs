//! RNG oracle for deterministic random number generation.
//!
//! Spawn rolls (template picks, scatter offsets) must replay identically
//! from the match seed. Implementations are stateless functions of the seed
//! they are handed; the engine derives a fresh seed per roll with
//! [`compute_seed`].

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a random value in range `[min, max]` inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }

    /// Generate a random value in `[0, 1)`.
    fn unit(&self, seed: u64) -> f32 {
        self.next_u32(seed) as f32 / (u32::MAX as f32 + 1.0)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG is a family of simple, fast, space-efficient RNGs with excellent
/// statistical quality. This implementation uses PCG-XSH-RR, which produces
/// 32-bit output from 64-bit state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the PCG state by one LCG step.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute a deterministic per-roll seed from match state components.
///
/// # Arguments
///
/// * `game_seed` - Base seed fixed at match start (for replay/determinism)
/// * `nonce` - Tick counter, so repeated rolls by the same source diverge
/// * `source_id` - Entity or spawner making the roll
/// * `context` - Distinguishes multiple independent rolls in one tick
///   (`0` template pick, `1` scatter angle, `2` scatter distance, ...)
pub fn compute_seed(game_seed: u64, nonce: u64, source_id: u32, context: u32) -> u64 {
    // Mix all inputs using simple hash combiners; the constants come from
    // SplitMix64 and MurmurHash3 finalizers.
    let mut hash = game_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (source_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
