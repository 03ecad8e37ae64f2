// Portable pseudo-random number generation for Storyloom illustrations.
//
// Implements xoshiro256++ (Blackman & Vigna, 2019) with SplitMix64 seeding,
// plus the `RandomSource` capability that the illustration composers draw
// from. Composers never reach for a global RNG: every random draw (decoration
// position, canopy radius, building height) goes through a `RandomSource`
// passed in by the caller.
//
// Two sources ship with this crate:
// - `ArtRng`: the production generator. Seed it explicitly for reproducible
//   output, or from OS entropy via `ArtRng::from_entropy()` when the caller
//   doesn't care (the default for one-off story illustrations).
// - `FixedSequence`: replays a fixed list of unit values in a cycle, so tests
//   can assert exact coordinates.
//
// **Constraint: portability.** Given the same seed, `ArtRng` produces the same
// `u64` stream on every platform. The float helpers are derived from that
// stream with exact integer-to-float conversions.

use serde::{Deserialize, Serialize};

/// A source of uniform draws in `[0, 1)`.
///
/// The default methods derive ranged values and index picks from
/// `next_unit`, so an implementation only has to supply that one method.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[low, high)`. Returns `low` when the range is empty.
    fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        low + self.next_unit() * (high - low)
    }

    /// Uniform index in `[0, len)`.
    ///
    /// Panics if `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "pick_index: len must be positive");
        let idx = (self.next_unit() * len as f64) as usize;
        idx.min(len - 1)
    }
}

/// Xoshiro256++ PRNG, the production random source.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArtRng {
    s: [u64; 4],
}

impl ArtRng {
    /// Create a new PRNG seeded from a `u64`.
    ///
    /// Uses SplitMix64 to expand the seed into the 256-bit internal state.
    /// Two `ArtRng` instances created with the same seed will produce
    /// identical output sequences.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Create a PRNG seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Generate a uniform `f64` in [0, 1).
    ///
    /// Uses the upper 53 bits of a `u64` to fill the mantissa of an f64.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Derive an independent child generator for one unit of work.
    ///
    /// Batch rendering hands each story its own stream so results do not
    /// depend on which worker thread picks the story up.
    pub fn fork(seed: u64, stream: u64) -> Self {
        let mut sm = seed ^ stream.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self::new(splitmix64(&mut sm))
    }
}

impl RandomSource for ArtRng {
    fn next_unit(&mut self) -> f64 {
        self.next_f64()
    }
}

/// Replays a fixed list of unit values, wrapping around at the end.
///
/// Values are clamped into `[0, 1)`. An empty sequence always yields `0.0`.
#[derive(Clone, Debug, Default)]
pub struct FixedSequence {
    values: Vec<f64>,
    pos: usize,
}

impl FixedSequence {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            pos: 0,
        }
    }

    /// A source that returns the same value forever.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl RandomSource for FixedSequence {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            self.pos += 1;
            return 0.0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// SplitMix64, used only for seeding xoshiro256++ from a single `u64`.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
