/// Seeded pseudo-random primitives: a 32-bit diffusion hash and a
/// linear-congruential generator.
///
/// Everything here is deterministic and NOT cryptographically secure. The
/// streams exist to make synthetic records reproducible, nothing more.

/// Avalanche-mix an integer into a well-distributed 32-bit value.
///
/// Defined over all of `i64` by truncating to the low 32 bits first, which
/// matches two's-complement `>>> 0` wraparound — negative inputs are valid
/// and map to the same value as their unsigned 32-bit representation.
pub fn hash32(x: i64) -> u32 {
    let mut x = x as u32;
    x = (x ^ (x >> 16)).wrapping_mul(0x7feb_352d);
    x = (x ^ (x >> 15)).wrapping_mul(0x846c_a68b);
    x ^ (x >> 16)
}

/// Linear-congruential generator: `state = state * 1664525 + 1013904223
/// (mod 2^32)`. Identical seed, identical sequence.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Lcg { state: seed }
    }

    /// Advance the state and return it. Every call yields the next value of
    /// the sequence; the raw 32-bit output is reduced by callers via `%`.
    pub fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }
}
