//! Seeded corruption of valid metadata blocks

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Copy of `data` with a few bytes overwritten, and sometimes cut short
///
/// The same seed always produces the same mutation.
pub fn mutate(data: &[u8], seed: u64) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = data.to_vec();
    if out.is_empty() {
        return out;
    }

    let flips = rng.gen_range(1..=8);
    for _ in 0..flips {
        let at = rng.gen_range(0..out.len());
        // Offsets and counts live in the first bytes of a word; favour
        // values that point past the end
        out[at] = if rng.gen_bool(0.5) { 0xFF } else { rng.r#gen() };
    }
    if rng.gen_bool(0.2) {
        let keep = rng.gen_range(0..out.len());
        out.truncate(keep);
    }
    out
}

/// Every prefix of `data`, shortest first
pub fn truncations(data: &[u8]) -> impl Iterator<Item = &[u8]> {
    (0..=data.len()).map(move |n| &data[..n])
}
