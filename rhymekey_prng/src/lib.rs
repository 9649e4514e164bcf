// Seedable pseudo-random number generator for passphrase selection.
//
// xoshiro256++ (Blackman & Vigna, 2019), expanded from a `u64` seed with
// SplitMix64 or filled directly from operating system entropy. Every random
// decision in `rhymekey_lang` (anchor permutation, per-role picks) draws from
// a `PhraseRng` passed in by the caller, so a seeded run reproduces the same
// passphrase on every platform.
//
// On top of the raw generator this crate provides the three sampling
// primitives the selector needs: a bias-free bounded integer
// (`range_usize`), a Fisher-Yates `shuffle`, and uniform `choose`. The
// entropy estimates reported by the composer assume these are exactly
// uniform, so none of them may take shortcuts like plain modulo reduction.

use serde::{Deserialize, Serialize};

/// xoshiro256++ state. Cheap to clone; cloning forks an identical stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseRng {
    s: [u64; 4],
}

impl PhraseRng {
    /// Create a generator from a `u64` seed.
    ///
    /// Two generators built from the same seed yield identical sequences.
    /// Intended for tests and reproducible demo output; real passphrases
    /// should come from [`PhraseRng::from_entropy`].
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        let mut s = [0u64; 4];
        for word in &mut s {
            *word = splitmix64(&mut sm);
        }
        Self { s }
    }

    /// Create a generator whose full 256-bit state comes from the OS.
    pub fn from_entropy() -> Result<Self, getrandom::Error> {
        let mut bytes = [0u8; 32];
        getrandom::getrandom(&mut bytes)?;
        let mut s = [0u64; 4];
        for (word, chunk) in s.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *word = u64::from_le_bytes(buf);
        }
        // xoshiro is stuck at zero forever from an all-zero state.
        if s.iter().all(|&w| w == 0) {
            return Ok(Self::new(0));
        }
        Ok(Self { s })
    }

    /// Next raw `u64`.
    pub fn next_u64(&mut self) -> u64 {
        let result = self.s[0]
            .wrapping_add(self.s[3])
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

    /// Uniform `f64` in [0, 1) built from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `[low, high)` via rejection sampling.
    ///
    /// Panics if `low >= high`.
    pub fn range_u64(&mut self, low: u64, high: u64) -> u64 {
        assert!(low < high, "range_u64: low must be less than high");
        let span = high - low;
        if span.is_power_of_two() {
            return low + (self.next_u64() & (span - 1));
        }
        // Values below `zone` would make some residues more likely.
        let zone = span.wrapping_neg() % span;
        loop {
            let r = self.next_u64();
            if r >= zone {
                return low + r % span;
            }
        }
    }

    /// Uniform `usize` in `[low, high)`. Panics if `low >= high`.
    pub fn range_usize(&mut self, low: usize, high: usize) -> usize {
        self.range_u64(low as u64, high as u64) as usize
    }

    /// In-place Fisher-Yates shuffle. Every permutation is equally likely,
    /// including those that leave elements where they started.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.range_usize(0, i + 1);
            items.swap(i, j);
        }
    }

    /// A uniformly shuffled `0..n`.
    pub fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..n).collect();
        self.shuffle(&mut order);
        order
    }

    /// Uniform pick from `items`, or `None` when empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.range_usize(0, items.len());
        items.get(idx)
    }
}

/// SplitMix64 step, used only to expand a `u64` seed into xoshiro state.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = PhraseRng::new(7);
        let mut b = PhraseRng::new(7);
        for _ in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = PhraseRng::new(7);
        let mut b = PhraseRng::new(8);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn from_entropy_produces_live_state() {
        let mut rng = PhraseRng::from_entropy().unwrap();
        let first = rng.next_u64();
        let second = rng.next_u64();
        // A stuck generator would repeat zero.
        assert!(first != 0 || second != 0);
    }

    #[test]
    fn f64_in_unit_range() {
        let mut rng = PhraseRng::new(12345);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "f64 out of range: {v}");
        }
    }

    #[test]
    fn range_usize_within_bounds() {
        let mut rng = PhraseRng::new(555);
        for _ in 0..10_000 {
            let v = rng.range_usize(5, 15);
            assert!((5..15).contains(&v), "range_usize out of range: {v}");
        }
    }

    #[test]
    fn range_usize_reaches_both_ends() {
        let mut rng = PhraseRng::new(3);
        let mut seen = [false; 3];
        for _ in 0..1000 {
            seen[rng.range_usize(0, 3)] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    #[should_panic(expected = "low must be less than high")]
    fn range_rejects_empty_interval() {
        PhraseRng::new(1).range_usize(4, 4);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = PhraseRng::new(99);
        let mut items: Vec<u32> = (0..50).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_can_leave_elements_in_place() {
        // A Sattolo-style shuffle never produces the identity on two
        // elements; Fisher-Yates does about half the time.
        let mut rng = PhraseRng::new(2024);
        let mut identity = 0;
        for _ in 0..1000 {
            let mut pair = [0, 1];
            rng.shuffle(&mut pair);
            if pair == [0, 1] {
                identity += 1;
            }
        }
        assert!(
            (400..600).contains(&identity),
            "expected ~500 identity shuffles, got {identity}"
        );
    }

    #[test]
    fn shuffle_covers_all_orderings_of_three() {
        let mut rng = PhraseRng::new(11);
        let mut counts = std::collections::BTreeMap::new();
        for _ in 0..6000 {
            let order = rng.permutation(3);
            *counts.entry(order).or_insert(0u32) += 1;
        }
        assert_eq!(counts.len(), 6);
        for (order, n) in counts {
            assert!((800..1200).contains(&n), "{order:?} drawn {n} times");
        }
    }

    #[test]
    fn shuffle_empty_and_single() {
        let mut rng = PhraseRng::new(0);
        let mut empty: [u8; 0] = [];
        rng.shuffle(&mut empty);
        let mut one = [42];
        rng.shuffle(&mut one);
        assert_eq!(one, [42]);
    }

    #[test]
    fn choose_reaches_last_element() {
        let mut rng = PhraseRng::new(5);
        let items = ["a", "b", "c"];
        let mut saw_last = false;
        for _ in 0..200 {
            if rng.choose(&items) == Some(&"c") {
                saw_last = true;
                break;
            }
        }
        assert!(saw_last);
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = PhraseRng::new(5);
        let items: [u8; 0] = [];
        assert_eq!(rng.choose(&items), None);
    }

    #[test]
    fn serialization_preserves_stream() {
        let mut rng = PhraseRng::new(42);
        for _ in 0..100 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: PhraseRng = serde_json::from_str(&json).unwrap();
        for _ in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }
}
