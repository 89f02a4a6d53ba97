//! # Id Allocation
//!
//! Binding and group ids are opaque handles of the form `<prefix><suffix>`,
//! where the suffix is six random alphanumerics (`stepperA1b2C3`,
//! `multiComponentx9Yz0Q`). Ids never carry meaning and are not required to be
//! reproducible, so the randomness is pluggable: production code uses
//! [`RandomIds`], tests inject [`SeededIds`] to get stable output.
//!
//! Collision probability is negligible at session scale, but every allocation
//! still retries until the candidate is free.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SUFFIX_LEN: usize = 6;
pub const GROUP_PREFIX: &str = "multiComponent";
pub const FLOW_ID_LEN: usize = 5;

const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of random id characters.
pub trait IdSource {
    /// Returns `len` characters drawn from `alphabet`.
    fn pick(&mut self, alphabet: &[u8], len: usize) -> String;

    fn suffix(&mut self) -> String {
        self.pick(ALPHANUMERIC, SUFFIX_LEN)
    }

    /// Short lowercase id used for flows (`k3x9a`).
    fn flow_id(&mut self) -> String {
        self.pick(BASE36, FLOW_ID_LEN)
    }
}

/// Thread-local RNG backed ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn pick(&mut self, alphabet: &[u8], len: usize) -> String {
        sample(&mut rand::thread_rng(), alphabet, len)
    }
}

/// Deterministic ids for tests.
#[derive(Debug, Clone)]
pub struct SeededIds(StdRng);

impl SeededIds {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl IdSource for SeededIds {
    fn pick(&mut self, alphabet: &[u8], len: usize) -> String {
        sample(&mut self.0, alphabet, len)
    }
}

fn sample<R: Rng>(rng: &mut R, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

/// Allocates `<prefix><suffix>`, retrying until `is_taken` rejects nothing.
pub fn allocate(source: &mut dyn IdSource, prefix: &str, is_taken: impl Fn(&str) -> bool) -> String {
    loop {
        let candidate = format!("{}{}", prefix, source.suffix());
        if !is_taken(&candidate) {
            return candidate;
        }
    }
}

/// Returns `candidate` unchanged if it is free, otherwise `<candidate>_<suffix>`
/// for the first suffix that is.
pub fn ensure_unique(
    source: &mut dyn IdSource,
    candidate: &str,
    is_taken: impl Fn(&str) -> bool,
) -> String {
    if !is_taken(candidate) {
        return candidate.to_string();
    }
    loop {
        let renamed = format!("{}_{}", candidate, source.suffix());
        if !is_taken(&renamed) {
            return renamed;
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedIds;
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn allocated_ids_use_prefix_and_alphanumeric_suffix() {
        let mut ids = SeededIds::new(7);
        let id = allocate(&mut ids, "stepper", |_| false);
        let suffix = id.strip_prefix("stepper").unwrap();
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn allocate_retries_on_collision() {
        let mut ids = ScriptedIds::new(&["aaaaaa", "aaaaaa", "bbbbbb"]);
        let taken: HashSet<String> = ["seederaaaaaa".to_string()].into_iter().collect();
        let id = allocate(&mut ids, "seeder", |c| taken.contains(c));
        assert_eq!(id, "seederbbbbbb");
    }

    #[test]
    fn ensure_unique_keeps_free_candidates() {
        let mut ids = SeededIds::new(1);
        assert_eq!(ensure_unique(&mut ids, "x", |_| false), "x");
    }

    #[test]
    fn ensure_unique_appends_suffix_until_free() {
        let mut ids = ScriptedIds::new(&["dup001", "ok0002"]);
        let taken: HashSet<&str> = ["x", "x_dup001"].into_iter().collect();
        assert_eq!(ensure_unique(&mut ids, "x", |c| taken.contains(c)), "x_ok0002");
    }

    #[test]
    fn seeded_ids_are_reproducible() {
        let mut a = SeededIds::new(42);
        let mut b = SeededIds::new(42);
        assert_eq!(a.suffix(), b.suffix());
        assert_eq!(a.flow_id(), b.flow_id());
    }

    #[test]
    fn flow_ids_are_lowercase_base36() {
        let mut ids = SeededIds::new(3);
        let id = ids.flow_id();
        assert_eq!(id.len(), FLOW_ID_LEN);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}
