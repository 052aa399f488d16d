//! Actor name generation.
//!
//! Names are purely cosmetic. The world calls [`NameGenerator::generate`]
//! exactly once per created actor and never relies on uniqueness.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Source of display names for new actors.
pub trait NameGenerator: Send {
    /// Produce a non-empty display name.
    fn generate(&mut self) -> String;
}

// -----------------------------------------------------------------------
// Name pool
// -----------------------------------------------------------------------

const ADJECTIVES: &[&str] = &[
    "Amber", "Brisk", "Calm", "Dusky", "Eager", "Fallow", "Gentle", "Hollow",
    "Idle", "Jagged", "Keen", "Lanky", "Mossy", "Nimble", "Odd", "Pale",
    "Quiet", "Rusty", "Sly", "Tawny", "Umber", "Vivid", "Wary", "Young",
];

const CREATURES: &[&str] = &[
    "Badger", "Crane", "Dormouse", "Egret", "Ferret", "Gecko", "Heron", "Ibis",
    "Jackal", "Kestrel", "Lemming", "Marten", "Newt", "Otter", "Plover", "Quail",
    "Raven", "Stoat", "Tern", "Vole", "Weasel", "Wren",
];

/// Picks "Adjective Creature" pairs from a built-in pool.
///
/// Once every pair has been handed out, names get a numbered suffix so they
/// stay distinguishable in logs.
#[derive(Debug)]
pub struct PoolNameGenerator {
    rng: StdRng,
    issued: u64,
}

impl PoolNameGenerator {
    /// Create a generator with a fixed seed for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            issued: 0,
        }
    }

    fn pool_size() -> u64 {
        let pairs = ADJECTIVES.len().saturating_mul(CREATURES.len());
        u64::try_from(pairs).unwrap_or(u64::MAX)
    }
}

impl NameGenerator for PoolNameGenerator {
    fn generate(&mut self) -> String {
        let adjective = ADJECTIVES
            .get(self.rng.random_range(0..ADJECTIVES.len()))
            .copied()
            .unwrap_or("Nameless");
        let creature = CREATURES
            .get(self.rng.random_range(0..CREATURES.len()))
            .copied()
            .unwrap_or("One");

        let round = self.issued.checked_div(Self::pool_size()).unwrap_or(0);
        self.issued = self.issued.saturating_add(1);

        if round == 0 {
            format!("{adjective} {creature}")
        } else {
            format!("{adjective} {creature} {}", round.saturating_add(1))
        }
    }
}

/// Deterministic names: `"<prefix> 0"`, `"<prefix> 1"`, ...
///
/// Used where logs or tests need predictable output.
#[derive(Debug, Clone)]
pub struct SequentialNames {
    prefix: String,
    next: u64,
}

impl SequentialNames {
    /// Create a sequence starting at 0.
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
            next: 0,
        }
    }
}

impl Default for SequentialNames {
    fn default() -> Self {
        Self::new("Actor")
    }
}

impl NameGenerator for SequentialNames {
    fn generate(&mut self) -> String {
        let name = format!("{} {}", self.prefix, self.next);
        self.next = self.next.saturating_add(1);
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_names_are_two_words() {
        let mut names = PoolNameGenerator::seeded(42);
        for _ in 0..50 {
            let name = names.generate();
            assert_eq!(name.split(' ').count(), 2, "unexpected name {name}");
        }
    }

    #[test]
    fn same_seed_same_names() {
        let mut a = PoolNameGenerator::seeded(7);
        let mut b = PoolNameGenerator::seeded(7);
        for _ in 0..10 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn exhausted_pool_adds_suffix() {
        let mut names = PoolNameGenerator::seeded(1);
        let pool = usize::try_from(PoolNameGenerator::pool_size()).unwrap_or(usize::MAX);
        for _ in 0..pool {
            let _ = names.generate();
        }
        assert!(names.generate().ends_with(" 2"));
    }

    #[test]
    fn sequential_names_count_up() {
        let mut names = SequentialNames::new("Test");
        assert_eq!(names.generate(), "Test 0");
        assert_eq!(names.generate(), "Test 1");
    }
}
