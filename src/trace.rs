//! Access-trace generation for benchmark and test drivers.
//!
//! Produces deterministic lookup-key streams without pulling in external
//! RNG crates. Consumers feed the resulting sequences into
//! [`SelfOrganizingList::search`](crate::list::SelfOrganizingList::search);
//! from the list's point of view a trace is an opaque producer of keys.
//!
//! | Pattern             | Shape                                          |
//! |---------------------|------------------------------------------------|
//! | `Random`            | Uniform over the key set                       |
//! | `Sequential`        | Cyclic scan in key-set order                   |
//! | `Zipfian`           | 80% of accesses to the first 20% of keys       |
//! | `TemporalLocality`  | 70% re-accesses of a 10-key recency window     |
//! | `Gaussian`          | Clustered around the middle of the key set     |

use std::collections::VecDeque;
use std::f64::consts::TAU;

/// Synthetic access-pattern families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessPattern {
    Random,
    Sequential,
    Zipfian,
    TemporalLocality,
    Gaussian,
}

impl AccessPattern {
    /// All patterns, in a stable order.
    pub const ALL: [AccessPattern; 5] = [
        AccessPattern::Random,
        AccessPattern::Sequential,
        AccessPattern::Zipfian,
        AccessPattern::TemporalLocality,
        AccessPattern::Gaussian,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AccessPattern::Random => "Random Uniform",
            AccessPattern::Sequential => "Sequential",
            AccessPattern::Zipfian => "Zipfian (80-20)",
            AccessPattern::TemporalLocality => "Temporal Locality",
            AccessPattern::Gaussian => "Gaussian",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AccessPattern::Random => "Equal probability for all elements",
            AccessPattern::Sequential => "Access elements in order",
            AccessPattern::Zipfian => "80% of accesses to 20% of elements",
            AccessPattern::TemporalLocality => "Recently accessed elements are more likely",
            AccessPattern::Gaussian => "Accesses cluster around a mean value",
        }
    }
}

impl std::fmt::Display for AccessPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// xorshift64 core; state must never be zero.
#[derive(Debug, Clone)]
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Standard normal via Box-Muller.
    fn next_gaussian(&mut self) -> f64 {
        let u1 = self.next_f64().max(f64::MIN_POSITIVE);
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    }
}

/// Seeded generator of key sets and lookup traces.
#[derive(Debug, Clone)]
pub struct TraceGenerator {
    rng: XorShift64,
}

impl TraceGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: XorShift64::new(seed),
        }
    }

    /// A seeded permutation of `1..=size`, for populating a list before
    /// replaying a trace against it.
    pub fn shuffled_keys(&mut self, size: usize) -> Vec<u64> {
        let mut keys: Vec<u64> = (1..=size as u64).collect();
        // Fisher-Yates
        for i in (1..keys.len()).rev() {
            let j = (self.rng.next_u64() % (i as u64 + 1)) as usize;
            keys.swap(i, j);
        }
        keys
    }

    /// Generates `count` lookup keys drawn from `keys` under `pattern`.
    pub fn sequence<K: Copy>(
        &mut self,
        keys: &[K],
        count: usize,
        pattern: AccessPattern,
    ) -> Vec<K> {
        if keys.is_empty() {
            return Vec::new();
        }
        match pattern {
            AccessPattern::Random => (0..count).map(|_| self.pick(keys)).collect(),
            AccessPattern::Sequential => {
                (0..count).map(|i| keys[i % keys.len()]).collect()
            }
            AccessPattern::Zipfian => self.zipfian(keys, count),
            AccessPattern::TemporalLocality => self.temporal(keys, count),
            AccessPattern::Gaussian => self.gaussian(keys, count),
        }
    }

    fn pick<K: Copy>(&mut self, keys: &[K]) -> K {
        keys[(self.rng.next_u64() % keys.len() as u64) as usize]
    }

    fn zipfian<K: Copy>(&mut self, keys: &[K], count: usize) -> Vec<K> {
        let hot_zone = (keys.len() / 5).max(1);
        (0..count)
            .map(|_| {
                if self.rng.next_f64() < 0.8 || hot_zone == keys.len() {
                    keys[(self.rng.next_u64() % hot_zone as u64) as usize]
                } else {
                    let cold = keys.len() - hot_zone;
                    keys[hot_zone + (self.rng.next_u64() % cold as u64) as usize]
                }
            })
            .collect()
    }

    fn temporal<K: Copy>(&mut self, keys: &[K], count: usize) -> Vec<K> {
        const WINDOW: usize = 10;
        let mut recent: VecDeque<K> = VecDeque::with_capacity(WINDOW);
        let mut sequence = Vec::with_capacity(count);
        for _ in 0..count {
            if !recent.is_empty() && self.rng.next_f64() < 0.7 {
                let idx = (self.rng.next_u64() % recent.len() as u64) as usize;
                sequence.push(recent[idx]);
            } else {
                let key = self.pick(keys);
                sequence.push(key);
                recent.push_back(key);
                if recent.len() > WINDOW {
                    recent.pop_front();
                }
            }
        }
        sequence
    }

    fn gaussian<K: Copy>(&mut self, keys: &[K], count: usize) -> Vec<K> {
        let mean = keys.len() as f64 / 2.0;
        let std_dev = keys.len() as f64 / 6.0;
        (0..count)
            .map(|_| loop {
                let index = (self.rng.next_gaussian() * std_dev + mean).floor();
                if index >= 0.0 && index < keys.len() as f64 {
                    break keys[index as usize];
                }
            })
            .collect()
    }
}
