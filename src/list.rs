//! # Self-Organizing List
//!
//! A bounded, thread-safe list of keyed entries that reorders itself after
//! each lookup according to the active [`Strategy`], approximating optimal
//! access locality without full statistics.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                   SelfOrganizingList<K>                      │
//!   │                                                              │
//!   │   ┌────────────────────────────────────────────────────────┐ │
//!   │   │                RwLock<ListInner<K>>                    │ │
//!   │   │                                                        │ │
//!   │   │   FxHashMap<K, SlotId>      Chain<K>                   │ │
//!   │   │   (presence index)          head ──► [C]──►[B]──►[A]   │ │
//!   │   │                                                        │ │
//!   │   │   Strategy (swappable)      tick (logical clock)       │ │
//!   │   └────────────────────────────────────────────────────────┘ │
//!   │                                                              │
//!   │   MetricsRecorder (own mutex, reports bypass the list lock)  │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking
//!
//! | Operation                | Lock  | Why                                |
//! |--------------------------|-------|------------------------------------|
//! | `insert` / `load_all`    | Write | Chain + index mutation             |
//! | `search`                 | Write | Touches access metadata, reorders  |
//! | `set_strategy` / `clear` | Write | Policy / full-state mutation       |
//! | `to_ordered_sequence`    | Read  | Pure snapshot                      |
//! | `to_diagnostic_text`     | Read  | Pure snapshot                      |
//! | `len` / `is_empty` / `strategy_name` | Read | Pure reads            |
//! | `report` / `recent_operations` | None | Recorder has its own mutex  |
//!
//! `search` is logically a write: even a pure lookup bumps the matched
//! node's access counter and may reorganize the chain. There is no
//! lock-free path and no operation yields mid-traversal, so lock hold time
//! is proportional to chain length. That linear contention ceiling is a
//! documented property of the design, not a defect.
//!
//! ## Capacity and eviction
//!
//! Capacity is fixed at construction. When `insert` finds the list full it
//! evicts the globally least-recently-accessed node first: one head-to-tail
//! scan seeded with the head's own timestamp, replacing the candidate only
//! on strictly smaller values, so the first minimum in chain order wins
//! ties and the head itself remains evictable. Eviction is the capacity
//! mechanism, never a failure.
//!
//! ## Example
//!
//! ```
//! use solcache::list::SelfOrganizingList;
//! use solcache::strategy::Strategy;
//!
//! let list = SelfOrganizingList::new(3, Strategy::MoveToFront).unwrap();
//! list.insert(1);
//! list.insert(2);
//! list.insert(3);
//! assert_eq!(list.to_ordered_sequence(), vec![3, 2, 1]);
//!
//! let result = list.search(1);
//! assert!(result.found);
//! assert_eq!(result.access_cost, 4);
//! assert_eq!(list.to_ordered_sequence(), vec![1, 3, 2]);
//!
//! let report = list.report();
//! assert_eq!(report.hits, 1);
//! ```

use std::fmt::Debug;
use std::hash::Hash;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::{Chain, SlotId};
use crate::error::ConfigError;
use crate::metrics::{MetricsRecorder, PerformanceReport};
use crate::strategy::Strategy;

/// Outcome of a single [`search`](SelfOrganizingList::search).
///
/// Produced fresh per call; not retained by the list.
#[derive(Debug, Clone)]
pub struct SearchResult<K> {
    /// The matched key, or `None` on a miss.
    pub key: Option<K>,
    pub found: bool,
    /// Traversal steps taken to reach the match or exhaust the chain.
    pub access_cost: usize,
    pub elapsed: Duration,
    /// The strategy's description of the reorganization performed.
    pub operation: String,
}

/// Everything guarded by the list's exclusive lock.
#[derive(Debug)]
struct ListInner<K> {
    chain: Chain<K>,
    index: FxHashMap<K, SlotId>,
    strategy: Strategy,
    /// Monotonic logical clock; advanced on every insert and touch.
    tick: u64,
}

impl<K> ListInner<K> {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

/// Thread-safe self-organizing list with pluggable reorganization
/// strategies and built-in metrics.
#[derive(Debug)]
pub struct SelfOrganizingList<K>
where
    K: Copy + Eq + Hash,
{
    inner: RwLock<ListInner<K>>,
    metrics: MetricsRecorder,
    capacity: usize,
}

impl<K> SelfOrganizingList<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates a list with the given capacity bound and initial strategy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `capacity` is zero.
    pub fn new(capacity: usize, strategy: Strategy) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be > 0"));
        }
        Ok(Self {
            inner: RwLock::new(ListInner {
                chain: Chain::with_capacity(capacity),
                index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
                strategy,
                tick: 0,
            }),
            metrics: MetricsRecorder::new(),
            capacity,
        })
    }

    /// Inserts `key` at the head, evicting the least-recently-accessed
    /// node first when at capacity.
    ///
    /// Returns `false` without mutating anything when the key is already
    /// present.
    pub fn insert(&self, key: K) -> bool {
        let mut guard = self.inner.write();
        Self::insert_locked(&mut guard, &self.metrics, self.capacity, key)
    }

    /// Searches for `key`, reorganizing the chain through the active
    /// strategy on a hit.
    ///
    /// The head probe counts as the first step even when it matches; a
    /// match deeper in the chain pays the head probe plus the full scan up
    /// to its position. An empty list answers immediately with cost 0.
    pub fn search(&self, key: K) -> SearchResult<K> {
        let start = Instant::now();
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        if inner.chain.is_empty() {
            let elapsed = start.elapsed();
            self.metrics.record_miss(elapsed);
            return SearchResult {
                key: None,
                found: false,
                access_cost: 0,
                elapsed,
                operation: "Empty list".to_string(),
            };
        }

        let head = inner
            .chain
            .head()
            .expect("non-empty chain has a head");
        let mut access_cost = 1usize;

        if *inner.chain.node(head).key() == key {
            let now = inner.next_tick();
            inner.chain.touch(head, now);
            let operation = inner.strategy.reorganize(&mut inner.chain, None, head);
            let elapsed = start.elapsed();
            self.metrics.record_hit(access_cost, elapsed);
            return SearchResult {
                key: Some(key),
                found: true,
                access_cost,
                elapsed,
                operation,
            };
        }

        // General scan; re-counts from the head, so a match at 1-based
        // position p costs p + 1 and a miss costs len + 1.
        let mut prev: Option<SlotId> = None;
        let mut current = Some(head);
        while let Some(id) = current {
            access_cost += 1;
            if *inner.chain.node(id).key() == key {
                let now = inner.next_tick();
                inner.chain.touch(id, now);
                let operation = inner.strategy.reorganize(&mut inner.chain, prev, id);
                #[cfg(debug_assertions)]
                inner
                    .chain
                    .check_invariants()
                    .expect("reorganization must preserve chain invariants");
                let elapsed = start.elapsed();
                self.metrics.record_hit(access_cost, elapsed);
                return SearchResult {
                    key: Some(key),
                    found: true,
                    access_cost,
                    elapsed,
                    operation,
                };
            }
            prev = Some(id);
            current = inner.chain.next(id);
        }

        let elapsed = start.elapsed();
        self.metrics.record_miss(elapsed);
        SearchResult {
            key: None,
            found: false,
            access_cost,
            elapsed,
            operation: "Element not found".to_string(),
        }
    }

    /// Inserts every key in sequence under one lock acquisition, then
    /// records a single bulk-load event sized to the offered count.
    ///
    /// Duplicates are silently skipped; eviction may trigger mid-sequence.
    pub fn load_all(&self, keys: &[K]) {
        let mut guard = self.inner.write();
        for &key in keys {
            Self::insert_locked(&mut guard, &self.metrics, self.capacity, key);
        }
        self.metrics.record_bulk_load(keys.len());
    }

    /// Replaces the active strategy; takes effect on the next search.
    ///
    /// The chain is not re-sorted: after running MTF/LRU, Frequency-Count
    /// may find an order inconsistent with descending counts. Preserved as
    /// an intentional approximation.
    pub fn set_strategy(&self, strategy: Strategy) {
        let mut guard = self.inner.write();
        guard.strategy = strategy;
        self.metrics.record_strategy_change(strategy.name());
    }

    /// Drops the entire chain and index and resets metrics to zero state.
    pub fn clear(&self) {
        let mut guard = self.inner.write();
        guard.chain.clear();
        guard.index.clear();
        guard.tick = 0;
        self.metrics.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().chain.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn strategy_name(&self) -> &'static str {
        self.inner.read().strategy.name()
    }

    /// Snapshot of the current chain order, head first.
    pub fn to_ordered_sequence(&self) -> Vec<K> {
        let guard = self.inner.read();
        guard.chain.iter().map(|(_, node)| *node.key()).collect()
    }

    /// Point-in-time metrics report; does not take the list lock.
    pub fn report(&self) -> PerformanceReport {
        self.metrics.report()
    }

    /// The newest `count` operation labels, oldest first.
    pub fn recent_operations(&self, count: usize) -> Vec<String> {
        self.metrics.recent_operations(count)
    }

    // -- internals --------------------------------------------------------

    fn insert_locked(
        inner: &mut ListInner<K>,
        metrics: &MetricsRecorder,
        capacity: usize,
        key: K,
    ) -> bool {
        if inner.index.contains_key(&key) {
            return false;
        }

        if inner.chain.len() >= capacity {
            Self::evict_lru(inner, metrics);
        }

        let now = inner.next_tick();
        let id = inner.chain.push_front(key, now);
        inner.index.insert(key, id);

        #[cfg(debug_assertions)]
        {
            inner
                .chain
                .check_invariants()
                .expect("insert must preserve chain invariants");
            debug_assert_eq!(inner.chain.len(), inner.index.len());
        }

        metrics.record_insertion();
        true
    }

    /// Evicts the node with the smallest last-accessed tick.
    ///
    /// Seeds the candidate with the head and replaces it only on strictly
    /// smaller values, so earlier-in-chain nodes win ties and the head
    /// stays eligible.
    fn evict_lru(inner: &mut ListInner<K>, metrics: &MetricsRecorder) {
        let Some(head) = inner.chain.head() else {
            return;
        };

        let mut victim = head;
        let mut victim_prev: Option<SlotId> = None;
        let mut oldest = inner.chain.node(head).last_accessed();

        let mut prev = head;
        let mut current = inner.chain.next(head);
        while let Some(id) = current {
            let ts = inner.chain.node(id).last_accessed();
            if ts < oldest {
                oldest = ts;
                victim = id;
                victim_prev = Some(prev);
            }
            prev = id;
            current = inner.chain.next(id);
        }

        let node = inner.chain.remove(victim_prev, victim);
        inner.index.remove(&node.key);
        metrics.record_eviction();
    }
}

impl<K> SelfOrganizingList<K>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Diagnostic snapshot: chain order with per-node access counts and
    /// the current hit rate.
    pub fn to_diagnostic_text(&self) -> String {
        let guard = self.inner.read();
        let mut out = String::from("SelfOrganizingList {\n");
        out.push_str(&format!("  Strategy: {}\n", guard.strategy.name()));
        out.push_str(&format!(
            "  Size: {}/{}\n",
            guard.chain.len(),
            self.capacity
        ));
        out.push_str("  Elements:\n");
        for (position, (_, node)) in guard.chain.iter().enumerate() {
            out.push_str(&format!(
                "    [{}] {:?} (accesses: {}, last tick: {})\n",
                position,
                node.key(),
                node.access_count(),
                node.last_accessed()
            ));
        }
        out.push_str(&format!(
            "  Performance: {:.2}% hit rate\n",
            self.metrics.hit_rate()
        ));
        out.push('}');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        let err = SelfOrganizingList::<u64>::new(0, Strategy::MoveToFront).unwrap_err();
        assert!(err.to_string().contains("capacity"));
    }

    #[test]
    fn duplicate_insert_returns_false_and_mutates_nothing() {
        let list = SelfOrganizingList::new(3, Strategy::MoveToFront).unwrap();
        assert!(list.insert(1));
        assert!(list.insert(2));
        let before = list.to_ordered_sequence();

        assert!(!list.insert(1));
        assert_eq!(list.to_ordered_sequence(), before);
        assert_eq!(list.len(), 2);
        assert_eq!(list.report().insertions, 2);
    }

    #[test]
    fn search_costs_match_position_accounting() {
        let list = SelfOrganizingList::new(3, Strategy::Transpose).unwrap();
        list.insert(1);
        list.insert(2);
        list.insert(3);

        // Head match costs exactly one step.
        assert_eq!(list.search(3).access_cost, 1);
        // [3, 2, 1] again after the head no-op; a miss pays len + 1.
        assert_eq!(list.search(99).access_cost, 4);
    }

    #[test]
    fn head_match_reports_strategy_noop() {
        let list = SelfOrganizingList::new(2, Strategy::MoveToFront).unwrap();
        list.insert(1);
        let result = list.search(1);
        assert!(result.found);
        assert_eq!(result.operation, "Already at front");
    }

    #[test]
    fn eviction_keeps_size_at_capacity() {
        let list = SelfOrganizingList::new(2, Strategy::Lru).unwrap();
        for key in 0..10u64 {
            assert!(list.insert(key));
            assert!(list.len() <= 2);
        }
        assert_eq!(list.len(), 2);
        assert_eq!(list.report().evictions, 8);
    }

    #[test]
    fn searched_nodes_survive_eviction() {
        let list = SelfOrganizingList::new(3, Strategy::Lru).unwrap();
        list.insert(1);
        list.insert(2);
        list.insert(3);
        // Refresh 1 and 2; key 3 becomes the global LRU.
        assert!(list.search(1).found);
        assert!(list.search(2).found);

        list.insert(4);
        let order = list.to_ordered_sequence();
        assert!(!order.contains(&3));
        assert!(order.contains(&1) && order.contains(&2) && order.contains(&4));
    }

    #[test]
    fn load_all_skips_duplicates_and_records_offered_count() {
        let list = SelfOrganizingList::new(10, Strategy::MoveToFront).unwrap();
        list.insert(1);
        list.load_all(&[1, 2, 3, 2]);

        assert_eq!(list.len(), 3);
        let report = list.report();
        // 1 direct insert + 2 fresh bulk inserts + the offered count of 4.
        assert_eq!(report.insertions, 7);
        assert_eq!(report.operation_counts.get("BULK_LOAD"), Some(&1));
    }

    #[test]
    fn set_strategy_takes_effect_on_next_search() {
        let list = SelfOrganizingList::new(3, Strategy::MoveToFront).unwrap();
        list.insert(1);
        list.insert(2);
        list.insert(3);

        list.set_strategy(Strategy::Transpose);
        assert_eq!(list.strategy_name(), "Transpose");
        let result = list.search(1);
        assert_eq!(result.operation, "Transposed with predecessor");
        assert_eq!(list.to_ordered_sequence(), vec![3, 1, 2]);
        assert_eq!(list.report().strategy_changes, 1);
    }

    #[test]
    fn clear_resets_list_and_metrics() {
        let list = SelfOrganizingList::new(3, Strategy::MoveToFront).unwrap();
        list.load_all(&[1, 2, 3]);
        list.search(1);
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.to_ordered_sequence(), Vec::<u64>::new());
        let report = list.report();
        assert_eq!(report.total_searches, 0);
        assert_eq!(report.insertions, 0);
    }

    #[test]
    fn diagnostic_text_shows_strategy_and_elements() {
        let list = SelfOrganizingList::new(3, Strategy::FrequencyCount).unwrap();
        list.insert(7);
        list.search(7);

        let text = list.to_diagnostic_text();
        assert!(text.contains("Strategy: Frequency Count"));
        assert!(text.contains("Size: 1/3"));
        assert!(text.contains("accesses: 1"));
        assert!(text.contains("100.00% hit rate"));
    }

    #[test]
    fn capacity_and_accessors() {
        let list = SelfOrganizingList::<u64>::new(5, Strategy::Lru).unwrap();
        assert_eq!(list.capacity(), 5);
        assert!(list.is_empty());
        assert_eq!(list.strategy_name(), "LRU (Least Recently Used)");
    }
}
