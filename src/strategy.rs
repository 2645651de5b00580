//! Reorganization strategies for the self-organizing list.
//!
//! Each strategy decides how the chain is rewired after a successful lookup,
//! given the matched node and its immediate predecessor (none when the match
//! is the head). The policy set is fixed and exhaustive, so strategies are a
//! closed enum dispatched through a single `match` rather than a trait
//! object.
//!
//! | Strategy        | Rule                                         | Cost |
//! |-----------------|----------------------------------------------|------|
//! | `MoveToFront`   | Match becomes the new head                   | O(1) |
//! | `Transpose`     | Match swaps with its immediate predecessor   | O(1)*|
//! | `FrequencyCount`| Match relocates by descending access count   | O(n) |
//! | `Lru`           | Same mechanics as MTF, distinct label/intent | O(1) |
//!
//! *Transpose needs a second scan from the head to locate the predecessor's
//! own predecessor when the predecessor is not the head.
//!
//! Strategies never fail: a no-op (match already at the head) is a valid,
//! reported outcome. Strategies rewire links and the head handle only; the
//! key index is untouched because no node is created or destroyed.

use crate::ds::{Chain, SlotId};

/// A chain reorganization policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Moves the accessed node to the list head. Excellent for temporal
    /// locality.
    MoveToFront,
    /// Swaps the accessed node with its predecessor. Good for slowly
    /// shifting access patterns.
    Transpose,
    /// Keeps the chain ordered by descending access count. Best for skewed
    /// (80-20) distributions.
    FrequencyCount,
    /// Moves the accessed node to the head, like MTF; kept as a separately
    /// named policy for recency-oriented workloads.
    Lru,
}

impl Strategy {
    /// All strategies, in a stable order. Handy for benchmarks and sweeps.
    pub const ALL: [Strategy; 4] = [
        Strategy::MoveToFront,
        Strategy::Transpose,
        Strategy::FrequencyCount,
        Strategy::Lru,
    ];

    /// Human-readable strategy name.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::MoveToFront => "Move-to-Front (MTF)",
            Strategy::Transpose => "Transpose",
            Strategy::FrequencyCount => "Frequency Count",
            Strategy::Lru => "LRU (Least Recently Used)",
        }
    }

    /// One-line description of the policy.
    pub fn description(self) -> &'static str {
        match self {
            Strategy::MoveToFront => {
                "Moves accessed element to list head. Excellent for temporal locality."
            }
            Strategy::Transpose => {
                "Swaps accessed element with its predecessor. Good for sequential access."
            }
            Strategy::FrequencyCount => {
                "Orders elements by access frequency. Best for skewed distributions."
            }
            Strategy::Lru => "Moves accessed element to head. Simple LRU implementation.",
        }
    }

    /// Nominal time complexity of one reorganization.
    pub fn time_complexity(self) -> &'static str {
        match self {
            Strategy::FrequencyCount => "O(n)",
            _ => "O(1)",
        }
    }

    /// Rewires the chain after a hit on `current`, whose immediate
    /// predecessor is `prev` (`None` when `current` is the head).
    ///
    /// Returns a short description of the action taken.
    pub(crate) fn reorganize<K>(
        self,
        chain: &mut Chain<K>,
        prev: Option<SlotId>,
        current: SlotId,
    ) -> String {
        match self {
            Strategy::MoveToFront => match prev {
                Some(prev) => {
                    chain.detach_after(Some(prev), current);
                    chain.attach_front(current);
                    "Moved to front".to_string()
                }
                None => "Already at front".to_string(),
            },
            Strategy::Lru => match prev {
                Some(prev) => {
                    chain.detach_after(Some(prev), current);
                    chain.attach_front(current);
                    "Moved to head (LRU)".to_string()
                }
                None => "Already at head (LRU)".to_string(),
            },
            Strategy::Transpose => transpose(chain, prev, current),
            Strategy::FrequencyCount => frequency_count(chain, prev, current),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Swap `current` one position forward, past `prev`.
fn transpose<K>(chain: &mut Chain<K>, prev: Option<SlotId>, current: SlotId) -> String {
    let Some(prev) = prev else {
        return "Already at head (no transpose)".to_string();
    };

    if chain.head() == Some(prev) {
        // Current is the second node; it swaps into the head position.
        chain.detach_after(Some(prev), current);
        chain.attach_front(current);
        return "Transposed with head".to_string();
    }

    // General case: a second scan locates the predecessor's predecessor.
    match chain.find_prev(prev) {
        Some(prev_prev) => {
            chain.detach_after(Some(prev), current);
            chain.insert_after(prev_prev, current);
            "Transposed with predecessor".to_string()
        }
        None => "No transposition performed".to_string(),
    }
}

/// Relocate `current` so every node before it has a strictly greater access
/// count. A count equal to the head's promotes straight to the head.
fn frequency_count<K>(chain: &mut Chain<K>, prev: Option<SlotId>, current: SlotId) -> String {
    let Some(prev) = prev else {
        return "Already at head (frequency unchanged)".to_string();
    };

    let count = chain.node(current).access_count();
    chain.detach_after(Some(prev), current);

    let head = chain
        .head()
        .expect("chain keeps at least the former head after detaching a non-head node");
    if chain.node(head).access_count() <= count {
        chain.attach_front(current);
        return "Moved to head (higher frequency)".to_string();
    }

    // Walk past every strictly greater count; insert before the first <=.
    let mut anchor = head;
    let mut search = chain.next(head);
    while let Some(id) = search {
        if chain.node(id).access_count() <= count {
            break;
        }
        anchor = id;
        search = chain.next(id);
    }
    chain.insert_after(anchor, current);
    format!("Moved to position (frequency: {})", count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::Chain;

    fn keys(chain: &Chain<u64>) -> Vec<u64> {
        chain.iter().map(|(_, node)| *node.key()).collect()
    }

    /// Chain [3, 2, 1] with handles returned head-to-tail.
    fn chain_321() -> (Chain<u64>, [SlotId; 3]) {
        let mut chain = Chain::new();
        let a = chain.push_front(1, 1);
        let b = chain.push_front(2, 2);
        let c = chain.push_front(3, 3);
        (chain, [c, b, a])
    }

    #[test]
    fn mtf_moves_tail_to_front() {
        let (mut chain, [_, b, a]) = chain_321();
        let op = Strategy::MoveToFront.reorganize(&mut chain, Some(b), a);
        assert_eq!(op, "Moved to front");
        assert_eq!(keys(&chain), vec![1, 3, 2]);
        chain.check_invariants().unwrap();
    }

    #[test]
    fn mtf_head_is_noop() {
        let (mut chain, [c, ..]) = chain_321();
        let op = Strategy::MoveToFront.reorganize(&mut chain, None, c);
        assert_eq!(op, "Already at front");
        assert_eq!(keys(&chain), vec![3, 2, 1]);
    }

    #[test]
    fn lru_matches_mtf_mechanics() {
        let (mut chain, [_, b, a]) = chain_321();
        let op = Strategy::Lru.reorganize(&mut chain, Some(b), a);
        assert_eq!(op, "Moved to head (LRU)");
        assert_eq!(keys(&chain), vec![1, 3, 2]);
    }

    #[test]
    fn transpose_second_node_swaps_with_head() {
        let (mut chain, [c, b, _]) = chain_321();
        let op = Strategy::Transpose.reorganize(&mut chain, Some(c), b);
        assert_eq!(op, "Transposed with head");
        assert_eq!(keys(&chain), vec![2, 3, 1]);
        chain.check_invariants().unwrap();
    }

    #[test]
    fn transpose_moves_one_position_only() {
        let (mut chain, [_, b, a]) = chain_321();
        let op = Strategy::Transpose.reorganize(&mut chain, Some(b), a);
        assert_eq!(op, "Transposed with predecessor");
        assert_eq!(keys(&chain), vec![3, 1, 2]);
        chain.check_invariants().unwrap();
    }

    #[test]
    fn transpose_head_is_noop() {
        let (mut chain, [c, ..]) = chain_321();
        let op = Strategy::Transpose.reorganize(&mut chain, None, c);
        assert_eq!(op, "Already at head (no transpose)");
        assert_eq!(keys(&chain), vec![3, 2, 1]);
    }

    #[test]
    fn frequency_count_tie_promotes_to_head() {
        let (mut chain, [_, b, a]) = chain_321();
        // Equal counts everywhere: the tie favors promotion.
        let op = Strategy::FrequencyCount.reorganize(&mut chain, Some(b), a);
        assert_eq!(op, "Moved to head (higher frequency)");
        assert_eq!(keys(&chain), vec![1, 3, 2]);
    }

    #[test]
    fn frequency_count_inserts_behind_greater_counts() {
        let (mut chain, [c, b, a]) = chain_321();
        chain.touch(c, 4);
        chain.touch(c, 5);
        chain.touch(b, 6);
        chain.touch(b, 7);
        chain.touch(a, 8);
        // Counts: 3 -> 2, 2 -> 2, 1 -> 1. Node 1 stays behind both.
        let op = Strategy::FrequencyCount.reorganize(&mut chain, Some(b), a);
        assert_eq!(op, "Moved to position (frequency: 1)");
        assert_eq!(keys(&chain), vec![3, 2, 1]);
        chain.check_invariants().unwrap();
    }

    #[test]
    fn frequency_count_relocates_past_smaller_counts() {
        let mut chain = Chain::new();
        let a = chain.push_front(1, 1);
        let b = chain.push_front(2, 2);
        let c = chain.push_front(3, 3);
        chain.touch(c, 4);
        chain.touch(c, 5);
        chain.touch(c, 6);
        chain.touch(a, 7);
        chain.touch(a, 8);
        // Counts: 3 -> 3, 2 -> 0, 1 -> 2. Node 1 lands between 3 and 2.
        let op = Strategy::FrequencyCount.reorganize(&mut chain, Some(b), a);
        assert_eq!(op, "Moved to position (frequency: 2)");
        assert_eq!(keys(&chain), vec![3, 1, 2]);
        chain.check_invariants().unwrap();
    }

    #[test]
    fn frequency_count_head_is_noop() {
        let (mut chain, [c, ..]) = chain_321();
        let op = Strategy::FrequencyCount.reorganize(&mut chain, None, c);
        assert_eq!(op, "Already at head (frequency unchanged)");
        assert_eq!(keys(&chain), vec![3, 2, 1]);
    }

    #[test]
    fn names_and_complexities() {
        assert_eq!(Strategy::MoveToFront.name(), "Move-to-Front (MTF)");
        assert_eq!(Strategy::FrequencyCount.time_complexity(), "O(n)");
        assert_eq!(Strategy::Transpose.time_complexity(), "O(1)");
        assert_eq!(Strategy::Lru.to_string(), "LRU (Least Recently Used)");
        assert_eq!(Strategy::ALL.len(), 4);
    }
}
