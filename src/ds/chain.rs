//! Singly-linked node chain over a [`SlotArena`].
//!
//! The chain is the ordering structure of a self-organizing list: a head
//! handle plus per-node forward links, with every node stored in the arena
//! and addressed by a stable [`SlotId`].
//!
//! ```text
//!   head ──► [C] ──► [B] ──► [A] ──► ∅
//!            most recently     least recently
//!            promoted          promoted
//! ```
//!
//! Reorganization strategies rewire `next` links and the head handle only;
//! the key index (owned by the list, not the chain) is never touched by
//! link surgery. Node ownership lives in the arena, so detaching and
//! re-attaching a node is pure handle bookkeeping with no aliased owners.
//!
//! Link-surgery primitives mirror the classic detach/attach split:
//!
//! | Primitive        | Effect                                            |
//! |------------------|---------------------------------------------------|
//! | `push_front`     | Allocate a node and make it the new head          |
//! | `detach_after`   | Splice a node out of the chain (links only)       |
//! | `attach_front`   | Re-link an already-detached node as the head      |
//! | `insert_after`   | Re-link an already-detached node after an anchor  |
//! | `remove`         | Splice out and free a node, returning it          |
//!
//! All primitives are O(1); only `find_prev` scans.

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// A single chain entry: the cached key plus its access metadata.
#[derive(Debug)]
pub struct Node<K> {
    pub(crate) key: K,
    pub(crate) access_count: u64,
    pub(crate) last_accessed: u64,
    pub(crate) inserted_at: u64,
    pub(crate) next: Option<SlotId>,
}

impl<K> Node<K> {
    /// The cached key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Number of successful lookups that matched this node.
    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    /// Logical tick of the most recent access (insertion counts).
    pub fn last_accessed(&self) -> u64 {
        self.last_accessed
    }

    /// Logical tick at which the node was inserted.
    pub fn inserted_at(&self) -> u64 {
        self.inserted_at
    }
}

/// The node chain: head handle + arena-backed nodes.
#[derive(Debug)]
pub struct Chain<K> {
    arena: SlotArena<Node<K>>,
    head: Option<SlotId>,
}

impl<K> Chain<K> {
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn head(&self) -> Option<SlotId> {
        self.head
    }

    /// Iterates nodes in chain order (head to tail).
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            chain: self,
            current: self.head,
        }
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
    }

    // -- handle access ----------------------------------------------------
    //
    // Handles passed to these methods must reference live slots; the chain
    // only ever hands out live handles, and the index is kept in lockstep.

    pub(crate) fn node(&self, id: SlotId) -> &Node<K> {
        self.arena
            .get(id)
            .expect("chain handle must reference a live slot")
    }

    pub(crate) fn node_mut(&mut self, id: SlotId) -> &mut Node<K> {
        self.arena
            .get_mut(id)
            .expect("chain handle must reference a live slot")
    }

    pub(crate) fn next(&self, id: SlotId) -> Option<SlotId> {
        self.node(id).next
    }

    // -- link surgery -----------------------------------------------------

    /// Allocates a new node for `key` and links it as the new head.
    pub(crate) fn push_front(&mut self, key: K, now: u64) -> SlotId {
        let id = self.arena.insert(Node {
            key,
            access_count: 0,
            last_accessed: now,
            inserted_at: now,
            next: self.head,
        });
        self.head = Some(id);
        id
    }

    /// Splices `id` out of the chain without freeing it.
    ///
    /// `prev` is the node immediately before `id`, or `None` when `id` is
    /// the head. The detached node keeps its stale `next` link; callers
    /// re-attach it via [`attach_front`](Self::attach_front) or
    /// [`insert_after`](Self::insert_after).
    pub(crate) fn detach_after(&mut self, prev: Option<SlotId>, id: SlotId) {
        let next = self.node(id).next;
        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
    }

    /// Re-links a detached node as the new head.
    pub(crate) fn attach_front(&mut self, id: SlotId) {
        self.node_mut(id).next = self.head;
        self.head = Some(id);
    }

    /// Re-links a detached node immediately after `anchor`.
    pub(crate) fn insert_after(&mut self, anchor: SlotId, id: SlotId) {
        let next = self.node(anchor).next;
        self.node_mut(id).next = next;
        self.node_mut(anchor).next = Some(id);
    }

    /// Splices `id` out and frees its slot, returning the node.
    pub(crate) fn remove(&mut self, prev: Option<SlotId>, id: SlotId) -> Node<K> {
        self.detach_after(prev, id);
        self.arena
            .remove(id)
            .expect("chain handle must reference a live slot")
    }

    /// Records an access: bumps the access counter and last-accessed tick.
    pub(crate) fn touch(&mut self, id: SlotId, now: u64) {
        let node = self.node_mut(id);
        node.access_count += 1;
        node.last_accessed = now;
    }

    /// Scans from head for the node whose `next` is `id`.
    ///
    /// Returns `None` when `id` is the head. O(n).
    pub(crate) fn find_prev(&self, id: SlotId) -> Option<SlotId> {
        let mut current = self.head;
        while let Some(cur) = current {
            if self.node(cur).next == Some(id) {
                return Some(cur);
            }
            current = self.node(cur).next;
        }
        None
    }

    // -- invariants -------------------------------------------------------

    /// Verifies that the chain is a cycle-free list covering every live
    /// arena slot exactly once.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut count = 0usize;
        let mut current = self.head;
        while let Some(id) = current {
            count += 1;
            if count > self.arena.len() {
                return Err(InvariantError::new("cycle detected in chain"));
            }
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new("chain links to a freed slot"))?;
            current = node.next;
        }
        if count != self.arena.len() {
            return Err(InvariantError::new(format!(
                "chain reaches {} nodes but arena holds {}",
                count,
                self.arena.len()
            )));
        }
        Ok(())
    }
}

impl<K> Default for Chain<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed iterator over chain nodes in head-to-tail order.
pub struct Iter<'a, K> {
    chain: &'a Chain<K>,
    current: Option<SlotId>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (SlotId, &'a Node<K>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.chain.arena.get(id)?;
        self.current = node.next;
        Some((id, node))
    }
}
