// src/graph/ids.rs

use crate::types::NodeId;

/// Hands out node ids for one graph editing session.
///
/// Ids are strictly increasing and never reused, even after the node that
/// held one is deleted. The allocator is owned by the caller so tests can
/// start from a known value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAllocator {
    next: NodeId,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator whose first id will be `first`.
    pub fn starting_at(first: NodeId) -> Self {
        Self { next: first }
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> NodeId {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }

    /// The id the next call to [`IdAllocator::next_id`] will return.
    pub fn peek(&self) -> NodeId {
        self.next
    }

    /// Record an id that was assigned explicitly so it is never handed out.
    pub fn observe(&mut self, id: NodeId) {
        if id >= self.next {
            self.next = id.saturating_add(1);
        }
    }
}
