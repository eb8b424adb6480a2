//! Road network node.

use dta_core::LinkId;

/// A node (intersection).  Carries the ordered list of incoming links used by
/// the loading engine's rotating discharge order; the list order is the link
/// insertion order and must stay stable for runs to be reproducible.
#[derive(Clone, Debug, Default)]
pub struct Node {
    /// Links whose `to` is this node, in insertion order.
    pub incoming: Vec<LinkId>,
}

impl Node {
    /// Number of links competing for this node's throughput.
    #[inline]
    pub fn incoming_count(&self) -> usize {
        self.incoming.len()
    }
}
