//! Agent trajectory record.

use dta_core::{Interval, LinkId};

/// One traveler and its per-run trajectory state.
///
/// Agents are created before loading and never deleted during a run; trip
/// completion is the `arrival` field flipping to `Some`, not destruction.
///
/// # Path representation
///
/// `link_path` stores the links to traverse in **reverse traversal order**:
/// the *last* element is the first link, matching how backward path tracing
/// from a shortest-path tree naturally emits links.  `path_pos` indexes the
/// link currently occupied and counts down to 0 (the final link).
#[derive(Clone, Debug)]
pub struct Agent {
    /// Links to traverse, reverse traversal order (last element = first link).
    pub link_path: Vec<LinkId>,

    /// Index into `link_path` of the current link.  Starts at
    /// `link_path.len() - 1`, decremented on every link transfer.
    pub path_pos: usize,

    /// Departure interval assigned by the loading profile.
    pub scheduled_dep: Interval,

    /// Next-decision interval: the earliest interval at which the agent may
    /// be discharged from its current link.  Mutated every link transfer.
    pub ready: Interval,

    /// Interval at which the agent entered its current link.  Waiting-time
    /// samples are measured from this.
    pub link_arrival: Interval,

    /// Trip completion interval.  `None` while the agent is still on the
    /// network (doubles as the trip-complete flag).
    pub arrival: Option<Interval>,
}

impl Agent {
    /// Create an agent with its assigned path and untouched trajectory state.
    pub fn new(link_path: Vec<LinkId>) -> Self {
        let path_pos = link_path.len().saturating_sub(1);
        Self {
            link_path,
            path_pos,
            scheduled_dep: Interval::ZERO,
            ready:         Interval::ZERO,
            link_arrival:  Interval::ZERO,
            arrival:       None,
        }
    }

    /// `true` if the assignment engine gave this agent a route.
    #[inline]
    pub fn has_path(&self) -> bool {
        !self.link_path.is_empty()
    }

    /// The first link to traverse (the path is stored reversed).
    #[inline]
    pub fn first_link(&self) -> Option<LinkId> {
        self.link_path.last().copied()
    }

    /// `true` once the agent occupies the final link of its path.
    #[inline]
    pub fn on_last_link(&self) -> bool {
        self.path_pos == 0
    }

    /// The link after the current one, or `None` on the final link.
    #[inline]
    pub fn next_link(&self) -> Option<LinkId> {
        self.path_pos
            .checked_sub(1)
            .map(|pos| self.link_path[pos])
    }

    /// Step the position index to the next link (no-op on the final link).
    #[inline]
    pub fn advance_link(&mut self) {
        self.path_pos = self.path_pos.saturating_sub(1);
    }

    /// `true` once the trip has completed.
    #[inline]
    pub fn completed(&self) -> bool {
        self.arrival.is_some()
    }

    /// Reset trajectory state for a fresh run, keeping the path.
    pub fn reset_trajectory(&mut self) {
        self.path_pos      = self.link_path.len().saturating_sub(1);
        self.scheduled_dep = Interval::ZERO;
        self.ready         = Interval::ZERO;
        self.link_arrival  = Interval::ZERO;
        self.arrival       = None;
    }
}
