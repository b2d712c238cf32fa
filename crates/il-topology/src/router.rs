//! Routing trait and default breadth-first implementation.
//!
//! # Pluggability
//!
//! The engine asks for next hops through the [`Router`] trait, so callers can
//! swap in a different policy (weighted costs, route reservations) without
//! touching the conflict resolver.  Routers never look at occupancy; safety
//! is enforced entirely at resolution time.
//!
//! # Determinism
//!
//! [`BfsRouter`] explores neighbours in adjacency order, so among several
//! shortest paths the one whose hops come first in that order wins.  The
//! answer depends only on the topology.

use std::collections::VecDeque;

use il_core::{Line, SectionId};

use crate::{Map, Topology, TopologyError, TopologyResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: every section from source to goal,
/// inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub sections: Vec<SectionId>,
}

impl Route {
    /// The section to move into next, or `None` if already at the goal.
    pub fn first_hop(&self) -> Option<SectionId> {
        self.sections.get(1).copied()
    }

    /// Number of moves needed to reach the goal.
    pub fn hops(&self) -> usize {
        self.sections.len().saturating_sub(1)
    }

    /// `true` if the source and goal are the same section.
    pub fn is_trivial(&self) -> bool {
        self.hops() == 0
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing policy restricted to one line's subgraph.
///
/// Implementations must be `Send + Sync` so a shared engine can be moved
/// behind a mutex and used from several threads.
pub trait Router: Send + Sync {
    /// Compute a route from `from` to `goal` over `line`'s tracks.
    ///
    /// `from == goal` yields a trivial route, not an error.
    fn route(
        &self,
        topology: &Topology,
        from:     SectionId,
        goal:     SectionId,
        line:     Line,
    ) -> TopologyResult<Route>;

    /// First step of the route toward `goal`.
    ///
    /// `None` means either "already at the goal" or "no path exists".
    fn next_hop(
        &self,
        topology: &Topology,
        from:     SectionId,
        goal:     SectionId,
        line:     Line,
    ) -> Option<SectionId> {
        self.route(topology, from, goal, line)
            .ok()
            .and_then(|r| r.first_hop())
    }
}

// ── BfsRouter ─────────────────────────────────────────────────────────────────

/// Unweighted shortest path by breadth-first search.
///
/// Every track counts as one hop; sections are small and uniform, so hop
/// count is the only meaningful cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsRouter;

impl Router for BfsRouter {
    fn route(
        &self,
        topology: &Topology,
        from:     SectionId,
        goal:     SectionId,
        line:     Line,
    ) -> TopologyResult<Route> {
        bfs(topology, from, goal, line)
    }
}

fn bfs(
    topology: &Topology,
    from:     SectionId,
    goal:     SectionId,
    line:     Line,
) -> TopologyResult<Route> {
    if !topology.contains(from) {
        return Err(TopologyError::UnknownSection(from));
    }
    if !topology.contains(goal) {
        return Err(TopologyError::UnknownSection(goal));
    }
    if from == goal {
        return Ok(Route { sections: vec![from] });
    }

    // Sections are sparse ids, so parents are tracked in a map sized to the
    // topology rather than a Vec indexed by id.
    let mut parent: Map<SectionId, SectionId> =
        Map::with_capacity_and_hasher(topology.section_count(), Default::default());
    parent.insert(from, SectionId::INVALID);

    let mut queue = VecDeque::from([from]);
    while let Some(u) = queue.pop_front() {
        for &v in topology.neighbors(u, line) {
            if parent.contains_key(&v) {
                continue;
            }
            parent.insert(v, u);
            if v == goal {
                return Ok(reconstruct(&parent, goal));
            }
            queue.push_back(v);
        }
    }

    Err(TopologyError::NoRoute { from, to: goal })
}

fn reconstruct(
    parent: &Map<SectionId, SectionId>,
    goal:   SectionId,
) -> Route {
    let mut sections = vec![goal];
    let mut cur = goal;
    while let Some(&p) = parent.get(&cur) {
        if p == SectionId::INVALID {
            break;
        }
        sections.push(p);
        cur = p;
    }
    sections.reverse();
    Route { sections }
}
