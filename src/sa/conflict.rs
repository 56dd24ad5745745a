//! Path-level conservation via conflict resolution.
//!
//! Flow is assigned one whole path at a time, so conservation cannot be
//! enforced per vertex. Instead no two paths holding flow may share an
//! edge: before a sampled path receives a value, every live path that
//! overlaps it is zeroed and forgotten.

use std::collections::BTreeSet;

use crate::network::{FlowNetwork, Path};

/// Indices of the paths currently holding flow in the best-so-far network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedPaths {
    members: BTreeSet<usize>,
}

impl VisitedPaths {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }

    /// Path indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().copied()
    }

    pub(crate) fn insert(&mut self, index: usize) {
        self.members.insert(index);
    }

    pub(crate) fn clear(&mut self) {
        self.members.clear();
    }

    /// Zeroes and removes every live path that shares an edge with
    /// `paths[candidate]`. Returns how many paths were removed.
    ///
    /// The candidate itself is removed too if it is already live.
    /// `candidate` and every member must index into `paths`.
    pub(crate) fn resolve_conflicts(
        &mut self,
        candidate: usize,
        paths: &[Path],
        network: &mut FlowNetwork,
    ) -> usize {
        let sampled = &paths[candidate];
        let before = self.members.len();
        self.members.retain(|&live| {
            let path = &paths[live];
            if path.conflicts_with(sampled) {
                path.assign(network, 0);
                false
            } else {
                true
            }
        });
        before - self.members.len()
    }

    /// Returns `true` if no two member paths share an edge.
    ///
    /// # Panics
    ///
    /// Panics if a member index is out of range for `paths`. Pass the
    /// slice from [`Annealer::paths`](crate::sa::Annealer::paths) of the
    /// annealer this set belongs to.
    pub fn is_edge_disjoint(&self, paths: &[Path]) -> bool {
        let live: Vec<&Path> = self.members.iter().map(|&i| &paths[i]).collect();
        live.iter().enumerate().all(|(i, a)| {
            live[i + 1..].iter().all(|b| !a.conflicts_with(b))
        })
    }
}
