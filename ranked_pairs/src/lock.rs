use log::debug;

use crate::{CandidateId, Pair, PairStatus};

/// The graph of locked-in pairs.
///
/// An edge `i -> j` means that candidate `i` is locked in over candidate `j`.
/// Invariant: the graph never contains a cycle.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LockedGraph {
    locked: Vec<Vec<bool>>,
}

impl LockedGraph {
    pub fn new(num_candidates: usize) -> LockedGraph {
        LockedGraph {
            locked: vec![vec![false; num_candidates]; num_candidates],
        }
    }

    // Bypasses the acyclicity invariant.
    #[cfg(test)]
    pub(crate) fn from_adjacency(locked: Vec<Vec<bool>>) -> LockedGraph {
        LockedGraph { locked }
    }

    pub fn num_candidates(&self) -> usize {
        self.locked.len()
    }

    pub fn is_locked(&self, winner: CandidateId, loser: CandidateId) -> bool {
        self.locked[winner.0][loser.0]
    }

    /// Offers a pair to the graph.
    ///
    /// The edge is kept unless it closes a cycle, in which case the graph is
    /// restored to its previous state.
    pub fn try_lock(&mut self, pair: &Pair) -> PairStatus {
        let (w, l) = (pair.winner.0, pair.loser.0);
        let was_locked = self.locked[w][l];
        self.locked[w][l] = true;
        if self.path_exists(pair.loser, pair.winner) {
            self.locked[w][l] = was_locked;
            PairStatus::Skipped
        } else {
            PairStatus::Locked
        }
    }

    /// True if `to` can be reached from `from` by following locked edges.
    /// A candidate always reaches itself.
    pub fn path_exists(&self, from: CandidateId, to: CandidateId) -> bool {
        let n = self.num_candidates();
        let mut visited = vec![false; n];
        let mut stack: Vec<usize> = vec![from.0];
        while let Some(cur) = stack.pop() {
            if cur == to.0 {
                return true;
            }
            if visited[cur] {
                continue;
            }
            visited[cur] = true;
            for next in 0..n {
                if self.locked[cur][next] && !visited[next] {
                    stack.push(next);
                }
            }
        }
        false
    }

    /// The candidates that nobody is locked in over.
    pub fn sources(&self) -> Vec<CandidateId> {
        let n = self.num_candidates();
        (0..n)
            .filter(|&i| (0..n).all(|j| !self.locked[j][i]))
            .map(CandidateId)
            .collect()
    }

    pub fn has_cycle(&self) -> bool {
        let n = self.num_candidates();
        (0..n).any(|i| {
            (0..n).any(|j| self.locked[i][j] && self.path_exists(CandidateId(j), CandidateId(i)))
        })
    }
}

/// Locks the pairs in the given order, skipping the ones that would create a cycle.
///
/// Returns the final graph and, for every pair, whether it was locked.
pub fn lock_pairs(num_candidates: usize, sorted_pairs: &[Pair]) -> (LockedGraph, Vec<PairStatus>) {
    let mut graph = LockedGraph::new(num_candidates);
    let mut statuses: Vec<PairStatus> = Vec::with_capacity(sorted_pairs.len());
    for pair in sorted_pairs.iter() {
        let status = graph.try_lock(pair);
        debug!("lock_pairs: {:?} -> {:?}", pair, status);
        statuses.push(status);
    }
    debug_assert!(!graph.has_cycle(), "cycle in locked graph: {:?}", graph);
    (graph, statuses)
}
