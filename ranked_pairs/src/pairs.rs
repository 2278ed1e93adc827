use std::cmp::Reverse;

use log::debug;

use crate::{CandidateId, PreferenceMatrix};

/// Two candidates, where strictly more voters prefer the winner over the loser.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct Pair {
    pub winner: CandidateId,
    pub loser: CandidateId,
}

/// Returns every pair of candidates with a strict majority, ordered by winner
/// then by loser. Tied candidates do not form a pair.
pub fn extract_pairs(preferences: &PreferenceMatrix) -> Vec<Pair> {
    let n = preferences.num_candidates();
    let mut pairs: Vec<Pair> = Vec::new();
    for i in 0..n {
        for j in 0..n {
            let (winner, loser) = (CandidateId(i), CandidateId(j));
            if preferences.preference(winner, loser) > preferences.preference(loser, winner) {
                pairs.push(Pair { winner, loser });
            }
        }
    }
    debug!("extract_pairs: {} pairs: {:?}", pairs.len(), pairs);
    pairs
}

/// Orders the pairs by decreasing margin of victory.
///
/// The sort is stable: pairs with the same margin keep the order they are given in.
pub fn sort_pairs(pairs: &[Pair], preferences: &PreferenceMatrix) -> Vec<Pair> {
    let mut sorted = pairs.to_vec();
    sorted.sort_by_key(|p| Reverse(preferences.margin(p.winner, p.loser)));
    sorted
}
