use log::debug;

use crate::{CandidateId, TallyErrors};

/// Pairwise preference tallies between the candidates.
///
/// The cell `(i, j)` holds the number of voters who ranked candidate `i`
/// strictly above candidate `j`. The diagonal is always zero.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PreferenceMatrix {
    counts: Vec<Vec<u64>>,
    // Weight of all the rankings recorded so far.
    num_voters: u64,
    // Number of calls to record, used to locate malformed rankings.
    num_rankings: usize,
}

impl PreferenceMatrix {
    pub fn new(num_candidates: usize) -> PreferenceMatrix {
        PreferenceMatrix {
            counts: vec![vec![0; num_candidates]; num_candidates],
            num_voters: 0,
            num_rankings: 0,
        }
    }

    pub fn num_candidates(&self) -> usize {
        self.counts.len()
    }

    pub fn num_voters(&self) -> u64 {
        self.num_voters
    }

    /// The number of voters who prefer `winner` over `loser`.
    pub fn preference(&self, winner: CandidateId, loser: CandidateId) -> u64 {
        self.counts[winner.0][loser.0]
    }

    /// The margin of victory of `winner` over `loser`. Negative if `loser` is preferred.
    pub fn margin(&self, winner: CandidateId, loser: CandidateId) -> i128 {
        i128::from(self.preference(winner, loser)) - i128::from(self.preference(loser, winner))
    }

    pub fn rows(&self) -> &[Vec<u64>] {
        &self.counts
    }

    /// Records the ranking of a single voter.
    pub fn record(&mut self, ranking: &[CandidateId]) -> Result<(), TallyErrors> {
        self.record_weighted(ranking, 1)
    }

    /// Records a ranking cast by `count` voters.
    ///
    /// The ranking must list every candidate exactly once. Otherwise the
    /// matrix is left untouched and `MalformedRanking` is returned, with the
    /// position of this ranking among all the recorded ones. A weight that
    /// would overflow the counts is rejected with `VoteCountOverflow`.
    pub fn record_weighted(
        &mut self,
        ranking: &[CandidateId],
        count: u64,
    ) -> Result<(), TallyErrors> {
        let ballot = self.num_rankings;
        self.num_rankings += 1;
        check_permutation(ranking, self.num_candidates())
            .map_err(|reason| TallyErrors::MalformedRanking { ballot, reason })?;
        // Every cell is at most the number of voters.
        let num_voters = self
            .num_voters
            .checked_add(count)
            .ok_or(TallyErrors::VoteCountOverflow { ballot, count })?;

        for (a, preferred) in ranking.iter().enumerate() {
            for other in ranking[a + 1..].iter() {
                self.counts[preferred.0][other.0] += count;
            }
        }
        self.num_voters = num_voters;
        debug!(
            "record_weighted: ballot {}: {:?} x{}",
            ballot, ranking, count
        );
        Ok(())
    }
}

fn check_permutation(ranking: &[CandidateId], num_candidates: usize) -> Result<(), String> {
    if ranking.len() != num_candidates {
        return Err(format!(
            "expected {} ranks, found {}",
            num_candidates,
            ranking.len()
        ));
    }
    let mut seen = vec![false; num_candidates];
    for (rank, cid) in ranking.iter().enumerate() {
        match seen.get_mut(cid.0) {
            None => {
                return Err(format!(
                    "rank {}: unknown candidate index {}",
                    rank + 1,
                    cid.0
                ))
            }
            Some(true) => {
                return Err(format!(
                    "rank {}: candidate index {} is ranked twice",
                    rank + 1,
                    cid.0
                ))
            }
            Some(s) => *s = true,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(xs: &[usize]) -> Vec<CandidateId> {
        xs.iter().map(|x| CandidateId(*x)).collect()
    }

    #[test]
    fn record_counts_every_lower_rank() {
        let mut m = PreferenceMatrix::new(3);
        m.record(&ids(&[2, 0, 1])).unwrap();
        assert_eq!(m.rows(), &[vec![0, 1, 0], vec![0, 0, 0], vec![1, 1, 0]]);
        assert_eq!(m.num_voters(), 1);
    }

    #[test]
    fn pairwise_counts_add_up_to_voters() {
        let mut m = PreferenceMatrix::new(4);
        m.record(&ids(&[0, 1, 2, 3])).unwrap();
        m.record(&ids(&[3, 1, 0, 2])).unwrap();
        m.record_weighted(&ids(&[1, 3, 2, 0]), 4).unwrap();
        for i in 0..4 {
            assert_eq!(m.preference(CandidateId(i), CandidateId(i)), 0);
            for j in 0..4 {
                if i != j {
                    let total = m.preference(CandidateId(i), CandidateId(j))
                        + m.preference(CandidateId(j), CandidateId(i));
                    assert_eq!(total, 6);
                }
            }
        }
        assert_eq!(m.margin(CandidateId(1), CandidateId(0)), 4);
        assert_eq!(m.margin(CandidateId(0), CandidateId(1)), -4);
    }

    #[test]
    fn voter_order_does_not_matter() {
        let rankings = vec![
            ids(&[0, 1, 2]),
            ids(&[2, 1, 0]),
            ids(&[1, 2, 0]),
            ids(&[1, 0, 2]),
        ];
        let mut forward = PreferenceMatrix::new(3);
        for r in rankings.iter() {
            forward.record(r).unwrap();
        }
        let mut backward = PreferenceMatrix::new(3);
        for r in rankings.iter().rev() {
            backward.record(r).unwrap();
        }
        assert_eq!(forward.rows(), backward.rows());
        assert_eq!(forward.num_voters(), backward.num_voters());
    }

    #[test]
    fn malformed_rankings_are_rejected() {
        let mut m = PreferenceMatrix::new(3);
        m.record(&ids(&[0, 1, 2])).unwrap();
        let before = m.rows().to_vec();

        let short = m.record(&ids(&[0, 1]));
        assert!(matches!(
            short,
            Err(TallyErrors::MalformedRanking { ballot: 1, .. })
        ));
        let repeated = m.record(&ids(&[0, 1, 1]));
        assert!(matches!(
            repeated,
            Err(TallyErrors::MalformedRanking { ballot: 2, .. })
        ));
        let out_of_range = m.record(&ids(&[0, 1, 3]));
        assert!(matches!(
            out_of_range,
            Err(TallyErrors::MalformedRanking { ballot: 3, .. })
        ));

        assert_eq!(m.rows(), before.as_slice());
        assert_eq!(m.num_voters(), 1);
    }

    #[test]
    fn huge_weights() {
        let mut m = PreferenceMatrix::new(2);
        m.record_weighted(&ids(&[0, 1]), 1 << 63).unwrap();
        assert_eq!(m.margin(CandidateId(0), CandidateId(1)), 1i128 << 63);
        assert_eq!(m.margin(CandidateId(1), CandidateId(0)), -(1i128 << 63));

        let mut m = PreferenceMatrix::new(2);
        m.record_weighted(&ids(&[0, 1]), u64::MAX).unwrap();
        assert_eq!(
            m.margin(CandidateId(0), CandidateId(1)),
            i128::from(u64::MAX)
        );
        let before = m.rows().to_vec();
        assert_eq!(
            m.record_weighted(&ids(&[1, 0]), 1),
            Err(TallyErrors::VoteCountOverflow {
                ballot: 1,
                count: 1
            })
        );
        assert_eq!(m.rows(), before.as_slice());
        assert_eq!(m.num_voters(), u64::MAX);
    }
}
