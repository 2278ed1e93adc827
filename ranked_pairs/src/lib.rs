/*!
Tabulation of elections with the ranked-pairs method, also known as the Tideman method.

Every voter ranks all the candidates. The votes are aggregated into a matrix of
pairwise preferences, from which the pairs of candidates with a strict majority are
extracted. The pairs are then considered from the largest margin of victory to the
smallest, and each one is locked into a directed graph unless it would create a
cycle. The winner is the candidate nobody is locked in over.

```
use ranked_pairs::{run_tally, Ballot, Candidate, TallyRules};

let candidates = vec![Candidate::new("Alice"), Candidate::new("Bob")];
let ballots = vec![
    Ballot::new(&["Alice".to_string(), "Bob".to_string()]),
    Ballot::new(&["Bob".to_string(), "Alice".to_string()]),
    Ballot::new(&["Alice".to_string(), "Bob".to_string()]),
];
let result = run_tally(&ballots, &candidates, &TallyRules::DEFAULT_RULES)?;
assert_eq!(result.winner, "Alice");
# Ok::<(), ranked_pairs::TallyErrors>(())
```
*/
pub mod builder;
mod config;
mod lock;
pub mod manual;
mod pairs;
mod preferences;

use log::{debug, info};
use std::collections::{HashMap, HashSet};

pub use crate::config::*;
pub use crate::lock::{lock_pairs, LockedGraph};
pub use crate::pairs::{extract_pairs, sort_pairs, Pair};
pub use crate::preferences::PreferenceMatrix;

/// The position of a candidate in the list of registered candidates.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct CandidateId(pub usize);

/// Finds the candidate that nobody is locked in over.
///
/// `candidate_names` is only used to report the unbeaten candidates when
/// there is more than one.
pub fn resolve_winner(
    graph: &LockedGraph,
    candidate_names: &[String],
) -> Result<CandidateId, TallyErrors> {
    match graph.sources().as_slice() {
        [] => Err(TallyErrors::NoWinner),
        [winner] => Ok(*winner),
        sources => Err(TallyErrors::MultipleWinners(
            sources
                .iter()
                .map(|cid| {
                    candidate_names
                        .get(cid.0)
                        .cloned()
                        .unwrap_or_else(|| format!("#{}", cid.0))
                })
                .collect(),
        )),
    }
}

/// Runs the ranked-pairs algorithm on the given ballots.
///
/// Arguments:
/// * `ballots` the ballots, each one ranking every candidate by name
/// * `candidates` the registered candidates. Their order defines the candidate ids,
/// which in turn decides between pairs of equal margin.
/// * `rules` the rules that govern this election
pub fn run_tally(
    ballots: &[Ballot],
    candidates: &[Candidate],
    rules: &TallyRules,
) -> Result<TallyResult, TallyErrors> {
    info!(
        "Processing {:?} ballots, candidates: {:?}, rules: {:?}",
        ballots.len(),
        candidates,
        rules
    );
    let names = check_candidates(candidates, rules)?;
    for (idx, name) in names.iter().enumerate() {
        info!("Candidate: {}: {}", idx, name);
    }
    let ids_by_name: HashMap<&str, CandidateId> = names
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.as_str(), CandidateId(idx)))
        .collect();

    let mut preferences = PreferenceMatrix::new(names.len());
    for (ballot_idx, ballot) in ballots.iter().enumerate() {
        let mut ranking: Vec<CandidateId> = Vec::with_capacity(ballot.ranking.len());
        for (rank, name) in ballot.ranking.iter().enumerate() {
            let cid = ids_by_name
                .get(name.as_str())
                .ok_or_else(|| TallyErrors::InvalidVote {
                    ballot: ballot_idx,
                    rank,
                    name: name.clone(),
                })?;
            ranking.push(*cid);
        }
        preferences.record_weighted(&ranking, ballot.count)?;
    }
    info!("Counted {} votes", preferences.num_voters());

    let pairs = extract_pairs(&preferences);
    let sorted_pairs = sort_pairs(&pairs, &preferences);
    let (graph, statuses) = lock_pairs(names.len(), &sorted_pairs);

    let mut pair_stats: Vec<PairStats> = Vec::with_capacity(sorted_pairs.len());
    for (pair, status) in sorted_pairs.iter().zip(statuses.into_iter()) {
        let stats = PairStats {
            winner: names[pair.winner.0].clone(),
            loser: names[pair.loser.0].clone(),
            winner_votes: preferences.preference(pair.winner, pair.loser),
            loser_votes: preferences.preference(pair.loser, pair.winner),
            status,
        };
        info!(
            "{} > {} ({} to {}, margin {}): {:?}",
            stats.winner,
            stats.loser,
            stats.winner_votes,
            stats.loser_votes,
            stats.margin(),
            stats.status
        );
        pair_stats.push(stats);
    }

    let winner = resolve_winner(&graph, &names)?;
    info!("Winner: {}", names[winner.0]);
    Ok(TallyResult {
        winner: names[winner.0].clone(),
        winner_index: winner.0,
        num_ballots: preferences.num_voters(),
        preferences: preferences.rows().to_vec(),
        pairs: pair_stats,
        candidates: names,
    })
}

// Candidates are returned in the same order.
pub(crate) fn check_candidates(
    candidates: &[Candidate],
    rules: &TallyRules,
) -> Result<Vec<String>, TallyErrors> {
    if candidates.is_empty() {
        return Err(TallyErrors::EmptyElection);
    }
    if candidates.len() > rules.max_candidates {
        return Err(TallyErrors::CandidateLimitExceeded {
            count: candidates.len(),
            max: rules.max_candidates,
        });
    }
    let mut seen: HashSet<&str> = HashSet::new();
    for c in candidates.iter() {
        if !seen.insert(c.name.as_str()) {
            return Err(TallyErrors::DuplicateCandidate(c.name.clone()));
        }
    }
    debug!("check_candidates: {} candidates", candidates.len());
    Ok(candidates.iter().map(|c| c.name.clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn candidates(names: &[&str]) -> Vec<Candidate> {
        names.iter().map(|n| Candidate::new(n)).collect()
    }

    fn ballot(names: &[&str]) -> Ballot {
        let ranking: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        Ballot::new(&ranking)
    }

    fn tally(cands: &[&str], ballots: &[Ballot]) -> Result<TallyResult, TallyErrors> {
        run_tally(ballots, &candidates(cands), &TallyRules::DEFAULT_RULES)
    }

    // Generates all the permutations of 0..n, in lexicographic order.
    fn permutations(n: usize) -> Vec<Vec<usize>> {
        if n == 0 {
            return vec![vec![]];
        }
        let mut res: Vec<Vec<usize>> = Vec::new();
        for first in 0..n {
            for rest in permutations(n - 1) {
                let mut p = vec![first];
                p.extend(rest.into_iter().map(|x| if x >= first { x + 1 } else { x }));
                res.push(p);
            }
        }
        res
    }

    #[test]
    fn clear_majority() {
        init();
        let res = tally(
            &["Alice", "Bob", "Charlie"],
            &[
                ballot(&["Alice", "Bob", "Charlie"]),
                ballot(&["Alice", "Bob", "Charlie"]),
                ballot(&["Charlie", "Bob", "Alice"]),
            ],
        )
        .unwrap();
        assert_eq!(res.winner, "Alice");
        assert_eq!(res.winner_index, 0);
        assert_eq!(res.num_ballots, 3);
        assert_eq!(res.preferences[0][1], 2);
        assert_eq!(res.preferences[1][0], 1);
        assert!(res.pairs.iter().all(|p| p.status == PairStatus::Locked));
    }

    #[test]
    fn condorcet_cycle_is_broken_by_extraction_order() {
        init();
        let res = tally(
            &["A", "B", "C"],
            &[
                ballot(&["A", "B", "C"]),
                ballot(&["B", "C", "A"]),
                ballot(&["C", "A", "B"]),
            ],
        )
        .unwrap();
        assert_eq!(res.winner, "A");
        let summary: Vec<(&str, &str, u64, PairStatus)> = res
            .pairs
            .iter()
            .map(|p| (p.winner.as_str(), p.loser.as_str(), p.margin(), p.status))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("A", "B", 1, PairStatus::Locked),
                ("B", "C", 1, PairStatus::Locked),
                ("C", "A", 1, PairStatus::Skipped),
            ]
        );
    }

    #[test]
    fn unanimous_two_candidates() {
        let res = tally(
            &["Yes", "No"],
            &[ballot(&["No", "Yes"]), ballot(&["No", "Yes"])],
        )
        .unwrap();
        assert_eq!(res.winner, "No");
        assert_eq!(res.winner_index, 1);
    }

    #[test]
    fn single_candidate_wins() {
        let res = tally(&["Solo"], &[ballot(&["Solo"])]).unwrap();
        assert_eq!(res.winner, "Solo");
        assert!(res.pairs.is_empty());

        let res = tally(&["Solo"], &[]).unwrap();
        assert_eq!(res.winner, "Solo");
        assert_eq!(res.num_ballots, 0);
    }

    #[test]
    fn no_voters() {
        assert_eq!(
            tally(&["A", "B", "C"], &[]),
            Err(TallyErrors::MultipleWinners(vec![
                "A".to_string(),
                "B".to_string(),
                "C".to_string()
            ]))
        );
    }

    #[test]
    fn pairwise_tie_leaves_two_winners() {
        assert_eq!(
            tally(&["A", "B"], &[ballot(&["A", "B"]), ballot(&["B", "A"])]),
            Err(TallyErrors::MultipleWinners(vec![
                "A".to_string(),
                "B".to_string()
            ]))
        );
    }

    #[test]
    fn stronger_pairs_are_locked_first() {
        // D beats everyone; A > B > C > A is a cycle where C > A is the weakest.
        let mut ballots: Vec<Ballot> = Vec::new();
        let mut add = |names: &[&str], count: u64| {
            let mut b = ballot(names);
            b.count = count;
            ballots.push(b);
        };
        add(&["D", "A", "B", "C"], 5);
        add(&["D", "B", "C", "A"], 4);
        add(&["C", "A", "B", "D"], 2);
        let res = tally(&["A", "B", "C", "D"], &ballots).unwrap();
        assert_eq!(res.winner, "D");
        assert_eq!(res.num_ballots, 11);
        let skipped: Vec<(&str, &str)> = res
            .pairs
            .iter()
            .filter(|p| p.status == PairStatus::Skipped)
            .map(|p| (p.winner.as_str(), p.loser.as_str()))
            .collect();
        assert_eq!(skipped, vec![("C", "A")]);
    }

    #[test]
    fn weighted_ballot_matches_repeated_ballots() {
        let cands = ["A", "B", "C"];
        let mut heavy = ballot(&["B", "A", "C"]);
        heavy.count = 3;
        let weighted = tally(&cands, &[heavy, ballot(&["C", "A", "B"])]).unwrap();
        let repeated = tally(
            &cands,
            &[
                ballot(&["B", "A", "C"]),
                ballot(&["B", "A", "C"]),
                ballot(&["C", "A", "B"]),
                ballot(&["B", "A", "C"]),
            ],
        )
        .unwrap();
        assert_eq!(weighted, repeated);
        assert_eq!(weighted.winner, "B");
    }

    #[test]
    fn unknown_name_is_an_invalid_vote() {
        let res = tally(
            &["A", "B"],
            &[ballot(&["A", "B"]), ballot(&["B", "Zed"])],
        );
        assert_eq!(
            res,
            Err(TallyErrors::InvalidVote {
                ballot: 1,
                rank: 1,
                name: "Zed".to_string()
            })
        );
    }

    #[test]
    fn incomplete_ballot_is_malformed() {
        let res = tally(&["A", "B", "C"], &[ballot(&["A", "B", "C"]), ballot(&["A", "A", "B"])]);
        assert!(matches!(
            res,
            Err(TallyErrors::MalformedRanking { ballot: 1, .. })
        ));
        let res = tally(&["A", "B", "C"], &[ballot(&["C", "B"])]);
        assert!(matches!(
            res,
            Err(TallyErrors::MalformedRanking { ballot: 0, .. })
        ));
    }

    #[test]
    fn weights_overflowing_the_count() {
        let mut huge = ballot(&["A", "B"]);
        huge.count = u64::MAX;
        let res = tally(&["A", "B"], &[huge, ballot(&["A", "B"])]);
        assert_eq!(
            res,
            Err(TallyErrors::VoteCountOverflow {
                ballot: 1,
                count: 1
            })
        );

        let mut half = ballot(&["A", "B", "C"]);
        half.count = 1 << 63;
        let res = tally(&["A", "B", "C"], &[ballot(&["C", "B", "A"]), half]).unwrap();
        assert_eq!(res.winner, "A");
        assert_eq!(res.pairs[0].margin(), (1 << 63) - 1);
        assert!(res.pairs.iter().all(|p| p.status == PairStatus::Locked));
    }

    #[test]
    fn candidate_checks() {
        assert_eq!(tally(&[], &[]), Err(TallyErrors::EmptyElection));
        let ten: Vec<String> = (0..10).map(|i| format!("C{}", i)).collect();
        let ten_refs: Vec<&str> = ten.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            tally(&ten_refs, &[]),
            Err(TallyErrors::CandidateLimitExceeded { count: 10, max: 9 })
        );
        assert_eq!(
            tally(&["A", "B", "A"], &[]),
            Err(TallyErrors::DuplicateCandidate("A".to_string()))
        );

        let rules = TallyRules { max_candidates: 12 };
        let ten_candidates: Vec<Candidate> = ten.iter().map(|n| Candidate::new(n)).collect();
        let b = Ballot::new(&ten);
        assert_eq!(run_tally(&[b], &ten_candidates, &rules).unwrap().winner, "C0");
    }

    #[test]
    fn exactly_one_winner_without_pairwise_ties() {
        init();
        let n = 4;
        let names = ["A", "B", "C", "D"];
        let perms = permutations(n);
        assert_eq!(perms.len(), 24);
        // A deterministic spread of electorates. An odd number of voters rules out
        // pairwise ties, so the locked graph has exactly one source.
        let mut seed: u64 = 17;
        for _ in 0..50 {
            let mut preferences = PreferenceMatrix::new(n);
            let mut ballots: Vec<Ballot> = Vec::new();
            let num_voters = 1 + 2 * (seed % 7);
            for _ in 0..num_voters {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let perm = &perms[((seed >> 33) % 24) as usize];
                let ranking: Vec<CandidateId> = perm.iter().map(|x| CandidateId(*x)).collect();
                preferences.record(&ranking).unwrap();
                let named: Vec<&str> = perm.iter().map(|x| names[*x]).collect();
                ballots.push(ballot(&named));
            }

            let sorted = sort_pairs(&extract_pairs(&preferences), &preferences);
            assert_eq!(sorted.len(), n * (n - 1) / 2);
            let (graph, _) = lock_pairs(n, &sorted);
            assert!(!graph.has_cycle());
            assert_eq!(graph.sources().len(), 1);

            let winner = resolve_winner(&graph, &[]).unwrap();
            let res = tally(&names, &ballots).unwrap();
            assert_eq!(res.winner_index, winner.0);
        }
    }

    #[test]
    fn every_candidate_beaten_is_no_winner() {
        let graph = LockedGraph::from_adjacency(vec![
            vec![false, true, false],
            vec![false, false, true],
            vec![true, false, false],
        ]);
        let names = vec!["X".to_string(), "Y".to_string(), "Z".to_string()];
        assert_eq!(resolve_winner(&graph, &names), Err(TallyErrors::NoWinner));
    }

    #[test]
    fn resolve_winner_reports_every_source() {
        let mut graph = LockedGraph::new(3);
        graph.try_lock(&Pair {
            winner: CandidateId(2),
            loser: CandidateId(0),
        });
        let names = vec!["X".to_string(), "Y".to_string(), "Z".to_string()];
        assert_eq!(
            resolve_winner(&graph, &names),
            Err(TallyErrors::MultipleWinners(vec![
                "Y".to_string(),
                "Z".to_string()
            ]))
        );
        graph.try_lock(&Pair {
            winner: CandidateId(2),
            loser: CandidateId(1),
        });
        assert_eq!(resolve_winner(&graph, &names), Ok(CandidateId(2)));
    }
}
