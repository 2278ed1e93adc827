// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A registered candidate.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Candidate {
    pub name: String,
}

impl Candidate {
    pub fn new(name: &str) -> Candidate {
        Candidate {
            name: name.to_string(),
        }
    }
}

/// One ballot: a full ranking of all the candidates, from the most
/// preferred to the least preferred.
///
/// The `count` is the number of voters who cast this exact ranking.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Ballot {
    pub ranking: Vec<String>,
    pub count: u64,
}

impl Ballot {
    pub fn new(ranking: &[String]) -> Ballot {
        Ballot {
            ranking: ranking.to_vec(),
            count: 1,
        }
    }
}

// ******** Output data structures *********

/// What happened to a pair when it was offered to the graph.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum PairStatus {
    /// The edge was locked in.
    Locked,
    /// The edge would have closed a cycle and was dropped.
    Skipped,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PairStats {
    pub winner: String,
    pub loser: String,
    /// Voters preferring the winner over the loser.
    pub winner_votes: u64,
    /// Voters preferring the loser over the winner.
    pub loser_votes: u64,
    pub status: PairStatus,
}

impl PairStats {
    pub fn margin(&self) -> u64 {
        self.winner_votes - self.loser_votes
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TallyResult {
    pub winner: String,
    /// The position of the winner in the list of candidates.
    pub winner_index: usize,
    /// The total weight of the ballots that were counted.
    pub num_ballots: u64,
    /// The candidates, in registration order.
    pub candidates: Vec<String>,
    /// preferences[i][j] is the number of voters who prefer candidate i over candidate j.
    pub preferences: Vec<Vec<u64>>,
    /// The pairs, in the order they were offered to the graph.
    pub pairs: Vec<PairStats>,
}

/// Errors that prevent the algorithm from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TallyErrors {
    /// No candidate was registered.
    EmptyElection,
    CandidateLimitExceeded {
        count: usize,
        max: usize,
    },
    DuplicateCandidate(String),
    /// A ballot refers to a name that is not a registered candidate.
    InvalidVote {
        ballot: usize,
        rank: usize,
        name: String,
    },
    /// A ranking is not a permutation of all the candidates.
    MalformedRanking {
        ballot: usize,
        reason: String,
    },
    /// The weight of a ballot pushes the number of voters past `u64::MAX`.
    VoteCountOverflow {
        ballot: usize,
        count: u64,
    },
    /// Every candidate has someone locked in over them. This is an internal error.
    NoWinner,
    /// More than one candidate is unbeaten in the locked graph.
    MultipleWinners(Vec<String>),
}

impl Error for TallyErrors {}

impl Display for TallyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TallyErrors::EmptyElection => write!(f, "no candidate in the election"),
            TallyErrors::CandidateLimitExceeded { count, max } => write!(
                f,
                "{} candidates given, the maximum number of candidates is {}",
                count, max
            ),
            TallyErrors::DuplicateCandidate(name) => {
                write!(f, "candidate {:?} is registered more than once", name)
            }
            TallyErrors::InvalidVote { ballot, rank, name } => write!(
                f,
                "invalid vote: ballot {} rank {}: {:?} is not a candidate",
                ballot,
                rank + 1,
                name
            ),
            TallyErrors::MalformedRanking { ballot, reason } => {
                write!(f, "malformed ranking in ballot {}: {}", ballot, reason)
            }
            TallyErrors::VoteCountOverflow { ballot, count } => write!(
                f,
                "ballot {} with a count of {} overflows the number of voters",
                ballot, count
            ),
            TallyErrors::NoWinner => write!(f, "no candidate is unbeaten in the locked graph"),
            TallyErrors::MultipleWinners(names) => write!(
                f,
                "multiple candidates are unbeaten in the locked graph: {}",
                names.join(", ")
            ),
        }
    }
}

// ********* Configuration **********

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TallyRules {
    pub max_candidates: usize,
}

impl TallyRules {
    pub const MAX_CANDIDATES: usize = 9;

    pub const DEFAULT_RULES: TallyRules = TallyRules {
        max_candidates: TallyRules::MAX_CANDIDATES,
    };
}

impl Default for TallyRules {
    fn default() -> Self {
        TallyRules::DEFAULT_RULES
    }
}
