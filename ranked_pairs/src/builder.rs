pub use crate::config::*;

/// A builder for adding ballots one at a time.
///
/// Each ballot is checked against the registered candidates as soon as it
/// is added, so that an unknown name is reported before any counting happens.
///
/// ```
/// pub use ranked_pairs::builder::Builder;
/// pub use ranked_pairs::TallyRules;
/// # use ranked_pairs::TallyErrors;
///
/// let mut builder = Builder::new(&TallyRules::DEFAULT_RULES)?
///     .candidates(&["Anna".to_string(), "Bob".to_string()])?;
///
/// builder.add_ballot(&["Bob".to_string(), "Anna".to_string()])?;
/// assert_eq!(builder.run()?.winner, "Bob");
///
/// # Ok::<(), TallyErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: TallyRules,
    pub(crate) _candidates: Vec<Candidate>,
    pub(crate) _ballots: Vec<Ballot>,
}

impl Builder {
    pub fn new(rules: &TallyRules) -> Result<Builder, TallyErrors> {
        Ok(Builder {
            _rules: rules.clone(),
            _candidates: Vec::new(),
            _ballots: Vec::new(),
        })
    }

    /// Registers the candidates. Any ballot added before is discarded.
    ///
    /// The list is rejected if it is empty, too long or has a repeated name.
    pub fn candidates(self, cands: &[String]) -> Result<Builder, TallyErrors> {
        let candidates: Vec<Candidate> = cands.iter().map(|name| Candidate::new(name)).collect();
        crate::check_candidates(&candidates, &self._rules)?;
        Ok(Builder {
            _rules: self._rules,
            _candidates: candidates,
            _ballots: Vec::new(),
        })
    }

    pub fn num_ballots(&self) -> usize {
        self._ballots.len()
    }

    /// Adds the ranking of a single voter.
    pub fn add_ballot(&mut self, ranking: &[String]) -> Result<(), TallyErrors> {
        self.add_weighted_ballot(ranking, 1)
    }

    /// Adds a ranking cast by `count` voters.
    pub fn add_weighted_ballot(
        &mut self,
        ranking: &[String],
        count: u64,
    ) -> Result<(), TallyErrors> {
        for (rank, name) in ranking.iter().enumerate() {
            if !self._candidates.iter().any(|c| c.name == *name) {
                return Err(TallyErrors::InvalidVote {
                    ballot: self._ballots.len(),
                    rank,
                    name: name.clone(),
                });
            }
        }
        self._ballots.push(Ballot {
            ranking: ranking.to_vec(),
            count,
        });
        Ok(())
    }

    pub fn run(&self) -> Result<TallyResult, TallyErrors> {
        crate::run_tally(&self._ballots, &self._candidates, &self._rules)
    }
}
