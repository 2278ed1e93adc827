use log::{debug, info, warn};

use ranked_pairs::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::tideman::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_json;
mod io_prompt;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TidemanError {
    #[snafu(display("Usage: tideman [candidate ...]"))]
    NoCandidates {},
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON content"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a positive integer in the configuration"))]
    ParsingJsonNumber {},
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Unknown ballot provider {provider:?}"))]
    UnknownProvider { provider: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading a line of the CSV file"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Line {lineno} is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("Line {lineno}: could not read the ballot count {content:?}"))]
    CsvCount { lineno: usize, content: String },
    #[snafu(display("Error while reading the votes"))]
    Prompt { source: std::io::Error },
    #[snafu(display("Input ended before all the votes were read"))]
    PromptEnded {},
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("{source}"))]
    Tally { source: TallyErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TidemanResult<T> = Result<T, TidemanError>;

impl TidemanError {
    /// The exit code of the program when failing with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            TidemanError::NoCandidates {} => 1,
            TidemanError::Tally {
                source: TallyErrors::CandidateLimitExceeded { .. },
            } => 2,
            TidemanError::Tally {
                source: TallyErrors::InvalidVote { .. },
            } => 3,
            _ => 4,
        }
    }

    /// The message printed on the standard output for the errors caused by the voters' input.
    pub fn user_message(&self) -> Option<String> {
        match self {
            TidemanError::NoCandidates {} => Some(self.to_string()),
            TidemanError::Tally {
                source: TallyErrors::CandidateLimitExceeded { max, .. },
            } => Some(format!("Maximum number of candidates is {}", max)),
            TidemanError::Tally {
                source: TallyErrors::InvalidVote { .. },
            } => Some("Invalid vote.".to_string()),
            _ => None,
        }
    }
}

/// A ballot, as parsed by the readers.
/// This is before matching the names against the candidates.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedBallot {
    pub id: Option<String>,
    pub count: Option<u64>,
    pub choices: Vec<String>,
}

fn validate_ballots(parsed_ballots: &[ParsedBallot]) -> Vec<Ballot> {
    let mut res: Vec<Ballot> = Vec::new();
    for pb in parsed_ballots.iter() {
        let mut choices: Vec<String> = pb.choices.iter().map(|s| s.trim().to_string()).collect();
        // Rows of uneven length get padded with empty cells.
        while choices.last().map(|s| s.is_empty()).unwrap_or(false) {
            choices.pop();
        }
        debug!("Choices for ballot {:?}: {:?}", pb.id, choices);

        // Default of 1 if not specified
        let count = pb.count.unwrap_or(1);
        if count == 0 {
            debug!("Skipping ballot {:?} with a count of zero", pb.id);
            continue;
        }
        res.push(Ballot {
            ranking: choices,
            count,
        });
    }
    res
}

fn read_ballot_source(root_path: &Path, cfs: &FileSource) -> TidemanResult<Vec<Ballot>> {
    let p: PathBuf = root_path.join(&cfs.file_path);
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read ballot file {:?}", p2);
    let parsed_ballots = match cfs.provider.as_str() {
        "csv" => io_csv::read_csv_ranking(p2, cfs),
        "json" => io_json::read_json(p2),
        x => UnknownProviderSnafu {
            provider: x.to_string(),
        }
        .fail(),
    }?;
    Ok(validate_ballots(&parsed_ballots))
}

fn validate_rules(rules: &Option<ConfigRules>, max_candidates: Option<usize>) -> TallyRules {
    let configured = rules.as_ref().and_then(|r| r.max_candidates);
    TallyRules {
        max_candidates: max_candidates
            .or(configured)
            .unwrap_or(TallyRules::MAX_CANDIDATES),
    }
}

fn result_to_json(rs: &TallyResult) -> JSValue {
    let mut preferences: JSMap<String, JSValue> = JSMap::new();
    for (i, name) in rs.candidates.iter().enumerate() {
        let mut row: JSMap<String, JSValue> = JSMap::new();
        for (j, other) in rs.candidates.iter().enumerate() {
            if i != j {
                row.insert(other.clone(), json!(rs.preferences[i][j]));
            }
        }
        preferences.insert(name.clone(), JSValue::Object(row));
    }

    let pairs: Vec<JSValue> = rs
        .pairs
        .iter()
        .map(|p| {
            json!({
                "winner": p.winner,
                "loser": p.loser,
                "winnerVotes": p.winner_votes,
                "loserVotes": p.loser_votes,
                "margin": p.margin(),
                "status": match p.status {
                    PairStatus::Locked => "locked",
                    PairStatus::Skipped => "skipped",
                },
            })
        })
        .collect();

    json!({
        "winner": rs.winner,
        "numBallots": rs.num_ballots,
        "candidates": rs.candidates,
        "preferences": preferences,
        "pairs": pairs,
    })
}

fn build_summary_js(settings: &OutputSettings, rs: &TallyResult) -> JSValue {
    let c = OutputConfig {
        contest: settings.contest_name.clone(),
        date: settings.contest_date.clone(),
        jurisdiction: settings.contest_jurisdiction.clone(),
        office: settings.contest_office.clone(),
    };
    json!({
        "config": c,
        "results": result_to_json(rs) })
}

/// Writes the summary and compares it with the reference, if any.
fn finish_summary(
    settings: &OutputSettings,
    rs: &TallyResult,
    out: &Option<String>,
    check_summary_path: &Option<String>,
) -> TidemanResult<()> {
    let result_js = build_summary_js(settings, rs);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    match out.as_deref() {
        None => {}
        Some("stdout") => println!("{}", pretty_js_stats),
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, pretty_js_stats.as_bytes()).context(WritingSummarySnafu { path })?;
        }
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(summary_p.clone())?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
        info!("The summary matches the reference {:?}", summary_p);
    }
    Ok(())
}

/// Runs an election described by a configuration file.
///
/// If `input` is provided, it replaces the ballot sources of the configuration.
pub fn run_election(
    config_path: String,
    input: Option<FileSource>,
    max_candidates: Option<usize>,
    out: Option<String>,
    check_summary_path: Option<String>,
) -> TidemanResult<TallyResult> {
    let config_p = Path::new(config_path.as_str());
    let config = read_config(config_path.clone())?;
    info!("config: {:?}", config);

    let rules = validate_rules(&config.rules, max_candidates);

    let root_p = config_p.parent().context(MissingParentDirSnafu {})?;
    let sources: Vec<FileSource> = match input {
        Some(cfs) => vec![cfs],
        None => config.ballot_sources.clone(),
    };
    if sources.is_empty() {
        whatever!("No ballot source in the configuration {}", config_path);
    }

    let mut data: Vec<Ballot> = Vec::new();
    for cfs in sources.iter() {
        let mut file_data = read_ballot_source(root_p, cfs)?;
        data.append(&mut file_data);
    }
    debug!("data: {:?}", data);

    let candidates: Vec<Candidate> = config
        .candidates
        .iter()
        .map(|c| Candidate::new(&c.name))
        .collect();

    let result = run_tally(&data, &candidates, &rules).context(TallySnafu {})?;
    finish_summary(&config.output_settings, &result, &out, &check_summary_path)?;
    Ok(result)
}

/// Runs an election from a single ballot file, with the candidates given on the command line.
pub fn run_ballot_file(
    source: FileSource,
    candidate_names: &[String],
    max_candidates: Option<usize>,
    out: Option<String>,
    check_summary_path: Option<String>,
) -> TidemanResult<TallyResult> {
    ensure!(!candidate_names.is_empty(), NoCandidatesSnafu {});
    let rules = validate_rules(&None, max_candidates);
    let data = read_ballot_source(Path::new(""), &source)?;
    let candidates: Vec<Candidate> = candidate_names.iter().map(|n| Candidate::new(n)).collect();

    let result = run_tally(&data, &candidates, &rules).context(TallySnafu {})?;
    let settings = OutputSettings::named(&io_common::simplify_file_name(&source.file_path));
    finish_summary(&settings, &result, &out, &check_summary_path)?;
    Ok(result)
}

/// Runs an election by asking for the votes on the given input.
pub fn run_interactive<R: BufRead, W: Write>(
    candidate_names: &[String],
    max_candidates: Option<usize>,
    input: &mut R,
    output: &mut W,
    out: Option<String>,
) -> TidemanResult<TallyResult> {
    ensure!(!candidate_names.is_empty(), NoCandidatesSnafu {});
    let rules = validate_rules(&None, max_candidates);
    let result = io_prompt::prompt_election(candidate_names, &rules, input, output)?;
    finish_summary(&OutputSettings::named("tideman"), &result, &out, &None)?;
    Ok(result)
}
