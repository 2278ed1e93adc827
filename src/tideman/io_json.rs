use serde::{Deserialize, Serialize};

use crate::tideman::*;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
struct JsonBallot {
    id: Option<String>,
    count: Option<u64>,
    ranking: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
struct JsonBallots {
    ballots: Vec<JsonBallot>,
}

pub fn read_json(path: String) -> TidemanResult<Vec<ParsedBallot>> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    parse_json(contents.as_str())
}

fn parse_json(contents: &str) -> TidemanResult<Vec<ParsedBallot>> {
    let jb: JsonBallots = serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    debug!("read_json: {} ballots", jb.ballots.len());
    Ok(jb
        .ballots
        .into_iter()
        .map(|b| ParsedBallot {
            id: b.id,
            count: b.count,
            choices: b.ranking,
        })
        .collect())
}
