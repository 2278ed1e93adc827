use crate::tideman::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
    #[serde(rename = "contestJurisdiction")]
    pub contest_jurisdiction: Option<String>,
    #[serde(rename = "contestOffice")]
    pub contest_office: Option<String>,
}

impl OutputSettings {
    pub fn named(contest_name: &str) -> OutputSettings {
        OutputSettings {
            contest_name: contest_name.to_string(),
            contest_date: None,
            contest_jurisdiction: None,
            contest_office: None,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    pub date: Option<String>,
    pub jurisdiction: Option<String>,
    pub office: Option<String>,
}

/// A file of ballots. All the indices start at 1.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "firstVoteColumnIndex")]
    pub first_vote_column: Option<JSValue>,
    #[serde(rename = "firstVoteRowIndex")]
    pub first_vote_row: Option<JSValue>,
    #[serde(rename = "idColumnIndex")]
    pub id_column_index: Option<JSValue>,
    #[serde(rename = "countColumnIndex")]
    pub count_column_index: Option<JSValue>,
}

impl FileSource {
    pub fn new(provider: &str, file_path: &str) -> FileSource {
        FileSource {
            provider: provider.to_string(),
            file_path: file_path.to_string(),
            first_vote_column: None,
            first_vote_row: None,
            id_column_index: None,
            count_column_index: None,
        }
    }

    pub fn with_first_vote(self, column: usize, row: usize) -> FileSource {
        FileSource {
            first_vote_column: Some(JSValue::from(column)),
            first_vote_row: Some(JSValue::from(row)),
            ..self
        }
    }

    /// The first column containing choices, starting at 0.
    pub fn first_vote_column_index(&self) -> TidemanResult<usize> {
        read_js_index(&self.first_vote_column).map(|x| x.unwrap_or(0))
    }

    /// The first row containing ballots, starting at 0.
    pub fn first_vote_row_index(&self) -> TidemanResult<usize> {
        read_js_index(&self.first_vote_row).map(|x| x.unwrap_or(0))
    }

    pub fn id_column_index_int(&self) -> TidemanResult<Option<usize>> {
        read_js_index(&self.id_column_index)
    }

    pub fn count_column_index_int(&self) -> TidemanResult<Option<usize>> {
        read_js_index(&self.count_column_index)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ConfigCandidate {
    pub name: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ConfigRules {
    #[serde(rename = "maxCandidates")]
    pub max_candidates: Option<usize>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "ballotSources", default)]
    pub ballot_sources: Vec<FileSource>,
    pub candidates: Vec<ConfigCandidate>,
    pub rules: Option<ConfigRules>,
}

pub fn read_config(path: String) -> TidemanResult<ElectionConfig> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})
}

pub fn read_summary(path: String) -> TidemanResult<JSValue> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_summary: {:?}", js["results"]);
    Ok(js)
}

// Converts a 1-based index to a 0-based one.
fn read_js_index(x: &Option<JSValue>) -> TidemanResult<Option<usize>> {
    match x {
        None => Ok(None),
        Some(v) => {
            let idx = read_js_int(v)?;
            idx.checked_sub(1)
                .map(Some)
                .context(ParsingJsonNumberSnafu {})
        }
    }
}

fn read_js_int(x: &JSValue) -> TidemanResult<usize> {
    match x {
        JSValue::Number(n) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {}),
        // Excel-style column names. Only the columns A to Z are supported.
        JSValue::String(s) if s.len() == 1 && s.chars().all(|c| c.is_ascii_alphabetic()) => {
            let c1 = s.to_ascii_lowercase().as_bytes()[0];
            Ok((c1 - b'a') as usize + 1)
        }
        JSValue::String(s) => s.parse::<usize>().ok().context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}
