// Primitives for reading CSV files.

use std::io::Read;

use crate::tideman::{io_common::make_default_id, *};

pub fn read_csv_ranking(path: String, cfs: &FileSource) -> TidemanResult<Vec<ParsedBallot>> {
    let rdr = csv_builder()
        .from_path(&path)
        .context(CsvOpenSnafu { path: path.clone() })?;
    parse_csv_ranking(rdr, cfs, make_default_id(&path))
}

fn csv_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    // Rows may have different lengths, they are checked against the candidates later.
    builder.has_headers(false).flexible(true);
    builder
}

fn parse_csv_ranking<R: Read>(
    rdr: csv::Reader<R>,
    cfs: &FileSource,
    default_id: impl Fn(usize) -> String,
) -> TidemanResult<Vec<ParsedBallot>> {
    let id_idx_o = cfs.id_column_index_int()?;
    let choices_start_col = cfs.first_vote_column_index()?;
    let count_idx_o = cfs.count_column_index_int()?;
    let first_row = cfs.first_vote_row_index()?;

    let mut res: Vec<ParsedBallot> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate().skip(first_row) {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_csv_ranking: lineno: {:?} row: {:?}", lineno, line);
        if line.iter().all(|s| s.trim().is_empty()) {
            continue;
        }

        let id = if let Some(id_idx) = id_idx_o {
            line.get(id_idx)
                .context(CsvLineTooShortSnafu { lineno })?
                .to_string()
        } else {
            default_id(lineno)
        };

        let count: Option<u64> = if let Some(count_idx) = count_idx_o {
            let content = line
                .get(count_idx)
                .context(CsvLineTooShortSnafu { lineno })?
                .trim();
            let c = content
                .parse::<u64>()
                .ok()
                .context(CsvCountSnafu { lineno, content })?;
            Some(c)
        } else {
            None
        };

        let choices: Vec<String> = line
            .iter()
            .skip(choices_start_col)
            .map(|s| s.to_string())
            .collect();

        res.push(ParsedBallot {
            id: Some(id),
            count,
            choices,
        });
    }
    Ok(res)
}
