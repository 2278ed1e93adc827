// Interactive entry of the votes.

use ranked_pairs::builder::Builder;

use crate::tideman::*;

/// Reads one line, without the line terminator. Fails if the input is exhausted.
fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> TidemanResult<String> {
    write!(output, "{}", prompt).context(PromptSnafu {})?;
    output.flush().context(PromptSnafu {})?;
    let mut line = String::new();
    let num_read = input.read_line(&mut line).context(PromptSnafu {})?;
    ensure!(num_read > 0, PromptEndedSnafu {});
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// Asks again until the answer is an integer. A negative count means nobody votes.
fn prompt_count<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> TidemanResult<usize> {
    loop {
        let line = prompt_line(input, output, prompt)?;
        match line.trim().parse::<i64>() {
            Ok(x) => return Ok(usize::try_from(x).unwrap_or(0)),
            Err(_) => debug!("prompt_count: not a number: {:?}", line),
        }
    }
}

/// Asks for the number of voters, then for the ranking of every voter, and runs the election.
///
/// A name that is not a candidate stops the input immediately.
pub fn prompt_election<R: BufRead, W: Write>(
    candidates: &[String],
    rules: &TallyRules,
    input: &mut R,
    output: &mut W,
) -> TidemanResult<TallyResult> {
    let mut builder = Builder::new(rules)
        .context(TallySnafu {})?
        .candidates(candidates)
        .context(TallySnafu {})?;

    let voter_count = prompt_count(input, output, "Number of voters: ")?;
    for voter in 0..voter_count {
        let mut ranks: Vec<String> = Vec::with_capacity(candidates.len());
        for rank in 0..candidates.len() {
            let name = prompt_line(input, output, &format!("Rank {}: ", rank + 1))?;
            if !candidates.contains(&name) {
                return Err(TidemanError::Tally {
                    source: TallyErrors::InvalidVote {
                        ballot: voter,
                        rank,
                        name,
                    },
                });
            }
            ranks.push(name);
        }
        builder.add_ballot(&ranks).context(TallySnafu {})?;
        writeln!(output).context(PromptSnafu {})?;
    }
    info!("Read {} ballots", builder.num_ballots());
    builder.run().context(TallySnafu {})
}
