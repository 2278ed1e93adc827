/*!

This is the long-form manual for `ranked_pairs` and the `tideman` command line program.

## The method

Every ballot ranks all the candidates. For each pair of candidates, the program counts how many
voters prefer one over the other. A pair is formed when a candidate is strictly preferred to
another one by more voters; ties form no pair. The pairs are then sorted by decreasing margin of
victory (the difference between the two counts). Pairs of equal margin keep the order of the
candidates: first by winner, then by loser, as listed in the configuration.

The pairs are locked into a graph one at a time. A pair that would close a cycle (the loser
already beats the winner through a chain of locked pairs) is skipped. The winner is the only
candidate nobody is locked in over. If several candidates are in that situation (for example when
there are no ballots, or when pairwise ties leave candidates unconnected), the election has no
single winner and an error is reported with the names of all the unbeaten candidates.

At most 9 candidates are accepted by default. This can be changed with `--max-candidates` or in the
`rules` section of the configuration.

## Interactive mode

Without an input file or a configuration, the candidates are given on the command line and the
ballots are typed in:

```text
$ tideman Alice Bob Charlie
Number of voters: 3
Rank 1: Alice
Rank 2: Bob
Rank 3: Charlie

Rank 1: Alice
Rank 2: Bob
Rank 3: Charlie

Rank 1: Charlie
Rank 2: Bob
Rank 3: Alice

Alice
```

A name that is not a candidate stops the program with `Invalid vote.` The number of voters is
asked again until it is an integer; a negative number counts as no voters at all. Candidate lists
that are empty, too long or contain a repeated name are rejected before the first prompt.

Ballot counts are added up as 64-bit unsigned integers. Ballots whose counts add up to more than
`u64::MAX` voters are rejected.

## Input formats

### `csv`

Each row is a ballot. The choices are read from the first vote column to the end of the row, the
first choice being the preferred one.

```text
id,count,choice 1,choice 2,choice 3
id1,20,A,B,C
id2,20,C,B,A
```

With the configuration options `idColumnIndex: 1`, `countColumnIndex: 2`, `firstVoteColumnIndex: 3`
and `firstVoteRowIndex: 2`, this file contains 40 votes. Indices start at 1. Without an id column,
ballots are named after the file and the line number.

### `json`

```json
{
  "ballots": [
    { "id": "b1", "count": 20, "ranking": ["A", "B", "C"] },
    { "ranking": ["C", "B", "A"] }
  ]
}
```

`id` and `count` are optional. The default count is 1.

## Configuration

The configuration file is a JSON document:

```json
{
  "outputSettings": {
    "contestName": "Club president",
    "contestDate": "2024-05-01"
  },
  "ballotSources": [
    {
      "provider": "csv",
      "filePath": "ballots.csv",
      "firstVoteColumnIndex": 3,
      "firstVoteRowIndex": 2,
      "idColumnIndex": 1,
      "countColumnIndex": 2
    }
  ],
  "candidates": [{ "name": "A" }, { "name": "B" }, { "name": "C" }],
  "rules": { "maxCandidates": 9 }
}
```

The file paths are relative to the directory of the configuration file.

## Output

With `--out`, a summary of the election is written in JSON format: the contest information, the
winner, the preference matrix and every pair with its margin and whether it was locked or skipped.
With `--reference`, the summary is compared against a previously saved one and the differences are
printed.
*/
