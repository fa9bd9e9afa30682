// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.


//! Ask questions of an election's results. Answers are printed as JSON;
//! something that doesn't exist is printed as null.

use clap::{Parser, Subcommand};
use std::io::stdout;
use main_app::SourceOptions;
use tally::election_data::ElectionDataset;

#[derive(Parser)]
#[clap(version = "0.1", name="PrecinctTally")]
/// Query precinct level election results.
struct Opts {
    #[clap(flatten)]
    source : SourceOptions,

    #[clap(subcommand)]
    query : Query,
}

#[derive(Subcommand)]
enum Query {
    /// Counts of contests, counties, precincts and votes.
    Summary,
    /// All contest names.
    Contests,
    /// Counties reporting for a contest.
    Counties { contest : String },
    /// Precincts in a county for a contest.
    Precincts { contest : String, county : String },
    /// Candidate names in a contest.
    Candidates { contest : String },
    /// Everything about a contest.
    Contest { contest : String },
    /// Contest wide totals for a candidate.
    Candidate { contest : String, candidate : String },
    /// All precinct results in one county for a contest.
    County { contest : String, county : String },
    /// A candidate's results in every contest they are in, fewest votes first.
    CandidateResults { candidate : String },
    /// The contests a candidate is in.
    ContestsByCandidate { candidate : String },
    /// Whether a candidate is in any contest.
    HasCandidate { candidate : String },
    /// Total votes for a candidate in a contest.
    VoteTotal { contest : String, candidate : String },
    /// Votes for each candidate in a contest.
    VoteTotals { contest : String },
    /// Total votes cast in a contest.
    TotalVotes { contest : String },
    /// A candidate's share of the vote, as a percentage.
    Percentage { contest : String, candidate : String },
    /// The candidate with the most votes.
    Winner { contest : String },
    /// The contest with the smallest margin between first and second.
    ClosestRace,
}

fn answer(data:&ElectionDataset,query:&Query) -> serde_json::Result<serde_json::Value> {
    use serde_json::to_value;
    match query {
        Query::Summary => to_value(data.summary()),
        Query::Contests => to_value(data.list_contests()),
        Query::Counties { contest } => to_value(data.list_counties(contest)),
        Query::Precincts { contest, county } => to_value(data.list_precincts(contest,county)),
        Query::Candidates { contest } => to_value(data.list_candidates(contest)),
        Query::Contest { contest } => to_value(data.get_contest(contest)),
        Query::Candidate { contest, candidate } => to_value(data.get_candidate_info(contest,candidate)),
        Query::County { contest, county } => to_value(data.get_county_results(contest,county)),
        Query::CandidateResults { candidate } => to_value(data.get_all_candidate_results(candidate)),
        Query::ContestsByCandidate { candidate } => to_value(data.get_contests_by_candidate(candidate).iter().map(|c|c.contest_name.as_str()).collect::<Vec<_>>()),
        Query::HasCandidate { candidate } => to_value(data.has_candidate(candidate)),
        Query::VoteTotal { contest, candidate } => to_value(data.contest_has_candidate(contest,candidate).then(||data.get_candidate_vote_total(contest,candidate))),
        Query::VoteTotals { contest } => to_value(data.get_contest_vote_totals(contest)),
        Query::TotalVotes { contest } => to_value(data.get_total_votes_for_contest(contest)),
        Query::Percentage { contest, candidate } => to_value(data.get_candidate_vote_percentage(contest,candidate)),
        Query::Winner { contest } => to_value(data.get_contest_winner(contest)),
        Query::ClosestRace => to_value(data.get_closest_race().map(|c|&c.contest_name)),
    }
}

fn main() -> anyhow::Result<()> {
    main_app::init_logging();
    let opt: Opts = Opts::parse();
    let dataset = opt.source.load()?;
    let value = answer(&dataset,&opt.query)?;
    serde_json::to_writer_pretty(stdout(),&value)?;
    println!();
    Ok(())
}
