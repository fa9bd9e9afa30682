// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.

//! The hierarchy of results: contest, county, precinct, candidate.

use serde::{Serialize,Deserialize};

/// One line of a results file, after validation.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct ParsedRow {
    /// Normalized with [crate::parse_util::normalize_contest_name], e.g. US_PRESIDENT
    pub contest_name : String,
    pub county : String,
    pub precinct : String,
    pub candidate : String,
    /// May be empty for unaffiliated candidates or referendum choices.
    pub party : String,
    pub votes : usize,
}

/// The votes for a candidate in some scope, either a single precinct or a whole contest.
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct CandidateData {
    pub candidate : String,
    pub party : String,
    pub votes : usize,
}

impl CandidateData {
    /// Candidates within a contest are identified by name and party together.
    pub fn same_candidate(&self,candidate:&str,party:&str) -> bool {
        self.candidate==candidate && self.party==party
    }
}

#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct PrecinctData {
    pub precinct : String,
    /// in the order first seen in the source file.
    pub candidates : Vec<CandidateData>,
}

#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct CountyData {
    pub county : String,
    pub precincts : Vec<PrecinctData>,
}

/// All the results for one contest (race or question).
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct ContestData {
    pub contest_name : String,
    pub counties : Vec<CountyData>,
    /// Contest wide totals, the sum over every precinct in every county.
    pub candidates : Vec<CandidateData>,
}

impl ContestData {
    pub fn county(&self,county:&str) -> Option<&CountyData> {
        self.counties.iter().find(|c|c.county==county)
    }
    /// The first contest level entry with the given name.
    pub fn candidate(&self,candidate:&str) -> Option<&CandidateData> {
        self.candidates.iter().find(|c|c.candidate==candidate)
    }
    /// Every precinct, in county order.
    pub fn precincts(&self) -> impl Iterator<Item=&PrecinctData> {
        self.counties.iter().flat_map(|c|c.precincts.iter())
    }
    /// Sum of the contest level votes for all candidates. Saturates rather than
    /// overflowing, which can only happen for data not built by the aggregator.
    pub fn total_votes(&self) -> usize {
        self.candidates.iter().map(|c|c.votes).fold(0,usize::saturating_add)
    }

    /// The two highest contest level entries, highest first. Among equal
    /// vote counts the one seen first is ranked higher.
    pub fn top_two(&self) -> Option<(&CandidateData,&CandidateData)> {
        let mut first : Option<&CandidateData> = None;
        let mut second : Option<&CandidateData> = None;
        for c in &self.candidates {
            match first {
                Some(f) if c.votes<=f.votes => {
                    if second.map(|s|c.votes>s.votes).unwrap_or(true) { second=Some(c); }
                }
                _ => { second=first; first=Some(c); }
            }
        }
        Some((first?,second?))
    }

    /// The difference in votes between the top two candidates. None if there
    /// are fewer than two candidates, or nobody has any votes.
    pub fn margin(&self) -> Option<usize> {
        let (first,second) = self.top_two()?;
        if first.votes==0 { None } else { Some(first.votes-second.votes) }
    }
}
