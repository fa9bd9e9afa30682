// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.


use std::collections::{BTreeMap, HashSet};
use std::io::{Read, Write};
use serde::{Deserialize,Serialize};
use crate::results_metadata::{CandidateData, ContestData, CountyData, PrecinctData};

/// The results of one election, read only once built.
///
/// Lookups that naturally return collections return an empty collection when
/// the contest or county is unknown; lookups of a single thing return None.
#[derive(Debug,Clone,Default,PartialEq,Eq,Serialize,Deserialize)]
#[serde(transparent)]
pub struct ElectionDataset {
    contests : Vec<ContestData>,
}

/// Some sizes, for printing.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize)]
pub struct DatasetSummary {
    pub contests : usize,
    pub counties : usize,
    pub precincts : usize,
    pub votes : usize,
}

/// Keep the first of each distinct string, in order.
fn unique<'a>(names:impl Iterator<Item=&'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    names.filter(|n|seen.insert(*n)).collect()
}

impl ElectionDataset {
    pub fn new(contests:Vec<ContestData>) -> Self { ElectionDataset{contests} }

    pub fn contests(&self) -> &[ContestData] { &self.contests }
    pub fn is_empty(&self) -> bool { self.contests.is_empty() }

    pub fn from_json_reader<R:Read>(reader:R) -> anyhow::Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json_writer<W:Write>(&self,writer:W) -> anyhow::Result<()> {
        serde_json::to_writer(writer,self)?;
        Ok(())
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary{
            contests: self.contests.len(),
            counties: self.contests.iter().map(|c|c.counties.len()).sum(),
            precincts: self.contests.iter().map(|c|c.precincts().count()).sum(),
            votes: self.contests.iter().map(|c|c.total_votes()).fold(0,usize::saturating_add),
        }
    }

    /// Names of all contests, without duplicates.
    pub fn list_contests(&self) -> Vec<&str> {
        unique(self.contests.iter().map(|c|c.contest_name.as_str()))
    }

    pub fn list_counties(&self,contest:&str) -> Vec<&str> {
        unique(self.get_counties(contest).iter().map(|c|c.county.as_str()))
    }

    pub fn list_precincts(&self,contest:&str,county:&str) -> Vec<&str> {
        self.get_county_precincts(contest,county).iter().map(|p|p.precinct.as_str()).collect()
    }

    /// Names of candidates in the contest level totals, without duplicates.
    pub fn list_candidates(&self,contest:&str) -> Vec<&str> {
        unique(self.get_candidates(contest).iter().map(|c|c.candidate.as_str()))
    }

    pub fn get_contest(&self,contest:&str) -> Option<&ContestData> {
        self.contests.iter().find(|c|c.contest_name==contest)
    }

    pub fn has_contest(&self,contest:&str) -> bool { self.get_contest(contest).is_some() }

    /// The contest level totals for the first candidate in the contest with the given name.
    pub fn get_candidate_info(&self,contest:&str,candidate:&str) -> Option<&CandidateData> {
        self.get_contest(contest)?.candidate(candidate)
    }

    pub fn contest_has_candidate(&self,contest:&str,candidate:&str) -> bool { self.get_candidate_info(contest,candidate).is_some() }

    /// Whether a candidate of this name is in any contest.
    pub fn has_candidate(&self,candidate:&str) -> bool {
        self.contests.iter().any(|c|c.candidate(candidate).is_some())
    }

    pub fn get_candidates(&self,contest:&str) -> &[CandidateData] {
        self.get_contest(contest).map(|c|c.candidates.as_slice()).unwrap_or(&[])
    }

    pub fn get_counties(&self,contest:&str) -> &[CountyData] {
        self.get_contest(contest).map(|c|c.counties.as_slice()).unwrap_or(&[])
    }

    /// All precincts in all counties of the contest.
    pub fn get_precincts(&self,contest:&str) -> Vec<&PrecinctData> {
        self.get_contest(contest).map(|c|c.precincts().collect()).unwrap_or_default()
    }

    pub fn get_county_precincts(&self,contest:&str,county:&str) -> &[PrecinctData] {
        self.get_county_results(contest,county).map(|c|c.precincts.as_slice()).unwrap_or(&[])
    }

    pub fn get_county_results(&self,contest:&str,county:&str) -> Option<&CountyData> {
        self.get_contest(contest)?.county(county)
    }

    /// Every contest level entry for a candidate of this name, fewest votes first.
    pub fn get_all_candidate_results(&self,candidate:&str) -> Vec<&CandidateData> {
        let mut res : Vec<&CandidateData> = self.contests.iter().flat_map(|c|c.candidates.iter()).filter(|c|c.candidate==candidate).collect();
        res.sort_by_key(|c|c.votes); // stable, so equal votes stay in contest order.
        res
    }

    /// Votes for everyone of this name in the contest. 0 if there is no such
    /// candidate; use [ElectionDataset::contest_has_candidate] to tell the difference.
    pub fn get_candidate_vote_total(&self,contest:&str,candidate:&str) -> usize {
        self.get_candidates(contest).iter().filter(|c|c.candidate==candidate).map(|c|c.votes).fold(0,usize::saturating_add)
    }

    /// Candidate name to votes. Names are unique keys; candidates sharing a
    /// name (with different parties) have their votes combined.
    pub fn get_contest_vote_totals(&self,contest:&str) -> BTreeMap<&str,usize> {
        let mut res = BTreeMap::new();
        for c in self.get_candidates(contest) {
            let total = res.entry(c.candidate.as_str()).or_insert(0);
            *total=usize::saturating_add(*total,c.votes);
        }
        res
    }

    pub fn get_total_votes_for_contest(&self,contest:&str) -> usize {
        self.get_contest(contest).map(|c|c.total_votes()).unwrap_or(0)
    }

    /// Percentage (0 to 100) of the contest's votes the candidate got.
    /// None if the candidate isn't in the contest or nobody got any votes.
    pub fn get_candidate_vote_percentage(&self,contest:&str,candidate:&str) -> Option<f64> {
        if !self.contest_has_candidate(contest,candidate) { return None }
        let total = self.get_total_votes_for_contest(contest);
        if total==0 { return None }
        Some(self.get_candidate_vote_total(contest,candidate) as f64/total as f64*100.0)
    }

    /// The candidate with the most votes. Ties go to whoever appears first.
    pub fn get_contest_winner(&self,contest:&str) -> Option<&CandidateData> {
        let mut best : Option<&CandidateData> = None;
        for c in self.get_candidates(contest) {
            if best.map(|b|c.votes>b.votes).unwrap_or(true) { best=Some(c); }
        }
        best
    }

    /// The contest with the smallest margin between its top two candidates.
    /// Contests with fewer than two candidates, or no votes at all, are not
    /// races and are ignored. Ties go to the contest appearing first.
    pub fn get_closest_race(&self) -> Option<&ContestData> {
        let mut best : Option<(usize,&ContestData)> = None;
        for contest in &self.contests {
            if let Some(margin) = contest.margin() {
                if best.map(|(m,_)|margin<m).unwrap_or(true) { best=Some((margin,contest)); }
            }
        }
        best.map(|(_,contest)|contest)
    }

    pub fn get_contests_by_candidate(&self,candidate:&str) -> Vec<&ContestData> {
        self.contests.iter().filter(|c|c.candidate(candidate).is_some()).collect()
    }
}

impl From<Vec<ContestData>> for ElectionDataset {
    fn from(contests: Vec<ContestData>) -> Self { ElectionDataset::new(contests) }
}
