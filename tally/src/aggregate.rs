// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.

//! Fold parsed rows into the contest hierarchy.
//!
//! Everything is kept in first seen order. Hash maps are only used to find
//! the position of an entry in a Vec, never iterated over, so the output
//! is the same for the same input.

use std::collections::HashMap;
use crate::errors::IngestError;
use crate::results_metadata::{CandidateData, ContestData, CountyData, ParsedRow, PrecinctData};

fn add_votes(total:usize,votes:usize,contest:&str,candidate:&str) -> Result<usize,IngestError> {
    total.checked_add(votes).ok_or_else(||IngestError::VoteOverflow{ contest: contest.to_string(), candidate: candidate.to_string() })
}

#[derive(Default)]
struct PrecinctBuilder {
    name : String,
    candidates : Vec<CandidateData>,
}

impl PrecinctBuilder {
    /// A repeated (candidate,party) in the same precinct is added, not replaced.
    fn add(&mut self,row:&ParsedRow) -> Result<(),IngestError> {
        match self.candidates.iter_mut().find(|c|c.same_candidate(&row.candidate,&row.party)) {
            Some(existing) => existing.votes=add_votes(existing.votes,row.votes,&row.contest_name,&row.candidate)?,
            None => self.candidates.push(CandidateData{ candidate: row.candidate.clone(), party: row.party.clone(), votes: row.votes }),
        }
        Ok(())
    }
}

#[derive(Default)]
struct CountyBuilder {
    name : String,
    precincts : Vec<PrecinctBuilder>,
    precinct_by_name : HashMap<String,usize>,
}

#[derive(Default)]
struct ContestBuilder {
    name : String,
    counties : Vec<CountyBuilder>,
    county_by_name : HashMap<String,usize>,
    /// (candidate,party) in the order first seen anywhere in the contest.
    candidate_order : Vec<(String,String)>,
    candidate_by_identity : HashMap<(String,String),usize>,
}

/// Find the entry for `name`, making a new one at the end if there isn't one yet.
fn position_or_insert<B:Default>(list:&mut Vec<B>,index:&mut HashMap<String,usize>,name:&str,init:impl FnOnce(&mut B)) -> usize {
    if let Some(&position) = index.get(name) { return position }
    let position = list.len();
    let mut builder = B::default();
    init(&mut builder);
    list.push(builder);
    index.insert(name.to_string(),position);
    position
}

impl ContestBuilder {
    fn add(&mut self,row:&ParsedRow) -> Result<(),IngestError> {
        let county = position_or_insert(&mut self.counties,&mut self.county_by_name,&row.county,|c:&mut CountyBuilder|c.name=row.county.clone());
        let county = &mut self.counties[county];
        let precinct = position_or_insert(&mut county.precincts,&mut county.precinct_by_name,&row.precinct,|p:&mut PrecinctBuilder|p.name=row.precinct.clone());
        county.precincts[precinct].add(row)?;
        let identity = (row.candidate.clone(),row.party.clone());
        if !self.candidate_by_identity.contains_key(&identity) {
            self.candidate_by_identity.insert(identity.clone(),self.candidate_order.len());
            self.candidate_order.push(identity);
        }
        Ok(())
    }

    /// Build the final contest, computing the contest level totals from the precincts.
    /// Fails if any total, including the whole contest's, does not fit in a usize.
    fn finish(self) -> Result<ContestData,IngestError> {
        let mut candidates : Vec<CandidateData> = self.candidate_order.into_iter().map(|(candidate,party)|CandidateData{ candidate, party, votes: 0 }).collect();
        let counties : Vec<CountyData> = self.counties.into_iter().map(|county|CountyData{
            county: county.name,
            precincts: county.precincts.into_iter().map(|p|PrecinctData{ precinct: p.name, candidates: p.candidates }).collect(),
        }).collect();
        for precinct in counties.iter().flat_map(|c|c.precincts.iter()) {
            for c in &precinct.candidates {
                let index = self.candidate_by_identity[&(c.candidate.clone(),c.party.clone())];
                candidates[index].votes=add_votes(candidates[index].votes,c.votes,&self.name,&c.candidate)?;
            }
        }
        let mut total : usize = 0;
        for c in &candidates { total=add_votes(total,c.votes,&self.name,&c.candidate)?; }
        Ok(ContestData{ contest_name: self.name, counties, candidates })
    }
}

/// Accumulates rows one at a time. Call [ResultsAggregator::finish] when done.
#[derive(Default)]
pub struct ResultsAggregator {
    contests : Vec<ContestBuilder>,
    contest_by_name : HashMap<String,usize>,
    rows : usize,
}

impl ResultsAggregator {
    /// Fails only if a vote total would overflow.
    pub fn add(&mut self,row:&ParsedRow) -> Result<(),IngestError> {
        let contest = position_or_insert(&mut self.contests,&mut self.contest_by_name,&row.contest_name,|c:&mut ContestBuilder|c.name=row.contest_name.clone());
        self.contests[contest].add(row)?;
        self.rows+=1;
        Ok(())
    }

    /// Number of rows added so far.
    pub fn rows(&self) -> usize { self.rows }

    pub fn finish(self) -> Result<Vec<ContestData>,IngestError> {
        self.contests.into_iter().map(ContestBuilder::finish).collect()
    }
}

/// Aggregate a whole sequence of rows.
pub fn aggregate<'a>(rows:impl IntoIterator<Item=&'a ParsedRow>) -> Result<Vec<ContestData>,IngestError> {
    let mut aggregator = ResultsAggregator::default();
    for row in rows { aggregator.add(row)?; }
    aggregator.finish()
}
