// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.

//! Queries over a small hand built dataset.

use tally::election_data::ElectionDataset;
use tally::results_metadata::{CandidateData, ContestData, CountyData, PrecinctData};

fn candidate(name:&str,party:&str,votes:usize) -> CandidateData {
    CandidateData{ candidate: name.to_string(), party: party.to_string(), votes }
}

fn contest(name:&str,county:&str,precinct:&str,candidates:Vec<CandidateData>) -> ContestData {
    ContestData{
        contest_name: name.to_string(),
        counties: vec![CountyData{ county: county.to_string(), precincts: vec![PrecinctData{ precinct: precinct.to_string(), candidates: candidates.clone() }] }],
        candidates,
    }
}

fn sample() -> ElectionDataset {
    ElectionDataset::new(vec![
        contest("US_PRESIDENT","Orange","1",vec![candidate("John","DEM",100050),candidate("Mark","REP",100000),candidate("Alex","DEM",1000)]),
        contest("US_SENATE","Wake","2",vec![candidate("Alex","DEM",15000),candidate("Felix","REP",18000)]),
    ])
}

#[test]
fn lists() {
    let data = sample();
    let mut contests = data.list_contests();
    contests.sort();
    assert_eq!(contests,vec!["US_PRESIDENT","US_SENATE"]);
    assert_eq!(data.list_counties("US_PRESIDENT"),vec!["Orange"]);
    assert_eq!(data.list_precincts("US_SENATE","Wake"),vec!["2"]);
    assert_eq!(data.list_candidates("US_PRESIDENT"),vec!["John","Mark","Alex"]);
    assert!(data.list_counties("NC_GOVERNOR").is_empty());
    assert!(data.list_precincts("US_SENATE","Orange").is_empty());
    assert!(data.list_precincts("NC_GOVERNOR","Wake").is_empty());
    assert!(data.list_candidates("NC_GOVERNOR").is_empty());
}

#[test]
fn unknown_contest_is_absent() {
    let data = sample();
    assert!(data.get_contest("NC_GOVERNOR").is_none());
    assert!(data.get_candidate_info("NC_GOVERNOR","John").is_none());
    assert!(data.get_candidate_info("US_SENATE","John").is_none());
    assert!(data.get_county_results("NC_GOVERNOR","Wake").is_none());
    assert!(data.get_contest_winner("NC_GOVERNOR").is_none());
    assert!(data.get_candidate_vote_percentage("NC_GOVERNOR","John").is_none());
    assert!(data.get_candidates("NC_GOVERNOR").is_empty());
    assert!(data.get_counties("NC_GOVERNOR").is_empty());
    assert!(data.get_precincts("NC_GOVERNOR").is_empty());
    assert!(data.get_contest_vote_totals("NC_GOVERNOR").is_empty());
    assert_eq!(data.get_total_votes_for_contest("NC_GOVERNOR"),0);
    assert_eq!(data.get_candidate_vote_total("NC_GOVERNOR","John"),0);
    assert!(!data.has_contest("NC_GOVERNOR"));
    assert!(!data.contest_has_candidate("US_SENATE","John"));
    assert!(data.contest_has_candidate("US_SENATE","Felix"));
    assert!(!data.contest_has_candidate("NC_GOVERNOR","Felix"));
}

#[test]
fn candidate_anywhere_in_election() {
    let data = sample();
    assert!(data.has_candidate("Felix"));
    assert!(data.has_candidate("John"));
    assert!(!data.has_candidate("Joseph"));
    assert!(!ElectionDataset::default().has_candidate("Felix"));
}

#[test]
fn candidate_info_and_county() {
    let data = sample();
    assert_eq!(data.get_candidate_info("US_PRESIDENT","Mark"),Some(&candidate("Mark","REP",100000)));
    let county = data.get_county_results("US_PRESIDENT","Orange").unwrap();
    assert_eq!(county,&data.get_contest("US_PRESIDENT").unwrap().counties[0]);
    assert_eq!(data.get_precincts("US_SENATE").len(),1);
}

#[test]
fn totals() {
    let data = sample();
    assert_eq!(data.get_total_votes_for_contest("US_SENATE"),33000);
    assert_eq!(data.get_candidate_vote_total("US_SENATE","Felix"),18000);
    let totals = data.get_contest_vote_totals("US_PRESIDENT");
    assert_eq!(totals.get("John"),Some(&100050));
    assert_eq!(totals.get("Mark"),Some(&100000));
    assert_eq!(totals.get("Alex"),Some(&1000));
    for contest in data.list_contests() {
        let sum : usize = data.list_candidates(contest).iter().map(|c|data.get_candidate_vote_total(contest,c)).sum();
        assert_eq!(sum,data.get_total_votes_for_contest(contest));
    }
}

#[test]
fn percentages() {
    let data = sample();
    assert_eq!(data.get_candidate_vote_percentage("US_PRESIDENT","John"),Some(100050.0/201050.0*100.0));
    for contest in data.list_contests() {
        let sum : f64 = data.list_candidates(contest).iter().map(|c|data.get_candidate_vote_percentage(contest,c).unwrap()).sum();
        assert!((sum-100.0).abs()<1e-9);
    }
}

#[test]
fn zero_votes_has_no_percentage() {
    let data = ElectionDataset::new(vec![contest("REFERENDUM","Wake","1",vec![candidate("For","",0),candidate("Against","",0)])]);
    assert!(data.get_candidate_vote_percentage("REFERENDUM","For").is_none());
    assert_eq!(data.get_candidate_vote_total("REFERENDUM","For"),0);
    assert!(data.contest_has_candidate("REFERENDUM","For"));
    assert!(data.has_candidate("For"));
    assert!(data.get_closest_race().is_none());
}

#[test]
fn winners() {
    let data = sample();
    assert_eq!(data.get_contest_winner("US_SENATE").unwrap().candidate,"Felix");
    assert_eq!(data.get_contest_winner("US_PRESIDENT").unwrap().candidate,"John");
}

#[test]
fn winner_tie_goes_to_first_seen() {
    let data = ElectionDataset::new(vec![contest("MAYOR","Wake","1",vec![candidate("A","",5),candidate("B","",7),candidate("C","",7)])]);
    assert_eq!(data.get_contest_winner("MAYOR").unwrap().candidate,"B");
}

#[test]
fn all_results_for_candidate() {
    let data = sample();
    let results = data.get_all_candidate_results("Alex");
    assert_eq!(results,vec![&candidate("Alex","DEM",1000),&candidate("Alex","DEM",15000)]);
    assert!(data.get_all_candidate_results("Nobody").is_empty());
    let contests : Vec<&str> = data.get_contests_by_candidate("Alex").iter().map(|c|c.contest_name.as_str()).collect();
    assert_eq!(contests,vec!["US_PRESIDENT","US_SENATE"]);
    assert!(data.get_contests_by_candidate("Nobody").is_empty());
}

#[test]
fn closest_race() {
    let data = sample();
    assert_eq!(data.get_closest_race(),data.get_contest("US_PRESIDENT"));
    assert_eq!(data.get_contest("US_PRESIDENT").unwrap().margin(),Some(50));
    assert_eq!(data.get_contest("US_SENATE").unwrap().margin(),Some(3000));
}

#[test]
fn closest_race_ignores_uncontested() {
    let data = ElectionDataset::new(vec![
        contest("SHERIFF","Wake","1",vec![candidate("Solo","REP",500)]),
        contest("DA","Wake","1",vec![candidate("P","DEM",900),candidate("Q","REP",100)]),
    ]);
    assert_eq!(data.get_closest_race().unwrap().contest_name,"DA");
    assert!(ElectionDataset::default().get_closest_race().is_none());
}

#[test]
fn empty_dataset_answers_empty() {
    let data = ElectionDataset::default();
    assert!(data.list_contests().is_empty());
    assert!(data.get_contest("US_PRESIDENT").is_none());
    assert!(data.get_all_candidate_results("Alex").is_empty());
    assert_eq!(data.summary().contests,0);
}

#[test]
fn json_snapshot_round_trips() {
    let data = sample();
    let mut buffer = vec![];
    data.to_json_writer(&mut buffer).unwrap();
    let json : serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(json[0]["contest_name"],"US_PRESIDENT");
    assert_eq!(json[1]["counties"][0]["precincts"][0]["candidates"][1]["votes"],18000);
    assert_eq!(ElectionDataset::from_json_reader(buffer.as_slice()).unwrap(),data);
}
