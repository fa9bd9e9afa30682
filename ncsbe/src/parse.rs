// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.

use std::borrow::Cow;
use chrono::NaiveDate;
use thiserror::Error;
use tally::config::{FetchConfig, IngestConfig};
use tally::datasource_description::ResultsPublisher;
use tally::download::{ArchiveFetcher, CancellationToken, HttpFetcher};
use tally::election::Election;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Election date {0:?} is not of the form YYYY-MM-DD")]
pub struct InvalidElectionDate(pub String);

/// Parse an ISO date like 2024-11-05.
pub fn parse_election_date(date:&str) -> Result<NaiveDate,InvalidElectionDate> {
    NaiveDate::parse_from_str(date.trim(),"%Y-%m-%d").map_err(|_|InvalidElectionDate(date.to_string()))
}

/// The results archive for an election. The date appears twice, once
/// with underscores and once with no separators.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// let date = NaiveDate::from_ymd_opt(2024,11,5).unwrap();
/// assert_eq!(ncsbe::parse::results_archive_url(date),"https://s3.amazonaws.com/dl.ncsbe.gov/ENRS/2024_11_05/results_pct_20241105.zip");
/// ```
pub fn results_archive_url(date:NaiveDate) -> String {
    format!("https://s3.amazonaws.com/dl.ncsbe.gov/ENRS/{}/results_pct_{}.zip",date.format("%Y_%m_%d"),date.format("%Y%m%d"))
}

/// The North Carolina State Board of Elections.
pub struct NCSBE {}

impl ResultsPublisher for NCSBE {
    fn name(&self) -> Cow<'static, str> { "North Carolina State Board of Elections".into() }
    fn authority_url(&self) -> Cow<'static, str> { "https://www.ncsbe.gov/".into() }
    fn archive_url(&self,date:NaiveDate) -> String { results_archive_url(date) }
    // NCSBE files use the default column names.
}

/// An election on the given date (YYYY-MM-DD), fetched over HTTP. Nothing is downloaded until
/// [Election::initialize] is called.
pub fn get_ncsbe_election(date:&str,fetch:FetchConfig,ingest:IngestConfig,cancel:CancellationToken) -> anyhow::Result<Election> {
    let date = parse_election_date(date)?;
    let fetcher = HttpFetcher::with_cancellation(fetch,cancel)?;
    Ok(get_ncsbe_election_with_fetcher(date,Box::new(fetcher),ingest))
}

pub fn get_ncsbe_election_with_fetcher(date:NaiveDate,fetcher:Box<dyn ArchiveFetcher+Send+Sync>,ingest:IngestConfig) -> Election {
    Election::for_publisher(&NCSBE{},date,fetcher,ingest)
}
