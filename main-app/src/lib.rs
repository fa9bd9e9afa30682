// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.

//! Command line front ends. Everything shared by the binaries lives here.

use std::path::PathBuf;
use std::sync::Arc;
use anyhow::anyhow;
use clap::Args;
use log::info;
use ncsbe::parse::parse_election_date;
use tally::collector::Collector;
use tally::config::{FetchConfig, IngestConfig, MalformedRowPolicy, ResultsConfig};
use tally::download::{ArchiveFetcher, HttpFetcher, InMemoryFetcher};
use tally::election::Election;
use tally::election_data::ElectionDataset;
use crate::ec_data_source::ECDataSource;

pub mod ec_data_source;

/// Where to get results from.
#[derive(Args, Debug, Clone)]
pub struct SourceOptions {
    /// The election date, as YYYY-MM-DD, e.g. 2024-11-05.
    pub date : Option<String>,

    /// Who published the results. Currently only NCSBE is supported.
    #[clap(long, default_value = "NCSBE")]
    pub publisher : ECDataSource,

    /// Read an already downloaded zip archive instead of downloading it.
    #[clap(long)]
    pub archive : Option<PathBuf>,

    /// Read a JSON dataset produced by fetch_results instead of an archive.
    #[clap(long, conflicts_with = "archive")]
    pub snapshot : Option<PathBuf>,

    /// A JSON configuration file. Anything not mentioned takes the publisher's default.
    #[clap(long)]
    pub config : Option<PathBuf>,

    /// Fail if any row is malformed, rather than skipping it.
    #[clap(long)]
    pub strict : bool,
}

impl SourceOptions {
    fn settings(&self) -> anyhow::Result<(IngestConfig,FetchConfig)> {
        let defaults = ResultsConfig{ ingest: self.publisher.publisher().default_ingest_config(), fetch: FetchConfig::default() };
        let ResultsConfig{ mut ingest, fetch } = match &self.config {
            Some(path) => ResultsConfig::load_over(path,defaults)?,
            None => defaults,
        };
        if self.strict { ingest.malformed_rows = MalformedRowPolicy::Abort; }
        Ok((ingest,fetch))
    }

    /// Make the election, without loading anything yet.
    pub fn election(&self) -> anyhow::Result<Election> {
        let date = self.date.as_deref().ok_or_else(||anyhow!("An election date is required unless --snapshot is used"))?;
        let date = parse_election_date(date)?;
        let (ingest,fetch) = self.settings()?;
        let fetcher : Box<dyn ArchiveFetcher+Send+Sync> = match &self.archive {
            Some(path) => Box::new(InMemoryFetcher{ contents: std::fs::read(path)? }),
            None => Box::new(HttpFetcher::new(fetch)?),
        };
        let url = self.publisher.publisher().archive_url(date);
        Ok(Election::new(date,Collector::new(url,fetcher,ingest)))
    }

    /// Get the dataset, by whatever means were requested.
    pub fn load(&self) -> anyhow::Result<Arc<ElectionDataset>> {
        if let Some(path) = &self.snapshot {
            return Ok(Arc::new(ElectionDataset::from_json_reader(std::fs::File::open(path)?)?));
        }
        let election = self.election()?;
        let outcome = election.initialize()?;
        if !outcome.skipped_rows.is_empty() {
            info!("{} malformed rows were skipped",outcome.skipped_rows.len());
        }
        Ok(outcome.dataset)
    }
}

/// Start logging, at info level unless RUST_LOG says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
