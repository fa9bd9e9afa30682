// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.

//! An election whose results can be (re)loaded while other threads query them.

use std::sync::{Arc, PoisonError, RwLock};
use chrono::NaiveDate;
use log::info;
use once_cell::sync::Lazy;
use crate::collector::{Collector, IngestReport};
use crate::config::IngestConfig;
use crate::datasource_description::ResultsPublisher;
use crate::download::ArchiveFetcher;
use crate::election_data::ElectionDataset;
use crate::errors::{IngestError, MalformedRow};

static EMPTY_DATASET : Lazy<Arc<ElectionDataset>> = Lazy::new(||Arc::new(ElectionDataset::default()));

/// Outcome of a successful [Election::refresh].
#[derive(Debug)]
pub struct RefreshOutcome {
    /// The dataset now held.
    pub dataset : Arc<ElectionDataset>,
    pub rows_read : usize,
    pub skipped_rows : Vec<MalformedRow>,
}

/// Holds the latest complete dataset for an election date.
///
/// Readers take an `Arc` snapshot, so a refresh never shows anyone a half built
/// dataset: the new one replaces the old in one step, and only on success.
pub struct Election {
    election_date : NaiveDate,
    collector : Collector,
    dataset : RwLock<Option<Arc<ElectionDataset>>>,
}

impl Election {
    pub fn new(election_date:NaiveDate,collector:Collector) -> Self {
        Election{ election_date, collector, dataset: RwLock::new(None) }
    }

    /// The election held by `publisher` on `election_date`.
    pub fn for_publisher(publisher:&dyn ResultsPublisher,election_date:NaiveDate,fetcher:Box<dyn ArchiveFetcher+Send+Sync>,config:IngestConfig) -> Self {
        let collector = Collector::new(publisher.archive_url(election_date),fetcher,config);
        Self::new(election_date,collector)
    }

    pub fn election_date(&self) -> NaiveDate { self.election_date }
    pub fn url(&self) -> &str { self.collector.url() }

    /// The dataset from the last successful ingestion, or None if there hasn't been one.
    pub fn dataset(&self) -> Option<Arc<ElectionDataset>> {
        self.dataset.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// The current dataset, or an empty one if nothing has been loaded yet.
    pub fn snapshot(&self) -> Arc<ElectionDataset> {
        self.dataset().unwrap_or_else(||EMPTY_DATASET.clone())
    }

    pub fn is_initialized(&self) -> bool { self.dataset().is_some() }

    /// Load the dataset for the first time.
    pub fn initialize(&self) -> Result<RefreshOutcome,IngestError> { self.refresh() }

    /// Fetch and ingest everything again, replacing the whole dataset.
    /// On failure the previously held dataset (if any) is kept.
    pub fn refresh(&self) -> Result<RefreshOutcome,IngestError> {
        let IngestReport{ dataset, rows_read, skipped_rows } = self.collector.collect()?;
        let dataset = Arc::new(dataset);
        *self.dataset.write().unwrap_or_else(PoisonError::into_inner) = Some(dataset.clone());
        info!("Loaded results for election on {} from {}",self.election_date,self.url());
        Ok(RefreshOutcome{ dataset, rows_read, skipped_rows })
    }
}
