// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.

//! The whole ingestion pipeline: fetch, extract, parse, aggregate.

use log::{debug, info, warn};
use crate::aggregate::ResultsAggregator;
use crate::config::{IngestConfig, MalformedRowPolicy};
use crate::download::ArchiveFetcher;
use crate::election_data::ElectionDataset;
use crate::errors::{IngestError, MalformedRow};
use crate::extract::extract_results_text;
use crate::parse_util::{is_blank_record, RowParser};

/// What came out of a successful ingestion.
#[derive(Debug)]
pub struct IngestReport {
    pub dataset : ElectionDataset,
    /// data rows that made it into the dataset.
    pub rows_read : usize,
    /// rows dropped under [MalformedRowPolicy::Skip]. Always empty under [MalformedRowPolicy::Abort].
    pub skipped_rows : Vec<MalformedRow>,
}

pub struct Collector {
    url : String,
    fetcher : Box<dyn ArchiveFetcher+Send+Sync>,
    config : IngestConfig,
}

impl Collector {
    pub fn new(url:impl Into<String>,fetcher:Box<dyn ArchiveFetcher+Send+Sync>,config:IngestConfig) -> Self {
        Collector{ url: url.into(), fetcher, config }
    }

    pub fn url(&self) -> &str { &self.url }
    pub fn config(&self) -> &IngestConfig { &self.config }

    /// Download the archive and ingest it. A failed download is not retried.
    pub fn collect(&self) -> Result<IngestReport,IngestError> {
        let archive = self.fetcher.fetch(&self.url)?;
        self.ingest_archive(&archive)
    }

    pub fn ingest_archive(&self,archive_bytes:&[u8]) -> Result<IngestReport,IngestError> {
        let text = extract_results_text(archive_bytes,&self.config.result_file_suffix)?;
        self.ingest_text(&text)
    }

    /// Parse tab separated text whose first non blank line is the header.
    /// Text with no data lines gives an empty dataset.
    pub fn ingest_text(&self,text:&str) -> Result<IngestReport,IngestError> {
        let mut reader = csv::ReaderBuilder::new().delimiter(b'\t').has_headers(false).flexible(true).from_reader(text.as_bytes());
        let mut records = reader.records();
        let parser = loop {
            match records.next() {
                Some(record) => {
                    let record = record?;
                    if !is_blank_record(&record) { break RowParser::new(&record,&self.config.columns)?; }
                }
                None => {
                    info!("No header found, so no results");
                    return Ok(IngestReport{ dataset: ElectionDataset::default(), rows_read: 0, skipped_rows: vec![] });
                }
            }
        };
        let mut aggregator = ResultsAggregator::default();
        let mut skipped_rows = vec![];
        for record in records {
            let record = record?;
            if is_blank_record(&record) { continue; }
            if parser.is_header(&record) {
                debug!("Skipping repeated header on line {}",record.position().map(|p|p.line()).unwrap_or(0));
                continue;
            }
            match parser.parse_record(&record) {
                Ok(row) => aggregator.add(&row)?, // an overflow is fatal whatever the policy.
                Err(malformed) => match self.config.malformed_rows {
                    MalformedRowPolicy::Abort => return Err(malformed.into()),
                    MalformedRowPolicy::Skip => {
                        warn!("Skipping row : {}",malformed);
                        skipped_rows.push(malformed);
                    }
                }
            }
        }
        let rows_read = aggregator.rows();
        let dataset = ElectionDataset::new(aggregator.finish()?);
        info!("Read {} rows into {} contests, skipped {} malformed rows",rows_read,dataset.contests().len(),skipped_rows.len());
        Ok(IngestReport{ dataset, rows_read, skipped_rows })
    }
}
