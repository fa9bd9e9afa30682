// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.


//! A description of the bodies that publish results archives.

use std::borrow::Cow;
use chrono::NaiveDate;
use crate::config::{ColumnNames, IngestConfig, MalformedRowPolicy};

pub trait ResultsPublisher {
    /// the name of the publisher, e.g. "North Carolina State Board of Elections"
    fn name(&self) -> Cow<'static, str>;
    /// the publisher's web site.
    fn authority_url(&self) -> Cow<'static, str>;
    /// Where the results archive for the election held on `date` lives.
    /// Must be a pure function of the date.
    fn archive_url(&self,date:NaiveDate) -> String;
    /// The header names used in the publisher's results files.
    fn column_names(&self) -> ColumnNames { ColumnNames::default() }
    /// Archive members with this suffix contain results.
    fn result_file_suffix(&self) -> Cow<'static, str> { Cow::Borrowed(".txt") }

    /// Ingestion settings for this publisher's archives.
    fn default_ingest_config(&self) -> IngestConfig {
        IngestConfig{ columns: self.column_names(), result_file_suffix: self.result_file_suffix().into_owned(), malformed_rows: MalformedRowPolicy::default() }
    }
}
