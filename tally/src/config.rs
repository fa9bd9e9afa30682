// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.

//! Settings for ingestion and download. All have defaults, so a JSON file
//! need only mention what differs.

use std::fs::File;
use std::path::Path;
use std::time::Duration;
use serde::{Deserialize,Serialize};
use serde_json::Value;

/// The header names of the columns holding each field.
/// Publishers do not agree on these, so they are configuration.
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub contest : String,
    pub county : String,
    pub precinct : String,
    pub candidate : String,
    pub party : String,
    pub votes : String,
}

impl Default for ColumnNames {
    /// The layout used by the North Carolina State Board of Elections precinct files.
    fn default() -> Self {
        ColumnNames {
            contest: "Contest Name".to_string(),
            county: "County".to_string(),
            precinct: "Precinct".to_string(),
            candidate: "Choice".to_string(),
            party: "Choice Party".to_string(),
            votes: "Total Votes".to_string(),
        }
    }
}

/// What to do with a data line that fails validation.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Default)]
pub enum MalformedRowPolicy {
    /// log it, count it, and carry on.
    #[default]
    Skip,
    /// fail the whole ingestion.
    Abort,
}

#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub columns : ColumnNames,
    /// archive members whose names end in this are results files.
    pub result_file_suffix : String,
    pub malformed_rows : MalformedRowPolicy,
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            columns: ColumnNames::default(),
            result_file_suffix: ".txt".to_string(),
            malformed_rows: MalformedRowPolicy::default(),
        }
    }
}

#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs : u64,
    /// Content types considered plausible for a zip archive. Matching ignores any `;` parameters.
    pub expected_content_types : Vec<String>,
    /// If false, an unexpected content type is just a warning.
    pub reject_unexpected_content_type : bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            timeout_secs: 60,
            expected_content_types: ["application/zip","application/x-zip-compressed","application/octet-stream","binary/octet-stream"].iter().map(|s|s.to_string()).collect(),
            reject_unexpected_content_type: false,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }

    pub fn is_expected_content_type(&self,content_type:&str) -> bool {
        let mime = content_type.split(';').next().unwrap_or("").trim();
        self.expected_content_types.iter().any(|e|e.eq_ignore_ascii_case(mime))
    }
}

/// Everything, as stored in a configuration file.
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize,Default)]
#[serde(default)]
pub struct ResultsConfig {
    pub ingest : IngestConfig,
    pub fetch : FetchConfig,
}

impl ResultsConfig {
    pub fn load(path:&Path) -> anyhow::Result<Self> {
        Self::load_over(path,ResultsConfig::default())
    }

    /// Read a configuration file, taking anything it doesn't mention from `defaults`.
    pub fn load_over(path:&Path,defaults:ResultsConfig) -> anyhow::Result<Self> {
        let file : Value = serde_json::from_reader(File::open(path)?)?;
        Self::from_json_over(file,defaults)
    }

    pub fn from_json_over(file:Value,defaults:ResultsConfig) -> anyhow::Result<Self> {
        let mut merged = serde_json::to_value(defaults)?;
        merge_json(&mut merged,file);
        Ok(serde_json::from_value(merged)?)
    }
}

/// Objects are merged key by key; anything else in `from` replaces what is in `into`.
fn merge_json(into:&mut Value,from:Value) {
    match (into,from) {
        (Value::Object(into),Value::Object(from)) => {
            for (key,value) in from {
                match into.get_mut(&key) {
                    Some(existing) => merge_json(existing,value),
                    None => { into.insert(key,value); }
                }
            }
        }
        (into,from) => *into=from,
    }
}
