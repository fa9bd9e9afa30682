// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.

//! Things that can go wrong getting results into memory.

use thiserror::Error;

/// Problems retrieving the archive. Terminal for that collection attempt.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Could not download {url} : {source}")]
    Transport { url : String, #[source] source : reqwest::Error },
    #[error("Downloading {url} gave status {status}")]
    Status { url : String, status : reqwest::StatusCode },
    #[error("Downloading {url} gave unexpected content type {content_type}")]
    UnexpectedContentType { url : String, content_type : String },
    #[error("Error reading response body : {0}")]
    Read(#[from] std::io::Error),
    #[error("Download cancelled")]
    Cancelled,
}

/// Which field of a row something is wrong with.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum RowField {
    Contest,
    County,
    Precinct,
    Candidate,
    Party,
    Votes,
}

impl std::fmt::Display for RowField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RowField::Contest => "contest",
            RowField::County => "county",
            RowField::Precinct => "precinct",
            RowField::Candidate => "candidate",
            RowField::Party => "party",
            RowField::Votes => "votes",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRowReason {
    #[error("no {0} column")]
    MissingField(RowField),
    #[error("blank {0}")]
    BlankField(RowField),
    #[error("vote count {0:?} is not a number")]
    NonNumericVotes(String),
    #[error("vote count {0:?} is negative")]
    NegativeVotes(String),
}

/// A single data line that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed row on line {line} : {reason}")]
pub struct MalformedRow {
    /// 1 based line number in the concatenated text, 0 if unknown.
    pub line : u64,
    pub reason : MalformedRowReason,
}

#[derive(Error, Debug)]
pub enum IngestError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Not a readable archive : {0}")]
    ArchiveCorrupt(#[from] zip::result::ZipError),
    #[error("Could not read archive member {member} : {source}")]
    ArchiveRead { member : String, #[source] source : std::io::Error },
    #[error("Archive does not contain any files ending in {suffix}")]
    NoResultFiles { suffix : String },
    #[error("Archive member {member} is not valid UTF-8")]
    InvalidEncoding { member : String },
    #[error("Header row is missing columns : {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error(transparent)]
    MalformedRow(#[from] MalformedRow),
    #[error("Vote total for {candidate} in {contest} is too large to count")]
    VoteOverflow { contest : String, candidate : String },
    #[error("Could not split results text into records : {0}")]
    Delimited(#[from] csv::Error),
}
