// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.


//! Turn lines of a tab separated results file into [ParsedRow]s.

use csv::StringRecord;
use crate::config::ColumnNames;
use crate::errors::{IngestError, MalformedRow, MalformedRowReason, RowField};
use crate::results_metadata::ParsedRow;

/// Produce the canonical identifier for a contest: surrounding whitespace
/// is removed and every character that is not an ASCII letter or digit
/// becomes an underscore.
///
/// # Example
/// ```
/// use tally::parse_util::normalize_contest_name;
/// assert_eq!(normalize_contest_name(" US PRESIDENT "),"US_PRESIDENT");
/// assert_eq!(normalize_contest_name("NC HOUSE OF REPRESENTATIVES DISTRICT 056 (VOTE FOR 1)"),"NC_HOUSE_OF_REPRESENTATIVES_DISTRICT_056__VOTE_FOR_1_");
/// assert_eq!(normalize_contest_name("US_PRESIDENT"),"US_PRESIDENT");
/// ```
pub fn normalize_contest_name(contest_name:&str) -> String {
    contest_name.trim().chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect()
}

/// Split a single line on tabs. Quoting is not interpreted; use a [csv::Reader] for that.
pub fn split_line(line:&str) -> StringRecord {
    StringRecord::from(line.trim_end_matches(['\r','\n']).split('\t').collect::<Vec<_>>())
}

/// Whether every field is empty or whitespace.
pub fn is_blank_record(record:&StringRecord) -> bool {
    record.iter().all(|f|f.trim().is_empty())
}

/// A header field as compared against column names: trimmed, and for the
/// first field without any byte order mark.
fn heading(index:usize,field:&str) -> &str {
    let field = if index==0 { field.trim_start_matches('\u{feff}') } else { field };
    field.trim()
}

/// Where in a record each field lives.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct ColumnIndex {
    pub contest : usize,
    pub county : usize,
    pub precinct : usize,
    pub candidate : usize,
    pub party : usize,
    pub votes : usize,
}

impl ColumnIndex {
    /// Find the configured column names in a header row. All missing columns are reported together.
    pub fn from_header(header:&StringRecord,names:&ColumnNames) -> Result<Self,IngestError> {
        let headings : Vec<&str> = header.iter().enumerate().map(|(i,h)|heading(i,h)).collect();
        let mut missing : Vec<String> = vec![];
        let mut find = |name:&String| -> usize {
            match headings.iter().position(|h|h==name) {
                Some(index) => index,
                None => { missing.push(name.clone()); 0 }
            }
        };
        let res = ColumnIndex{
            contest: find(&names.contest),
            county: find(&names.county),
            precinct: find(&names.precinct),
            candidate: find(&names.candidate),
            party: find(&names.party),
            votes: find(&names.votes),
        };
        if missing.is_empty() { Ok(res) } else { Err(IngestError::MissingColumns(missing)) }
    }
}

fn all_digits(text:&str) -> bool { !text.is_empty() && text.bytes().all(|b|b.is_ascii_digit()) }

/// A vote count is a plain string of decimal digits. Signs other than a
/// leading `-` (reported as negative) are not numbers.
fn parse_votes(text:&str) -> Result<usize,MalformedRowReason> {
    if all_digits(text) {
        text.parse::<usize>().map_err(|_|MalformedRowReason::NonNumericVotes(text.to_string()))
    } else if text.strip_prefix('-').map(all_digits).unwrap_or(false) {
        Err(MalformedRowReason::NegativeVotes(text.to_string()))
    } else {
        Err(MalformedRowReason::NonNumericVotes(text.to_string()))
    }
}

fn field(record:&StringRecord,index:usize,which:RowField) -> Result<&str,MalformedRowReason> {
    record.get(index).map(|s|s.trim()).ok_or(MalformedRowReason::MissingField(which))
}

fn non_blank(record:&StringRecord,index:usize,which:RowField) -> Result<String,MalformedRowReason> {
    let s = field(record,index,which)?;
    if s.is_empty() { Err(MalformedRowReason::BlankField(which)) } else { Ok(s.to_string()) }
}

/// Converts records to [ParsedRow]s once the header has been seen.
#[derive(Debug,Clone)]
pub struct RowParser {
    columns : ColumnIndex,
    header : StringRecord,
}

impl RowParser {
    pub fn new(header:&StringRecord,names:&ColumnNames) -> Result<Self,IngestError> {
        let columns = ColumnIndex::from_header(header,names)?;
        Ok(RowParser{ columns, header: header.clone() })
    }

    pub fn from_header_line(line:&str,names:&ColumnNames) -> Result<Self,IngestError> {
        Self::new(&split_line(line),names)
    }

    pub fn columns(&self) -> ColumnIndex { self.columns }

    /// Archives with several result files repeat the header at the start of each.
    pub fn is_header(&self,record:&StringRecord) -> bool {
        record.len()==self.header.len() && record.iter().zip(self.header.iter()).enumerate().all(|(i,(a,b))|heading(i,a)==heading(i,b))
    }

    pub fn parse_line(&self,line:&str,line_number:u64) -> Result<ParsedRow,MalformedRow> {
        self.parse_fields(&split_line(line)).map_err(|reason|MalformedRow{ line: line_number, reason })
    }

    /// Parse a record from a [csv::Reader], getting the line number from the record position.
    pub fn parse_record(&self,record:&StringRecord) -> Result<ParsedRow,MalformedRow> {
        let line = record.position().map(|p|p.line()).unwrap_or(0);
        self.parse_fields(record).map_err(|reason|MalformedRow{ line, reason })
    }

    fn parse_fields(&self,record:&StringRecord) -> Result<ParsedRow,MalformedRowReason> {
        let contest_name = normalize_contest_name(&non_blank(record,self.columns.contest,RowField::Contest)?);
        let county = non_blank(record,self.columns.county,RowField::County)?;
        let precinct = non_blank(record,self.columns.precinct,RowField::Precinct)?;
        let candidate = non_blank(record,self.columns.candidate,RowField::Candidate)?;
        let party = field(record,self.columns.party,RowField::Party).unwrap_or("").to_string();
        let votes = parse_votes(field(record,self.columns.votes,RowField::Votes)?)?;
        Ok(ParsedRow{ contest_name, county, precinct, candidate, party, votes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER : &str = "County\tElection Date\tPrecinct\tContest Group ID\tContest Type\tContest Name\tChoice\tChoice Party\tVote For\tElection Day\tEarly Voting\tAbsentee by Mail\tProvisional\tTotal Votes\tReal Precinct";

    fn parser() -> RowParser { RowParser::from_header_line(HEADER,&ColumnNames::default()).unwrap() }

    #[test]
    fn finds_columns_in_ncsbe_header() {
        let columns = parser().columns();
        assert_eq!(columns,ColumnIndex{ contest: 5, county: 0, precinct: 2, candidate: 6, party: 7, votes: 13 });
    }

    #[test]
    fn header_with_bom_and_crlf() {
        let line = format!("\u{feff}{}\r\n",HEADER);
        let parser = RowParser::from_header_line(&line,&ColumnNames::default()).unwrap();
        assert_eq!(parser.columns().county,0);
        assert_eq!(parser.columns().votes,13);
    }

    #[test]
    fn reports_all_missing_columns() {
        match RowParser::from_header_line("County\tPrecinct\tChoice",&ColumnNames::default()) {
            Err(IngestError::MissingColumns(missing)) => assert_eq!(missing,vec!["Contest Name","Choice Party","Total Votes"]),
            other => panic!("Expected missing columns, got {:?}",other),
        }
    }

    #[test]
    fn parses_data_line() {
        let row = parser().parse_line("WAKE\t11/05/2024\t01-01\t1373\tS\tUS PRESIDENT\tKamala D. Harris\tDEM\t1\t400\t1500\t200\t5\t2105\tY",2).unwrap();
        assert_eq!(row,ParsedRow{
            contest_name: "US_PRESIDENT".to_string(),
            county: "WAKE".to_string(),
            precinct: "01-01".to_string(),
            candidate: "Kamala D. Harris".to_string(),
            party: "DEM".to_string(),
            votes: 2105,
        });
    }

    #[test]
    fn empty_party_allowed() {
        let row = parser().parse_line("WAKE\t11/05/2024\t01-01\t1\tS\tREFERENDUM\tFor\t\t1\t0\t0\t0\t0\t12\tY",2).unwrap();
        assert_eq!(row.party,"");
        assert_eq!(row.votes,12);
    }

    #[test]
    fn rejects_bad_rows() {
        let parser = parser();
        let bad = |line:&str| parser.parse_line(line,7).unwrap_err();
        assert_eq!(bad("WAKE\t\t01-01\t1\tS\tUS PRESIDENT\tJohn\tDEM\t1\t0\t0\t0\t0\tlots\tY"),MalformedRow{ line: 7, reason: MalformedRowReason::NonNumericVotes("lots".to_string()) });
        assert_eq!(bad("WAKE\t\t01-01\t1\tS\tUS PRESIDENT\tJohn\tDEM\t1\t0\t0\t0\t0\t-3\tY").reason,MalformedRowReason::NegativeVotes("-3".to_string()));
        assert_eq!(bad("WAKE\t\t01-01\t1\tS\tUS PRESIDENT\t  \tDEM\t1\t0\t0\t0\t0\t3\tY").reason,MalformedRowReason::BlankField(RowField::Candidate));
        assert_eq!(bad("\t\t01-01\t1\tS\tUS PRESIDENT\tJohn\tDEM\t1\t0\t0\t0\t0\t3\tY").reason,MalformedRowReason::BlankField(RowField::County));
        assert_eq!(bad("WAKE\t\t01-01").reason,MalformedRowReason::MissingField(RowField::Contest));
        assert_eq!(bad("WAKE\t\t01-01\t1\tS\tUS PRESIDENT\tJohn\tDEM\t1\t0\t0\t0\t0\t+5\tY").reason,MalformedRowReason::NonNumericVotes("+5".to_string()));
        assert_eq!(bad("WAKE\t\t01-01\t1\tS\tUS PRESIDENT\tJohn\tDEM\t1\t0\t0\t0\t0\t-\tY").reason,MalformedRowReason::NonNumericVotes("-".to_string()));
        assert_eq!(bad("WAKE\t\t01-01\t1\tS\tUS PRESIDENT\tJohn\tDEM\t1\t0\t0\t0\t0\t99999999999999999999999\tY").reason,MalformedRowReason::NonNumericVotes("99999999999999999999999".to_string()));
    }

    #[test]
    fn recognises_repeated_header() {
        let parser = parser();
        assert!(parser.is_header(&split_line(HEADER)));
        assert!(parser.is_header(&split_line(&format!("\u{feff}{}",HEADER))));
        let with_bom = RowParser::from_header_line(&format!("\u{feff}{}",HEADER),&ColumnNames::default()).unwrap();
        assert!(with_bom.is_header(&split_line(HEADER)));
        assert!(with_bom.is_header(&split_line(&format!("\u{feff}{}",HEADER))));
        assert!(!parser.is_header(&split_line("WAKE\t11/05/2024\t01-01")));
    }

    #[test]
    fn normalization_is_idempotent() {
        for name in ["US PRESIDENT","  NC GOVERNOR (VOTE FOR 1)","Référendum 2"] {
            let once = normalize_contest_name(name);
            assert_eq!(normalize_contest_name(&once),once);
            assert!(once.chars().all(|c|c.is_ascii_alphanumeric()||c=='_'));
        }
    }
}
