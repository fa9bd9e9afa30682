// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.

//! Pull the results text out of a zip archive.

use std::io::{Cursor, Read};
use log::{debug, info};
use zip::ZipArchive;
use crate::errors::IngestError;

/// Names of the members of the archive, in the order listed by the archive.
pub fn list_members(archive_bytes:&[u8]) -> Result<Vec<String>,IngestError> {
    let mut zipfile = ZipArchive::new(Cursor::new(archive_bytes))?;
    let mut res = Vec::with_capacity(zipfile.len());
    for index in 0..zipfile.len() {
        res.push(zipfile.by_index_raw(index)?.name().to_string());
    }
    Ok(res)
}

/// Concatenate, separated by newlines, the UTF-8 contents of every member whose
/// name ends in `suffix`, in archive listing order.
pub fn extract_results_text(archive_bytes:&[u8],suffix:&str) -> Result<String,IngestError> {
    let mut zipfile = ZipArchive::new(Cursor::new(archive_bytes))?;
    let mut texts : Vec<String> = vec![];
    for index in 0..zipfile.len() {
        let mut member = zipfile.by_index(index)?;
        if member.is_dir() || !member.name().ends_with(suffix) { continue; }
        let name = member.name().to_string();
        let mut contents = Vec::with_capacity(member.size() as usize);
        member.read_to_end(&mut contents).map_err(|source|IngestError::ArchiveRead{ member: name.clone(), source })?;
        debug!("Read {} bytes from archive member {}",contents.len(),name);
        let text = String::from_utf8(contents).map_err(|_|IngestError::InvalidEncoding{ member: name })?;
        texts.push(text);
    }
    if texts.is_empty() { return Err(IngestError::NoResultFiles{ suffix: suffix.to_string() }) }
    info!("Extracted {} results file(s) from archive",texts.len());
    Ok(texts.join("\n"))
}
