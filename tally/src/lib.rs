// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.

//! Ingest precinct level election result archives and query the resulting
//! contest → county → precinct → candidate hierarchy.

pub mod results_metadata;
pub mod errors;
pub mod config;
pub mod download;
pub mod extract;
pub mod parse_util;
pub mod aggregate;
pub mod collector;
pub mod election_data;
pub mod election;
pub mod datasource_description;
