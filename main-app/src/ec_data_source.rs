// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.


use std::fmt::{Display, Formatter};
use std::str::FromStr;
use ncsbe::parse::NCSBE;
use tally::datasource_description::ResultsPublisher;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ECDataSource {
    NCSBE,
}

impl FromStr for ECDataSource {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NCSBE" => Ok(ECDataSource::NCSBE),
            _ => Err("No such publisher supported")
        }
    }
}

impl Display for ECDataSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ECDataSource::NCSBE => "NCSBE",
        };
        f.write_str(s)
    }
}

impl ECDataSource {
    pub fn publisher(&self) -> Box<dyn ResultsPublisher> {
        match self {
            ECDataSource::NCSBE => Box::new(NCSBE{}),
        }
    }
}
