// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.


//! Download and ingest an election's results, and write them out as JSON.

use clap::Parser;
use std::path::PathBuf;
use std::fs::File;
use std::io::stdout;
use main_app::SourceOptions;

#[derive(Parser)]
#[clap(version = "0.1", name="PrecinctTally")]
/// Produce a JSON file containing the contest, county, precinct and candidate hierarchy
/// for an election, from a results archive published by an election authority.
struct Opts {
    #[clap(flatten)]
    source : SourceOptions,

    /// An optional output file. If not specified, stdout is used.
    #[clap(short, long)]
    out : Option<PathBuf>,

    /// Print a summary of what was loaded to stderr.
    #[clap(long)]
    summary : bool,
}

fn main() -> anyhow::Result<()> {
    main_app::init_logging();
    let opt: Opts = Opts::parse();
    let dataset = opt.source.load()?;
    if opt.summary {
        let summary = dataset.summary();
        eprintln!("{} contests, {} county results, {} precinct results, {} votes",summary.contests,summary.counties,summary.precincts,summary.votes);
    }
    let out : Box<dyn std::io::Write> = match &opt.out {
        None => Box::new(stdout()),
        Some(path) => Box::new(File::create(path)?),
    };
    dataset.to_json_writer(out)?;
    Ok(())
}
