//! jsongather CLI: decode every matching file under DIR concurrently and log the records.

use anyhow::Result;
use clap::Parser;
use jsongather::engine::arg_parser::Cli;
use jsongather::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
