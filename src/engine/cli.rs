//! CLI command handler: gather records from DIR, log them, fail the process on any error.

use anyhow::{Context, Result};
use log::debug;

use crate::Opts;
use crate::engine::arg_parser::Cli;
use crate::engine::progress::ProgressSink;
use crate::pipeline::{CancelToken, gather};
use crate::sink::{DiscardSink, LogSink, Sink};
use crate::utils::gather_toml::{apply_file_to_opts, load_gather_toml};
use crate::utils::setup_logging;

/// CLI flag wins over file and default when present.
fn override_with<T>(slot: &mut T, cli: Option<T>) {
    if let Some(v) = cli {
        *slot = v;
    }
}

/// Build opts: defaults, then `.jsongather.toml` in DIR, then CLI flags. Sets up logging.
fn setup_opts(cli: &Cli) -> Result<Opts> {
    let mut opts = Opts::default();
    let file = load_gather_toml(&cli.dir);
    if let Ok(Some(ref f)) = file {
        apply_file_to_opts(f, &mut opts);
    }
    override_with(&mut opts.extension, cli.extension());
    if !cli.exclude.is_empty() {
        opts.exclude = cli.exclude.clone();
    }
    override_with(&mut opts.follow_links, cli.follow_links);
    override_with(&mut opts.parallel_walk, cli.parallel_walk);
    if cli.max_in_flight.is_some() {
        opts.max_in_flight = cli.max_in_flight;
    }
    if cli.max_file_size.is_some() {
        opts.max_file_size = cli.max_file_size;
    }
    override_with(&mut opts.verbose, cli.verbose);
    override_with(&mut opts.quiet, cli.quiet);

    setup_logging(opts.verbose);
    // Settings file errors surface once logging is up.
    file?;
    if opts.max_in_flight == Some(0) {
        anyhow::bail!("--max-in-flight must be at least 1");
    }
    Ok(opts)
}

/// Gather records under `cli.dir`. Any failure makes the run an error listing every failed path.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_opts(cli)?;
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );

    let cancel = CancelToken::new();
    let cancel_handler = cancel.clone();
    ctrlc::set_handler(move || cancel_handler.cancel()).context("set Ctrl+C handler")?;

    let inner: Box<dyn Sink> = if opts.quiet {
        Box::new(DiscardSink)
    } else {
        Box::new(LogSink)
    };
    let mut sink: Box<dyn Sink> = if opts.verbose {
        Box::new(ProgressSink::new(inner, "Gathering"))
    } else {
        inner
    };

    let report = gather(&cli.dir, &opts, &mut *sink, cancel)?;
    drop(sink);

    debug!(
        "{} of {} dispatched files delivered",
        report.delivered, report.dispatched
    );
    report
        .outcome
        .into_result()
        .map_err(|outcome| anyhow::Error::new(outcome).context("gather failed"))
}
