use colored::{ColoredString, Colorize};
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Tag shown for levels that carry one; info lines (records, summaries) stay bare.
fn level_tag(level: Level) -> Option<ColoredString> {
    match level {
        Level::Error => Some("ERROR".red()),
        Level::Warn => Some("WARN".yellow()),
        Level::Debug | Level::Trace => Some("DEBUG".dimmed()),
        Level::Info => None,
    }
}

/// Install the process logger once. Dependencies log at `Warn`; this crate at `Info`, or `Debug` when verbose.
/// `RUST_LOG` still applies on top. A second call is a no-op.
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_CRATE_NAME"), level)
        .format(|buf, record| {
            let name = env!("CARGO_PKG_NAME").cyan();
            match level_tag(record.level()) {
                Some(tag) => {
                    let target = record.target().white();
                    writeln!(buf, "[{} {} {}] {}", name, tag, target, record.args())
                }
                None => writeln!(buf, "[{}] {}", name, record.args()),
            }
        })
        .try_init();
}
