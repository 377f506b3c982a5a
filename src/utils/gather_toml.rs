//! Load `.jsongather.toml` from the walked directory (CLI only). Lib callers pass `GatherOpts` instead.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GatherToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsSection {
    extension: Option<String>,
    exclude: Option<Vec<String>>,
    follow_links: Option<bool>,
    parallel_walk: Option<bool>,
    max_in_flight: Option<usize>,
    max_file_size: Option<u64>,
    verbose: Option<bool>,
    quiet: Option<bool>,
}

/// Load the settings file from `dir`. `Ok(None)` when absent or unreadable; `Err` when it does not parse.
pub(crate) fn load_gather_toml(dir: &Path) -> Result<Option<GatherToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    let Ok(s) = std::fs::read_to_string(&path) else {
        return Ok(None);
    };
    parse_gather_toml(&s)
        .with_context(|| format!("parse {}", path.display()))
        .map(Some)
}

pub(crate) fn parse_gather_toml(s: &str) -> Result<GatherToml> {
    Ok(toml::from_str(s)?)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($set:expr, $opts:expr, $set_field:ident => $opts_field:ident) => {
        if let Some(v) = $set.$set_field.clone() {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI.
pub(crate) fn apply_file_to_opts(file: &GatherToml, opts: &mut Opts) {
    let set = &file.settings;
    if let Some(ref ext) = set.extension {
        opts.extension = ext.trim_start_matches('.').to_string();
    }
    apply_file_opt!(set, opts, exclude => exclude);
    apply_file_opt!(set, opts, follow_links => follow_links);
    apply_file_opt!(set, opts, parallel_walk => parallel_walk);
    if set.max_in_flight.is_some() {
        opts.max_in_flight = set.max_in_flight;
    }
    if set.max_file_size.is_some() {
        opts.max_file_size = set.max_file_size;
    }
    apply_file_opt!(set, opts, verbose => verbose);
    apply_file_opt!(set, opts, quiet => quiet);
}
