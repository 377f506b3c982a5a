//! Application configuration constants.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    /// Per-directory settings file, e.g. `.jsongather.toml`.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Walk / selection ----

/// Directory walked when none is given.
pub const DEFAULT_ROOT: &str = "./json_files";

/// Extension selected when none is configured (no leading dot).
pub const DEFAULT_EXTENSION: &str = "json";

// ---- Collector ----

/// Records that may wait in the collector before decode workers block on push.
pub const COLLECTOR_CAPACITY: usize = 10;
