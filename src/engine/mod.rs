//! Engine module: decoding, path selection, CLI wiring

pub mod arg_parser;
pub mod cli;
pub mod decoder;
pub mod progress;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::handle_run;
pub use decoder::{decode, load_record};
pub use tools::{glob_match, has_extension, should_include_in_walk};
