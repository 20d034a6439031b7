//! Command-line surface of the `edna` dashboard server.
pub mod cli_args;
pub mod cli_types;

pub use cli_args::*;
pub use cli_types::*;
