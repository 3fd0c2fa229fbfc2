//! Application logic for the SQL Tool Server CLI.
//!
//! This module contains the core application logic separated from the main
//! entry point to enable testing.

mod convert;
mod helpers;
mod lint;
mod serve;
mod types;

pub use convert::convert_format;
pub use helpers::{
    apply_serve_overrides, calculate_exit_code, create_output_options, read_queries_input,
    split_statements
};
pub use lint::run_lint;
pub use serve::run_serve;
pub use types::{LintParams, LintResult, ServeParams};
