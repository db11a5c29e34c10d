//! Builder module for `cliopts`.
//! See [documentation root](https://docs.rs/cliopts/latest/cliopts/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use constant::ERROR_TYPE;
pub use model::*;
pub use parser::{format_opts, format_opts_width, format_table, Cause, CliError, ConfigError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
