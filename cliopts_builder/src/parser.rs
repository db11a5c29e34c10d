mod base;
mod interface;
mod printer;

pub(crate) use self::base::*;
pub(crate) use self::interface::*;
pub(crate) use self::printer::*;
pub use self::base::{Cause, CliError, ConfigError};
pub use self::printer::{format_opts, format_opts_width, format_table};
