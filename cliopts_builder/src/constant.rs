/// The `type` tag carried by every [`CliError`](crate::CliError).
pub const ERROR_TYPE: &str = "cliopts/parse";

pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";
pub(crate) const NEGATION_PREFIX: &str = "no-";
pub(crate) const TERMINATOR: &str = "--";
