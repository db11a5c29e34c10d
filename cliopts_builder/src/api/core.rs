use std::env;

use crate::api::config::ParseConfig;
use crate::constant::*;
use crate::matcher::{OptionLookup, Token, TokenMatcher};
use crate::model::{Opts, Parsed};
use crate::parser::{capture, help_message, terminal_width, CliError, ConsoleInterface, UserInterface};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Parse the input tokens into options and positional arguments.
///
/// Parsing happens in two phases:
/// 1. Token matching aligns the tokens to options and positional arguments.
/// 2. Token capturing coerces the values, then applies defaults, requirements and validations.
///
/// ### Example
/// ```
/// # use cliopts_builder as cliopts;
/// use cliopts::{parse_args, ParseConfig, Value};
///
/// let parsed = parse_args(&["--depth", "2", "src", "--", "--not-an-option"], &ParseConfig::new()).unwrap();
///
/// assert_eq!(parsed.opts["depth"], Value::Long(2));
/// assert_eq!(parsed.args, vec!["src", "--not-an-option"]);
/// ```
pub fn parse_args(tokens: &[&str], config: &ParseConfig) -> Result<Parsed, CliError> {
    let mut token_matcher = TokenMatcher::new(config, config.keyword_opts());

    for token in tokens {
        token_matcher.feed(token);
    }

    let matches = token_matcher.close();

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Matched {matches:?}.");
    }

    capture(matches, config)
}

/// Parse the input tokens into options, discarding positional arguments.
///
/// ### Example
/// ```
/// # use cliopts_builder as cliopts;
/// use cliopts::{parse_opts, Coerce, CoerceType, ParseConfig, Value};
///
/// let auto = parse_opts(&["--foo", "1"], &ParseConfig::new()).unwrap();
/// assert_eq!(auto["foo"], Value::Long(1));
///
/// let string = ParseConfig::new().coerce("foo", CoerceType::String);
/// assert_eq!(parse_opts(&["--foo", "1"], &string).unwrap()["foo"], Value::from("1"));
///
/// let strings = ParseConfig::new().coerce("foo", Coerce::Collection(CoerceType::String));
/// assert_eq!(parse_opts(&["--foo", "1"], &strings).unwrap()["foo"], Value::from(vec!["1"]));
/// ```
pub fn parse_opts(tokens: &[&str], config: &ParseConfig) -> Result<Opts, CliError> {
    parse_args(tokens, config).map(|parsed| parsed.opts)
}

/// A console program: parses the Cli, printing help or errors and exiting as appropriate.
///
/// ### Example
/// ```
/// # use cliopts_builder as cliopts;
/// use cliopts::{CommandLine, CoerceType, ParseConfig, Spec};
///
/// let config = ParseConfig::new()
///     .spec(Spec::new().option("count", |o| o.coerce(CoerceType::Long).desc("How many times.")));
/// let command_line = CommandLine::new("program", config)
///     .about("Repeats things.");
///
/// let parsed = command_line.parse_tokens(&["--count", "3"]).unwrap();
/// assert_eq!(parsed.get::<i64>("count"), Some(3));
/// ```
pub struct CommandLine {
    program: String,
    about: Option<String>,
    config: ParseConfig,
    user_interface: Box<dyn UserInterface>,
}

impl CommandLine {
    /// Create a console program named `program`.
    pub fn new(program: impl Into<String>, config: ParseConfig) -> Self {
        Self {
            program: program.into(),
            about: None,
            config,
            user_interface: Box::new(ConsoleInterface::default()),
        }
    }

    /// Document the about message shown in the help.
    /// If repeated, only the final message will apply.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    #[cfg(test)]
    pub(crate) fn with_interface(mut self, user_interface: Box<dyn UserInterface>) -> Self {
        self.user_interface = user_interface;
        self
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Discard all help and error output.
    ///
    /// ### Example
    /// ```
    /// # use cliopts_builder as cliopts;
    /// use cliopts::{CommandLine, ParseConfig};
    ///
    /// let command_line = CommandLine::new("program", ParseConfig::new().require("x")).silent();
    /// assert_eq!(command_line.parse_tokens(&[]).unwrap_err(), 1);
    /// ```
    #[cfg(feature = "unit_test")]
    pub fn silent(mut self) -> Self {
        self.user_interface = Box::new(crate::parser::SilentInterface::default());
        self
    }

    /// Run the parse against the input tokens.
    ///
    /// If the help switch (`-h` or `--help`) is present before any `--`, the help message is printed and `Err(0)` is returned.
    /// The help switch is not recognized when the configuration uses `help` or `h` itself.
    ///
    /// If the parse fails, the error is printed and `Err(1)` is returned.
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<Parsed, i32> {
        if self.wants_help(tokens) {
            for line in help_message(
                &self.program,
                self.about.as_deref(),
                self.config.spec_ref(),
                terminal_width(),
            ) {
                self.user_interface.print(line);
            }

            return Err(0);
        }

        parse_args(tokens, &self.config).map_err(|error| {
            self.user_interface.print_error(&error);
            1
        })
    }

    /// Run the parse against the Cli [`env::args`].
    ///
    /// Exits the process with code `0` after printing help, or with code `1` after printing a parse error (via `std::process::exit`).
    pub fn parse(&self) -> Parsed {
        let command_input: Vec<String> = env::args().skip(1).collect();

        match self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(parsed) => parsed,
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        }
    }

    fn wants_help(&self, tokens: &[&str]) -> bool {
        let long = format!("--{HELP_NAME}");
        let short = format!("-{HELP_SHORT}");

        if self.config.knows(HELP_NAME) || self.config.knows(&HELP_SHORT.to_string()) {
            return false;
        }

        tokens
            .iter()
            .take_while(|token| Token::classify(token, false) != Token::Terminator)
            .any(|token| *token == long || *token == short)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::spec::Spec;
    use crate::model::{CoerceType, Value};
    use crate::parser::util::InMemoryInterface;
    use crate::parser::Cause;
    use crate::test::assert_contains;
    use rstest::rstest;

    fn command_line(config: ParseConfig) -> (CommandLine, InMemoryInterface) {
        let interface = InMemoryInterface::default();
        let command_line = CommandLine::new("program", config)
            .about("Does things.")
            .with_interface(Box::new(interface.clone()));
        (command_line, interface)
    }

    #[rstest]
    #[case(vec!["-h"])]
    #[case(vec!["--help"])]
    #[case(vec!["--x", "1", "--help"])]
    #[case(vec!["--x", "not-a-number", "-h"])]
    fn help(#[case] tokens: Vec<&str>) {
        let config = ParseConfig::new()
            .spec(Spec::new().option("x", |o| o.coerce(CoerceType::Long).desc("An x.")));
        let (command_line, interface) = command_line(config);

        assert_eq!(command_line.parse_tokens(&tokens), Err(0));
        let (message, error) = interface.consume();
        let message = message.unwrap();
        assert_contains!(message, "usage: program [-h]");
        assert_contains!(message, "Does things.");
        assert_contains!(message, "--x");
        assert_contains!(message, "An x.");
        assert_eq!(error, None);
    }

    #[rstest]
    #[case(vec!["--", "-h"])]
    #[case(vec!["x", "--", "--help"])]
    fn help_after_terminator(#[case] tokens: Vec<&str>) {
        let (command_line, interface) = command_line(ParseConfig::new());

        let parsed = command_line.parse_tokens(&tokens).unwrap();
        assert_eq!(parsed.opts, Opts::default());
        assert_eq!(interface.consume(), (None, None));
    }

    #[test]
    fn help_option_configured() {
        let config = ParseConfig::new().coerce("help", CoerceType::String);
        let (command_line, interface) = command_line(config);

        let parsed = command_line.parse_tokens(&["--help", "topic"]).unwrap();
        assert_eq!(parsed.opts["help"], Value::from("topic"));
        assert_eq!(interface.consume(), (None, None));
    }

    #[test]
    fn error() {
        let config = ParseConfig::new().coerce("b", CoerceType::Long);
        let (command_line, interface) = command_line(config);

        assert_eq!(command_line.parse_tokens(&["-b", "dude"]), Err(1));
        let (message, error) = interface.consume();
        assert_eq!(message, None);
        let error = error.unwrap();
        assert_eq!(error.cause, Cause::Coerce);
        assert_eq!(error.option, Some("b".to_string()));
    }

    #[test]
    fn complete() {
        let (command_line, interface) = command_line(ParseConfig::new());

        let parsed = command_line.parse_tokens(&[]).unwrap();
        assert_eq!(parsed, Parsed::default());
        assert_eq!(interface.consume(), (None, None));
    }
}
