use crate::api::config::ParseConfig;
use crate::api::core::parse_args;
use crate::matcher::Token;
use crate::model::Opts;
use crate::parser::CliError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The input handed to a dispatched command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dispatched {
    /// The command words that selected the command.
    pub cmds: Vec<String>,
    /// The options parsed with the command's configuration.
    pub opts: Opts,
    /// The positional arguments following the command words.
    pub args: Vec<String>,
}

struct Command<'a, T> {
    cmds: Vec<String>,
    config: ParseConfig,
    handler: Box<dyn Fn(Dispatched) -> T + 'a>,
}

/// A table of sub-commands, each with its own [`ParseConfig`] and handler.
///
/// ### Example
/// ```
/// # use cliopts_builder as cliopts;
/// use cliopts::{CoerceType, DispatchTable, ParseConfig};
///
/// let table = DispatchTable::new()
///     .command(["remote", "add"], ParseConfig::new(), |d| format!("add {:?}", d.args))
///     .command(["remote"], ParseConfig::new(), |_| "list".to_string())
///     .command(
///         ["fetch"],
///         ParseConfig::new().coerce("depth", CoerceType::Long),
///         |d| format!("fetch {}", d.opts["depth"]),
///     );
///
/// assert_eq!(table.dispatch(&["remote", "add", "origin"]).unwrap(), "add [\"origin\"]");
/// assert_eq!(table.dispatch(&["remote"]).unwrap(), "list");
/// assert_eq!(table.dispatch(&["fetch", "--depth", "1"]).unwrap(), "fetch 1");
/// assert!(table.dispatch(&["push"]).is_err());
/// ```
pub struct DispatchTable<'a, T> {
    commands: Vec<Command<'a, T>>,
}

impl<'a, T> Default for DispatchTable<'a, T> {
    fn default() -> Self {
        Self {
            commands: Vec::default(),
        }
    }
}

impl<'a, T> DispatchTable<'a, T> {
    /// Create an empty dispatch table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, selected by the words `cmds`.
    /// An empty `cmds` registers the fallback command.
    ///
    /// When several commands match, the one with the most words wins.
    pub fn command<S: Into<String>>(
        mut self,
        cmds: impl IntoIterator<Item = S>,
        config: ParseConfig,
        handler: impl Fn(Dispatched) -> T + 'a,
    ) -> Self {
        self.commands.push(Command {
            cmds: cmds.into_iter().map(Into::into).collect(),
            config,
            handler: Box::new(handler),
        });
        self
    }

    /// Select the command for the input tokens, parse the remainder, and run the handler.
    ///
    /// The command words are the leading tokens up until the first option.
    pub fn dispatch(&self, tokens: &[&str]) -> Result<T, CliError> {
        let words: Vec<&str> = tokens
            .iter()
            .take_while(|token| matches!(Token::classify(token, true), Token::Value(_)))
            .copied()
            .collect();

        let mut selected: Option<&Command<'a, T>> = None;

        for command in &self.commands {
            let matches = command.cmds.len() <= words.len()
                && command.cmds.iter().zip(&words).all(|(c, w)| c == w);
            let longer = match selected {
                Some(current) => command.cmds.len() > current.cmds.len(),
                None => true,
            };

            if matches && longer {
                selected.replace(command);
            }
        }

        match selected {
            Some(command) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Dispatching to {:?}.", command.cmds);
                }

                let parsed = parse_args(&tokens[command.cmds.len()..], &command.config)?;

                Ok((command.handler)(Dispatched {
                    cmds: command.cmds.clone(),
                    opts: parsed.opts,
                    args: parsed.args,
                }))
            }
            None => Err(self.mismatch(&words)),
        }
    }

    fn mismatch(&self, words: &[&str]) -> CliError {
        let common = |cmds: &[String]| {
            cmds.iter()
                .zip(words)
                .take_while(|(c, w)| c == w)
                .count()
        };
        let depth = self
            .commands
            .iter()
            .map(|command| common(&command.cmds))
            .max()
            .unwrap_or(0);
        let mut available: Vec<String> = Vec::default();

        for command in &self.commands {
            if common(&command.cmds) == depth {
                if let Some(next) = command.cmds.get(depth) {
                    if !available.contains(next) {
                        available.push(next.clone());
                    }
                }
            }
        }

        match words.get(depth) {
            Some(wrong_input) => CliError::no_match(wrong_input, &available),
            None => CliError::input_exhausted(&available),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CoerceType, Value};
    use crate::parser::Cause;
    use rstest::rstest;

    fn table() -> DispatchTable<'static, String> {
        DispatchTable::new()
            .command(["a", "b"], ParseConfig::new(), |d| format!("ab {:?}", d.args))
            .command(["a", "c"], ParseConfig::new(), |d| format!("ac {:?}", d.args))
            .command(
                ["d"],
                ParseConfig::new().coerce("n", CoerceType::Long),
                |d| format!("d {:?}", d.opts),
            )
    }

    #[rstest]
    #[case(vec!["a", "b"], "ab []")]
    #[case(vec!["a", "b", "x", "y"], "ab [\"x\", \"y\"]")]
    #[case(vec!["a", "c", "--", "b"], "ac [\"b\"]")]
    #[case(vec!["d", "--n", "1"], "d {\"n\": Long(1)}")]
    fn dispatch(#[case] tokens: Vec<&str>, #[case] expected: &str) {
        assert_eq!(table().dispatch(&tokens).unwrap(), expected);
    }

    #[test]
    fn dispatch_no_match() {
        let error = table().dispatch(&["a", "x"]).unwrap_err();
        assert_eq!(error.cause, Cause::NoMatch);
        assert_eq!(error.msg, "No matching command: x (available: b, c)");
        assert_eq!(error.value, Some("x".to_string()));

        let error = table().dispatch(&["z"]).unwrap_err();
        assert_eq!(error.msg, "No matching command: z (available: a, d)");
    }

    #[test]
    fn dispatch_input_exhausted() {
        let error = table().dispatch(&["a", "--flag"]).unwrap_err();
        assert_eq!(error.cause, Cause::InputExhausted);
        assert_eq!(error.msg, "Input exhausted (available: b, c)");

        let error = DispatchTable::<()>::new().dispatch(&[]).unwrap_err();
        assert_eq!(error.msg, "Input exhausted");
    }

    #[test]
    fn dispatch_parse_error() {
        let error = table().dispatch(&["d", "--n", "x"]).unwrap_err();
        assert_eq!(error.cause, Cause::Coerce);
    }

    #[test]
    fn dispatch_fallback() {
        let table = table().command(Vec::<String>::new(), ParseConfig::new(), |d| {
            format!("fallback {:?} {:?}", d.opts, d.args)
        });

        assert_eq!(
            table.dispatch(&["--v", "z"]).unwrap(),
            "fallback {\"v\": Str(\"z\")} []"
        );
        assert_eq!(table.dispatch(&["z"]).unwrap(), "fallback {} [\"z\"]");
        assert_eq!(table.dispatch(&["a", "b"]).unwrap(), "ab []");
    }

    #[test]
    fn dispatch_first_declared_wins_ties() {
        let table = DispatchTable::new()
            .command(["x"], ParseConfig::new(), |_| 1)
            .command(["x"], ParseConfig::new(), |_| 2);
        assert_eq!(table.dispatch(&["x"]).unwrap(), 1);
    }

    #[test]
    fn dispatched_values() {
        let table = DispatchTable::new().command(["x"], ParseConfig::new(), |d| d);
        let dispatched = table.dispatch(&["x", "--a", "1", "b"]).unwrap();
        assert_eq!(dispatched.cmds, vec!["x"]);
        assert_eq!(dispatched.opts["a"], Value::Long(1));
        assert_eq!(dispatched.args, vec!["b"]);
    }
}
