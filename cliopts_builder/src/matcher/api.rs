use crate::constant::TERMINATOR;
use crate::matcher::MatchTokens;

/// How many values an option absorbs from the tokens that follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Arity {
    /// No value, except for an explicit `true`/`false`.
    Switch,
    /// At most one value.
    Single,
    /// Every value up until the next option.
    Greedy,
}

/// The option knowledge the matcher needs from the configuration.
pub(crate) trait OptionLookup {
    /// Resolve aliases to the canonical option name.
    fn canonical(&self, name: &str) -> String;

    /// Whether the configuration mentions `name` anywhere (as a name or an alias).
    fn knows(&self, name: &str) -> bool;

    /// The arity of the canonical option `name`.
    fn arity(&self, name: &str) -> Arity;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'t> {
    Terminator,
    Long {
        name: &'t str,
        value: Option<&'t str>,
    },
    Short {
        flags: Vec<char>,
        value: Option<&'t str>,
    },
    Keyword {
        name: &'t str,
    },
    Value(&'t str),
}

impl<'t> Token<'t> {
    pub(crate) fn classify(token: &'t str, keyword_opts: bool) -> Self {
        if token == TERMINATOR {
            return Token::Terminator;
        }

        // Find a 'long' flag, such as:
        //  --initial
        //  --initial=..
        if let Some(rest) = token.strip_prefix("--") {
            return match rest.split_once('=') {
                Some(("", _)) => Token::Value(token),
                Some((name, value)) => Token::Long {
                    name,
                    value: Some(value),
                },
                None => Token::Long {
                    name: rest,
                    value: None,
                },
            };
        }

        // Find 'short' flag(s), such as (both -i and -v are example short flags):
        //  -i
        //  -i=..
        //  -iv
        //  -iv=..
        // A digit after the dash is a negative number, not a flag.
        if let Some(rest) = token.strip_prefix('-') {
            if rest.is_empty() || rest.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
                return Token::Value(token);
            }

            let (flags, value) = match rest.split_once('=') {
                Some((flags, value)) => (flags, Some(value)),
                None => (rest, None),
            };

            if flags.is_empty() {
                return Token::Value(token);
            }

            return Token::Short {
                flags: flags.chars().collect(),
                value,
            };
        }

        // Find a keyword-style option, such as:
        //  :initial
        if keyword_opts {
            if let Some(name) = token.strip_prefix(':') {
                if name.starts_with(|c: char| c.is_alphabetic()) {
                    return Token::Keyword { name };
                }
            }
        }

        Token::Value(token)
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Matches {
    pub options: Vec<MatchTokens>,
    /// Positional tokens, eligible for assignment to options.
    pub arguments: Vec<String>,
    /// Tokens following the terminator, passed through verbatim.
    pub rest: Vec<String>,
}
