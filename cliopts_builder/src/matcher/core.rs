use crate::constant::NEGATION_PREFIX;
use crate::matcher::api::*;
use crate::matcher::model::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Aligns raw tokens to options and positional arguments.
///
/// Matching never fails: anything that is not absorbed by an option becomes positional.
pub(crate) struct TokenMatcher<'c, L: OptionLookup + ?Sized> {
    lookup: &'c L,
    keyword_opts: bool,
    buffer: Option<MatchBuffer>,
    matches: Matches,
    terminated: bool,
}

impl<'c, L: OptionLookup + ?Sized> TokenMatcher<'c, L> {
    pub(crate) fn new(lookup: &'c L, keyword_opts: bool) -> Self {
        Self {
            lookup,
            keyword_opts,
            buffer: None,
            matches: Matches::default(),
            terminated: false,
        }
    }

    pub(crate) fn feed(&mut self, token: &str) {
        if self.terminated {
            self.matches.rest.push(token.to_string());
            return;
        }

        match Token::classify(token, self.keyword_opts) {
            Token::Terminator => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Terminator found, passing through the remaining tokens.");
                }

                self.flush();
                self.terminated = true;
            }
            Token::Long { name, value } => self.open(name, value),
            Token::Short { flags, value } => {
                let last = flags.len() - 1;

                // Only the final flag may take a value: -abc=123 is --a --b --c=123
                for (i, flag) in flags.iter().enumerate() {
                    let name = flag.to_string();

                    if i == last {
                        self.open(&name, value);
                    } else {
                        self.open(&name, None);
                    }
                }
            }
            Token::Keyword { name } => self.open(name, None),
            Token::Value(value) => self.match_value(value),
        }
    }

    pub(crate) fn close(mut self) -> Matches {
        self.flush();
        self.matches
    }

    fn open(&mut self, name: &str, value: Option<&str>) {
        self.flush();
        let mut buffer = match value {
            None => self.resolve(name),
            Some(_) => {
                let canonical = self.lookup.canonical(name);
                let arity = self.lookup.arity(&canonical);
                MatchBuffer::new(canonical, arity)
            }
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Opened {buffer:?} from '{name}'.");
        }

        match value {
            Some(value) => {
                // Options using k=v syntax cannot follow up with more values afterwards.
                buffer.push(value);
                self.matches.options.push(buffer.close());
            }
            None => {
                self.buffer.replace(buffer);
            }
        }
    }

    fn resolve(&self, name: &str) -> MatchBuffer {
        if !self.lookup.knows(name) {
            if let Some(negated) = name.strip_prefix(NEGATION_PREFIX) {
                if !negated.is_empty() {
                    return MatchBuffer::negated(self.lookup.canonical(negated));
                }
            }
        }

        let canonical = self.lookup.canonical(name);
        let arity = self.lookup.arity(&canonical);
        MatchBuffer::new(canonical, arity)
    }

    fn match_value(&mut self, value: &str) {
        match self.buffer.as_mut() {
            Some(buffer) if buffer.accepts(value) => {
                buffer.push(value);

                if !buffer.is_open() {
                    self.flush();
                }
            }
            Some(_) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Value '{value}' not accepted by the open option, closing it.");
                }

                self.flush();
                self.matches.arguments.push(value.to_string());
            }
            None => {
                self.matches.arguments.push(value.to_string());
            }
        }
    }

    fn flush(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.matches.options.push(buffer.close());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Lookup;

    // Options: 'v' -> 'verbose' (switch), 'n' -> 'number' (single), 'paths' (greedy), 'no-op' (single).
    impl OptionLookup for Lookup {
        fn canonical(&self, name: &str) -> String {
            match name {
                "v" => "verbose".to_string(),
                "n" => "number".to_string(),
                _ => name.to_string(),
            }
        }

        fn knows(&self, name: &str) -> bool {
            matches!(name, "v" | "n" | "verbose" | "number" | "paths" | "no-op")
        }

        fn arity(&self, name: &str) -> Arity {
            match name {
                "verbose" => Arity::Switch,
                "paths" => Arity::Greedy,
                _ => Arity::Single,
            }
        }
    }

    fn tokens(name: &str, values: Vec<&str>) -> MatchTokens {
        MatchTokens {
            name: name.to_string(),
            values: values.into_iter().map(String::from).collect(),
            negated: false,
        }
    }

    fn negated(name: &str) -> MatchTokens {
        MatchTokens {
            name: name.to_string(),
            values: vec![],
            negated: true,
        }
    }

    fn feed_all(input: &[&str]) -> Matches {
        let mut token_matcher = TokenMatcher::new(&Lookup, true);

        for token in input {
            token_matcher.feed(token);
        }

        token_matcher.close()
    }

    #[rstest]
    #[case(vec![], vec![], vec![])]
    #[case(vec!["a", "b"], vec![], vec!["a", "b"])]
    #[case(vec!["--foo", "1"], vec![tokens("foo", vec!["1"])], vec![])]
    #[case(vec!["--foo", "1", "2"], vec![tokens("foo", vec!["1"])], vec!["2"])]
    #[case(vec!["--foo=1", "2"], vec![tokens("foo", vec!["1"])], vec!["2"])]
    #[case(vec!["--foo", "--bar"], vec![tokens("foo", vec![]), tokens("bar", vec![])], vec![])]
    #[case(vec!["-v", "x"], vec![tokens("verbose", vec![])], vec!["x"])]
    #[case(vec!["-v", "false", "x"], vec![tokens("verbose", vec!["false"])], vec!["x"])]
    #[case(vec!["--verbose=x"], vec![tokens("verbose", vec!["x"])], vec![])]
    #[case(vec!["-n", "-5"], vec![tokens("number", vec!["-5"])], vec![])]
    #[case(vec!["-vn", "5"], vec![tokens("verbose", vec![]), tokens("number", vec!["5"])], vec![])]
    #[case(vec!["-nv=true"], vec![tokens("number", vec![]), tokens("verbose", vec!["true"])], vec![])]
    #[case(vec!["--paths", "a", "b", "-v"], vec![tokens("paths", vec!["a", "b"]), tokens("verbose", vec![])], vec![])]
    #[case(vec!["--paths", "a", "--paths", "b"], vec![tokens("paths", vec!["a"]), tokens("paths", vec!["b"])], vec![])]
    #[case(vec![":foo", "1", "x"], vec![tokens("foo", vec!["1"])], vec!["x"])]
    #[case(vec!["--no-verbose", "x"], vec![negated("verbose")], vec!["x"])]
    #[case(vec!["--no-foo"], vec![negated("foo")], vec![])]
    #[case(vec!["--no-op", "1"], vec![tokens("no-op", vec!["1"])], vec![])]
    #[case(vec!["--no-=1"], vec![tokens("no-", vec!["1"])], vec![])]
    #[case(vec!["--no-"], vec![tokens("no-", vec![])], vec![])]
    fn match_tokens(
        #[case] input: Vec<&str>,
        #[case] options: Vec<MatchTokens>,
        #[case] arguments: Vec<&str>,
    ) {
        let matches = feed_all(&input);
        assert_eq!(matches.options, options);
        assert_eq!(matches.arguments, arguments);
        assert!(matches.rest.is_empty());
    }

    #[test]
    fn terminator() {
        let matches = feed_all(&["a", "--foo", "--", "--bar", "--", "b"]);
        assert_eq!(matches.options, vec![tokens("foo", vec![])]);
        assert_eq!(matches.arguments, vec!["a"]);
        assert_eq!(matches.rest, vec!["--bar", "--", "b"]);
    }

    #[test]
    fn keyword_opts_disabled() {
        let mut token_matcher = TokenMatcher::new(&Lookup, false);
        token_matcher.feed(":foo");
        let matches = token_matcher.close();
        assert!(matches.options.is_empty());
        assert_eq!(matches.arguments, vec![":foo"]);
    }
}
