use crate::matcher::api::Arity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MatchTokens {
    pub name: String,
    pub values: Vec<String>,
    /// Matched via `--no-NAME`.
    pub negated: bool,
}

#[derive(Debug)]
pub(super) struct MatchBuffer {
    name: String,
    arity: Arity,
    negated: bool,
    values: Vec<String>,
}

impl MatchBuffer {
    pub(super) fn new(name: impl Into<String>, arity: Arity) -> Self {
        Self {
            name: name.into(),
            arity,
            negated: false,
            values: Vec::default(),
        }
    }

    pub(super) fn negated(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arity: Arity::Switch,
            negated: true,
            values: Vec::default(),
        }
    }

    pub(super) fn push(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    /// Whether the buffer takes `token` as its next value.
    pub(super) fn accepts(&self, token: &str) -> bool {
        if self.negated || !self.is_open() {
            return false;
        }

        match self.arity {
            Arity::Switch => token == "true" || token == "false",
            Arity::Single | Arity::Greedy => true,
        }
    }

    pub(super) fn is_open(&self) -> bool {
        match self.arity {
            Arity::Switch | Arity::Single => self.values.is_empty(),
            Arity::Greedy => true,
        }
    }

    pub(super) fn close(self) -> MatchTokens {
        MatchTokens {
            name: self.name,
            values: self.values,
            negated: self.negated,
        }
    }
}
