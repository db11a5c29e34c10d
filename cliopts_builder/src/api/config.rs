use std::collections::HashMap;
use std::sync::Arc;

use crate::api::spec::{Spec, Validator};
use crate::matcher::{Arity, OptionLookup};
use crate::model::{Coerce, CoerceType, Opts, Value};
use crate::parser::CliError;

type ErrorFn = Arc<dyn Fn(CliError) -> Result<(), CliError> + Send + Sync>;

/// Which option names a parse accepts.
///
/// Positional arguments assigned through [`ParseConfig::args_to_opts`] are checked too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Restrict {
    /// Accept any option.
    #[default]
    Off,
    /// Accept only the options the [`ParseConfig`] mentions (spec, coerce, alias, require, ...).
    ToSpec,
    /// Accept only these (canonical) option names.
    Only(Vec<String>),
}

/// The configuration of a parse.
///
/// Settings made directly on the `ParseConfig` take precedence over those of its [`Spec`].
///
/// ### Example
/// ```
/// # use cliopts_builder as cliopts;
/// use cliopts::{parse_opts, Coerce, CoerceType, ParseConfig, Value};
///
/// let config = ParseConfig::new()
///     .coerce("foo", CoerceType::String)
///     .coerce("bar", Coerce::Collection(CoerceType::Long))
///     .alias("f", "foo");
///
/// let opts = parse_opts(&["-f", "1", "--bar", "2", "3"], &config).unwrap();
///
/// assert_eq!(opts["foo"], Value::from("1"));
/// assert_eq!(opts["bar"], Value::from(vec![2i64, 3]));
/// ```
#[derive(Clone, Default)]
pub struct ParseConfig {
    coerce: HashMap<String, Coerce>,
    alias: HashMap<String, String>,
    spec: Option<Spec>,
    restrict: Restrict,
    require: Vec<String>,
    validate: HashMap<String, Validator>,
    exec_args: Opts,
    args_to_opts: Vec<String>,
    no_keyword_opts: bool,
    error_fn: Option<ErrorFn>,
}

impl std::fmt::Debug for ParseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseConfig")
            .field("coerce", &self.coerce)
            .field("alias", &self.alias)
            .field("spec", &self.spec)
            .field("restrict", &self.restrict)
            .field("require", &self.require)
            .field("exec_args", &self.exec_args)
            .field("args_to_opts", &self.args_to_opts)
            .field("no_keyword_opts", &self.no_keyword_opts)
            .finish_non_exhaustive()
    }
}

impl ParseConfig {
    /// Create an empty configuration: every option is auto-coerced and accepted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Coerce the values of option `name`.
    /// If repeated, only the final coercion will apply.
    pub fn coerce(mut self, name: impl Into<String>, coerce: impl Into<Coerce>) -> Self {
        self.coerce.insert(name.into(), coerce.into());
        self
    }

    /// Make `short` (ex: `v`, used as `-v`) an alternative name for the option `long`.
    pub fn alias(mut self, short: impl Into<String>, long: impl Into<String>) -> Self {
        self.alias.insert(short.into(), long.into());
        self
    }

    /// Describe the options via a [`Spec`].
    pub fn spec(mut self, spec: Spec) -> Self {
        self.spec.replace(spec);
        self
    }

    /// Restrict which options are accepted.
    pub fn restrict(mut self, restrict: Restrict) -> Self {
        self.restrict = restrict;
        self
    }

    /// Fail the parse when option `name` is absent.
    pub fn require(mut self, name: impl Into<String>) -> Self {
        let name = name.into();

        if !self.require.contains(&name) {
            self.require.push(name);
        }

        self
    }

    /// Check the final value of option `name`.
    pub fn validate(mut self, name: impl Into<String>, validator: Validator) -> Self {
        self.validate.insert(name.into(), validator);
        self
    }

    /// Use `value` for option `name` unless it is given on the Cli.
    pub fn exec_arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.exec_args.insert(name.into(), value.into());
        self
    }

    /// Assign positional arguments, in order, to these options.
    /// A collection-coerced name absorbs all remaining positional arguments.
    pub fn args_to_opts<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.args_to_opts = names.into_iter().map(Into::into).collect();
        self
    }

    /// Treat `:name` tokens as values rather than keyword-style options.
    pub fn no_keyword_opts(mut self, no_keyword_opts: bool) -> Self {
        self.no_keyword_opts = no_keyword_opts;
        self
    }

    /// Handle parse failures.
    ///
    /// Returning `Ok(())` drops the offending value and resumes the parse.
    /// Returning `Err(..)` aborts the parse with that error.
    /// Without a handler, every failure aborts the parse.
    pub fn on_error(
        mut self,
        error_fn: impl Fn(CliError) -> Result<(), CliError> + Send + Sync + 'static,
    ) -> Self {
        self.error_fn.replace(Arc::new(error_fn));
        self
    }
}

impl ParseConfig {
    pub(crate) fn spec_ref(&self) -> Option<&Spec> {
        self.spec.as_ref()
    }

    pub(crate) fn coerce_for(&self, name: &str) -> Coerce {
        if let Some(coerce) = self.coerce.get(name) {
            return *coerce;
        }

        self.spec
            .as_ref()
            .and_then(|spec| spec.get(name))
            .and_then(|option_spec| option_spec.coerce)
            .unwrap_or_default()
    }

    pub(crate) fn validator_for(&self, name: &str) -> Option<&Validator> {
        self.validate.get(name).or_else(|| {
            self.spec
                .as_ref()
                .and_then(|spec| spec.get(name))
                .and_then(|option_spec| option_spec.validate.as_ref())
        })
    }

    pub(crate) fn validators(&self) -> Vec<(&str, &Validator)> {
        let mut names: Vec<&str> = self.validate.keys().map(String::as_str).collect();

        if let Some(spec) = &self.spec {
            for (name, option_spec) in spec.iter() {
                if option_spec.validate.is_some() && !names.contains(&name) {
                    names.push(name);
                }
            }
        }

        names.sort();
        names
            .into_iter()
            .filter_map(|name| self.validator_for(name).map(|v| (name, v)))
            .collect()
    }

    pub(crate) fn required(&self) -> Vec<&str> {
        let mut required: Vec<&str> = self.require.iter().map(String::as_str).collect();

        if let Some(spec) = &self.spec {
            for (name, option_spec) in spec.iter() {
                if option_spec.require && !required.contains(&name) {
                    required.push(name);
                }
            }
        }

        required
    }

    pub(crate) fn defaults(&self) -> Opts {
        let mut defaults = Opts::default();

        if let Some(spec) = &self.spec {
            for (name, option_spec) in spec.iter() {
                if let Some(value) = &option_spec.default {
                    defaults.insert(name.to_string(), value.clone());
                }
            }
        }

        defaults.extend(self.exec_args.clone());
        defaults
    }

    pub(crate) fn positional_names(&self) -> &[String] {
        &self.args_to_opts
    }

    pub(crate) fn keyword_opts(&self) -> bool {
        !self.no_keyword_opts
    }

    pub(crate) fn allows(&self, name: &str) -> bool {
        match &self.restrict {
            Restrict::Off => true,
            Restrict::ToSpec => self.knows(name),
            Restrict::Only(names) => names.iter().any(|n| n == name),
        }
    }

    /// Route a failure through the error handler.
    pub(crate) fn raise(&self, error: CliError) -> Result<(), CliError> {
        match &self.error_fn {
            Some(error_fn) => error_fn(error),
            None => Err(error),
        }
    }
}

impl OptionLookup for ParseConfig {
    fn canonical(&self, name: &str) -> String {
        if let Some(long) = self.alias.get(name) {
            return long.clone();
        }

        if let Some(spec) = &self.spec {
            for (long, option_spec) in spec.iter() {
                if option_spec.alias.as_deref() == Some(name) {
                    return long.to_string();
                }
            }
        }

        name.to_string()
    }

    fn knows(&self, name: &str) -> bool {
        self.coerce.contains_key(name)
            || self.alias.contains_key(name)
            || self.alias.values().any(|long| long == name)
            || self.require.iter().any(|n| n == name)
            || self.validate.contains_key(name)
            || self.exec_args.contains_key(name)
            || self.args_to_opts.iter().any(|n| n == name)
            || self.spec.as_ref().map_or(false, |spec| {
                spec.iter()
                    .any(|(n, o)| n == name || o.alias.as_deref() == Some(name))
            })
    }

    fn arity(&self, name: &str) -> Arity {
        match self.coerce_for(name) {
            Coerce::Scalar(CoerceType::Boolean) | Coerce::Collection(CoerceType::Boolean) => {
                Arity::Switch
            }
            Coerce::Collection(_) => Arity::Greedy,
            Coerce::Scalar(_) => Arity::Single,
        }
    }
}
