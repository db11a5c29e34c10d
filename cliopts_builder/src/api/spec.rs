use std::sync::Arc;

use crate::model::{Coerce, Value};

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
type MessageFn = Arc<dyn Fn(&str, &Value) -> String + Send + Sync>;

/// A predicate over the final (coerced) value of an option.
///
/// Two validators are equal only when they share the same underlying closures.
#[derive(Clone)]
pub struct Validator {
    predicate: Predicate,
    message: Option<MessageFn>,
}

impl Validator {
    /// Create a validator from a predicate.
    ///
    /// ### Example
    /// ```
    /// # use cliopts_builder as cliopts;
    /// use cliopts::{Validator, Value};
    ///
    /// let positive = Validator::new(|v| matches!(v, Value::Long(l) if *l > 0));
    /// assert!(positive.check(&Value::Long(1)));
    /// assert!(!positive.check(&Value::Long(0)));
    /// ```
    pub fn new(predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Arc::new(predicate),
            message: None,
        }
    }

    /// Replace the failure message.
    /// The function receives the option name and the offending value.
    pub fn with_message(
        mut self,
        message: impl Fn(&str, &Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.message.replace(Arc::new(message));
        self
    }

    /// Run the predicate.
    pub fn check(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }

    pub(crate) fn message(&self, option: &str, value: &Value) -> String {
        match &self.message {
            Some(message) => message(option, value),
            None => format!("Invalid value for option :{option}: {value}"),
        }
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator{..}").finish()
    }
}

impl PartialEq for Validator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.predicate, &other.predicate)
            && match (&self.message, &other.message) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

/// The description of a single option within a [`Spec`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSpec {
    pub(crate) coerce: Option<Coerce>,
    pub(crate) alias: Option<String>,
    pub(crate) desc: Option<String>,
    pub(crate) reference: Option<String>,
    pub(crate) default: Option<Value>,
    pub(crate) default_desc: Option<String>,
    pub(crate) require: bool,
    pub(crate) validate: Option<Validator>,
}

impl OptionSpec {
    /// Coerce the option's values.
    pub fn coerce(mut self, coerce: impl Into<Coerce>) -> Self {
        self.coerce.replace(coerce.into());
        self
    }

    /// An alternative (typically single character) name for the option.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias.replace(alias.into());
        self
    }

    /// Document the option in [`format_opts`](crate::format_opts).
    pub fn desc(mut self, description: impl Into<String>) -> Self {
        self.desc.replace(description.into());
        self
    }

    /// The value placeholder shown in help, ex: `<file>`.
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference.replace(reference.into());
        self
    }

    /// The value used when the option is absent from the Cli.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default.replace(value.into());
        self
    }

    /// Show this text instead of the default value in help.
    pub fn default_desc(mut self, description: impl Into<String>) -> Self {
        self.default_desc.replace(description.into());
        self
    }

    /// Fail the parse when the option is absent (after defaults apply).
    pub fn require(mut self) -> Self {
        self.require = true;
        self
    }

    /// Check the final value of the option.
    pub fn validate(mut self, validator: Validator) -> Self {
        self.validate.replace(validator);
        self
    }
}

/// An ordered collection of option descriptions.
///
/// ### Example
/// ```
/// # use cliopts_builder as cliopts;
/// use cliopts::{CoerceType, Spec};
///
/// let spec = Spec::new()
///     .option("port", |o| o.coerce(CoerceType::Long).alias("p").default(8080i64))
///     .option("verbose", |o| o.coerce(CoerceType::Boolean).alias("v"));
///
/// assert_eq!(spec.names().collect::<Vec<&str>>(), vec!["port", "verbose"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spec {
    options: Vec<(String, OptionSpec)>,
}

impl Spec {
    /// Create an empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Describe the option `name`.
    /// If repeated, the later description replaces the earlier one (keeping its position).
    pub fn option(
        mut self,
        name: impl Into<String>,
        setup_fn: impl FnOnce(OptionSpec) -> OptionSpec,
    ) -> Self {
        let name = name.into();
        let option_spec = setup_fn(Default::default());

        match self.options.iter_mut().find(|(n, _)| n == &name) {
            Some((_, existing)) => *existing = option_spec,
            None => self.options.push((name, option_spec)),
        }

        self
    }

    /// Look up the description of `name`.
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.options
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, option_spec)| option_spec)
    }

    /// The option names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|(n, _)| n.as_str())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &OptionSpec)> {
        self.options.iter().map(|(n, o)| (n.as_str(), o))
    }

    /// Whether no options are described.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
