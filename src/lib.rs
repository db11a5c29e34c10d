//! `cliopts` is a command line option parser for Rust.
//!
//! Rather than binding each parameter to a typed program variable up front, `cliopts` turns the Cli tokens into a map of *coerced* values.
//! This makes it a good fit for tools that forward their options elsewhere (tasks, scripts, config files), and for programs that want a working parse with zero configuration.
//! `cliopts` prioritizes the following design concerns:
//! * *Zero configuration*:
//! Without any configuration, `--foo 1` parses to `{"foo": 1}` and `--verbose` parses to `{"verbose": true}`.
//! * *Opt-in coercion*:
//! The inferred types can be pinned per option (ex: keep `1` as the string `"1"`), and options can collect multiple values.
//! * *Structured failures*:
//! Every failure is a [`CliError`] record with a `cause`, a `msg`, and the `option`/`value` it concerns.
//! The caller decides (via [`ParseConfig::on_error`]) whether a failure aborts the parse.
//! * *Detailed yet basic UX*:
//! Help tables are generated from a [`Spec`], and wrapped to the terminal width.
//! We do not aim to support rich display configurations, such as colour output, shell completions, etc.
//!
//! # Usage
//! More examples are outlined in [the source](https://github.com/cliopts/cliopts/tree/main/demos).
//!
//! ```no_run
#![doc = include_str!("../demos/greeter.rs")]
//! ```
//!
//! ```console
//! $ greeter -h
//! usage: greeter [-h] [OPTIONS] [ARGS ...]
//!
//! Greets people.
//!
//! options:
//!   -h, --help        Show this help message and exit.
//!   -n, --name <who>  Who to greet. (default: world)
//!   -t, --times       How many greetings. (default: 1)
//!   -s, --shout       Greet loudly.
//!
//! $ greeter -n Ada -t 2
//! Hello, Ada!
//! Hello, Ada!
//!
//! $ greeter -t many
//! Parse error: Coerce failure: cannot transform input "many" to long
//! ```
//!
//! # Coercion
//! Each raw token is converted into a [`Value`] by a [`Coerce`] rule.
//! Without a rule, options are [`CoerceType::Auto`]-coerced:
//!
//! ```console
//! Input       | Value
//! ---------------------------------
//! true/false  | Bool
//! nil         | Nil
//! 12, -3      | Long
//! 1.5, 1e3    | Double
//! :name       | Keyword("name")
//! anything    | Str
//! ```
//!
//! A rule is either a [`Coerce::Scalar`] (repeating the option overwrites the value) or a [`Coerce::Collection`] (values accumulate into a [`Value::Vector`]).
//! Rules may also be written as strings: `"long"`, `"[string]"`, etc (see [`Coerce`]'s `FromStr`).
//!
//! # Cli Semantics
//! `cliopts` matches the Cli tokens according to the following set of rules.
//!
//! * Options are matched by `--NAME`, the short syntax `-N`, or the keyword syntax `:NAME` (see [`ParseConfig::no_keyword_opts`]).
//! * An option given without a value is `true`; `--no-NAME` sets `NAME` to `false` (unless `no-NAME` is itself configured).
//! * A `Boolean` option never absorbs the following token, unless that token is `true` or `false`.
//! * A `Collection` option absorbs tokens greedily, until the next option.
//! For example, `--paths a b -v` matches `a` and `b` into `paths`.
//! * All other options absorb at most one token.
//! For example, `--key 1 2` matches `1` into `key`, and `2` as a positional argument.
//! * The key-value pair of an option may be separated with the `=` character.
//! Only the first `=` character is used as a separator.
//! For example, `--key=123=456` is equivalent to `--key 123=456`.
//! * Multiple short named options may be combined into a single flag.
//! For example, `-abc` is equivalent to `-a -b -c`.
//! Only the final option may take a value; `-abc=123` is equivalent to `-a -b -c=123`.
//! * A dash followed by a digit is a value, not an option: `--offset -5`.
//! * Tokens after `--` are positional arguments, verbatim.
//!
//! After matching, positional arguments are assigned to the [`ParseConfig::args_to_opts`] names, defaults fill in the absent options, and requirements and validators are checked.
//!
//! # Sub-commands
//! Use a [`DispatchTable`] to select a sub-command (and its own [`ParseConfig`]) from the leading command words.
//!
//! ```no_run
#![doc = include_str!("../demos/dispatcher.rs")]
//! ```
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
//! * `tracing_debug`: Emit `tracing` debug events while matching and capturing.
pub use cliopts_builder::*;
