mod coercion;
mod config;
mod core;
mod dispatch;
mod spec;

pub(crate) use self::coercion::implicit;
pub use self::coercion::{auto_coerce, coerce, CoerceFailure};
pub use self::config::*;
pub use self::core::*;
pub use self::dispatch::*;
pub use self::spec::*;
