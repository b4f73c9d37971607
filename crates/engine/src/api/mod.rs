//! API layer - slash-command entry points.

pub mod autocomplete;
pub mod commands;
pub mod dispatcher;
pub mod error_sanitizer;
pub mod parser;

pub use autocomplete::Autocomplete;
pub use commands::{CommandKind, CommandRegistry, CommandSpec, OptionSpec, Suggest};
pub use dispatcher::{CommandResponse, DispatchError, Dispatcher};
pub use parser::{parse_invocation, Invocation, ParseError};
