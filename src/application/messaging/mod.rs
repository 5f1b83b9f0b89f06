//! Message handling - Parsing and dispatching commands

pub mod dispatcher;
pub mod parser;

pub use dispatcher::{CommandDispatcher, DispatchOutcome};
pub use parser::ParsedCommand;
