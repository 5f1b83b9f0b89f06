//! Domain entities - Core business objects with no external dependencies

pub mod message;
pub mod command;
pub mod settings;

pub use message::{jid_user, ChatKind, InboundMessage, MessageContent, MessageKey};
pub use command::{Category, Command, CommandRegistry};
pub use settings::{AutoType, Settings, Toggle};
