//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Commands: The built-in command handlers
//! - Errors: Domain-specific errors
//! - Messaging: Command parsing and dispatching
//! - Services: Event loop and settings-driven automation

pub mod commands;
pub mod errors;
pub mod messaging;
pub mod services;
