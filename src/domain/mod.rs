//! Domain layer - Core business objects
//!
//! This layer contains:
//! - Entities: Messages, commands, settings
//! - Traits: The messaging socket seam

pub mod entities;
pub mod traits;
