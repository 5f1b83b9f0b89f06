//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Runtime configuration loading
//! - Storage: JSON settings persistence
//! - Adapters: Socket implementations (console)

pub mod config;
pub mod storage;
pub mod adapters;
