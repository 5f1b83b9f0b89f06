//! Platform adapters

pub mod console;

pub use console::ConsoleConnector;
