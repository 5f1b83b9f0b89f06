//! Command parser - Splits a prefixed message body into name and arguments

/// A command found in a message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Lowercased command name
    pub name: String,
    pub args: Vec<String>,
    /// Arguments joined by single spaces
    pub full_args: String,
}

impl ParsedCommand {
    /// Parse `body` as a command under `prefix`.
    ///
    /// Returns `None` when the body does not start with the prefix or holds
    /// nothing after it.
    pub fn parse(body: &str, prefix: &str) -> Option<Self> {
        let rest = body.strip_prefix(prefix)?;

        let mut parts = rest.split_whitespace();
        let name = parts.next()?.to_lowercase();
        let args: Vec<String> = parts.map(str::to_string).collect();
        let full_args = args.join(" ");

        Some(Self {
            name,
            args,
            full_args,
        })
    }
}
