//! Command dispatcher - Routes prefixed messages to command handlers

use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::parser::ParsedCommand;
use crate::application::commands::CommandContext;
use crate::domain::entities::{CommandRegistry, InboundMessage};
use crate::domain::traits::{Presence, Socket};
use crate::infrastructure::storage::SettingsManager;

/// What happened to a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not a command under the current prefix
    Ignored,
    Unknown(String),
    Handled(String),
    /// Handler returned an error; it was logged
    Failed(String),
}

/// Routes messages to the registered commands
pub struct CommandDispatcher {
    registry: CommandRegistry,
    settings: Arc<SettingsManager>,
    started_at: DateTime<Utc>,
}

impl CommandDispatcher {
    pub fn new(registry: CommandRegistry, settings: Arc<SettingsManager>) -> Self {
        Self {
            registry,
            settings,
            started_at: Utc::now(),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Handle one inbound message. Handler errors are logged, never returned.
    pub async fn handle_message(&self, message: &InboundMessage, socket: &dyn Socket) -> DispatchOutcome {
        let prefix = self.settings.prefix();
        let Some(parsed) = ParsedCommand::parse(message.body(), &prefix) else {
            return DispatchOutcome::Ignored;
        };

        let Some(command) = self.registry.find(&parsed.name) else {
            tracing::debug!("[{}] Unknown command: {}", message.chat(), parsed.name);
            return DispatchOutcome::Unknown(parsed.name);
        };

        tracing::info!("[{}] {} -> {}{}", message.chat(), message.sender_name(), prefix, command.name);

        if self.settings.autotype().applies_to(message.chat_kind()) {
            if let Err(e) = socket.send_presence(message.chat(), Presence::Composing).await {
                tracing::warn!("[{}] Failed to send typing presence: {}", message.chat(), e);
            }
        }

        let ctx = CommandContext {
            message,
            args: &parsed.args,
            full_args: &parsed.full_args,
            socket,
            settings: self.settings.as_ref(),
            registry: &self.registry,
            started_at: self.started_at,
        };

        match command.handler.execute(&ctx).await {
            Ok(()) => DispatchOutcome::Handled(command.name.clone()),
            Err(e) => {
                tracing::error!("Error handling message: {}: {}", command.name, e);
                DispatchOutcome::Failed(command.name.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::{default_registry, CommandHandler};
    use crate::application::errors::CommandError;
    use crate::domain::entities::{AutoType, Category, Command};
    use crate::testing::{settings_in, RecordingSocket, OWNER};
    use async_trait::async_trait;

    struct Broken;

    #[async_trait]
    impl CommandHandler for Broken {
        async fn execute(&self, _ctx: &CommandContext<'_>) -> Result<(), CommandError> {
            Err(CommandError::ExecutionFailed("boom".to_string()))
        }
    }

    #[tokio::test]
    async fn test_message_without_prefix_is_ignored() {
        let (_dir, settings) = settings_in();
        let dispatcher = CommandDispatcher::new(default_registry(), settings);
        let socket = RecordingSocket::new();

        let msg = InboundMessage::from_text(OWNER, "owner please");
        assert_eq!(dispatcher.handle_message(&msg, &socket).await, DispatchOutcome::Ignored);
        assert!(socket.sent().is_empty());
    }

    #[tokio::test]
    async fn test_command_name_is_case_insensitive() {
        let (_dir, settings) = settings_in();
        let dispatcher = CommandDispatcher::new(default_registry(), settings);
        let socket = RecordingSocket::new();

        let msg = InboundMessage::from_text(OWNER, ".OwNeR");
        assert_eq!(
            dispatcher.handle_message(&msg, &socket).await,
            DispatchOutcome::Handled("owner".to_string())
        );
        let sent = socket.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, OWNER);
        assert!(sent[0].1.contains("94700000000"));
    }

    #[tokio::test]
    async fn test_unknown_command_sends_nothing() {
        let (_dir, settings) = settings_in();
        let dispatcher = CommandDispatcher::new(default_registry(), settings);
        let socket = RecordingSocket::new();

        let msg = InboundMessage::from_text(OWNER, ".nosuch thing");
        assert_eq!(
            dispatcher.handle_message(&msg, &socket).await,
            DispatchOutcome::Unknown("nosuch".to_string())
        );
        assert!(socket.sent().is_empty());
    }

    #[tokio::test]
    async fn test_prefix_change_takes_effect_immediately() {
        let (_dir, settings) = settings_in();
        let dispatcher = CommandDispatcher::new(default_registry(), settings.clone());
        let socket = RecordingSocket::new();

        let msg = InboundMessage::from_text(OWNER, ".setprefix !");
        dispatcher.handle_message(&msg, &socket).await;
        assert_eq!(settings.prefix(), "!");

        let old = InboundMessage::from_text(OWNER, ".ping");
        assert_eq!(dispatcher.handle_message(&old, &socket).await, DispatchOutcome::Ignored);

        let new = InboundMessage::from_text(OWNER, "!ping");
        assert_eq!(
            dispatcher.handle_message(&new, &socket).await,
            DispatchOutcome::Handled("ping".to_string())
        );
    }

    #[tokio::test]
    async fn test_handler_error_is_contained() {
        let (_dir, settings) = settings_in();
        let mut registry = CommandRegistry::new();
        registry.register(Command::new("broken", Category::Tools, Broken));
        let dispatcher = CommandDispatcher::new(registry, settings);
        let socket = RecordingSocket::new();

        let msg = InboundMessage::from_text(OWNER, ".broken");
        assert_eq!(
            dispatcher.handle_message(&msg, &socket).await,
            DispatchOutcome::Failed("broken".to_string())
        );
    }

    #[tokio::test]
    async fn test_send_failure_is_contained() {
        let (_dir, settings) = settings_in();
        let dispatcher = CommandDispatcher::new(default_registry(), settings);
        let socket = RecordingSocket::failing();

        let msg = InboundMessage::from_text(OWNER, ".joke");
        assert_eq!(
            dispatcher.handle_message(&msg, &socket).await,
            DispatchOutcome::Failed("joke".to_string())
        );
    }

    #[tokio::test]
    async fn test_autotype_sends_presence_for_matching_chats() {
        let (_dir, settings) = settings_in();
        settings.set_autotype(AutoType::Group).unwrap();
        let dispatcher = CommandDispatcher::new(default_registry(), settings);
        let socket = RecordingSocket::new();

        let private = InboundMessage::from_text(OWNER, ".ping");
        dispatcher.handle_message(&private, &socket).await;
        assert!(socket.presences().is_empty());

        let group = InboundMessage::from_text("120363@g.us", ".ping").with_participant(OWNER);
        dispatcher.handle_message(&group, &socket).await;
        assert_eq!(socket.presences(), vec![("120363@g.us".to_string(), Presence::Composing)]);

        let unknown = InboundMessage::from_text("120363@g.us", ".nosuch").with_participant(OWNER);
        dispatcher.handle_message(&unknown, &socket).await;
        assert_eq!(socket.presences().len(), 1);
    }
}
