use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::errors::{BotError, SocketError};
use crate::domain::entities::{InboundMessage, MessageKey};

/// Outgoing message payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub mentions: Vec<String>,
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mentions: Vec::new(),
        }
    }

    pub fn with_mentions(mut self, mentions: Vec<String>) -> Self {
        self.mentions = mentions;
        self
    }
}

/// Chat presence indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Composing,
}

/// Group membership change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantAction {
    Add,
    Remove,
    Promote,
}

impl ParticipantAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantAction::Add => "add",
            ParticipantAction::Remove => "remove",
            ParticipantAction::Promote => "promote",
        }
    }
}

/// Connection lifecycle as reported by the messaging library
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Open,
    /// `logged_out` means the session is gone and reconnecting is pointless
    Close {
        reason: Option<String>,
        logged_out: bool,
    },
}

/// Events emitted by the socket
#[derive(Debug, Clone)]
pub enum SocketEvent {
    MessagesUpsert(Vec<InboundMessage>),
    ConnectionUpdate(ConnectionState),
    GroupParticipantsUpdate {
        group_jid: String,
        participants: Vec<String>,
        action: ParticipantAction,
    },
}

/// Socket trait - the operations the bot needs from the messaging library
#[async_trait]
pub trait Socket: Send + Sync {
    /// Send a message to a chat
    async fn send_message(&self, jid: &str, message: OutgoingMessage) -> Result<(), SocketError>;

    /// Update our presence in a chat
    async fn send_presence(&self, jid: &str, presence: Presence) -> Result<(), SocketError>;

    /// Mark messages as read
    async fn read_messages(&self, keys: &[MessageKey]) -> Result<(), SocketError>;

    /// Add, remove, promote or demote group members
    async fn update_participants(
        &self,
        group_jid: &str,
        participants: &[String],
        action: ParticipantAction,
    ) -> Result<(), SocketError>;
}

/// A live connection: the socket plus its event stream
pub struct Connection {
    pub socket: Arc<dyn Socket>,
    pub events: mpsc::Receiver<SocketEvent>,
}

/// Opens connections to the messaging service
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Connection, BotError>;
}
