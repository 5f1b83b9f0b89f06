//! Console adapter for development/testing
//!
//! Each stdin line becomes an inbound message in one fixed chat; replies
//! are printed to stdout. EOF ends the session.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::application::errors::{BotError, SocketError};
use crate::domain::entities::{InboundMessage, MessageKey};
use crate::domain::traits::{
    Connection, ConnectionState, Connector, OutgoingMessage, ParticipantAction, Presence, Socket,
    SocketEvent,
};

/// Socket that prints to the terminal
pub struct ConsoleSocket;

#[async_trait]
impl Socket for ConsoleSocket {
    async fn send_message(&self, jid: &str, message: OutgoingMessage) -> Result<(), SocketError> {
        println!("[BOT -> {}] {}", jid, message.text);
        Ok(())
    }

    async fn send_presence(&self, jid: &str, presence: Presence) -> Result<(), SocketError> {
        tracing::debug!("[{}] presence {:?}", jid, presence);
        Ok(())
    }

    async fn read_messages(&self, keys: &[MessageKey]) -> Result<(), SocketError> {
        for key in keys {
            tracing::debug!("[{}] read {}", key.remote_jid, key.id);
        }
        Ok(())
    }

    async fn update_participants(
        &self,
        group_jid: &str,
        participants: &[String],
        action: ParticipantAction,
    ) -> Result<(), SocketError> {
        println!("[BOT -> {}] {} {}", group_jid, action.as_str(), participants.join(", "));
        Ok(())
    }
}

/// Connector that reads messages from stdin
pub struct ConsoleConnector {
    chat_jid: String,
}

impl ConsoleConnector {
    pub fn new(chat_jid: impl Into<String>) -> Self {
        Self {
            chat_jid: chat_jid.into(),
        }
    }
}

#[async_trait]
impl Connector for ConsoleConnector {
    async fn connect(&self) -> Result<Connection, BotError> {
        let (tx, rx) = mpsc::channel(32);
        let chat_jid = self.chat_jid.clone();

        tokio::spawn(async move {
            if tx.send(SocketEvent::ConnectionUpdate(ConnectionState::Open)).await.is_err() {
                return;
            }

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                let line = match lines.next_line().await {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!("Failed to read stdin: {}", e);
                        break;
                    }
                };

                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let message = InboundMessage::from_text(chat_jid.clone(), line).with_push_name("console");
                if tx.send(SocketEvent::MessagesUpsert(vec![message])).await.is_err() {
                    return;
                }
            }

            let _ = tx
                .send(SocketEvent::ConnectionUpdate(ConnectionState::Close {
                    reason: Some("stdin closed".to_string()),
                    logged_out: true,
                }))
                .await;
        });

        tracing::info!("Console session for {} (type messages, Ctrl-D to quit)", self.chat_jid);
        Ok(Connection {
            socket: Arc::new(ConsoleSocket),
            events: rx,
        })
    }
}
