//! Test doubles shared by the unit tests

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::application::errors::SocketError;
use crate::domain::entities::MessageKey;
use crate::domain::traits::{OutgoingMessage, ParticipantAction, Presence, Socket};
use crate::infrastructure::storage::SettingsManager;

pub const OWNER: &str = "94700000000@s.whatsapp.net";
pub const STRANGER: &str = "94711111111@s.whatsapp.net";

/// Settings in a fresh temp dir, owned by `OWNER`
pub fn settings_in() -> (TempDir, Arc<SettingsManager>) {
    let dir = tempfile::tempdir().expect("temp dir");
    let settings = SettingsManager::load(dir.path().join("settings.json"));
    settings.set("owner", Value::from(OWNER)).expect("set owner");
    (dir, Arc::new(settings))
}

/// Socket that records every call
#[derive(Default)]
pub struct RecordingSocket {
    fail_sends: bool,
    sent: Mutex<Vec<(String, String)>>,
    presences: Mutex<Vec<(String, Presence)>>,
    reads: Mutex<Vec<MessageKey>>,
    participant_updates: Mutex<Vec<(String, Vec<String>, ParticipantAction)>>,
}

impl RecordingSocket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `send_message` fails
    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_text(&self) -> String {
        self.sent().last().map(|(_, text)| text.clone()).unwrap_or_default()
    }

    pub fn presences(&self) -> Vec<(String, Presence)> {
        self.presences.lock().unwrap().clone()
    }

    pub fn reads(&self) -> Vec<MessageKey> {
        self.reads.lock().unwrap().clone()
    }

    pub fn participant_updates(&self) -> Vec<(String, Vec<String>, ParticipantAction)> {
        self.participant_updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl Socket for RecordingSocket {
    async fn send_message(&self, jid: &str, message: OutgoingMessage) -> Result<(), SocketError> {
        if self.fail_sends {
            return Err(SocketError::Send("connection lost".to_string()));
        }
        self.sent.lock().unwrap().push((jid.to_string(), message.text));
        Ok(())
    }

    async fn send_presence(&self, jid: &str, presence: Presence) -> Result<(), SocketError> {
        self.presences.lock().unwrap().push((jid.to_string(), presence));
        Ok(())
    }

    async fn read_messages(&self, keys: &[MessageKey]) -> Result<(), SocketError> {
        self.reads.lock().unwrap().extend_from_slice(keys);
        Ok(())
    }

    async fn update_participants(
        &self,
        group_jid: &str,
        participants: &[String],
        action: ParticipantAction,
    ) -> Result<(), SocketError> {
        self.participant_updates
            .lock()
            .unwrap()
            .push((group_jid.to_string(), participants.to_vec(), action));
        Ok(())
    }
}
