//! Settings-driven automation: read receipts, bad-word warnings, welcomes

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::sync::Arc;

use crate::domain::entities::{jid_user, InboundMessage, Toggle};
use crate::domain::traits::{OutgoingMessage, Socket};
use crate::infrastructure::storage::SettingsManager;

const BAD_WORDS: &[&str] = &[
    "fuck", "fucking", "shit", "bitch", "bastard", "asshole", "dick", "cunt", "motherfucker",
];

static BAD_WORD_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    let pattern = format!(r"(?i)\b(?:{})\b", BAD_WORDS.join("|"));
    Regex::new(&pattern)
        .map_err(|e| tracing::error!("Invalid bad word pattern: {}", e))
        .ok()
});

/// Whole-word, case-insensitive bad word check
pub fn contains_bad_word(text: &str) -> bool {
    BAD_WORD_RE.as_ref().is_some_and(|re| re.is_match(text))
}

/// Runs the feature toggles stored in settings
pub struct AutomationService {
    settings: Arc<SettingsManager>,
}

impl AutomationService {
    pub fn new(settings: Arc<SettingsManager>) -> Self {
        Self { settings }
    }

    /// Mark the message read when `autoread` is on
    pub async fn mark_read(&self, message: &InboundMessage, socket: &dyn Socket) {
        if !self.settings.toggle(Toggle::AutoRead) {
            return;
        }
        if let Err(e) = socket.read_messages(std::slice::from_ref(&message.key)).await {
            tracing::warn!("[{}] Failed to mark message read: {}", message.chat(), e);
        }
    }

    /// Warn the sender when `antibadword` is on and a group message has a
    /// bad word. Returns whether the message was flagged.
    pub async fn check_bad_words(&self, message: &InboundMessage, socket: &dyn Socket) -> bool {
        if !self.settings.toggle(Toggle::AntiBadWord) || !message.is_group() {
            return false;
        }
        if !contains_bad_word(message.body()) {
            return false;
        }

        let sender = message.sender().to_string();
        tracing::info!("[{}] Bad word from {}", message.chat(), sender);

        let warning = OutgoingMessage::text(format!(
            "⚠️ @{} watch your language! Bad words are not allowed here.",
            jid_user(&sender)
        ))
        .with_mentions(vec![sender]);

        if let Err(e) = socket.send_message(message.chat(), warning).await {
            tracing::error!("[{}] Failed to send warning: {}", message.chat(), e);
        }
        true
    }

    /// Greet new group members when `welcome` is on
    pub async fn welcome(&self, group_jid: &str, participants: &[String], socket: &dyn Socket) {
        if !self.settings.toggle(Toggle::Welcome) {
            return;
        }

        let bot_name = self.settings.bot_name();
        for participant in participants {
            let greeting = OutgoingMessage::text(format!(
                "👋 Welcome @{} to the group!\n🤖 I'm {}, type {}menu to see what I can do.",
                jid_user(participant),
                bot_name,
                self.settings.prefix()
            ))
            .with_mentions(vec![participant.clone()]);

            if let Err(e) = socket.send_message(group_jid, greeting).await {
                tracing::error!("[{}] Failed to send welcome: {}", group_jid, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{settings_in, RecordingSocket, OWNER, STRANGER};

    const GROUP: &str = "120363000000@g.us";

    #[test]
    fn test_bad_word_matching() {
        assert!(contains_bad_word("what the SHIT is this"));
        assert!(contains_bad_word("shit"));
        assert!(!contains_bad_word("Dickens wrote books"));
        assert!(!contains_bad_word("hello there"));
    }

    #[tokio::test]
    async fn test_mark_read_follows_toggle() {
        let (_dir, settings) = settings_in();
        let automation = AutomationService::new(settings.clone());
        let socket = RecordingSocket::new();
        let msg = InboundMessage::from_text(OWNER, "hi");

        automation.mark_read(&msg, &socket).await;
        assert_eq!(socket.reads(), vec![msg.key.clone()]);

        settings.set_toggle(Toggle::AutoRead, false).unwrap();
        automation.mark_read(&msg, &socket).await;
        assert_eq!(socket.reads().len(), 1);
    }

    #[tokio::test]
    async fn test_bad_words_only_flagged_in_groups_when_enabled() {
        let (_dir, settings) = settings_in();
        let automation = AutomationService::new(settings.clone());
        let socket = RecordingSocket::new();
        let msg = InboundMessage::from_text(GROUP, "oh shit").with_participant(STRANGER);

        assert!(!automation.check_bad_words(&msg, &socket).await);

        settings.set_toggle(Toggle::AntiBadWord, true).unwrap();
        assert!(automation.check_bad_words(&msg, &socket).await);
        assert!(socket.last_text().contains("@94711111111"));

        let private = InboundMessage::from_text(STRANGER, "oh shit");
        assert!(!automation.check_bad_words(&private, &socket).await);
    }

    #[tokio::test]
    async fn test_welcome_greets_each_participant() {
        let (_dir, settings) = settings_in();
        let automation = AutomationService::new(settings.clone());
        let socket = RecordingSocket::new();
        let joined = vec![STRANGER.to_string(), "94733333333@s.whatsapp.net".to_string()];

        automation.welcome(GROUP, &joined, &socket).await;
        let sent = socket.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|(jid, _)| jid == GROUP));
        assert!(sent[1].1.contains("@94733333333"));

        settings.set_toggle(Toggle::Welcome, false).unwrap();
        automation.welcome(GROUP, &joined, &socket).await;
        assert_eq!(socket.sent().len(), 2);
    }
}
