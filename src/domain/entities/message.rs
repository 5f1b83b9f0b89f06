/// JID suffix used by group chats
pub const GROUP_SUFFIX: &str = "@g.us";

/// Identifies a message inside a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageKey {
    /// Chat the message belongs to; replies go here
    pub remote_jid: String,
    pub id: String,
    pub from_me: bool,
    /// Sender inside a group chat
    pub participant: Option<String>,
}

impl MessageKey {
    pub fn new(remote_jid: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            remote_jid: remote_jid.into(),
            id: id.into(),
            from_me: false,
            participant: None,
        }
    }
}

/// Message payload variants the bot can read text from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Conversation(String),
    ExtendedText(String),
    Image { caption: Option<String> },
}

/// Kind of chat a message arrived in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
}

impl ChatKind {
    pub fn of(jid: &str) -> Self {
        if jid.ends_with(GROUP_SUFFIX) {
            ChatKind::Group
        } else {
            ChatKind::Private
        }
    }
}

/// An inbound message as delivered by the messaging socket
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub key: MessageKey,
    pub content: Option<MessageContent>,
    pub mentioned_jids: Vec<String>,
    pub quoted_image: bool,
    pub push_name: Option<String>,
}

impl InboundMessage {
    pub fn new(key: MessageKey, content: Option<MessageContent>) -> Self {
        Self {
            key,
            content,
            mentioned_jids: Vec::new(),
            quoted_image: false,
            push_name: None,
        }
    }

    pub fn from_text(remote_jid: impl Into<String>, text: impl Into<String>) -> Self {
        let key = MessageKey::new(remote_jid, uuid::Uuid::new_v4().simple().to_string());
        Self::new(key, Some(MessageContent::Conversation(text.into())))
    }

    pub fn with_participant(mut self, participant: impl Into<String>) -> Self {
        self.key.participant = Some(participant.into());
        self
    }

    pub fn with_push_name(mut self, name: impl Into<String>) -> Self {
        self.push_name = Some(name.into());
        self
    }

    pub fn with_mentions(mut self, mentions: Vec<String>) -> Self {
        self.mentioned_jids = mentions;
        self
    }

    pub fn with_quoted_image(mut self) -> Self {
        self.quoted_image = true;
        self
    }

    pub fn outgoing(mut self) -> Self {
        self.key.from_me = true;
        self
    }

    /// Text of the message: conversation, then extended text, then image
    /// caption, else empty.
    pub fn body(&self) -> &str {
        match &self.content {
            Some(MessageContent::Conversation(text)) => text,
            Some(MessageContent::ExtendedText(text)) => text,
            Some(MessageContent::Image { caption: Some(caption) }) => caption,
            _ => "",
        }
    }

    pub fn chat(&self) -> &str {
        &self.key.remote_jid
    }

    pub fn chat_kind(&self) -> ChatKind {
        ChatKind::of(&self.key.remote_jid)
    }

    pub fn is_group(&self) -> bool {
        self.chat_kind() == ChatKind::Group
    }

    /// Display name if the sender has one, else the sender JID
    pub fn sender_name(&self) -> &str {
        self.push_name.as_deref().unwrap_or_else(|| self.sender())
    }

    /// Who sent the message: the participant in groups, the chat otherwise
    pub fn sender(&self) -> &str {
        self.key
            .participant
            .as_deref()
            .unwrap_or(&self.key.remote_jid)
    }
}

/// User part of a JID (`123@s.whatsapp.net` -> `123`)
pub fn jid_user(jid: &str) -> &str {
    jid.split('@').next().unwrap_or(jid)
}
