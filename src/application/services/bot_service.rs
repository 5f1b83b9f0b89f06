use std::sync::Arc;

use super::automation::AutomationService;
use crate::application::errors::BotError;
use crate::application::messaging::CommandDispatcher;
use crate::domain::traits::{
    Connection, ConnectionState, Connector, ParticipantAction, Socket, SocketEvent,
};
use crate::infrastructure::storage::SettingsManager;

/// What the event loop does after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Reconnect,
    Stop,
}

/// Drives the bot: connects, consumes socket events, dispatches messages
pub struct BotService<C: Connector> {
    connector: C,
    dispatcher: CommandDispatcher,
    automation: AutomationService,
}

impl<C: Connector> BotService<C> {
    pub fn new(connector: C, dispatcher: CommandDispatcher, settings: Arc<SettingsManager>) -> Self {
        Self {
            connector,
            dispatcher,
            automation: AutomationService::new(settings),
        }
    }

    /// Run until the session logs out or the event stream ends.
    ///
    /// A closed connection is re-opened straight away.
    pub async fn run(&self) -> Result<(), BotError> {
        loop {
            tracing::info!("Connecting...");
            let Connection { socket, mut events } = self.connector.connect().await?;

            let mut flow = Flow::Stop;
            while let Some(event) = events.recv().await {
                flow = self.handle_event(socket.as_ref(), event).await;
                if flow != Flow::Continue {
                    break;
                }
            }

            match flow {
                Flow::Reconnect => continue,
                Flow::Stop | Flow::Continue => {
                    tracing::info!("Event stream ended, stopping");
                    return Ok(());
                }
            }
        }
    }

    /// Handle a single socket event; runs to completion before returning
    pub async fn handle_event(&self, socket: &dyn Socket, event: SocketEvent) -> Flow {
        match event {
            SocketEvent::MessagesUpsert(messages) => {
                let Some(message) = messages.into_iter().next() else {
                    return Flow::Continue;
                };
                if message.content.is_none() || message.key.from_me {
                    return Flow::Continue;
                }

                self.automation.mark_read(&message, socket).await;
                if self.automation.check_bad_words(&message, socket).await {
                    return Flow::Continue;
                }

                let outcome = self.dispatcher.handle_message(&message, socket).await;
                tracing::debug!("[{}] {:?}", message.chat(), outcome);
                Flow::Continue
            }
            SocketEvent::ConnectionUpdate(state) => match state {
                ConnectionState::Open => {
                    tracing::info!("✅ Connected to WhatsApp!");
                    Flow::Continue
                }
                ConnectionState::Close { reason, logged_out } => {
                    let reason = reason.unwrap_or_else(|| "unknown".to_string());
                    if logged_out {
                        tracing::warn!("Connection closed ({}), logged out", reason);
                        Flow::Stop
                    } else {
                        tracing::warn!("🔌 Connection closed ({}), reconnecting...", reason);
                        Flow::Reconnect
                    }
                }
            },
            SocketEvent::GroupParticipantsUpdate {
                group_jid,
                participants,
                action,
            } => {
                if action == ParticipantAction::Add {
                    self.automation.welcome(&group_jid, &participants, socket).await;
                }
                Flow::Continue
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::default_registry;
    use crate::domain::entities::{InboundMessage, MessageKey, Toggle};
    use crate::testing::{settings_in, RecordingSocket, OWNER, STRANGER};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    const GROUP: &str = "120363000000@g.us";

    /// Hands out pre-scripted event batches, one per connect
    struct ScriptedConnector {
        socket: Arc<RecordingSocket>,
        scripts: Mutex<Vec<Vec<SocketEvent>>>,
        connects: AtomicUsize,
    }

    impl ScriptedConnector {
        fn new(scripts: Vec<Vec<SocketEvent>>) -> Self {
            Self {
                socket: Arc::new(RecordingSocket::new()),
                scripts: Mutex::new(scripts),
                connects: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Connector for ScriptedConnector {
        async fn connect(&self) -> Result<Connection, BotError> {
            self.connects.fetch_add(1, Ordering::SeqCst);
            let script = {
                let mut scripts = self.scripts.lock().unwrap();
                if scripts.is_empty() {
                    return Err(BotError::Connection("no more scripts".to_string()));
                }
                scripts.remove(0)
            };

            let (tx, rx) = mpsc::channel(script.len().max(1));
            for event in script {
                tx.send(event).await.unwrap();
            }
            Ok(Connection {
                socket: self.socket.clone() as Arc<dyn Socket>,
                events: rx,
            })
        }
    }

    fn service(connector: ScriptedConnector) -> (tempfile::TempDir, Arc<SettingsManager>, BotService<ScriptedConnector>) {
        let (dir, settings) = settings_in();
        let dispatcher = CommandDispatcher::new(default_registry(), settings.clone());
        let service = BotService::new(connector, dispatcher, settings.clone());
        (dir, settings, service)
    }

    #[tokio::test]
    async fn test_skips_own_and_empty_messages() {
        let (_dir, _settings, service) = service(ScriptedConnector::new(vec![]));
        let socket = RecordingSocket::new();

        let own = InboundMessage::from_text(OWNER, ".ping").outgoing();
        let empty = InboundMessage::new(MessageKey::new(OWNER, "x"), None);
        assert_eq!(service.handle_event(&socket, SocketEvent::MessagesUpsert(vec![own])).await, Flow::Continue);
        assert_eq!(service.handle_event(&socket, SocketEvent::MessagesUpsert(vec![empty])).await, Flow::Continue);
        assert_eq!(service.handle_event(&socket, SocketEvent::MessagesUpsert(vec![])).await, Flow::Continue);

        assert!(socket.sent().is_empty());
        assert!(socket.reads().is_empty());
    }

    #[tokio::test]
    async fn test_only_first_message_of_batch_is_handled() {
        let (_dir, _settings, service) = service(ScriptedConnector::new(vec![]));
        let socket = RecordingSocket::new();

        let batch = vec![
            InboundMessage::from_text(STRANGER, ".owner"),
            InboundMessage::from_text(STRANGER, ".joke"),
        ];
        service.handle_event(&socket, SocketEvent::MessagesUpsert(batch)).await;

        assert_eq!(socket.sent().len(), 1);
        assert!(socket.last_text().contains("Bot Owner"));
        assert_eq!(socket.reads().len(), 1);
    }

    #[tokio::test]
    async fn test_flagged_message_is_not_dispatched() {
        let (_dir, settings, service) = service(ScriptedConnector::new(vec![]));
        settings.set_toggle(Toggle::AntiBadWord, true).unwrap();
        let socket = RecordingSocket::new();

        let msg = InboundMessage::from_text(GROUP, ".play shit song").with_participant(STRANGER);
        service.handle_event(&socket, SocketEvent::MessagesUpsert(vec![msg])).await;

        assert_eq!(socket.sent().len(), 1);
        assert!(socket.last_text().contains("watch your language"));
    }

    #[tokio::test]
    async fn test_participant_add_triggers_welcome() {
        let (_dir, _settings, service) = service(ScriptedConnector::new(vec![]));
        let socket = RecordingSocket::new();

        let add = SocketEvent::GroupParticipantsUpdate {
            group_jid: GROUP.to_string(),
            participants: vec![STRANGER.to_string()],
            action: ParticipantAction::Add,
        };
        let remove = SocketEvent::GroupParticipantsUpdate {
            group_jid: GROUP.to_string(),
            participants: vec![STRANGER.to_string()],
            action: ParticipantAction::Remove,
        };
        service.handle_event(&socket, add).await;
        service.handle_event(&socket, remove).await;

        assert_eq!(socket.sent().len(), 1);
        assert!(socket.last_text().starts_with("👋 Welcome @94711111111"));
    }

    #[tokio::test]
    async fn test_run_reconnects_until_logged_out() {
        let connector = ScriptedConnector::new(vec![
            vec![
                SocketEvent::ConnectionUpdate(ConnectionState::Open),
                SocketEvent::MessagesUpsert(vec![InboundMessage::from_text(STRANGER, ".owner")]),
                SocketEvent::ConnectionUpdate(ConnectionState::Close {
                    reason: Some("stream errored".to_string()),
                    logged_out: false,
                }),
            ],
            vec![
                SocketEvent::ConnectionUpdate(ConnectionState::Open),
                SocketEvent::MessagesUpsert(vec![InboundMessage::from_text(STRANGER, ".ping")]),
                SocketEvent::ConnectionUpdate(ConnectionState::Close {
                    reason: None,
                    logged_out: true,
                }),
            ],
        ]);
        let socket = connector.socket.clone();
        let (_dir, _settings, service) = service(connector);

        service.run().await.unwrap();

        assert_eq!(service.connector.connects.load(Ordering::SeqCst), 2);
        // owner reply, then ping's two messages
        assert_eq!(socket.sent().len(), 3);
    }

    #[tokio::test]
    async fn test_run_stops_when_stream_ends() {
        let connector = ScriptedConnector::new(vec![vec![SocketEvent::ConnectionUpdate(
            ConnectionState::Open,
        )]]);
        let (_dir, _settings, service) = service(connector);

        service.run().await.unwrap();
        assert_eq!(service.connector.connects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_connect_failure_propagates() {
        let (_dir, _settings, service) = service(ScriptedConnector::new(vec![]));
        assert!(matches!(service.run().await, Err(BotError::Connection(_))));
    }
}
