//! Bot command handlers.

mod ai;
mod download;
mod fun;
mod group;
mod settings;
mod tools;

pub use ai::{AiHandler, GeminiHandler};
pub use download::{PlayHandler, TiktokHandler};
pub use fun::{JokeHandler, StickerHandler};
pub use group::GroupActionHandler;
pub use settings::{AutoTypeHandler, MenuHandler, OwnerHandler, SetPrefixHandler, ToggleHandler};
pub use tools::{HelpHandler, PingHandler, RuntimeHandler};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::errors::CommandError;
use crate::domain::entities::{Category, Command, CommandRegistry, InboundMessage, Toggle};
use crate::domain::traits::{OutgoingMessage, ParticipantAction, Socket};
use crate::infrastructure::storage::SettingsManager;

/// Everything a handler sees while running one command
pub struct CommandContext<'a> {
    pub message: &'a InboundMessage,
    pub args: &'a [String],
    pub full_args: &'a str,
    pub socket: &'a dyn Socket,
    pub settings: &'a SettingsManager,
    pub registry: &'a CommandRegistry,
    pub started_at: DateTime<Utc>,
}

impl CommandContext<'_> {
    /// Reply in the chat the command came from
    pub async fn reply(&self, text: impl Into<String> + Send) -> Result<(), CommandError> {
        self.socket
            .send_message(self.message.chat(), OutgoingMessage::text(text))
            .await?;
        Ok(())
    }

    pub fn prefix(&self) -> String {
        self.settings.prefix()
    }

    pub fn sender_is_owner(&self) -> bool {
        self.settings.is_owner(self.message.sender())
    }

    /// Tell non-owners off; returns whether the caller may continue
    pub async fn require_owner(&self) -> Result<bool, CommandError> {
        if self.sender_is_owner() {
            return Ok(true);
        }
        self.reply("❌ This command is for owner only!").await?;
        Ok(false)
    }

    /// First argument, lowercased
    pub fn first_arg(&self) -> Option<String> {
        self.args.first().map(|a| a.to_lowercase())
    }
}

/// Command handler trait.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Execute the command; replies go through `ctx.socket`.
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<(), CommandError>;
}

/// Registry with every built-in command
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Settings
    registry.register(
        Command::new("setprefix", Category::Settings, SetPrefixHandler)
            .with_usage("setprefix <new_prefix>")
            .with_example("setprefix !")
            .with_description("Change bot prefix"),
    );
    registry.register(
        Command::new("autotype", Category::Settings, AutoTypeHandler)
            .with_usage("autotype <all/pm/group/off>")
            .with_example("autotype group")
            .with_description("Enable/disable auto typing"),
    );
    registry.register(
        Command::new("autoread", Category::Settings, ToggleHandler::new(Toggle::AutoRead))
            .with_usage("autoread <on/off>")
            .with_example("autoread off")
            .with_description("Mark incoming messages as read"),
    );
    registry.register(
        Command::new("antibadword", Category::Settings, ToggleHandler::new(Toggle::AntiBadWord))
            .with_usage("antibadword <on/off>")
            .with_example("antibadword on")
            .with_description("Warn members who use bad words in groups"),
    );
    registry.register(
        Command::new("welcome", Category::Settings, ToggleHandler::new(Toggle::Welcome))
            .with_usage("welcome <on/off>")
            .with_example("welcome on")
            .with_description("Greet new group members"),
    );
    registry.register(
        Command::new("owner", Category::Settings, OwnerHandler)
            .with_description("Show bot owner"),
    );
    registry.register(
        Command::new("menu", Category::Settings, MenuHandler)
            .with_description("Show all commands"),
    );

    // Download
    registry.register(
        Command::new("tiktok", Category::Download, TiktokHandler)
            .with_usage("tiktok <url>")
            .with_example("tiktok https://tiktok.com/...")
            .with_description("Download TikTok video"),
    );
    registry.register(
        Command::new("play", Category::Download, PlayHandler)
            .with_usage("play <song_name>")
            .with_example("play shape of you")
            .with_description("Search and play music"),
    );

    // AI
    registry.register(
        Command::new("ai", Category::Ai, AiHandler)
            .with_usage("ai <question>")
            .with_example("ai what is AI?")
            .with_description("Chat with AI"),
    );
    registry.register(
        Command::new("gemini", Category::Ai, GeminiHandler)
            .with_usage("gemini <prompt>")
            .with_example("gemini explain quantum physics")
            .with_description("Use Gemini AI"),
    );

    // Group management
    registry.register(
        Command::new("kick", Category::Group, GroupActionHandler::new(ParticipantAction::Remove))
            .with_usage("kick @user")
            .with_example("kick @user")
            .with_description("Kick user from group"),
    );
    registry.register(
        Command::new("promote", Category::Group, GroupActionHandler::new(ParticipantAction::Promote))
            .with_usage("promote @user")
            .with_example("promote @user")
            .with_description("Make user admin"),
    );

    // Fun
    registry.register(
        Command::new("sticker", Category::Fun, StickerHandler)
            .with_usage("sticker (reply to image)")
            .with_description("Create sticker from image"),
    );
    registry.register(
        Command::new("joke", Category::Fun, JokeHandler)
            .with_description("Get a random joke"),
    );

    // Tools
    registry.register(
        Command::new("ping", Category::Tools, PingHandler)
            .with_description("Check bot response time"),
    );
    registry.register(
        Command::new("runtime", Category::Tools, RuntimeHandler)
            .with_description("Show bot uptime"),
    );
    registry.register(
        Command::new("help", Category::Tools, HelpHandler)
            .with_usage("help <command>")
            .with_example("help setprefix")
            .with_description("Show usage for a command"),
    );

    registry
}
