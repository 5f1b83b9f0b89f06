//! Group management commands.

use async_trait::async_trait;

use super::{CommandContext, CommandHandler};
use crate::application::errors::CommandError;
use crate::domain::entities::jid_user;
use crate::domain::traits::ParticipantAction;

/// Applies one participant action to every mentioned member
pub struct GroupActionHandler {
    action: ParticipantAction,
}

impl GroupActionHandler {
    pub fn new(action: ParticipantAction) -> Self {
        Self { action }
    }

    fn verb(&self) -> &'static str {
        match self.action {
            ParticipantAction::Add => "Added",
            ParticipantAction::Remove => "Kicked",
            ParticipantAction::Promote => "Promoted",
        }
    }

    fn command(&self) -> &'static str {
        match self.action {
            ParticipantAction::Remove => "kick",
            other => other.as_str(),
        }
    }
}

#[async_trait]
impl CommandHandler for GroupActionHandler {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<(), CommandError> {
        if !ctx.message.is_group() {
            return ctx.reply("❌ This command can only be used in groups!").await;
        }
        if !ctx.require_owner().await? {
            return Ok(());
        }

        let targets = &ctx.message.mentioned_jids;
        if targets.is_empty() {
            return ctx
                .reply(format!("📝 Usage: {}{} @user", ctx.prefix(), self.command()))
                .await;
        }

        ctx.socket
            .update_participants(ctx.message.chat(), targets, self.action)
            .await?;

        let names: Vec<String> = targets.iter().map(|t| format!("@{}", jid_user(t))).collect();
        tracing::info!(
            "{} {} in {}",
            self.action.as_str(),
            names.join(", "),
            ctx.message.chat()
        );
        ctx.reply(format!("✅ {}: {}", self.verb(), names.join(", "))).await
    }
}
