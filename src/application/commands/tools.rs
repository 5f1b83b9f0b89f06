use async_trait::async_trait;
use chrono::Utc;
use std::time::Instant;

use super::{CommandContext, CommandHandler};
use crate::application::errors::CommandError;

pub struct PingHandler;

#[async_trait]
impl CommandHandler for PingHandler {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<(), CommandError> {
        let start = Instant::now();
        ctx.reply("🏓 Pinging...").await?;
        let latency = start.elapsed().as_millis();

        ctx.reply(format!(
            "✅ *PONG!*\n⏱️ Speed: {}ms\n⚡ Status: Super Fast!",
            latency
        ))
        .await
    }
}

pub struct RuntimeHandler;

impl RuntimeHandler {
    /// `Dd Hh Mm` for a number of elapsed seconds
    pub fn format_uptime(seconds: i64) -> String {
        let seconds = seconds.max(0);
        let days = seconds / 86_400;
        let hours = (seconds % 86_400) / 3_600;
        let minutes = (seconds % 3_600) / 60;
        format!("{}d {}h {}m", days, hours, minutes)
    }
}

#[async_trait]
impl CommandHandler for RuntimeHandler {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<(), CommandError> {
        let uptime = Utc::now() - ctx.started_at;
        ctx.reply(format!(
            "⏰ *Runtime*\n📅 {}\n🚀 Since: {}",
            Self::format_uptime(uptime.num_seconds()),
            ctx.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ))
        .await
    }
}

pub struct HelpHandler;

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<(), CommandError> {
        let p = ctx.prefix();

        let Some(name) = ctx.first_arg() else {
            return ctx
                .reply(format!(
                    "📝 Usage: {p}help <command>\nExample: {p}help setprefix\n\nSee {p}menu for all commands."
                ))
                .await;
        };

        let Some(command) = ctx.registry.find(&name) else {
            return ctx
                .reply(format!("❌ Command not found: {}\nSee {}menu for all commands.", name, p))
                .await;
        };

        ctx.reply(format!(
            "📖 *{p}{}*\n{}\n\nUsage: {p}{}\nExample: {p}{}",
            command.name, command.description, command.usage, command.example
        ))
        .await
    }
}
