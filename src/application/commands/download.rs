//! Download commands. Media fetching is not wired up yet.

use async_trait::async_trait;

use super::{CommandContext, CommandHandler};
use crate::application::errors::CommandError;

pub struct TiktokHandler;

#[async_trait]
impl CommandHandler for TiktokHandler {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<(), CommandError> {
        ctx.reply(format!(
            "📥 TikTok downloader - Coming soon!\nUse: {}play for music download",
            ctx.prefix()
        ))
        .await
    }
}

pub struct PlayHandler;

#[async_trait]
impl CommandHandler for PlayHandler {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<(), CommandError> {
        if ctx.args.is_empty() {
            let p = ctx.prefix();
            return ctx
                .reply(format!("🎵 Usage: {p}play <song_name>\nExample: {p}play shape of you"))
                .await;
        }

        ctx.reply(format!(
            "🔍 Searching: \"{}\"\n⏳ This feature is being implemented...",
            ctx.full_args
        ))
        .await
    }
}
