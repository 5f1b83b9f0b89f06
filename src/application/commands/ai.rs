use async_trait::async_trait;

use super::{CommandContext, CommandHandler};
use crate::application::errors::CommandError;

pub struct AiHandler;

#[async_trait]
impl CommandHandler for AiHandler {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<(), CommandError> {
        if ctx.args.is_empty() {
            let p = ctx.prefix();
            return ctx
                .reply(format!(
                    "🤖 Usage: {p}ai <question>\nExample: {p}ai what is artificial intelligence?"
                ))
                .await;
        }

        ctx.reply(format!(
            "🧠 AI Response for: \"{}\"\n\n🤔 Thinking... This feature requires AI API integration.",
            ctx.full_args
        ))
        .await
    }
}

pub struct GeminiHandler;

#[async_trait]
impl CommandHandler for GeminiHandler {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<(), CommandError> {
        if ctx.args.is_empty() {
            let p = ctx.prefix();
            return ctx
                .reply(format!(
                    "✨ Usage: {p}gemini <prompt>\nExample: {p}gemini explain quantum physics"
                ))
                .await;
        }

        ctx.reply(format!(
            "✨ Gemini prompt: \"{}\"\n\n🤔 Thinking... This feature requires Gemini API integration.",
            ctx.full_args
        ))
        .await
    }
}
