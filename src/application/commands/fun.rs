use async_trait::async_trait;
use rand::seq::SliceRandom;

use super::{CommandContext, CommandHandler};
use crate::application::errors::CommandError;

const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs.",
    "I told my computer I needed a break, and it said: no problem, I'll go to sleep.",
    "Why did the developer go broke? Because he used up all his cache.",
    "There are 10 kinds of people: those who understand binary and those who don't.",
    "A SQL query walks into a bar, walks up to two tables and asks: can I join you?",
    "Why was the phone wearing glasses? It lost its contacts.",
];

pub struct JokeHandler;

#[async_trait]
impl CommandHandler for JokeHandler {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<(), CommandError> {
        let joke = JOKES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(JOKES[0]);
        ctx.reply(format!("😂 {}", joke)).await
    }
}

pub struct StickerHandler;

#[async_trait]
impl CommandHandler for StickerHandler {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<(), CommandError> {
        if !ctx.message.quoted_image {
            return ctx
                .reply(format!("🖼️ Usage: reply to an image with {}sticker", ctx.prefix()))
                .await;
        }

        ctx.reply("🎨 Sticker maker - Coming soon!").await
    }
}
