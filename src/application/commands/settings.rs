//! Settings commands - prefix, feature toggles, owner and menu.

use async_trait::async_trait;

use super::{CommandContext, CommandHandler};
use crate::application::errors::CommandError;
use crate::domain::entities::{jid_user, AutoType, Category, Toggle};

pub struct SetPrefixHandler;

#[async_trait]
impl CommandHandler for SetPrefixHandler {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<(), CommandError> {
        if !ctx.require_owner().await? {
            return Ok(());
        }

        let Some(new_prefix) = ctx.args.first() else {
            let p = ctx.prefix();
            return ctx
                .reply(format!("📝 Usage: {p}setprefix <new_prefix>\nExample: {p}setprefix !"))
                .await;
        };

        ctx.settings.set_prefix(new_prefix)?;
        tracing::info!("Prefix changed to {}", new_prefix);
        ctx.reply(format!("✅ Prefix changed to: {}", new_prefix)).await
    }
}

pub struct AutoTypeHandler;

impl AutoTypeHandler {
    fn usage(prefix: &str) -> String {
        format!(
            "📝 Usage: {prefix}autotype <all/pm/group/off>\n\n\
             Options:\n\
             • all - Enable everywhere\n\
             • pm - Only in private chats\n\
             • group - Only in groups\n\
             • off - Disable auto typing"
        )
    }
}

#[async_trait]
impl CommandHandler for AutoTypeHandler {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<(), CommandError> {
        let usage = Self::usage(&ctx.prefix());

        let Some(option) = ctx.first_arg() else {
            let current = ctx.settings.autotype();
            return ctx
                .reply(format!("🔄 Current auto type: {}\n\n{}", current, usage))
                .await;
        };

        let Ok(mode) = option.parse::<AutoType>() else {
            return ctx.reply(usage).await;
        };

        if !ctx.require_owner().await? {
            return Ok(());
        }

        ctx.settings.set_autotype(mode)?;
        ctx.reply(format!("✅ Auto type set to: {}", mode)).await
    }
}

/// On/off switch for one boolean setting
pub struct ToggleHandler {
    toggle: Toggle,
}

impl ToggleHandler {
    pub fn new(toggle: Toggle) -> Self {
        Self { toggle }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

#[async_trait]
impl CommandHandler for ToggleHandler {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<(), CommandError> {
        let key = self.toggle.key();
        let usage = format!("📝 Usage: {}{} <on/off>", ctx.prefix(), key);

        let enabled = match ctx.first_arg().as_deref() {
            None => {
                let current = on_off(ctx.settings.toggle(self.toggle));
                return ctx.reply(format!("🔄 Current {}: {}\n\n{}", key, current, usage)).await;
            }
            Some("on") => true,
            Some("off") => false,
            Some(_) => return ctx.reply(usage).await,
        };

        if !ctx.require_owner().await? {
            return Ok(());
        }

        ctx.settings.set_toggle(self.toggle, enabled)?;
        ctx.reply(format!("✅ {} set to: {}", key, on_off(enabled))).await
    }
}

pub struct OwnerHandler;

#[async_trait]
impl CommandHandler for OwnerHandler {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<(), CommandError> {
        let owner = ctx.settings.owner();
        ctx.reply(format!("👑 Bot Owner: {}\n📞 Contact for support!", jid_user(&owner)))
            .await
    }
}

pub struct MenuHandler;

impl MenuHandler {
    pub fn render(ctx: &CommandContext<'_>) -> String {
        let settings = ctx.settings.snapshot();
        let mut menu = format!(
            "┏▣ ◈ *{}* ◈\n┃ *Owner* : {}\n┃ *Prefix* : [ {} ]\n┃ *Plugins* : {}\n┃ *Mode* : Public\n┗▣ \n\n",
            settings.bot_name,
            jid_user(&settings.owner),
            settings.prefix,
            ctx.registry.len()
        );

        for category in Category::ALL {
            let mut commands = ctx.registry.in_category(category).peekable();
            if commands.peek().is_none() {
                continue;
            }
            menu.push_str(&format!("┏▣ {}\n", category));
            for command in commands {
                menu.push_str(&format!("│➽ {}\n", command.name));
            }
            menu.push_str("┗▣ \n\n");
        }

        menu.push_str(&format!("💡 Type: {}help <command> for more info!", settings.prefix));
        menu
    }
}

#[async_trait]
impl CommandHandler for MenuHandler {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<(), CommandError> {
        let menu = Self::render(ctx);
        ctx.reply(menu).await
    }
}
