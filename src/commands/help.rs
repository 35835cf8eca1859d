use serenity::async_trait;

use crate::{
    client::{message::BRAND_THUMBNAIL, RichMessage},
    commands::{Command, Request},
    BotContext, Result,
};

/// `help`: lists the commands it was built with.
pub struct HelpCmd {
    entries: Vec<(&'static str, String)>,
}

impl HelpCmd {
    /// `entries` are (command name, description lang key) pairs.
    pub fn new(entries: Vec<(&'static str, String)>) -> Self {
        HelpCmd { entries }
    }
}

#[async_trait]
impl Command for HelpCmd {
    fn name(&self) -> &'static str {
        "help"
    }

    async fn execute(&self, ctx: &BotContext, req: Request) -> Result<()> {
        let prefix = ctx.config.get_value("discord.prefix", String::from("!"));
        let message = self.entries.iter().fold(
            RichMessage::new()
                .title(ctx.lang.translate("help.title"))
                .thumbnail(BRAND_THUMBNAIL),
            |message, (name, key)| message.field(format!("{prefix}{name}"), ctx.lang.translate(key)),
        );
        ctx.chat.send_rich_message(req.channel, message, true).await;
        Ok(())
    }
}
