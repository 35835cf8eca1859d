use chrono::{
    format::{Item, StrftimeItems},
    NaiveDate,
};
use log::{error, warn};
use serenity::async_trait;
use std::fmt::Write;

use crate::{
    client::RichMessage,
    commands::{Command, Request},
    data::GuildRecord,
    lang::Lang,
    BotContext, Result,
};

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// `guild <name>`: looks up an in-game guild and posts its card.
pub struct GuildCmd;

#[async_trait]
impl Command for GuildCmd {
    fn name(&self) -> &'static str {
        "guild"
    }

    async fn execute(&self, ctx: &BotContext, req: Request) -> Result<()> {
        if req.args.is_empty() {
            ctx.chat
                .send_message(req.channel, ctx.lang.translate("error.missing_name"))
                .await;
            return Ok(());
        }

        let name = req.args.join(" ");
        match ctx.data.get_guild_by_name(&name).await {
            Ok(guild) => {
                ctx.chat
                    .send_rich_message(req.channel, guild_card(&guild, &ctx.lang), false)
                    .await;
            }
            // lookup failures and misses read the same to the user
            Err(e) => {
                error!("guild lookup for '{}' failed: {}", name, e);
                ctx.chat
                    .send_message(req.channel, ctx.lang.translate("error.not_found"))
                    .await;
            }
        }
        Ok(())
    }
}

pub fn guild_card(guild: &GuildRecord, lang: &Lang) -> RichMessage {
    RichMessage::new()
        .title(&guild.name)
        .field(lang.translate("common.faction"), guild.faction)
        .field(
            lang.translate("common.created"),
            format_date(guild.created, &lang.translate("format.date")),
        )
        .field(lang.translate("common.members"), guild.members_count)
        .field(lang.translate("common.leader"), &guild.leader)
}

/// Formats with the locale's pattern, falling back to ISO dates if the pattern is unusable.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let items: Vec<Item> = StrftimeItems::new(pattern).collect();
    if !items.contains(&Item::Error) {
        let mut out = String::new();
        if write!(out, "{}", date.format_with_items(items.iter())).is_ok() {
            return out;
        }
    }
    warn!("unusable date format `{}`", pattern);
    date.format(FALLBACK_DATE_FORMAT).to_string()
}
