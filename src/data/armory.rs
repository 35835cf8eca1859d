use log::debug;
use reqwest::StatusCode;
use serenity::async_trait;

use crate::{
    data::{GuildRecord, GuildRepository},
    error::BotError,
    Result,
};

/// Guild lookups against the armory HTTP API (`GET {base}/guilds?name=...`).
pub struct ArmoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl ArmoryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ArmoryClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn guilds_url(&self) -> String {
        format!("{}/guilds", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl GuildRepository for ArmoryClient {
    async fn get_guild_by_name(&self, name: &str) -> Result<GuildRecord> {
        debug!("[Armory] guild lookup: '{}'", name);
        let response = self
            .http
            .get(self.guilds_url())
            .query(&[("name", name)])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(BotError::NotFound(format!("guild '{name}'")));
        }

        let guild: GuildRecord = response.error_for_status()?.json().await?;
        debug!("[Armory] received: '{}'", guild.name);
        Ok(guild)
    }
}
