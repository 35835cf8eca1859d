pub mod armory;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use serenity::async_trait;
use std::fmt;

use crate::Result;

pub use armory::ArmoryClient;

/// An in-game guild, not a Discord server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuildRecord {
    pub name: String,
    pub faction: Faction,
    #[serde(deserialize_with = "deserialize_created")]
    pub created: NaiveDate,
    #[serde(alias = "membersCount")]
    pub members_count: u32,
    pub leader: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Faction {
    #[serde(alias = "alliance", alias = "ALLIANCE")]
    Alliance,
    #[serde(alias = "horde", alias = "HORDE")]
    Horde,
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Faction::Alliance => f.write_str("Alliance"),
            Faction::Horde => f.write_str("Horde"),
        }
    }
}

/// Source of guild records. Fails with `BotError::NotFound` when nothing matches.
#[async_trait]
pub trait GuildRepository: Send + Sync {
    async fn get_guild_by_name(&self, name: &str) -> Result<GuildRecord>;
}

/// Accepts either a plain date (`2019-03-02`) or a full RFC 3339 timestamp.
fn deserialize_created<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(&raw).map(|ts| ts.date_naive()))
        .map_err(serde::de::Error::custom)
}
