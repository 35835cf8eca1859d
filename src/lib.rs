pub mod client;
pub mod commands;
pub mod config;
pub mod data;
pub mod error;
pub mod lang;

use std::sync::Arc;

use crate::{client::ChatClient, config::Config, data::GuildRepository, lang::Lang};

pub type Error = error::BotError;
pub type Result<T> = std::result::Result<T, Error>;

/// Everything a command needs, handed to it on each call instead of living in globals.
#[derive(Clone)]
pub struct BotContext {
    pub config: Arc<Config>,
    pub data: Arc<dyn GuildRepository>,
    pub chat: Arc<ChatClient>,
    pub lang: Arc<Lang>,
}
