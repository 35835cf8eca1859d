#![allow(dead_code)]

use executus::{
    client::{
        Backend, BotEvent, ChannelCandidate, ChatClient, HandlerRegistry, MessageHandle,
        RichMessage,
    },
    config::Config,
    data::{Faction, GuildRecord, GuildRepository},
    error::BotError,
    lang::Lang,
    BotContext, Result,
};
use chrono::NaiveDate;
use serde_json::json;
use serenity::async_trait;
use serenity::model::id::{ChannelId, MessageId, UserId};
use std::{
    collections::HashMap,
    io,
    sync::{
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

pub const BOT_USER: u64 = 4242;

/// Records every call instead of talking to Discord.
#[derive(Default)]
pub struct MockBackend {
    pub sent: Mutex<Vec<(ChannelId, RichMessage)>>,
    pub deleted: Mutex<Vec<MessageHandle>>,
    pub private: Mutex<Vec<(UserId, String)>>,
    /// `None` makes the default-channel lookup fail.
    pub channels: Mutex<Option<Vec<ChannelCandidate>>>,
    pub fail_sends: AtomicBool,
    pub fail_private: AtomicBool,
    pub user: Mutex<Option<UserId>>,
    next_message: AtomicU64,
}

impl MockBackend {
    pub fn with_channels(channels: Vec<ChannelCandidate>) -> Self {
        let backend = MockBackend::default();
        *backend.channels.lock().unwrap() = Some(channels);
        backend
    }

    pub fn sent(&self) -> Vec<(ChannelId, RichMessage)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<MessageHandle> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn login(&self, token: &str, handlers: Arc<HandlerRegistry>) -> Result<UserId> {
        if token.is_empty() {
            return Err(BotError::Config("empty token".to_string()));
        }
        let user_id = UserId::new(BOT_USER);
        *self.user.lock().unwrap() = Some(user_id);
        handlers
            .dispatch(BotEvent::Ready {
                user_id,
                user_name: "Executus".to_string(),
            })
            .await;
        Ok(user_id)
    }

    async fn logout(&self) {
        *self.user.lock().unwrap() = None;
    }

    fn current_user_id(&self) -> Option<UserId> {
        *self.user.lock().unwrap()
    }

    async fn default_guild_channels(&self) -> Result<Vec<ChannelCandidate>> {
        self.channels
            .lock()
            .unwrap()
            .clone()
            .ok_or(BotError::NoDefaultChannel)
    }

    async fn send_embed(&self, channel: ChannelId, message: &RichMessage) -> Result<MessageHandle> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(BotError::Io(io::Error::other("connection reset")));
        }
        self.sent.lock().unwrap().push((channel, message.clone()));
        let id = self.next_message.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(MessageHandle {
            channel_id: channel,
            message_id: MessageId::new(id),
        })
    }

    async fn delete_message(&self, message: MessageHandle) -> Result<()> {
        self.deleted.lock().unwrap().push(message);
        Ok(())
    }

    async fn send_private_message(&self, user: UserId, text: &str) -> Result<()> {
        if self.fail_private.load(Ordering::SeqCst) {
            return Err(BotError::Io(io::Error::other("cannot send messages to this user")));
        }
        self.private.lock().unwrap().push((user, text.to_string()));
        Ok(())
    }
}

/// Answers guild lookups from a fixed table and counts the calls.
#[derive(Default)]
pub struct MockGuilds {
    pub guilds: HashMap<String, GuildRecord>,
    pub broken: bool,
    pub calls: AtomicUsize,
    pub names: Mutex<Vec<String>>,
}

impl MockGuilds {
    pub fn with(guild: GuildRecord) -> Self {
        let mut repo = MockGuilds::default();
        repo.guilds.insert(guild.name.clone(), guild);
        repo
    }

    pub fn broken() -> Self {
        MockGuilds {
            broken: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GuildRepository for MockGuilds {
    async fn get_guild_by_name(&self, name: &str) -> Result<GuildRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.names.lock().unwrap().push(name.to_string());
        if self.broken {
            return Err(BotError::Io(io::Error::other("armory unreachable")));
        }
        self.guilds
            .get(name)
            .cloned()
            .ok_or_else(|| BotError::NotFound(format!("guild '{name}'")))
    }
}

pub fn iron_wolves() -> GuildRecord {
    GuildRecord {
        name: "Iron Wolves".to_string(),
        faction: Faction::Horde,
        created: NaiveDate::from_ymd_opt(2019, 3, 2).unwrap(),
        members_count: 87,
        leader: "Grommash".to_string(),
    }
}

pub fn channel(id: u64, name: &str, position: u16, can_send: bool) -> ChannelCandidate {
    ChannelCandidate {
        id: ChannelId::new(id),
        name: name.to_string(),
        position,
        is_text: true,
        can_send,
    }
}

pub fn config() -> Config {
    Config::from_value(json!({
        "discord": { "prefix": "!", "message_timeout": 10 }
    }))
}

pub fn chat(backend: Arc<MockBackend>) -> Arc<ChatClient> {
    Arc::new(ChatClient::new("token", backend, &config()))
}

pub fn context(backend: Arc<MockBackend>, guilds: Arc<MockGuilds>) -> BotContext {
    BotContext {
        config: Arc::new(config()),
        data: guilds,
        chat: chat(backend),
        lang: Arc::new(Lang::builtin()),
    }
}
