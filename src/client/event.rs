use serenity::model::channel::Message;
use serenity::model::id::{ChannelId, GuildId, UserId};
use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, PoisonError, RwLock},
};

pub type HandlerFuture = Pin<Box<dyn Future<Output = ()> + Send>>;
pub type Callback = Arc<dyn Fn(BotEvent) -> HandlerFuture + Send + Sync>;

/// The parts of an incoming chat message the bot acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub channel_id: ChannelId,
    pub guild_id: Option<GuildId>,
    pub author_id: UserId,
    pub author_is_bot: bool,
    pub content: String,
}

impl From<&Message> for InboundMessage {
    fn from(msg: &Message) -> Self {
        InboundMessage {
            channel_id: msg.channel_id,
            guild_id: msg.guild_id,
            author_id: msg.author.id,
            author_is_bot: msg.author.bot,
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotEvent {
    Ready { user_id: UserId, user_name: String },
    Message(InboundMessage),
    GuildCreate { guild_id: GuildId, name: String },
}

impl BotEvent {
    pub fn key(&self) -> &'static str {
        match self {
            BotEvent::Ready { .. } => "ready",
            BotEvent::Message(_) => "message",
            BotEvent::GuildCreate { .. } => "guild_create",
        }
    }
}

/// Event key -> callbacks. Registrations are never removed and duplicates all fire.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: RwLock<Vec<(String, Callback)>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F, Fut>(&self, key: &str, callback: F)
    where
        F: Fn(BotEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let callback: Callback = Arc::new(move |event| Box::pin(callback(event)) as HandlerFuture);
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((key.to_string(), callback));
    }

    /// Keys in registration order, duplicates included.
    pub fn registered_keys(&self) -> Vec<String> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Runs every callback registered for the event's key, one after another.
    pub async fn dispatch(&self, event: BotEvent) {
        let callbacks: Vec<Callback> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(key, _)| key == event.key())
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in callbacks {
            callback(event.clone()).await;
        }
    }
}
