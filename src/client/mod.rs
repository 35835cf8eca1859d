pub mod channel;
pub mod event;
pub mod gateway;
pub mod message;

use log::{debug, error, info};
use serenity::async_trait;
use serenity::model::id::{ChannelId, MessageId, UserId};
use std::{future::Future, sync::Arc, time::Duration};

use crate::{config::Config, error::BotError, Result};

pub use channel::{first_available_guild, resolve_default_channel, ChannelCandidate};
pub use event::{BotEvent, HandlerRegistry, InboundMessage};
pub use gateway::SerenityBackend;
pub use message::RichMessage;

/// Seconds a timed message stays up when `discord.message_timeout` is unset.
pub const DEFAULT_MESSAGE_TIMEOUT_SECS: u64 = 10;

/// A message the backend has delivered, enough to delete it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHandle {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

/// The chat service underneath `ChatClient`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Opens the session and starts feeding events into `handlers`. Resolves once ready.
    async fn login(&self, token: &str, handlers: Arc<HandlerRegistry>) -> Result<UserId>;

    async fn logout(&self);

    fn current_user_id(&self) -> Option<UserId>;

    /// Channels of the first server the session belongs to.
    async fn default_guild_channels(&self) -> Result<Vec<ChannelCandidate>>;

    async fn send_embed(&self, channel: ChannelId, message: &RichMessage) -> Result<MessageHandle>;

    async fn delete_message(&self, message: MessageHandle) -> Result<()>;

    async fn send_private_message(&self, user: UserId, text: &str) -> Result<()>;
}

/// One logged-in chat session and the narrow send surface commands use.
///
/// Sends are fire-and-forget: failures are logged here and never reach the caller,
/// with the exception of [`ChatClient::send_private_message`].
pub struct ChatClient {
    token: String,
    backend: Arc<dyn Backend>,
    handlers: Arc<HandlerRegistry>,
    message_timeout: Duration,
}

impl ChatClient {
    pub fn new(token: impl Into<String>, backend: Arc<dyn Backend>, config: &Config) -> Self {
        // configured in seconds, the timer wants a Duration
        let timeout_secs = config.get_value("discord.message_timeout", DEFAULT_MESSAGE_TIMEOUT_SECS);
        ChatClient {
            token: token.into(),
            backend,
            handlers: Arc::new(HandlerRegistry::new()),
            message_timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Id of the logged-in bot user.
    pub fn client_id(&self) -> Result<UserId> {
        self.backend.current_user_id().ok_or(BotError::NotLoggedIn)
    }

    pub fn message_timeout(&self) -> Duration {
        self.message_timeout
    }

    pub fn register_handler<F, Fut>(&self, event_key: &str, callback: F)
    where
        F: Fn(BotEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        debug!("registering handler for `{}`", event_key);
        self.handlers.register(event_key, callback);
    }

    pub fn registered_handlers(&self) -> Vec<String> {
        self.handlers.registered_keys()
    }

    /// Sends `text` as a branded notice that deletes itself after the message timeout.
    pub async fn send_message(&self, channel: Option<ChannelId>, text: impl Into<String>) {
        self.send_rich_message(channel, RichMessage::notice(text), true)
            .await;
    }

    /// Sends `message` to `channel`, or to the default channel of the first server when
    /// `channel` is `None`. A timed message is deleted after the message timeout.
    pub async fn send_rich_message(
        &self,
        channel: Option<ChannelId>,
        mut message: RichMessage,
        timed: bool,
    ) {
        let channel = match channel {
            Some(channel) => channel,
            None => match self.default_channel().await {
                Ok(channel) => channel,
                Err(e) => {
                    error!("Discord: error getting the default channel: {e}");
                    return;
                }
            },
        };

        message.normalize();

        match self.backend.send_embed(channel, &message).await {
            Ok(sent) => {
                if timed {
                    self.schedule_delete(sent);
                }
            }
            Err(e) => error!("Discord: couldn't send the message! {e}"),
        }
    }

    async fn default_channel(&self) -> Result<ChannelId> {
        let channels = self.backend.default_guild_channels().await?;
        resolve_default_channel(&channels).ok_or(BotError::NoDefaultChannel)
    }

    fn schedule_delete(&self, sent: MessageHandle) {
        let backend = Arc::clone(&self.backend);
        let delay = self.message_timeout;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = backend.delete_message(sent).await {
                error!("Discord: couldn't delete message {}: {e}", sent.message_id);
            }
        });
    }

    /// Plain text to the user's DM channel. Unlike the other sends, errors are returned.
    pub async fn send_private_message(&self, user: UserId, text: &str) -> Result<()> {
        self.backend.send_private_message(user, text).await
    }

    /// Always `Ok(true)` once the session is up; no retry on failure.
    pub async fn login(&self) -> Result<bool> {
        let user_id = self
            .backend
            .login(&self.token, Arc::clone(&self.handlers))
            .await?;
        info!("logged in as {}", user_id);
        Ok(true)
    }

    /// Drops the session at once. In-flight sends are not waited for.
    pub async fn logout(&self) {
        self.backend.logout().await;
        info!("logged out");
    }
}
