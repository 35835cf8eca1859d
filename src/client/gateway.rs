use log::{debug, error};
use serenity::all::{
    Cache, ChannelId, ChannelType, Client, Context, CreateMessage, EventHandler, GatewayIntents,
    Guild, Http, Message, Permissions, Ready, ShardManager, UserId,
};
use serenity::async_trait;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::oneshot;

use crate::{
    client::{
        first_available_guild, Backend, BotEvent, ChannelCandidate, HandlerRegistry,
        InboundMessage, MessageHandle, RichMessage,
    },
    error::BotError,
    Result,
};

type ReadySignal = Arc<Mutex<Option<oneshot::Sender<Result<UserId>>>>>;
type UserSlot = Arc<RwLock<Option<UserId>>>;

/// Resolves a pending `login` exactly once; later calls are no-ops.
fn signal(ready: &ReadySignal, outcome: Result<UserId>) {
    let sender = ready.lock().unwrap_or_else(PoisonError::into_inner).take();
    if let Some(tx) = sender {
        let _ = tx.send(outcome);
    }
}

/// Records the bot's user id, then releases `login`. Handlers run after both.
fn mark_ready(user: &UserSlot, ready: &ReadySignal, user_id: UserId) {
    *user.write().unwrap_or_else(PoisonError::into_inner) = Some(user_id);
    signal(ready, Ok(user_id));
}

/// Forwards serenity events into the handler registry.
struct Gateway {
    handlers: Arc<HandlerRegistry>,
    ready: ReadySignal,
    user: UserSlot,
}

#[async_trait]
impl EventHandler for Gateway {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        debug!("gateway ready as {}", ready.user.name);
        mark_ready(&self.user, &self.ready, ready.user.id);
        self.handlers
            .dispatch(BotEvent::Ready {
                user_id: ready.user.id,
                user_name: ready.user.name.clone(),
            })
            .await;
    }

    async fn message(&self, _ctx: Context, msg: Message) {
        self.handlers
            .dispatch(BotEvent::Message(InboundMessage::from(&msg)))
            .await;
    }

    async fn guild_create(&self, _ctx: Context, guild: Guild, _is_new: Option<bool>) {
        self.handlers
            .dispatch(BotEvent::GuildCreate {
                guild_id: guild.id,
                name: guild.name.clone(),
            })
            .await;
    }
}

struct Session {
    http: Arc<Http>,
    cache: Arc<Cache>,
    shard_manager: Arc<ShardManager>,
}

/// `Backend` on top of a serenity client.
///
/// The session is stored before the gateway starts and the user id as soon as Ready
/// arrives, so handlers fired by the first events can already send.
pub struct SerenityBackend {
    intents: GatewayIntents,
    session: RwLock<Option<Session>>,
    user: UserSlot,
}

impl Default for SerenityBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SerenityBackend {
    pub fn new() -> Self {
        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;
        SerenityBackend {
            intents,
            session: RwLock::new(None),
            user: Arc::new(RwLock::new(None)),
        }
    }

    fn http(&self) -> Result<Arc<Http>> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| Arc::clone(&s.http))
            .ok_or(BotError::NotLoggedIn)
    }

    fn session_parts(&self) -> Result<(Arc<Http>, Arc<Cache>, UserId)> {
        let user_id = self.current_user_id().ok_or(BotError::NotLoggedIn)?;
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| (Arc::clone(&s.http), Arc::clone(&s.cache), user_id))
            .ok_or(BotError::NotLoggedIn)
    }

    fn clear(&self) -> Option<Session> {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

#[async_trait]
impl Backend for SerenityBackend {
    async fn login(&self, token: &str, handlers: Arc<HandlerRegistry>) -> Result<UserId> {
        let (tx, rx) = oneshot::channel();
        let ready: ReadySignal = Arc::new(Mutex::new(Some(tx)));

        let gateway = Gateway {
            handlers,
            ready: Arc::clone(&ready),
            user: Arc::clone(&self.user),
        };
        let mut client = Client::builder(token, self.intents)
            .event_handler(gateway)
            .await?;

        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(Session {
            http: Arc::clone(&client.http),
            cache: Arc::clone(&client.cache),
            shard_manager: Arc::clone(&client.shard_manager),
        });

        tokio::spawn(async move {
            if let Err(why) = client.start().await {
                error!("client ended: {:?}", why);
                signal(&ready, Err(why.into()));
            }
        });

        // the sender is dropped without a value if the client stops before Ready
        let outcome = rx.await.map_err(|_| BotError::NotLoggedIn).and_then(|r| r);
        if outcome.is_err() {
            self.clear();
        }
        outcome
    }

    async fn logout(&self) {
        if let Some(session) = self.clear() {
            session.shard_manager.shutdown_all().await;
        }
    }

    fn current_user_id(&self) -> Option<UserId> {
        *self.user.read().unwrap_or_else(PoisonError::into_inner)
    }

    async fn default_guild_channels(&self) -> Result<Vec<ChannelCandidate>> {
        let (http, cache, user_id) = self.session_parts()?;

        // the oldest server still in the cache stands in for "the first one"
        let guild_id = first_available_guild(cache.guilds(), |id| cache.guild(id).is_some())
            .ok_or(BotError::NoDefaultChannel)?;

        let cached_member = cache
            .guild(guild_id)
            .and_then(|guild| guild.members.get(&user_id).cloned());
        let member = match cached_member {
            Some(member) => member,
            None => http.get_member(guild_id, user_id).await?,
        };

        let guild = cache.guild(guild_id).ok_or(BotError::NoDefaultChannel)?;
        let channels = guild
            .channels
            .values()
            .map(|channel| ChannelCandidate {
                id: channel.id,
                name: channel.name.clone(),
                position: channel.position,
                is_text: channel.kind == ChannelType::Text,
                can_send: guild
                    .user_permissions_in(channel, &member)
                    .contains(Permissions::SEND_MESSAGES),
            })
            .collect();
        Ok(channels)
    }

    async fn send_embed(&self, channel: ChannelId, message: &RichMessage) -> Result<MessageHandle> {
        let http = self.http()?;
        let sent = channel
            .send_message(&http, CreateMessage::new().embed(message.to_embed()))
            .await?;
        Ok(MessageHandle {
            channel_id: sent.channel_id,
            message_id: sent.id,
        })
    }

    async fn delete_message(&self, message: MessageHandle) -> Result<()> {
        let http = self.http()?;
        message
            .channel_id
            .delete_message(&http, message.message_id)
            .await?;
        Ok(())
    }

    async fn send_private_message(&self, user: UserId, text: &str) -> Result<()> {
        let http = self.http()?;
        let dm = user.create_dm_channel(&http).await?;
        dm.say(&http, text).await?;
        Ok(())
    }
}
