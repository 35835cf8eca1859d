use serenity::model::id::{ChannelId, GuildId};

/// Channel picked first when a server has one with this exact name.
pub const DEFAULT_CHANNEL_NAME: &str = "general";

/// What the default-channel lookup needs to know about one channel of a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCandidate {
    pub id: ChannelId,
    pub name: String,
    pub position: u16,
    pub is_text: bool,
    /// Whether the bot's own user may post here.
    pub can_send: bool,
}

/// Picks the channel used when a send names none.
///
/// A channel called `general` wins outright. Otherwise the text channel the bot can
/// write to with the lowest position is chosen, ties going to the smaller id.
/// Ids are compared as `u64`.
pub fn resolve_default_channel(channels: &[ChannelCandidate]) -> Option<ChannelId> {
    let by_order = |c: &&ChannelCandidate| (c.position, c.id.get());

    if let Some(general) = channels
        .iter()
        .filter(|c| c.name == DEFAULT_CHANNEL_NAME)
        .min_by_key(by_order)
    {
        return Some(general.id);
    }

    channels
        .iter()
        .filter(|c| c.is_text && c.can_send)
        .min_by_key(by_order)
        .map(|c| c.id)
}

/// The server default-channel lookups use: the smallest id among those `is_available`
/// accepts. Servers the gateway still reports as unavailable are skipped.
pub fn first_available_guild<F>(
    guilds: impl IntoIterator<Item = GuildId>,
    is_available: F,
) -> Option<GuildId>
where
    F: Fn(GuildId) -> bool,
{
    guilds.into_iter().filter(|id| is_available(*id)).min()
}
