mod common;

use common::channel;
use executus::client::{first_available_guild, resolve_default_channel, ChannelCandidate};
use serenity::model::id::{ChannelId, GuildId};

#[test]
fn test_general_wins_over_position() {
    let channels = vec![channel(1, "ops", 2, true), channel(2, "general", 5, true)];
    assert_eq!(resolve_default_channel(&channels), Some(ChannelId::new(2)));
}

#[test]
fn test_general_wins_even_without_send_permission() {
    let channels = vec![channel(1, "ops", 0, true), channel(2, "general", 5, false)];
    assert_eq!(resolve_default_channel(&channels), Some(ChannelId::new(2)));
}

#[test]
fn test_lowest_position_then_smaller_id() {
    let channels = vec![
        channel(200, "a", 3, true),
        channel(300, "b", 1, false),
        channel(100, "c", 3, true),
    ];
    assert_eq!(resolve_default_channel(&channels), Some(ChannelId::new(100)));
}

#[test]
fn test_ids_compare_as_unsigned_64_bit() {
    // both above 2^53, where a float comparison would see them as equal
    let channels = vec![
        channel(9_007_199_254_740_993, "late", 0, true),
        channel(9_007_199_254_740_992, "early", 0, true),
    ];
    assert_eq!(
        resolve_default_channel(&channels),
        Some(ChannelId::new(9_007_199_254_740_992))
    );

    let channels = vec![channel(u64::MAX, "max", 0, true), channel(u64::MAX - 1, "max-1", 0, true)];
    assert_eq!(resolve_default_channel(&channels), Some(ChannelId::new(u64::MAX - 1)));
}

#[test]
fn test_voice_channels_are_skipped() {
    let voice = ChannelCandidate {
        is_text: false,
        ..channel(1, "lobby", 0, true)
    };
    let channels = vec![voice, channel(2, "chat", 4, true)];
    assert_eq!(resolve_default_channel(&channels), Some(ChannelId::new(2)));
}

#[test]
fn test_nothing_usable() {
    assert_eq!(resolve_default_channel(&[]), None);

    let channels = vec![channel(1, "announcements", 0, false)];
    assert_eq!(resolve_default_channel(&channels), None);
}

#[test]
fn test_unavailable_lowest_guild_is_skipped() {
    let guilds = [GuildId::new(1), GuildId::new(3), GuildId::new(2)];
    let available = |id: GuildId| id != GuildId::new(1);
    assert_eq!(first_available_guild(guilds, available), Some(GuildId::new(2)));
}

#[test]
fn test_first_available_guild_is_smallest_id() {
    let guilds = vec![GuildId::new(u64::MAX), GuildId::new(9_007_199_254_740_993)];
    assert_eq!(
        first_available_guild(guilds, |_| true),
        Some(GuildId::new(9_007_199_254_740_993))
    );
}

#[test]
fn test_no_available_guild() {
    let guilds = [GuildId::new(1), GuildId::new(2)];
    assert_eq!(first_available_guild(guilds, |_| false), None);
    assert_eq!(first_available_guild(Vec::new(), |_| true), None);
}
