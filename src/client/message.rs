use serenity::builder::CreateEmbed;
use serenity::model::Timestamp;

/// Embed accent colour, #ff5722.
pub const BRAND_COLOR: u32 = 0xFF5722;

/// Thumbnail of the bot's own notices.
pub const BRAND_THUMBNAIL: &str = "https://d1u5p3l4wpay3k.cloudfront.net/wowpedia/c/c7/Executus.jpg";

/// Thumbnail applied to any rich message sent without one.
pub const DEFAULT_THUMBNAIL: &str =
    "https://cdn.freebiesupply.com/logos/large/2x/world-of-warcraft-logo-png-transparent.png";

/// A rich message (embed) on its way out. Built by commands, consumed by one send.
#[derive(Debug, Clone, PartialEq)]
pub struct RichMessage {
    pub title: Option<String>,
    pub description: Option<String>,
    pub fields: Vec<(String, String)>,
    pub color: u32,
    pub thumbnail: Option<String>,
    pub timestamp: Option<Timestamp>,
}

impl Default for RichMessage {
    fn default() -> Self {
        RichMessage {
            title: None,
            description: None,
            fields: Vec::new(),
            color: BRAND_COLOR,
            thumbnail: None,
            timestamp: None,
        }
    }
}

impl RichMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The house style for short notices: brand thumbnail and `text` as the description.
    pub fn notice(text: impl Into<String>) -> Self {
        Self::new().thumbnail(BRAND_THUMBNAIL).description(text)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, label: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((label.into(), value.to_string()));
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    /// Fills in the default thumbnail when none is set and stamps the current time.
    pub fn normalize(&mut self) {
        if self.thumbnail.as_deref().map_or(true, str::is_empty) {
            self.thumbnail = Some(DEFAULT_THUMBNAIL.to_string());
        }
        self.timestamp = Some(Timestamp::now());
    }

    pub fn to_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::new().color(self.color);
        if let Some(title) = &self.title {
            embed = embed.title(title);
        }
        if let Some(description) = &self.description {
            embed = embed.description(description);
        }
        for (label, value) in &self.fields {
            embed = embed.field(label, value, false);
        }
        if let Some(url) = &self.thumbnail {
            embed = embed.thumbnail(url);
        }
        if let Some(timestamp) = self.timestamp {
            embed = embed.timestamp(timestamp);
        }
        embed
    }
}
