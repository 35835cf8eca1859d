use thiserror::Error;

/// Everything that can go wrong between the gateway, the armory and the bot itself.
#[derive(Error, Debug)]
pub enum BotError {
    /// Discord gateway or REST failure. Boxed, serenity's error is large.
    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),

    /// Armory request failed before a response was read.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("the client is not logged in")]
    NotLoggedIn,

    #[error("no channel available to post in")]
    NoDefaultChannel,

    #[error("{0} not found")]
    NotFound(String),
}

impl From<serenity::Error> for BotError {
    fn from(err: serenity::Error) -> Self {
        BotError::Discord(Box::new(err))
    }
}
