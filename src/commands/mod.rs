pub mod guild;
pub mod help;

use log::{debug, error, info};
use regex::Regex;
use serenity::async_trait;
use serenity::model::id::{ChannelId, UserId};
use std::{collections::BTreeMap, sync::Arc};

use crate::{client::InboundMessage, error::BotError, BotContext, Result};

pub use guild::GuildCmd;
pub use help::HelpCmd;

/// One invocation of a command: where it came from and its whitespace-split arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub channel: Option<ChannelId>,
    pub author: UserId,
    pub args: Vec<String>,
}

#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    /// Lang key of the line shown for this command by `help`.
    fn description_key(&self) -> String {
        format!("help.{}", self.name())
    }

    async fn execute(&self, ctx: &BotContext, req: Request) -> Result<()>;
}

/// Maps command names to commands and routes prefixed chat messages to them.
pub struct CommandRegistry {
    pattern: Regex,
    commands: BTreeMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new(prefix: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(r"(?s)^{}(\S+)(.*)$", regex::escape(prefix)))
            .map_err(|e| BotError::Config(format!("bad command prefix `{prefix}`: {e}")))?;
        Ok(CommandRegistry {
            pattern,
            commands: BTreeMap::new(),
        })
    }

    /// Every built-in command, `help` last so it can list the others.
    pub fn with_defaults(prefix: &str) -> Result<Self> {
        let mut registry = CommandRegistry::new(prefix)?;
        registry.register(GuildCmd);

        let mut entries = registry.entries();
        entries.push(("help", String::from("help.help")));
        registry.register(HelpCmd::new(entries));
        Ok(registry)
    }

    /// Replaces any command already registered under the same name.
    pub fn register(&mut self, command: impl Command + 'static) {
        self.commands
            .insert(command.name().to_string(), Arc::new(command));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    /// (name, description key) of each command, sorted by name.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        self.commands
            .values()
            .map(|cmd| (cmd.name(), cmd.description_key()))
            .collect()
    }

    /// Splits `!guild Iron Wolves` into `("guild", ["Iron", "Wolves"])`.
    pub fn parse(&self, content: &str) -> Option<(String, Vec<String>)> {
        let caps = self.pattern.captures(content.trim())?;
        let name = caps.get(1)?.as_str().to_lowercase();
        let args = caps
            .get(2)
            .map(|rest| rest.as_str().split_whitespace().map(String::from).collect())
            .unwrap_or_default();
        Some((name, args))
    }

    pub async fn dispatch(&self, ctx: &BotContext, message: InboundMessage) {
        if message.author_is_bot {
            return;
        }
        let Some((name, args)) = self.parse(&message.content) else {
            return;
        };
        let Some(command) = self.get(&name) else {
            debug!("unknown command `{}`", name);
            return;
        };

        let req = Request {
            channel: Some(message.channel_id),
            author: message.author_id,
            args,
        };

        info!("Executing command {}...", name);
        match command.execute(ctx, req).await {
            Ok(()) => info!("Executed command {}!", name),
            Err(e) => error!("Error in command `{}`: {:?}", name, e),
        }
    }
}
