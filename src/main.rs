use clap::{crate_description, Parser};

use env_logger::Builder;

use log::{info, warn, LevelFilter};

use std::{env, path::PathBuf, sync::Arc};

use executus::{
    client::{BotEvent, ChatClient, SerenityBackend},
    commands::CommandRegistry,
    config::Config,
    data::{ArmoryClient, GuildRepository},
    error::BotError,
    lang::Lang,
    BotContext, Error,
};

#[derive(Parser, Debug)]
#[command(about=crate_description!())]
#[command(version, long_about = None)]
struct CLArgs {
    #[arg(short, long, default_value = "none")]
    loglevel: String,

    /// JSON settings file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Directory holding the <locale>.json translation files
    #[arg(long, default_value = "lang")]
    lang_dir: PathBuf,
}

fn init_logging(loglevel: &str) {
    let level = match loglevel.to_lowercase().as_str() {
        "trace" => Some(LevelFilter::Trace),
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        _ => None,
    };

    match level {
        Some(level) => Builder::new().filter_module("executus", level).init(),
        None if loglevel == "none" => env_logger::init_from_env(env_logger::Env::new()),
        None => {}
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let clargs = CLArgs::parse();
    let _ = dotenvy::dotenv();
    init_logging(&clargs.loglevel);

    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("a rustls crypto provider was already installed");
    }

    info!("Starting...");

    let config = Arc::new(Config::load(&clargs.config)?);

    let token = match env::var("DISCORD_TOKEN") {
        Ok(token) => token,
        Err(_) => config.get_string("discord.token").ok_or_else(|| {
            BotError::Config("'DISCORD_TOKEN' environment variable not set".to_string())
        })?,
    };

    let armory_url = config
        .get_string("data.armory_url")
        .ok_or_else(|| BotError::Config("`data.armory_url` is not configured".to_string()))?;
    let data: Arc<dyn GuildRepository> = Arc::new(ArmoryClient::new(armory_url));

    let locale = config.get_value("lang.locale", String::from("en"));
    let lang = Arc::new(Lang::load(&clargs.lang_dir, &locale)?);

    let prefix = config.get_value("discord.prefix", String::from("!"));
    let commands = Arc::new(CommandRegistry::with_defaults(&prefix)?);

    let chat = Arc::new(ChatClient::new(
        token,
        Arc::new(SerenityBackend::new()),
        &config,
    ));

    let ctx = BotContext {
        config,
        data,
        chat: Arc::clone(&chat),
        lang,
    };

    chat.register_handler("ready", |event| async move {
        if let BotEvent::Ready { user_name, .. } = event {
            info!("{} is connected", user_name);
        }
    });
    chat.register_handler("message", move |event| {
        let ctx = ctx.clone();
        let commands = Arc::clone(&commands);
        async move {
            if let BotEvent::Message(message) = event {
                commands.dispatch(&ctx, message).await;
            }
        }
    });

    chat.login().await?;
    info!("listening for commands with prefix `{}`", prefix);

    let _signal_err = tokio::signal::ctrl_c().await;
    info!("Received Ctrl-C, shutting down.");
    chat.logout().await;

    Ok(())
}
