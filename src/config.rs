use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{env, fs, path::Path};

use crate::{error::BotError, Result};

const ENV_PREFIX: &str = "EXECUTUS_";

/// Bot settings: a JSON document addressed with dotted keys (`discord.message_timeout`).
///
/// When loaded from disk, an `EXECUTUS_<KEY>` environment variable takes precedence
/// over the file, e.g. `EXECUTUS_DISCORD_MESSAGE_TIMEOUT=30`.
#[derive(Debug, Clone)]
pub struct Config {
    root: Value,
    env_overrides: bool,
}

impl Config {
    /// Reads `path`. A missing file is not an error, every key then falls back to its default.
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            warn!("config file {} not found, using defaults", path.display());
            return Ok(Config {
                root: Value::Object(Default::default()),
                env_overrides: true,
            });
        }

        let text = fs::read_to_string(path)?;
        let root: Value = serde_json::from_str(&text)?;
        if !root.is_object() {
            return Err(BotError::Config(format!(
                "{} must contain a JSON object",
                path.display()
            )));
        }

        debug!("loaded config from {}", path.display());
        Ok(Config {
            root,
            env_overrides: true,
        })
    }

    /// Builds a config from an in-memory document, ignoring the environment.
    pub fn from_value(root: Value) -> Config {
        Config {
            root,
            env_overrides: false,
        }
    }

    /// Returns the value under `key`, or `default` when it is absent or has the wrong shape.
    pub fn get_value<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        if self.env_overrides {
            if let Ok(raw) = env::var(env_key(key)) {
                if let Some(value) = from_env(&raw) {
                    return value;
                }
                warn!("{} cannot be read as `{}`, ignoring it", env_key(key), key);
            }
        }

        let Some(node) = key
            .split('.')
            .try_fold(&self.root, |node, part| node.get(part))
        else {
            return default;
        };

        match T::deserialize(node) {
            Ok(value) => value,
            Err(e) => {
                warn!("config key `{key}` is invalid ({e}), using the default");
                default
            }
        }
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_value::<Option<String>>(key, None)
    }
}

/// Environment values are tried as JSON first (`30`, `true`) and then as a bare string.
fn from_env<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_str::<T>(raw)
        .ok()
        .or_else(|| serde_json::from_value(Value::String(raw.to_string())).ok())
}

/// `discord.message_timeout` -> `EXECUTUS_DISCORD_MESSAGE_TIMEOUT`
pub fn env_key(key: &str) -> String {
    format!("{ENV_PREFIX}{}", key.replace('.', "_").to_uppercase())
}
