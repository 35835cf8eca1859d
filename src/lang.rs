use log::{debug, warn};
use serde_json::Value;
use std::{collections::HashMap, fs, path::Path};

use crate::{error::BotError, Result};

const BUILTIN_LOCALE: &str = "en";
const BUILTIN_TABLE: &str = include_str!("../lang/en.json");

/// Localized strings keyed by dotted path (`error.not_found`).
///
/// Locale files are nested JSON objects layered over the built-in English table,
/// so a partial translation still answers every key.
#[derive(Debug, Clone)]
pub struct Lang {
    locale: String,
    table: HashMap<String, String>,
}

impl Lang {
    pub fn builtin() -> Lang {
        let mut table = HashMap::new();
        // en.json is compiled in
        if let Ok(value) = serde_json::from_str::<Value>(BUILTIN_TABLE) {
            flatten("", &value, &mut table);
        }
        Lang {
            locale: BUILTIN_LOCALE.to_string(),
            table,
        }
    }

    /// Loads `<dir>/<locale>.json` on top of the built-in table.
    pub fn load(dir: &Path, locale: &str) -> Result<Lang> {
        let mut lang = Lang::builtin();
        let path = dir.join(format!("{locale}.json"));

        if !path.exists() {
            if locale != BUILTIN_LOCALE {
                warn!("no translation file at {}, falling back to English", path.display());
            }
            return Ok(lang);
        }

        let value: Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        if !value.is_object() {
            return Err(BotError::Config(format!(
                "{} must contain a JSON object",
                path.display()
            )));
        }
        lang.merge(locale, &value);
        debug!("loaded {} strings for locale `{}`", lang.table.len(), locale);
        Ok(lang)
    }

    pub fn from_value(locale: &str, value: &Value) -> Lang {
        let mut lang = Lang::builtin();
        lang.merge(locale, value);
        lang
    }

    fn merge(&mut self, locale: &str, value: &Value) {
        flatten("", value, &mut self.table);
        self.locale = locale.to_string();
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Unknown keys come back unchanged.
    pub fn translate(&self, key: &str) -> String {
        match self.table.get(key) {
            Some(text) => text.clone(),
            None => {
                warn!("missing translation for `{}` ({})", key, self.locale);
                key.to_string()
            }
        }
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
        }
        Value::Null => {}
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}
