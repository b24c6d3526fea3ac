/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::error::Result;
use log::debug;
use std::collections::HashMap;

pub const DEFAULT_LOCALE: &str = "en-us";

/**
 * Localized message lookup used by filters for user facing text.
 */
pub trait MessageLookup: Send + Sync {
  /**
   * Return the message for `key` with every `{name}` placeholder replaced
   * from `vars`. Unknown keys yield an empty string.
   */
  fn message(&self, key: &str, vars: &[(&str, &str)]) -> String;
}

/**
 * Messages grouped by locale, looked up in the active locale first and then
 * in [`DEFAULT_LOCALE`].
 */
#[derive(Debug, Clone)]
pub struct MessageCatalog {
  locale: String,
  messages: HashMap<String, HashMap<String, String>>,
}

impl MessageCatalog {
  pub fn new(locale: &str) -> Self {
    MessageCatalog {
      locale: locale.to_owned(),
      messages: HashMap::new(),
    }
  }

  /**
   * Load messages from a JSON object of the form
   * `{ "en-us": { "key": "text" } }`.
   */
  pub fn from_json_str(locale: &str, json: &str) -> Result<Self> {
    let messages: HashMap<String, HashMap<String, String>> = serde_json::from_str(json)?;
    Ok(MessageCatalog {
      locale: locale.to_owned(),
      messages,
    })
  }

  pub fn insert(&mut self, locale: &str, key: &str, text: &str) {
    self
      .messages
      .entry(locale.to_owned())
      .or_default()
      .insert(key.to_owned(), text.to_owned());
  }

  pub fn locale(&self) -> &str {
    &self.locale
  }

  pub fn set_locale(&mut self, locale: &str) {
    self.locale = locale.to_owned();
  }

  fn lookup(&self, key: &str) -> Option<&String> {
    [self.locale.as_str(), DEFAULT_LOCALE]
      .iter()
      .find_map(|locale| self.messages.get(*locale).and_then(|m| m.get(key)))
  }
}

impl Default for MessageCatalog {
  fn default() -> Self {
    Self::new(DEFAULT_LOCALE)
  }
}

impl MessageLookup for MessageCatalog {
  fn message(&self, key: &str, vars: &[(&str, &str)]) -> String {
    let Some(text) = self.lookup(key) else {
      debug!("no message for key {} in locale {}", key, self.locale);
      return String::new();
    };
    vars.iter().fold(text.clone(), |acc, (name, value)| {
      acc.replace(&format!("{{{}}}", name), value)
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_message_substitution() {
    let mut catalog = MessageCatalog::default();
    catalog.insert("en-us", "quoteBy", "Quote by {author}");
    assert_eq!(
      catalog.message("quoteBy", &[("author", "Miles")]),
      "Quote by Miles"
    );
  }

  #[test]
  fn test_locale_fallback_and_missing_key() {
    let catalog = MessageCatalog::from_json_str(
      "de-de",
      r#"{
        "en-us": { "spoiler": "Spoiler", "hide": "Hide" },
        "de-de": { "spoiler": "Spoiler anzeigen" }
      }"#,
    )
    .unwrap();
    assert_eq!(catalog.message("spoiler", &[]), "Spoiler anzeigen");
    assert_eq!(catalog.message("hide", &[]), "Hide");
    assert_eq!(catalog.message("unknown", &[]), "");
  }

  #[test]
  fn test_invalid_json() {
    assert!(MessageCatalog::from_json_str("en-us", "[1, 2]").is_err());
  }
}
