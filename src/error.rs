/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::error::Error as StdError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /** The resolved tag definition has no key. */
  UndefinedTag,
  /** The template adapter could not locate the template. */
  TemplateNotFound,
  /** The template exists but failed to compile or render. */
  TemplateError,
  /** A filter or message configuration could not be loaded. */
  ConfigError,
}

impl std::fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ErrorKind::UndefinedTag => write!(f, "UndefinedTag"),
      ErrorKind::TemplateNotFound => write!(f, "TemplateNotFound"),
      ErrorKind::TemplateError => write!(f, "TemplateError"),
      ErrorKind::ConfigError => write!(f, "ConfigError"),
    }
  }
}

#[derive(Debug)]
pub struct Error {
  pub kind: ErrorKind,
  pub message: Option<String>,
  pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
  pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
    Error {
      kind,
      message: Some(message.into()),
      source: None,
    }
  }

  pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
    self.source = Some(Box::new(source));
    self
  }
}

impl StdError for Error {
  fn source(&self) -> Option<&(dyn StdError + 'static)> {
    self
      .source
      .as_ref()
      .map(|e| e.as_ref() as &(dyn StdError + 'static))
  }
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let message = self.message.as_deref().unwrap_or("None");
    match &self.source {
      None => write!(f, "{}: {}", self.kind, message),
      Some(source) => write!(f, "{}: {}\ncaused by {}", self.kind, message, source),
    }
  }
}

impl From<serde_json::Error> for Error {
  fn from(value: serde_json::Error) -> Self {
    Error::new(ErrorKind::ConfigError, "Failed to parse JSON configuration.").with_source(value)
  }
}

pub type Result<T> = std::result::Result<T, Error>;
