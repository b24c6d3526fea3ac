/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::error::{Error, ErrorKind, Result};
use minijinja::{AutoEscape, Environment, Value};
use serde_json::Map;
use std::path::{Path, PathBuf};

/**
 * Renders a named template against a variable map. The template sees
 * nothing but the variables it is handed.
 */
pub trait TemplateAdapter: Send + Sync {
  /**
   * Render `name` with `variables`. Fails with
   * [`ErrorKind::TemplateNotFound`] when the template cannot be located.
   */
  fn render(&self, name: &str, variables: &Map<String, serde_json::Value>) -> Result<String>;
}

/**
 * An adapter without any template. Every lookup fails.
 */
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTemplates;

impl TemplateAdapter for NoTemplates {
  fn render(&self, name: &str, _variables: &Map<String, serde_json::Value>) -> Result<String> {
    Err(template_not_found(name))
  }
}

/**
 * MiniJinja-backed templates, either registered in memory or read from a
 * directory where template `name` lives in `<dir>/<name>.html`.
 *
 * Auto-escaping is disabled: the variables already carry processed markup.
 * Values placed inside a quoted attribute go through the `attr` filter,
 * which escapes `&`, `<`, `>` and both quotes.
 */
pub struct MiniJinjaTemplates {
  env: Environment<'static>,
}

impl MiniJinjaTemplates {
  pub fn new() -> Self {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_filter("attr", |value: String| -> String {
      html_escape::encode_quoted_attribute(&value).into_owned()
    });
    MiniJinjaTemplates { env }
  }

  /**
   * Templates loaded lazily from `dir`.
   */
  pub fn from_dir(dir: impl AsRef<Path>) -> Self {
    let mut templates = Self::new();
    let dir: PathBuf = dir.as_ref().to_path_buf();
    templates.env.set_loader(move |name| {
      let path = dir.join(format!("{}.html", name));
      match std::fs::read_to_string(&path) {
        Ok(source) => Ok(Some(source)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(
          minijinja::Error::new(
            minijinja::ErrorKind::InvalidOperation,
            format!("could not read template {}", path.display()),
          )
          .with_source(e),
        ),
      }
    });
    templates
  }

  /**
   * Register an in-memory template under `name`.
   */
  pub fn add_template(&mut self, name: &str, source: &str) -> Result<()> {
    self
      .env
      .add_template_owned(name.to_owned(), source.to_owned())
      .map_err(|e| {
        Error::new(
          ErrorKind::TemplateError,
          format!("Failed to compile template {}", name),
        )
        .with_source(e)
      })
  }

  pub fn has_template(&self, name: &str) -> bool {
    self.env.get_template(name).is_ok()
  }
}

impl Default for MiniJinjaTemplates {
  fn default() -> Self {
    Self::new()
  }
}

impl TemplateAdapter for MiniJinjaTemplates {
  fn render(&self, name: &str, variables: &Map<String, serde_json::Value>) -> Result<String> {
    let template = match self.env.get_template(name) {
      Ok(t) => t,
      Err(e) if e.kind() == minijinja::ErrorKind::TemplateNotFound => {
        return Err(template_not_found(name).with_source(e));
      }
      Err(e) => {
        return Err(
          Error::new(
            ErrorKind::TemplateError,
            format!("Failed to load template {}", name),
          )
          .with_source(e),
        );
      }
    };
    template.render(Value::from_serialize(variables)).map_err(|e| {
      Error::new(
        ErrorKind::TemplateError,
        format!("Failed to render template {}", name),
      )
      .with_source(e)
    })
  }
}

fn template_not_found(name: &str) -> Error {
  Error::new(
    ErrorKind::TemplateNotFound,
    format!("Template file {} does not exist.", name),
  )
}
