/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

pub mod definition;
pub mod error;
pub mod filter;
pub mod filters;
pub mod message;
pub mod render;
pub mod template;

pub use definition::{DialectValue, ElementKind, Pattern, TagDefinition, TagOverride};
pub use filter::Filter;
pub use render::{HtmlTagRenderer, TagRenderer};
use serde::Deserialize;

/**
 * Reserved attribute carrying the positional value of a tag, as in
 * `[url=http://example.com]`. It is the validation subject when present and
 * is never emitted as an output attribute.
 */
pub const DEFAULT_ATTRIBUTE: &str = "default";

/**
 * Name of the template variable bound to the processed content.
 */
pub const CONTENT_VARIABLE: &str = "content";

/**
 * The markup dialect produced by a render pass.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputDialect {
  #[default]
  Html,
  Xhtml,
}

impl OutputDialect {
  pub fn from_xhtml(xhtml: bool) -> Self {
    if xhtml {
      OutputDialect::Xhtml
    } else {
      OutputDialect::Html
    }
  }

  pub fn is_xhtml(self) -> bool {
    self == OutputDialect::Xhtml
  }

  /** The line break element inserted before newlines. */
  pub fn line_break(self) -> &'static str {
    match self {
      OutputDialect::Html => "<br>",
      OutputDialect::Xhtml => "<br/>",
    }
  }

  /** How a self-closing element ends. */
  pub fn self_closing_end(self) -> &'static str {
    match self {
      OutputDialect::Html => ">",
      OutputDialect::Xhtml => "/>",
    }
  }
}

/**
 * One parsed tag handed over by the tree walker, with its nested tags
 * already rendered into `body_content`.
 */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagNode {
  pub tag_key: String,
  /** Attribute values as parsed, already unescaped from the source markup. */
  pub attributes: Vec<(String, String)>,
  pub body_content: String,
  /** Pre-rendered content which replaces the body of a paired tag. */
  pub content: Option<String>,
}

impl TagNode {
  pub fn new(tag_key: &str, body_content: &str) -> Self {
    TagNode {
      tag_key: tag_key.to_owned(),
      attributes: Vec::new(),
      body_content: body_content.to_owned(),
      content: None,
    }
  }

  pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
    self.attributes.push((name.to_owned(), value.to_owned()));
    self
  }

  pub fn with_content(mut self, content: &str) -> Self {
    self.content = Some(content.to_owned());
    self
  }

  /**
   * The value of the attribute called `name`. A repeated attribute takes
   * its last value, as it does in the rendered output.
   */
  pub fn attribute(&self, name: &str) -> Option<&str> {
    self
      .attributes
      .iter()
      .rev()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value.as_str())
  }
}
