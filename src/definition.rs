/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::OutputDialect;
use crate::error::{Error, ErrorKind, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/**
 * Classification of a tag for structural validation done by the tree walker.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
  None,
  Inline,
  Block,
  Both,
}

impl ElementKind {
  /**
   * Whether a child of kind `child` may nest inside a tag that allows `self`.
   */
  pub fn accepts(self, child: ElementKind) -> bool {
    match self {
      ElementKind::Both => true,
      ElementKind::None => false,
      allowed => allowed == child,
    }
  }
}

/**
 * A value which is either the same for every output dialect or chosen per
 * dialect.
 */
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DialectValue<T> {
  Scalar(T),
  ByDialect { html: T, xhtml: T },
}

impl<T> DialectValue<T> {
  pub fn resolve_for(&self, dialect: OutputDialect) -> &T {
    match self {
      DialectValue::Scalar(value) => value,
      DialectValue::ByDialect { html, xhtml } => match dialect {
        OutputDialect::Html => html,
        OutputDialect::Xhtml => xhtml,
      },
    }
  }
}

impl From<&str> for DialectValue<String> {
  fn from(value: &str) -> Self {
    DialectValue::Scalar(value.to_owned())
  }
}

/**
 * A compiled validation pattern. Two patterns are equal when their source
 * expressions are equal.
 */
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "String")]
pub struct Pattern(Regex);

impl Pattern {
  pub fn new(expression: &str) -> Result<Self> {
    match Regex::new(expression) {
      Ok(regex) => Ok(Pattern(regex)),
      Err(e) => Err(
        Error::new(
          ErrorKind::ConfigError,
          format!("Invalid validation pattern: {}", expression),
        )
        .with_source(e),
      ),
    }
  }

  pub fn is_match(&self, subject: &str) -> bool {
    self.0.is_match(subject)
  }

  pub fn as_str(&self) -> &str {
    self.0.as_str()
  }
}

impl PartialEq for Pattern {
  fn eq(&self, other: &Self) -> bool {
    self.as_str() == other.as_str()
  }
}

impl TryFrom<String> for Pattern {
  type Error = regex::Error;

  fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
    Regex::new(&value).map(Pattern)
  }
}

/**
 * Partial configuration registered by a filter for one tag key. Every field
 * left as `None` falls back to the default record on resolution.
 *
 * The JSON field names follow the classic Decoda filter configuration.
 */
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TagOverride {
  #[serde(rename = "tag")]
  pub output_tag: Option<DialectValue<String>>,
  pub template: Option<String>,
  #[serde(rename = "pattern")]
  pub validation_pattern: Option<Pattern>,
  #[serde(rename = "type")]
  pub element_kind: Option<ElementKind>,
  #[serde(rename = "allowed")]
  pub allowed_child_kinds: Option<ElementKind>,
  #[serde(rename = "attributes")]
  pub attribute_spec: Option<BTreeSet<String>>,
  #[serde(rename = "map")]
  pub attribute_rename: Option<BTreeMap<String, String>>,
  #[serde(rename = "html")]
  pub fixed_attributes: Option<BTreeMap<String, String>>,
  #[serde(rename = "lineBreaks")]
  pub convert_line_breaks: Option<bool>,
  #[serde(rename = "autoClose")]
  pub self_closing: Option<bool>,
  #[serde(rename = "preserveTags")]
  pub preserve_nested_markup: Option<bool>,
  pub escape_content: Option<bool>,
  #[serde(rename = "escapeAttributes")]
  pub escape_attribute_values: Option<bool>,
  #[serde(rename = "maxChildDepth")]
  pub max_nesting_depth: Option<i32>,
  #[serde(rename = "parent")]
  pub required_parent_keys: Option<Vec<String>>,
  #[serde(rename = "children")]
  pub required_child_keys: Option<Vec<String>>,
}

/**
 * The fully resolved schema of one tag key. Built only through
 * [`TagDefinition::defaults`] and [`TagDefinition::merge`], so every field
 * always carries a value.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct TagDefinition {
  pub key: String,
  pub output_tag: DialectValue<String>,
  pub template: Option<String>,
  pub validation_pattern: Option<Pattern>,
  pub element_kind: ElementKind,
  pub allowed_child_kinds: ElementKind,
  pub attribute_spec: BTreeSet<String>,
  pub attribute_rename: BTreeMap<String, String>,
  pub fixed_attributes: BTreeMap<String, String>,
  pub convert_line_breaks: bool,
  pub self_closing: bool,
  pub preserve_nested_markup: bool,
  pub escape_content: bool,
  pub escape_attribute_values: bool,
  /** -1 disables the limit. */
  pub max_nesting_depth: i32,
  pub required_parent_keys: Vec<String>,
  pub required_child_keys: Vec<String>,
}

impl TagDefinition {
  /**
   * The default record for `key`: a block tag with no output element that
   * converts line breaks and escapes attribute values.
   */
  pub fn defaults(key: &str) -> Self {
    TagDefinition {
      key: key.to_owned(),
      output_tag: DialectValue::Scalar(String::new()),
      template: None,
      validation_pattern: None,
      element_kind: ElementKind::Block,
      allowed_child_kinds: ElementKind::Both,
      attribute_spec: BTreeSet::new(),
      attribute_rename: BTreeMap::new(),
      fixed_attributes: BTreeMap::new(),
      convert_line_breaks: true,
      self_closing: false,
      preserve_nested_markup: false,
      escape_content: false,
      escape_attribute_values: true,
      max_nesting_depth: -1,
      required_parent_keys: Vec::new(),
      required_child_keys: Vec::new(),
    }
  }

  /**
   * Merge `over` on top of `defaults`. Set fields replace the default value
   * as a whole; maps are not merged entry by entry.
   */
  pub fn merge(defaults: TagDefinition, over: &TagOverride) -> Self {
    TagDefinition {
      key: defaults.key,
      output_tag: over.output_tag.clone().unwrap_or(defaults.output_tag),
      template: over
        .template
        .clone()
        .filter(|t| !t.is_empty())
        .or(defaults.template),
      validation_pattern: over
        .validation_pattern
        .clone()
        .or(defaults.validation_pattern),
      element_kind: over.element_kind.unwrap_or(defaults.element_kind),
      allowed_child_kinds: over
        .allowed_child_kinds
        .unwrap_or(defaults.allowed_child_kinds),
      attribute_spec: over
        .attribute_spec
        .clone()
        .unwrap_or(defaults.attribute_spec),
      attribute_rename: over
        .attribute_rename
        .clone()
        .unwrap_or(defaults.attribute_rename),
      fixed_attributes: over
        .fixed_attributes
        .clone()
        .unwrap_or(defaults.fixed_attributes),
      convert_line_breaks: over
        .convert_line_breaks
        .unwrap_or(defaults.convert_line_breaks),
      self_closing: over.self_closing.unwrap_or(defaults.self_closing),
      preserve_nested_markup: over
        .preserve_nested_markup
        .unwrap_or(defaults.preserve_nested_markup),
      escape_content: over.escape_content.unwrap_or(defaults.escape_content),
      escape_attribute_values: over
        .escape_attribute_values
        .unwrap_or(defaults.escape_attribute_values),
      max_nesting_depth: over.max_nesting_depth.unwrap_or(defaults.max_nesting_depth),
      required_parent_keys: over
        .required_parent_keys
        .clone()
        .unwrap_or(defaults.required_parent_keys),
      required_child_keys: over
        .required_child_keys
        .clone()
        .unwrap_or(defaults.required_child_keys),
    }
  }

  /**
   * A definition without a key cannot be rendered.
   */
  pub fn is_defined(&self) -> bool {
    !self.key.is_empty()
  }

  pub fn nesting_limit(&self) -> Option<usize> {
    usize::try_from(self.max_nesting_depth).ok()
  }

  pub fn allows_child(&self, child: ElementKind) -> bool {
    self.allowed_child_kinds.accepts(child)
  }

  /**
   * Whether this tag may sit directly under `parent_key`. An empty parent
   * list means anywhere.
   */
  pub fn allows_parent(&self, parent_key: &str) -> bool {
    self.required_parent_keys.is_empty() || self.required_parent_keys.iter().any(|k| k == parent_key)
  }

  pub fn allows_child_key(&self, child_key: &str) -> bool {
    self.required_child_keys.is_empty() || self.required_child_keys.iter().any(|k| k == child_key)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_merge_keeps_defaults_for_unset_fields() {
    let over = TagOverride {
      output_tag: Some("strong".into()),
      escape_content: Some(true),
      ..Default::default()
    };
    let def = TagDefinition::merge(TagDefinition::defaults("b"), &over);
    assert_eq!(def.key, "b");
    assert_eq!(def.output_tag, DialectValue::Scalar("strong".to_owned()));
    assert!(def.escape_content);
    assert!(def.convert_line_breaks);
    assert!(def.escape_attribute_values);
    assert_eq!(def.max_nesting_depth, -1);
    assert_eq!(def.element_kind, ElementKind::Block);
  }

  #[test]
  fn test_maps_are_replaced_whole() {
    let mut defaults = TagDefinition::defaults("a");
    defaults
      .fixed_attributes
      .insert("class".to_owned(), "x".to_owned());
    let over = TagOverride {
      fixed_attributes: Some(BTreeMap::from([("rel".to_owned(), "nofollow".to_owned())])),
      ..Default::default()
    };
    let def = TagDefinition::merge(defaults, &over);
    assert_eq!(def.fixed_attributes.len(), 1);
    assert_eq!(def.fixed_attributes.get("rel").map(String::as_str), Some("nofollow"));
  }

  #[test]
  fn test_dialect_value_resolution() {
    let scalar: DialectValue<String> = "hr".into();
    assert_eq!(scalar.resolve_for(OutputDialect::Xhtml), "hr");
    let keyed = DialectValue::ByDialect {
      html: "b".to_owned(),
      xhtml: "strong".to_owned(),
    };
    assert_eq!(keyed.resolve_for(OutputDialect::Html), "b");
    assert_eq!(keyed.resolve_for(OutputDialect::Xhtml), "strong");
  }

  #[test]
  fn test_override_from_json() {
    let over: TagOverride = serde_json::from_value(json!({
        "tag": { "html": "br", "xhtml": "br" },
        "type": "inline",
        "allowed": "none",
        "pattern": "^[0-9]+$",
        "map": { "default": "title" },
        "autoClose": true,
        "maxChildDepth": 2,
        "parent": ["list"]
    }))
    .unwrap();
    assert_eq!(over.self_closing, Some(true));
    assert_eq!(over.element_kind, Some(ElementKind::Inline));
    assert_eq!(over.allowed_child_kinds, Some(ElementKind::None));
    assert_eq!(over.validation_pattern.as_ref().map(Pattern::as_str), Some("^[0-9]+$"));

    let def = TagDefinition::merge(TagDefinition::defaults("br"), &over);
    assert_eq!(def.nesting_limit(), Some(2));
    assert!(def.allows_parent("list"));
    assert!(!def.allows_parent("quote"));
    assert!(def.allows_child_key("anything"));
  }

  #[test]
  fn test_override_rejects_unknown_fields_and_bad_patterns() {
    assert!(serde_json::from_value::<TagOverride>(json!({ "colour": "red" })).is_err());
    assert!(serde_json::from_value::<TagOverride>(json!({ "pattern": "([a-z" })).is_err());
    assert!(Pattern::new("([a-z").is_err());
  }

  #[test]
  fn test_element_kind_acceptance() {
    assert!(ElementKind::Both.accepts(ElementKind::Block));
    assert!(ElementKind::Inline.accepts(ElementKind::Inline));
    assert!(!ElementKind::Inline.accepts(ElementKind::Block));
    assert!(!ElementKind::None.accepts(ElementKind::Inline));
    assert_eq!(TagDefinition::defaults("x").nesting_limit(), None);
  }

  #[test]
  fn test_empty_template_is_no_template() {
    let over = TagOverride {
      template: Some(String::new()),
      ..Default::default()
    };
    let def = TagDefinition::merge(TagDefinition::defaults("q"), &over);
    assert_eq!(def.template, None);
  }
}
