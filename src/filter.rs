/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::error::Result;
use crate::message::{MessageCatalog, MessageLookup};
use crate::render::{HtmlTagRenderer, TagRenderer};
use crate::template::{NoTemplates, TemplateAdapter};
use crate::{OutputDialect, TagDefinition, TagNode, TagOverride};
use log::trace;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

/**
 * The tag schema registry: owns the overrides for the tag keys it supports
 * and renders nodes of those tags.
 */
pub struct Filter {
  name: String,
  tags: HashMap<String, TagOverride>,
  resolved: RwLock<HashMap<String, TagDefinition>>,
  templates: Arc<dyn TemplateAdapter>,
  messages: Arc<dyn MessageLookup>,
}

impl Filter {
  /**
   * An empty filter without templates or messages.
   */
  pub fn new(name: &str) -> Self {
    Filter {
      name: name.to_owned(),
      tags: HashMap::new(),
      resolved: RwLock::new(HashMap::new()),
      templates: Arc::new(NoTemplates),
      messages: Arc::new(MessageCatalog::default()),
    }
  }

  /**
   * Build a filter from a JSON object mapping tag keys to overrides.
   */
  pub fn from_json_str(name: &str, json: &str) -> Result<Self> {
    let tags: HashMap<String, TagOverride> = serde_json::from_str(json)?;
    let mut filter = Self::new(name);
    for (key, over) in tags {
      filter.register(&key, over);
    }
    Ok(filter)
  }

  pub fn with_tag(mut self, key: &str, over: TagOverride) -> Self {
    self.register(key, over);
    self
  }

  pub fn with_templates(mut self, templates: impl TemplateAdapter + 'static) -> Self {
    self.templates = Arc::new(templates);
    self
  }

  pub fn with_shared_templates(mut self, templates: Arc<dyn TemplateAdapter>) -> Self {
    self.templates = templates;
    self
  }

  pub fn with_messages(mut self, messages: impl MessageLookup + 'static) -> Self {
    self.messages = Arc::new(messages);
    self
  }

  /**
   * Register or replace the override for `key`.
   */
  pub fn register(&mut self, key: &str, over: TagOverride) {
    self
      .resolved
      .get_mut()
      .unwrap_or_else(PoisonError::into_inner)
      .remove(key);
    self.tags.insert(key.to_owned(), over);
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /**
   * The raw overrides registered on this filter.
   */
  pub fn tags(&self) -> &HashMap<String, TagOverride> {
    &self.tags
  }

  pub fn supports(&self, key: &str) -> bool {
    self.tags.contains_key(key)
  }

  /**
   * Resolve the full definition of `key`. Registered keys are merged over the
   * defaults once and memoized; unknown keys get the defaults.
   */
  pub fn resolve(&self, key: &str) -> TagDefinition {
    let Some(over) = self.tags.get(key) else {
      trace!("{}: [{}] is not registered, using defaults", self.name, key);
      return TagDefinition::defaults(key);
    };

    if let Some(def) = self
      .resolved
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .get(key)
    {
      return def.clone();
    }

    trace!("{}: resolving [{}]", self.name, key);
    let def = TagDefinition::merge(TagDefinition::defaults(key), over);
    self
      .resolved
      .write()
      .unwrap_or_else(PoisonError::into_inner)
      .entry(key.to_owned())
      .or_insert(def)
      .clone()
  }

  /**
   * Every registered tag key with its resolved definition.
   */
  pub fn list_definitions(&self) -> BTreeMap<String, TagDefinition> {
    self
      .tags
      .keys()
      .map(|key| (key.clone(), self.resolve(key)))
      .collect()
  }

  pub fn message(&self, key: &str, vars: &[(&str, &str)]) -> String {
    self.messages.message(key, vars)
  }

  /**
   * Render `node` into HTML or XHTML using this filter's templates.
   */
  pub fn render(&self, node: &TagNode, dialect: OutputDialect) -> Result<String> {
    let renderer = HtmlTagRenderer::new(self.templates.as_ref());
    self.render_with(&renderer, node, dialect)
  }

  pub fn render_with<R: TagRenderer>(
    &self,
    renderer: &R,
    node: &TagNode,
    dialect: OutputDialect,
  ) -> Result<String> {
    let definition = self.resolve(&node.tag_key);
    renderer.render_tag(&definition, node, dialect)
  }
}

impl std::fmt::Debug for Filter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Filter")
      .field("name", &self.name)
      .field("tags", &self.tags)
      .finish_non_exhaustive()
  }
}
