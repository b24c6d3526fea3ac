/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::TagRenderer;
use crate::error::{Error, ErrorKind, Result};
use crate::render::utils;
use crate::template::TemplateAdapter;
use crate::{CONTENT_VARIABLE, DEFAULT_ATTRIBUTE, OutputDialect, TagDefinition, TagNode};
use log::{debug, warn};
use serde_json::{Map, Value};

/**
 * The default renderer producing HTML or XHTML. Tags with a template are
 * handed to `templates`, every other tag is synthesized directly.
 */
#[derive(Clone, Copy)]
pub struct HtmlTagRenderer<'a> {
  pub templates: &'a dyn TemplateAdapter,
}

impl<'a> HtmlTagRenderer<'a> {
  pub fn new(templates: &'a dyn TemplateAdapter) -> Self {
    HtmlTagRenderer { templates }
  }
}

impl TagRenderer for HtmlTagRenderer<'_> {
  fn render_tag(
    &self,
    definition: &TagDefinition,
    node: &TagNode,
    dialect: OutputDialect,
  ) -> Result<String> {
    if !definition.is_defined() {
      return Err(Error::new(
        ErrorKind::UndefinedTag,
        format!("No definition for tag [{}].", node.tag_key),
      ));
    }

    if let Some(pattern) = &definition.validation_pattern {
      let subject = node
        .attribute(DEFAULT_ATTRIBUTE)
        .filter(|v| !v.is_empty())
        .unwrap_or(&node.body_content);
      if !pattern.is_match(subject) {
        debug!(
          "[{}] does not match {}, passing content through",
          definition.key,
          pattern.as_str()
        );
        return Ok(node.body_content.clone());
      }
    }

    let mut content = node.body_content.clone();
    if definition.convert_line_breaks {
      content = utils::convert_line_breaks(&content, dialect);
    }
    if definition.escape_content {
      content = utils::escape_entities(&content);
    }

    match &definition.template {
      Some(template) => self.render_template(definition, template, node, content),
      None => Ok(self.synthesize(definition, node, dialect, content)),
    }
  }
}

impl HtmlTagRenderer<'_> {
  fn render_template(
    &self,
    definition: &TagDefinition,
    template: &str,
    node: &TagNode,
    content: String,
  ) -> Result<String> {
    let mut variables = Map::new();
    for (name, value) in node.attributes.iter() {
      let name = definition.attribute_rename.get(name).unwrap_or(name);
      variables.insert(name.clone(), Value::String(value.clone()));
    }
    variables.insert(CONTENT_VARIABLE.to_owned(), Value::String(content));

    let output = self.templates.render(template, &variables).inspect_err(|e| {
      if e.kind == ErrorKind::TemplateNotFound {
        warn!("template {} for [{}] not found", template, definition.key);
      }
    })?;

    if definition.convert_line_breaks {
      Ok(output.replace(['\n', '\r'], ""))
    } else {
      Ok(output)
    }
  }

  fn synthesize(
    &self,
    definition: &TagDefinition,
    node: &TagNode,
    dialect: OutputDialect,
    content: String,
  ) -> String {
    let mut attributes: Vec<(String, String)> = Vec::new();
    for (name, value) in node.attributes.iter() {
      let name = definition.attribute_rename.get(name).unwrap_or(name);
      if name == DEFAULT_ATTRIBUTE {
        continue;
      }
      let value = if definition.escape_attribute_values {
        utils::escape_entities(value)
      } else {
        value.clone()
      };
      utils::set_attribute(&mut attributes, name, value);
    }

    // Configured attributes override parsed ones of the same name.
    for (name, value) in definition.fixed_attributes.iter() {
      attributes.retain(|(key, _)| key != name);
      attributes.push((name.clone(), value.clone()));
    }

    let tag = definition.output_tag.resolve_for(dialect);
    if tag.is_empty() {
      debug!("[{}] has no output tag, passing content through", definition.key);
      return content;
    }

    let attrs = utils::format_attributes(&attributes);
    if definition.self_closing {
      format!("<{}{}{}", tag, attrs, dialect.self_closing_end())
    } else {
      let inner = node
        .content
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or(&content);
      format!("<{}{}>{}</{}>", tag, attrs, inner, tag)
    }
  }
}
