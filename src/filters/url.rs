/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::inline;
use crate::error::Result;
use crate::template::MiniJinjaTemplates;
use crate::{Filter, Pattern, TagOverride};
use std::collections::{BTreeMap, BTreeSet};

const URL_TEMPLATE: &str =
  r#"<a href="{% if href %}{{ href|attr }}{% else %}{{ content|attr }}{% endif %}">{{ content }}</a>"#;

const EMAIL_TEMPLATE: &str = r#"<a href="mailto:{% if email %}{{ email|attr }}{% else %}{{ content|attr }}{% endif %}">{{ content }}</a>"#;

const URL_PATTERN: &str = r#"(?i)^(?:http|ftp|irc|file|telnet)s?://[^\s"<>]+$"#;

const EMAIL_PATTERN: &str = r"^[\w.+\-]+@[\w\-]+(?:\.[\w\-]+)+$";

/**
 * Links: `[url]`, `[url=..]`, `[email]` and `[email=..]`. The target comes
 * from the `default` attribute, or the content when there is none.
 */
pub fn url_filter() -> Result<Filter> {
  let mut templates = MiniJinjaTemplates::new();
  templates.add_template("url", URL_TEMPLATE)?;
  templates.add_template("email", EMAIL_TEMPLATE)?;

  let link = |template: &str, pattern: &str, target: &str| -> Result<TagOverride> {
    Ok(TagOverride {
      template: Some(template.to_owned()),
      validation_pattern: Some(Pattern::new(pattern)?),
      attribute_spec: Some(BTreeSet::from(["default".to_owned()])),
      attribute_rename: Some(BTreeMap::from([("default".to_owned(), target.to_owned())])),
      convert_line_breaks: Some(false),
      ..inline("a")
    })
  };

  Ok(
    Filter::new("Url")
      .with_templates(templates)
      .with_tag("url", link("url", URL_PATTERN, "href")?)
      .with_tag("email", link("email", EMAIL_PATTERN, "email")?),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{OutputDialect, TagNode};

  #[test]
  fn test_url_from_content_and_default() {
    let filter = url_filter().unwrap();
    assert_eq!(
      filter
        .render(&TagNode::new("url", "http://example.com"), OutputDialect::Html)
        .unwrap(),
      "<a href=\"http://example.com\">http://example.com</a>"
    );
    let node = TagNode::new("url", "Example").with_attribute("default", "https://example.com/x");
    assert_eq!(
      filter.render(&node, OutputDialect::Html).unwrap(),
      "<a href=\"https://example.com/x\">Example</a>"
    );
  }

  #[test]
  fn test_rejected_urls() {
    let filter = url_filter().unwrap();
    let node = TagNode::new("url", "click").with_attribute("default", "javascript:alert(1)");
    assert_eq!(filter.render(&node, OutputDialect::Html).unwrap(), "click");
  }

  #[test]
  fn test_repeated_target_uses_the_validated_value() {
    let filter = url_filter().unwrap();
    let node = TagNode::new("url", "click")
      .with_attribute("default", "http://ok.example")
      .with_attribute("default", "javascript:alert(1)");
    assert_eq!(filter.render(&node, OutputDialect::Html).unwrap(), "click");

    let node = TagNode::new("url", "click")
      .with_attribute("default", "javascript:alert(1)")
      .with_attribute("default", "http://ok.example");
    assert_eq!(
      filter.render(&node, OutputDialect::Html).unwrap(),
      "<a href=\"http://ok.example\">click</a>"
    );
  }

  #[test]
  fn test_email() {
    let filter = url_filter().unwrap();
    assert_eq!(
      filter
        .render(&TagNode::new("email", "me@example.org"), OutputDialect::Html)
        .unwrap(),
      "<a href=\"mailto:me@example.org\">me@example.org</a>"
    );
    assert_eq!(
      filter
        .render(&TagNode::new("email", "not an address"), OutputDialect::Html)
        .unwrap(),
      "not an address"
    );
  }
}
