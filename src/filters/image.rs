/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::inline;
use crate::error::Result;
use crate::template::MiniJinjaTemplates;
use crate::{ElementKind, Filter, Pattern, TagOverride};
use std::collections::{BTreeMap, BTreeSet};

// The source is whichever value was validated: `[img=url]alt[/img]` or
// `[img]url[/img]`.
const IMAGE_TEMPLATE: &str = concat!(
  r#"<img src="{% if src %}{{ src|attr }}{% else %}{{ content|attr }}{% endif %}""#,
  r#"{% if width %} width="{{ width|attr }}"{% endif %}"#,
  r#"{% if height %} height="{{ height|attr }}"{% endif %}"#,
  r#" alt="{% if src %}{{ content|attr }}{% endif %}">"#,
);

const IMAGE_PATTERN: &str = r#"(?i)^(?:https?|ftp)://[^\s"<>]+\.(?:jpg|jpeg|png|gif|bmp|webp)$"#;

/**
 * `[img width=.. height=..]url[/img]` and `[img=url]alt[/img]` for http(s)
 * and ftp image URLs.
 */
pub fn image_filter() -> Result<Filter> {
  let mut templates = MiniJinjaTemplates::new();
  templates.add_template("image", IMAGE_TEMPLATE)?;

  Ok(Filter::new("Image").with_templates(templates).with_tag(
    "img",
    TagOverride {
      template: Some("image".to_owned()),
      validation_pattern: Some(Pattern::new(IMAGE_PATTERN)?),
      allowed_child_kinds: Some(ElementKind::None),
      attribute_spec: Some(BTreeSet::from([
        "default".to_owned(),
        "width".to_owned(),
        "height".to_owned(),
      ])),
      attribute_rename: Some(BTreeMap::from([("default".to_owned(), "src".to_owned())])),
      convert_line_breaks: Some(false),
      ..inline("img")
    },
  ))
}
