/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{block, inline};
use crate::error::Result;
use crate::template::MiniJinjaTemplates;
use crate::{Filter, Pattern, TagOverride};
use std::collections::{BTreeMap, BTreeSet};

// Without the style value the content is left unwrapped.
const TEMPLATES: [(&str, &str); 3] = [
  (
    "color",
    r#"{% if color %}<span style="color: {{ color|attr }}">{{ content }}</span>{% else %}{{ content }}{% endif %}"#,
  ),
  (
    "size",
    r#"{% if size %}<span style="font-size: {{ size|attr }}px">{{ content }}</span>{% else %}{{ content }}{% endif %}"#,
  ),
  (
    "font",
    r#"{% if font %}<span style="font-family: '{{ font|attr }}', sans-serif">{{ content }}</span>{% else %}{{ content }}{% endif %}"#,
  ),
];

/**
 * Headings, alignment blocks and the `color`, `size` and `font` styling
 * tags. The styling tags require a valid `default` attribute and render
 * through built-in templates.
 */
pub fn text_filter() -> Result<Filter> {
  let mut templates = MiniJinjaTemplates::new();
  for (name, source) in TEMPLATES {
    templates.add_template(name, source)?;
  }

  let mut filter = Filter::new("Text").with_templates(templates);
  for heading in ["h1", "h2", "h3", "h4", "h5", "h6"] {
    filter.register(heading, block(heading));
  }
  for align in ["left", "center", "right", "justify"] {
    filter.register(
      align,
      TagOverride {
        fixed_attributes: Some(BTreeMap::from([(
          "class".to_owned(),
          format!("align-{}", align),
        )])),
        ..block("div")
      },
    );
  }

  let styled = [
    ("color", r"^(?:#[0-9a-fA-F]{3}|#[0-9a-fA-F]{6}|[a-zA-Z]+)$"),
    ("size", r"^[0-9]{1,2}$"),
    ("font", r"^[A-Za-z0-9 ,\-]+$"),
  ];
  for (key, pattern) in styled {
    filter.register(
      key,
      TagOverride {
        template: Some(key.to_owned()),
        validation_pattern: Some(Pattern::new(pattern)?),
        attribute_spec: Some(BTreeSet::from(["default".to_owned()])),
        attribute_rename: Some(BTreeMap::from([("default".to_owned(), key.to_owned())])),
        ..inline("span")
      },
    );
  }
  Ok(filter)
}
