/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::inline;
use crate::{DialectValue, ElementKind, Filter, TagOverride};
use std::collections::{BTreeMap, BTreeSet};

/**
 * Basic text styling: `b`, `i`, `u`, `s`, `sup`, `sub`, `abbr`, `br` and `hr`.
 */
pub fn default_filter() -> Filter {
  let self_closing = |tag: DialectValue<String>, kind: ElementKind| TagOverride {
    output_tag: Some(tag),
    element_kind: Some(kind),
    allowed_child_kinds: Some(ElementKind::None),
    self_closing: Some(true),
    ..Default::default()
  };

  Filter::new("Default")
    .with_tag("b", inline("b"))
    .with_tag("i", inline("i"))
    .with_tag("u", inline("u"))
    .with_tag("s", inline("del"))
    .with_tag("sup", inline("sup"))
    .with_tag("sub", inline("sub"))
    .with_tag(
      "abbr",
      TagOverride {
        attribute_spec: Some(BTreeSet::from(["default".to_owned()])),
        attribute_rename: Some(BTreeMap::from([(
          "default".to_owned(),
          "title".to_owned(),
        )])),
        ..inline("abbr")
      },
    )
    .with_tag(
      "br",
      self_closing(
        DialectValue::ByDialect {
          html: "br".to_owned(),
          xhtml: "br".to_owned(),
        },
        ElementKind::None,
      ),
    )
    .with_tag("hr", self_closing("hr".into(), ElementKind::Block))
}
