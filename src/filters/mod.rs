/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

mod default;
mod image;
mod text;
mod url;

pub use default::default_filter;
pub use image::image_filter;
pub use text::text_filter;
pub use url::url_filter;

use crate::{DialectValue, ElementKind, TagOverride};

/**
 * An inline tag that only allows inline children.
 */
fn inline(tag: &str) -> TagOverride {
  TagOverride {
    output_tag: Some(DialectValue::from(tag)),
    element_kind: Some(ElementKind::Inline),
    allowed_child_kinds: Some(ElementKind::Inline),
    ..Default::default()
  }
}

fn block(tag: &str) -> TagOverride {
  TagOverride {
    output_tag: Some(DialectValue::from(tag)),
    element_kind: Some(ElementKind::Block),
    allowed_child_kinds: Some(ElementKind::Both),
    ..Default::default()
  }
}
