/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::error::Result;
use crate::{OutputDialect, TagDefinition, TagNode};

/**
 * Turns one node into output markup according to its resolved definition.
 * Nested tags arrive already rendered, so implementations never recurse.
 */
pub trait TagRenderer {
  fn render_tag(
    &self,
    definition: &TagDefinition,
    node: &TagNode,
    dialect: OutputDialect,
  ) -> Result<String>;
}

mod html;
pub use html::HtmlTagRenderer;
