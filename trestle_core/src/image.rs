// Copyright 2023 drey7925
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Palette filters that make a sprite draw as a translucent overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterPalette {
    Darken1,
    Darken2,
    Darken3,
    Ghost,
}

/// Colour and transparency settings applied to every sprite of a support column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageTemplate {
    pub primary: Option<u8>,
    pub secondary: Option<u8>,
    pub transparency: Option<FilterPalette>,
}
impl ImageTemplate {
    pub const fn remapped(primary: u8, secondary: u8) -> Self {
        Self {
            primary: Some(primary),
            secondary: Some(secondary),
            transparency: None,
        }
    }
    /// The template used when supports are hidden but still drawn see-through.
    pub const fn darkened() -> Self {
        Self {
            primary: None,
            secondary: None,
            transparency: Some(FilterPalette::Darken1),
        }
    }
    #[inline]
    pub const fn with_index(self, index: u32) -> ImageId {
        ImageId {
            index,
            template: self,
        }
    }
}

/// A sprite index in the external catalog, plus how to colour it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId {
    pub index: u32,
    pub template: ImageTemplate,
}
impl ImageId {
    #[inline]
    pub const fn with_index_offset(self, offset: u32) -> ImageId {
        ImageId {
            index: self.index + offset,
            template: self.template,
        }
    }
}
impl Debug for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("image:{}", self.index))?;
        if let Some(filter) = self.template.transparency {
            f.write_fmt(format_args!("({:?})", filter))?;
        }
        Ok(())
    }
}

/// The first sprite of the extended support sprite range in the default catalog.
pub const DEFAULT_EXTENDED_SUPPORT_BASE: u32 = 29_357;

/// Sprite catalog locations that aren't fixed legacy indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteCatalog {
    /// Start of the extended support sprite range. The upper rows of the truss curve table
    /// index into this range.
    pub extended_support_base: u32,
}
impl Default for SpriteCatalog {
    fn default() -> Self {
        Self {
            extended_support_base: DEFAULT_EXTENDED_SUPPORT_BASE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darkened_template_keeps_index() {
        let image = ImageTemplate::darkened().with_index(3392);
        assert_eq!(image.index, 3392);
        assert_eq!(image.template.transparency, Some(FilterPalette::Darken1));
        assert_eq!(image.with_index_offset(4).index, 3396);
        assert_eq!(image.with_index_offset(4).template, image.template);
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", ImageTemplate::default().with_index(7)), "image:7");
        assert_eq!(
            format!("{:?}", ImageTemplate::darkened().with_index(7)),
            "image:7(Darken1)"
        );
    }
}
