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

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::WOODEN_TRANSITION_ROWS;
use crate::image::SpriteCatalog;
use crate::support_types::SupportError;

pub const CONFIG_FILENAME: &str = "supports.ron";

/// One past the highest sprite the fixed support tables can address (the last shaped mine
/// support base, plus the largest slope offset, plus the upper diagonal piece).
pub const LEGACY_SUPPORT_SPRITE_END: u32 = 3839 + 17 + 4 + 1;

/// Settings for support drawing that depend on the sprite catalog in use.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportsConfig {
    pub catalog: SpriteCatalog,
}
impl SupportsConfig {
    pub fn validate(&self) -> Result<(), SupportError> {
        let base = self.catalog.extended_support_base;
        if base < LEGACY_SUPPORT_SPRITE_END {
            return Err(SupportError::ExtendedRangeOverlapsLegacy(
                base,
                LEGACY_SUPPORT_SPRITE_END - 1,
            ));
        }
        if base.checked_add(WOODEN_TRANSITION_ROWS as u32).is_none() {
            return Err(SupportError::ExtendedRangeOverflows(base));
        }
        Ok(())
    }

    pub fn from_ron(text: &str) -> Result<Self> {
        let config: SupportsConfig = ron::from_str(text).context("Failed to parse supports config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize supports config")
    }

    /// Loads a config file. A missing file gives the default config.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No supports config at {}; using defaults", path.display());
            return Ok(Default::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_ron(&text).with_context(|| format!("In {}", path.display()))?;
        log::info!("Loaded supports config from {}", path.display());
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        self.validate()?;
        std::fs::write(path, self.to_ron()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Saved supports config to {}", path.display());
        Ok(())
    }
}
