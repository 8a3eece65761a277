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

/// Bits of the slope byte stored alongside a support height.
#[rustfmt::skip]
pub mod slope {
    /// Any of the four corners is raised
    pub const ALL_CORNERS_UP: u8     = 0b0000_1111;
    /// Steep diagonal slope; the raised corner is two steps up
    pub const DOUBLE_HEIGHT: u8      = 0b0001_0000;
    /// The column ends on something flat (scenery, a finished support). No shaped base is needed.
    pub const FLAT_CAP: u8           = 0b0010_0000;
    /// The part of the slope byte that selects a shaped base sprite
    pub const SURFACE_SLOPE_MASK: u8 = 0b0001_1111;
    /// Flat ground
    pub const FLAT: u8               = 0;
}

/// Vertical units. One land height step is 16 units.
pub mod heights {
    /// Height covered by a half-step support sprite.
    pub const HALF_STEP: i32 = 16;
    /// Height covered by a full-step support sprite.
    pub const FULL_STEP: i32 = 32;
    /// Distance between the water surface and the top of the step below it.
    pub const WATER_HEIGHT_STEP: i32 = 16;
    /// Height of a shaped metal (or bridge) base sprite, plus the 1 unit gap above it.
    pub const METAL_BASE_CLEARANCE: i32 = 6;
    /// Longest single beam sprite in a metal or bridge stack.
    pub const BEAM_CHUNK: i32 = 16;
    /// Every this many beam chunks, a full length chunk uses the seam sprite instead.
    pub const BEAM_SEAM_PERIOD: u32 = 4;
    /// Maximum number of segments walked when looking for a crossbeam partner.
    pub const MAX_CROSSBEAM_HOPS: usize = 4;
}

/// Ledger height meaning "nothing may be placed here" (or "already finished").
pub const SEGMENT_HEIGHT_BLOCKED: u16 = 0xFFFF;

/// Number of rows in the wooden transition tables (curve sprites and descriptors).
pub const WOODEN_TRANSITION_ROWS: usize = 81;
/// Number of rows in the path transition descriptor table.
pub const PATH_TRANSITION_ROWS: usize = 4;

/// Sprite offsets within a bridge (footpath support) sprite set.
#[rustfmt::skip]
pub mod bridge_sprites {
    /// Sprites per support style row
    pub const STYLE_STRIDE: u32     = 24;
    /// Beam sprites, indexed by length - 1
    pub const BEAM: u32             = 20;
    /// Full step post, relative to the style row
    pub const FULL: u32             = 22;
    /// Half step post, relative to the style row
    pub const HALF: u32             = 23;
    /// Shaped base sprites for per-segment supports, indexed by the metal slope map
    pub const SEGMENT_BASE: u32     = 37;
    /// Flat cap drawn over scenery
    pub const FLAT_CAP: u32         = 48;
    /// Transition sprites, indexed by transition row
    pub const TRANSITION: u32       = 55;
}
