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

//! Entry points for drawing supports.
//!
//! Every placement takes the tile state and a paint sink, draws into the sink and returns
//! whether it drew anything. Wooden and path column placement only read the tile state; metal
//! and path segment placement also mark the segment they finished in the ledger.

use crate::config::SupportsConfig;
use crate::coordinates::Direction;
use crate::image::ImageTemplate;
use crate::metal::{place_metal, side_by_side_segments, MetalColumn, METAL_A, METAL_B};
use crate::path::{
    place_path_column, place_path_segment, BridgeSprites, PathColumn, PathSegmentColumn,
    PathSupportOutcome,
};
use crate::session::{PaintSink, TileSupportState};
use crate::support_types::{TileSegment, TransitionRow, WoodenSupportKind};
use crate::wooden::{place_wooden, WoodenColumn, WoodenVariant, WOODEN_A, WOODEN_B};

#[derive(Clone, Debug, Default)]
pub struct SupportRenderer {
    config: SupportsConfig,
}
impl SupportRenderer {
    pub fn new(config: SupportsConfig) -> SupportRenderer {
        SupportRenderer { config }
    }

    pub fn config(&self) -> &SupportsConfig {
        &self.config
    }

    pub fn wooden_a<S: PaintSink + ?Sized>(
        &self,
        state: &TileSupportState,
        sink: &mut S,
        column: &WoodenColumn,
    ) -> bool {
        self.wooden(&WOODEN_A, state, sink, column)
    }

    pub fn wooden_b<S: PaintSink + ?Sized>(
        &self,
        state: &TileSupportState,
        sink: &mut S,
        column: &WoodenColumn,
    ) -> bool {
        self.wooden(&WOODEN_B, state, sink, column)
    }

    /// Like [Self::wooden_a], but the column's sub-type is given in the piece's own frame and is
    /// turned by the column's direction first.
    pub fn wooden_a_rotated<S: PaintSink + ?Sized>(
        &self,
        state: &TileSupportState,
        sink: &mut S,
        column: &WoodenColumn,
    ) -> bool {
        self.wooden_a(state, sink, &column.rotated())
    }

    pub fn wooden_b_rotated<S: PaintSink + ?Sized>(
        &self,
        state: &TileSupportState,
        sink: &mut S,
        column: &WoodenColumn,
    ) -> bool {
        self.wooden_b(state, sink, &column.rotated())
    }

    /// Wooden A placement from a combined type index (0 to 11) and a special code (0 for none,
    /// otherwise the transition row plus one).
    pub fn wooden_a_legacy<S: PaintSink + ?Sized>(
        &self,
        state: &TileSupportState,
        sink: &mut S,
        legacy_index: u8,
        special: u16,
        height: i32,
        template: ImageTemplate,
    ) -> bool {
        self.wooden_legacy(&WOODEN_A, state, sink, legacy_index, special, height, template)
    }

    pub fn wooden_b_legacy<S: PaintSink + ?Sized>(
        &self,
        state: &TileSupportState,
        sink: &mut S,
        legacy_index: u8,
        special: u16,
        height: i32,
        template: ImageTemplate,
    ) -> bool {
        self.wooden_legacy(&WOODEN_B, state, sink, legacy_index, special, height, template)
    }

    pub fn metal_a<S: PaintSink + ?Sized>(
        &self,
        state: &mut TileSupportState,
        sink: &mut S,
        segment: TileSegment,
        column: &MetalColumn,
    ) -> bool {
        place_metal(&METAL_A, state, sink, segment, column)
    }

    pub fn metal_b<S: PaintSink + ?Sized>(
        &self,
        state: &mut TileSupportState,
        sink: &mut S,
        segment: TileSegment,
        column: &MetalColumn,
    ) -> bool {
        place_metal(&METAL_B, state, sink, segment, column)
    }

    /// Metal A placement with the support type given in the piece's own frame.
    pub fn metal_a_rotated<S: PaintSink + ?Sized>(
        &self,
        state: &mut TileSupportState,
        sink: &mut S,
        segment: TileSegment,
        direction: Direction,
        column: &MetalColumn,
    ) -> bool {
        let column = MetalColumn {
            support_type: column.support_type.rotated(direction),
            ..*column
        };
        place_metal(&METAL_A, state, sink, segment, &column)
    }

    /// Two metal A supports for a piece that runs diagonally across the tile. Returns whether
    /// either of them drew anything.
    pub fn supports_side_by_side<S: PaintSink + ?Sized>(
        &self,
        state: &mut TileSupportState,
        sink: &mut S,
        direction: Direction,
        column: &MetalColumn,
    ) -> bool {
        let column = MetalColumn {
            support_type: column.support_type.rotated(direction),
            ..*column
        };
        let [first, second] = side_by_side_segments(direction);
        let first_drawn = place_metal(&METAL_A, state, sink, first, &column);
        let second_drawn = place_metal(&METAL_A, state, sink, second, &column);
        first_drawn || second_drawn
    }

    pub fn path_a<S: PaintSink + ?Sized>(
        &self,
        state: &TileSupportState,
        sink: &mut S,
        bridge: &BridgeSprites,
        column: &PathColumn,
    ) -> PathSupportOutcome {
        place_path_column(state, sink, bridge, column)
    }

    pub fn path_b<S: PaintSink + ?Sized>(
        &self,
        state: &mut TileSupportState,
        sink: &mut S,
        bridge: &BridgeSprites,
        segment: TileSegment,
        column: &PathSegmentColumn,
    ) -> bool {
        place_path_segment(state, sink, bridge, segment, column)
    }

    fn wooden<S: PaintSink + ?Sized>(
        &self,
        variant: &WoodenVariant,
        state: &TileSupportState,
        sink: &mut S,
        column: &WoodenColumn,
    ) -> bool {
        place_wooden(
            variant,
            &self.config.catalog,
            state,
            sink,
            column.kind(),
            column.transition_row(),
            column.height,
            column.template,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn wooden_legacy<S: PaintSink + ?Sized>(
        &self,
        variant: &WoodenVariant,
        state: &TileSupportState,
        sink: &mut S,
        legacy_index: u8,
        special: u16,
        height: i32,
        template: ImageTemplate,
    ) -> bool {
        let kind = match WoodenSupportKind::from_legacy_index(legacy_index) {
            Ok(kind) => kind,
            Err(e) => {
                log::warn!("Skipping wooden support: {}", e);
                return false;
            }
        };
        let transition = TransitionRow::from_special_code(special);
        if transition.is_none() && special != 0 {
            log::warn!("Ignoring unknown wooden support special code {}", special);
        }
        place_wooden(
            variant,
            &self.config.catalog,
            state,
            sink,
            kind,
            transition,
            height,
            template,
        )
    }
}
