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

//! Supports under footpaths and bridges. These draw from the sprite set of the active path
//! object rather than from fixed tables.

use serde::{Deserialize, Serialize};

use crate::constants::bridge_sprites;
use crate::constants::heights::{HALF_STEP, METAL_BASE_CLEARANCE};
use crate::constants::{slope, PATH_TRANSITION_ROWS, SEGMENT_HEIGHT_BLOCKED};
use crate::coordinates::{ceil2, BoundBoxXyz, CoordsXyz};
use crate::image::ImageTemplate;
use crate::metal::{run_extension, stack_beams};
use crate::session::{PaintSink, TileSupportState, TrackingSink};
use crate::support_types::{TileSegment, TransitionRow};
use crate::tables::{METAL_SLOPE_IMAGE_OFFSETS, PATH_TRANSITIONS, WOODEN_SLOPE_IMAGE_OFFSETS};
use crate::wooden::stack_posts;

/// Where a path object's support sprites are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BridgeSprites {
    /// First sprite of the path's bridge sprite set
    pub bridge_image_id: u32,
    /// Whether per-segment supports get a shaped base
    #[serde(default)]
    pub has_support_base_sprite: bool,
}

/// A request for a column support under a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathColumn {
    /// Row of the bridge sprite set to draw posts from
    #[serde(default)]
    pub style: u8,
    pub height: i32,
    #[serde(default)]
    pub template: ImageTemplate,
    #[serde(default)]
    pub transition: Option<TransitionRow>,
}
impl PathColumn {
    pub fn new(style: u8, height: i32, template: ImageTemplate) -> Self {
        Self {
            style,
            height,
            template,
            transition: None,
        }
    }
    pub fn with_transition(mut self, transition: TransitionRow) -> Self {
        self.transition = Some(transition);
        self
    }
}

/// A request for a single-segment support under a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegmentColumn {
    pub height: i32,
    #[serde(default)]
    pub template: ImageTemplate,
    /// Extra beam drawn above `height`, outside the ledger
    #[serde(default)]
    pub extension: u16,
}
impl PathSegmentColumn {
    pub fn new(height: i32, template: ImageTemplate) -> Self {
        Self {
            height,
            template,
            extension: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PathSupportOutcome {
    pub drawn: bool,
    /// The path is below the top of the support column, so nothing under it can be seen. Callers
    /// use this to skip drawing the path's own underside.
    pub underground: bool,
}
impl PathSupportOutcome {
    const UNDERGROUND: PathSupportOutcome = PathSupportOutcome {
        drawn: false,
        underground: true,
    };
}

/// Draws a path column support. Reads, but doesn't change, the general support column.
pub(crate) fn place_path_column<S: PaintSink + ?Sized>(
    state: &TileSupportState,
    sink: &mut S,
    bridge: &BridgeSprites,
    column: &PathColumn,
) -> PathSupportOutcome {
    let template = match state.effective_template(column.template) {
        Some(template) => template,
        None => return PathSupportOutcome::default(),
    };
    let mut sink = TrackingSink::new(sink, template);

    let mut base_height = ceil2(state.support.height as i32, HALF_STEP);
    let support_length = column.height - base_height;
    if support_length < 0 {
        return PathSupportOutcome::UNDERGROUND;
    }
    let mut height_steps = support_length / HALF_STEP;

    let style_base =
        bridge.bridge_image_id + column.style as u32 * bridge_sprites::STYLE_STRIDE;
    let support_slope = state.support.slope;
    let slope_image = style_base + WOODEN_SLOPE_IMAGE_OFFSETS[state.support.surface_slope()];
    let slope_box = |z: i32| {
        BoundBoxXyz::new(CoordsXyz::new(0, 0, z + 2), CoordsXyz::new(32, 32, 11))
    };

    if support_slope & slope::FLAT_CAP != 0 {
        sink.draw(
            bridge.bridge_image_id + bridge_sprites::FLAT_CAP,
            CoordsXyz::new(0, 0, base_height - 2),
            CoordsXyz::new(32, 32, 0),
        );
    } else if support_slope & slope::DOUBLE_HEIGHT != 0 {
        height_steps -= 2;
        if height_steps < 0 {
            return PathSupportOutcome::UNDERGROUND;
        }
        sink.draw_boxed(
            slope_image,
            CoordsXyz::new(0, 0, base_height),
            slope_box(base_height),
        );
        base_height += HALF_STEP;
        sink.draw_boxed(
            slope_image + 4,
            CoordsXyz::new(0, 0, base_height),
            slope_box(base_height),
        );
        base_height += HALF_STEP;
    } else if support_slope & slope::ALL_CORNERS_UP != 0 {
        height_steps -= 1;
        if height_steps < 0 {
            return PathSupportOutcome::UNDERGROUND;
        }
        sink.draw_boxed(
            slope_image,
            CoordsXyz::new(0, 0, base_height),
            slope_box(base_height),
        );
        base_height += HALF_STEP;
    }

    stack_posts(
        &mut sink,
        style_base + bridge_sprites::HALF,
        style_base + bridge_sprites::FULL,
        height_steps,
        &mut base_height,
        state.water_height,
    );

    if let Some(row) = column.transition {
        if row.index() < PATH_TRANSITION_ROWS {
            let descriptor = &PATH_TRANSITIONS[row.index()];
            sink.draw_transition(
                bridge.bridge_image_id + bridge_sprites::TRANSITION + row.index() as u32,
                CoordsXyz::new(0, 0, base_height),
                descriptor.bound_box.raised(base_height),
                descriptor.prepend,
            );
        } else {
            log::warn!("Path transition row {} out of range, skipping", row.index());
        }
    }

    PathSupportOutcome {
        drawn: sink.drawn(),
        underground: false,
    }
}

/// Draws a single-segment path support and marks the segment finished.
pub(crate) fn place_path_segment<S: PaintSink + ?Sized>(
    state: &mut TileSupportState,
    sink: &mut S,
    bridge: &BridgeSprites,
    segment: TileSegment,
    column: &PathSegmentColumn,
) -> bool {
    let template = match state.effective_template(column.template) {
        Some(template) => template,
        None => return false,
    };
    let mut sink = TrackingSink::new(sink, template);

    let record = state.segments.get(segment);
    let record_height = record.height as i32;
    if column.height < record_height {
        log::trace!(
            "path support on {:?}: {} is below {:?}",
            segment,
            column.height,
            record
        );
        return false;
    }

    let anchor = segment.anchor();
    let start = if record.has_flat_cap()
        || column.height - record_height < METAL_BASE_CLEARANCE
        || !bridge.has_support_base_sprite
    {
        record_height
    } else {
        let base = bridge.bridge_image_id
            + bridge_sprites::SEGMENT_BASE
            + METAL_SLOPE_IMAGE_OFFSETS[record.surface_slope()] as u32;
        sink.draw(base, anchor.with_z(record_height), CoordsXyz::new(0, 0, 5));
        record_height + METAL_BASE_CLEARANCE
    };
    let beam = bridge.bridge_image_id + bridge_sprites::BEAM;
    let top = stack_beams(&mut sink, beam, anchor, start, column.height);

    state.segments.finalize(segment, SEGMENT_HEIGHT_BLOCKED);

    if column.extension > 0 {
        run_extension(&mut sink, beam, anchor, top, column.extension as i32, None);
    }
    sink.drawn()
}
