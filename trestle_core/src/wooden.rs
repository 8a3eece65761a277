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

//! Wooden support columns: a stack of half and full step posts from the top of the general
//! support column up to the structure, with a base shaped to the ground.

use serde::{Deserialize, Serialize};

use crate::constants::heights::{FULL_STEP, HALF_STEP, WATER_HEIGHT_STEP};
use crate::constants::slope;
use crate::coordinates::{ceil2, BoundBoxXyz, CoordsXyz, Direction};
use crate::image::{ImageTemplate, SpriteCatalog};
use crate::session::{PaintSink, TileSupportState, TrackingSink};
use crate::support_types::{
    TransitionRow, WoodenSupportKind, WoodenSupportSubType, WoodenSupportTransitionType,
    WoodenSupportType,
};
use crate::tables::{self, CurveSprite, WOODEN_SLOPE_IMAGE_OFFSETS, WOODEN_TRANSITIONS};

/// A request to draw one wooden support column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WoodenColumn {
    pub support_type: WoodenSupportType,
    pub sub_type: WoodenSupportSubType,
    /// Height the top of the column should reach
    pub height: i32,
    #[serde(default)]
    pub template: ImageTemplate,
    /// Shape of the piece above, if it needs a transition sprite
    #[serde(default)]
    pub transition: Option<WoodenSupportTransitionType>,
    /// Direction the piece above faces. Selects the transition row, and for rotated placement
    /// also the sub-type.
    #[serde(default)]
    pub direction: Direction,
}
impl WoodenColumn {
    pub fn new(
        support_type: WoodenSupportType,
        sub_type: WoodenSupportSubType,
        height: i32,
        template: ImageTemplate,
    ) -> Self {
        Self {
            support_type,
            sub_type,
            height,
            template,
            transition: None,
            direction: Direction::West,
        }
    }
    pub fn with_transition(
        mut self,
        transition: WoodenSupportTransitionType,
        direction: Direction,
    ) -> Self {
        self.transition = Some(transition);
        self.direction = direction;
        self
    }
    pub fn facing(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub(crate) fn kind(&self) -> WoodenSupportKind {
        WoodenSupportKind::new(self.support_type, self.sub_type)
    }
    pub(crate) fn transition_row(&self) -> Option<TransitionRow> {
        self.transition
            .map(|t| TransitionRow::from_transition(t, self.direction))
    }
    /// This column with its sub-type converted from object space to screen space.
    pub(crate) fn rotated(&self) -> WoodenColumn {
        WoodenColumn {
            sub_type: self.sub_type.rotated(self.direction),
            ..*self
        }
    }
}

/// The ways the A and B wooden placers differ. Both draw the same sprites; only the bounding
/// boxes of the sloped base and the flat cap rule differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WoodenVariant {
    /// Box height of the upper half of a steep diagonal base
    upper_diagonal_box_height: i32,
    /// Box height of a single sloped base piece
    sloped_box_height: i32,
    /// Only draw the flat cap when there are posts left to stack on it
    flat_cap_needs_steps: bool,
}

pub(crate) const WOODEN_A: WoodenVariant = WoodenVariant {
    upper_diagonal_box_height: 11,
    sloped_box_height: 11,
    flat_cap_needs_steps: false,
};
pub(crate) const WOODEN_B: WoodenVariant = WoodenVariant {
    upper_diagonal_box_height: 3,
    sloped_box_height: 3,
    flat_cap_needs_steps: true,
};

const LOWER_DIAGONAL_BOX_HEIGHT: i32 = 11;
/// Bounding boxes of shaped base pieces start this far above the sprite
const BASE_BOX_LIFT: i32 = 2;
/// The flat cap sits this far below the height it covers
const FLAT_CAP_DROP: i32 = 2;

#[inline]
const fn tile_box(height: i32) -> CoordsXyz {
    CoordsXyz::new(32, 32, height)
}

/// Draws a wooden column. Returns whether any sprite was emitted.
pub(crate) fn place_wooden<S: PaintSink + ?Sized>(
    variant: &WoodenVariant,
    catalog: &SpriteCatalog,
    state: &TileSupportState,
    sink: &mut S,
    kind: WoodenSupportKind,
    transition: Option<TransitionRow>,
    height: i32,
    template: ImageTemplate,
) -> bool {
    let template = match state.effective_template(template) {
        Some(template) => template,
        None => return false,
    };
    let mut sink = TrackingSink::new(sink, template);

    let mut base_height = ceil2(state.support.height as i32, HALF_STEP);
    let support_length = height - base_height;
    if support_length < 0 {
        log::trace!(
            "wooden {:?}: target {} is below the column top {}",
            kind,
            height,
            base_height
        );
        return false;
    }
    let mut height_steps = support_length / HALF_STEP;

    let images = tables::wooden_support_images(kind);
    let support_slope = state.support.slope;
    let slope_image = images.slope + WOODEN_SLOPE_IMAGE_OFFSETS[state.support.surface_slope()];
    let mut draw_flat_cap = false;

    if support_slope & slope::FLAT_CAP != 0 {
        draw_flat_cap = true;
    } else if support_slope & slope::DOUBLE_HEIGHT != 0 {
        height_steps -= 2;
        if height_steps < 0 {
            return false;
        }
        if images.slope == 0 {
            draw_flat_cap = true;
        } else {
            sink.draw_boxed(
                slope_image,
                CoordsXyz::new(0, 0, base_height),
                BoundBoxXyz::new(
                    CoordsXyz::new(0, 0, base_height + BASE_BOX_LIFT),
                    tile_box(LOWER_DIAGONAL_BOX_HEIGHT),
                ),
            );
            let upper = base_height + HALF_STEP;
            sink.draw_boxed(
                slope_image + 4,
                CoordsXyz::new(0, 0, upper),
                BoundBoxXyz::new(
                    CoordsXyz::new(0, 0, upper + BASE_BOX_LIFT),
                    tile_box(variant.upper_diagonal_box_height),
                ),
            );
        }
        base_height += FULL_STEP;
    } else if support_slope & slope::ALL_CORNERS_UP != 0 {
        height_steps -= 1;
        if height_steps < 0 {
            return false;
        }
        if images.slope == 0 {
            draw_flat_cap = true;
        } else {
            sink.draw_boxed(
                slope_image,
                CoordsXyz::new(0, 0, base_height),
                BoundBoxXyz::new(
                    CoordsXyz::new(0, 0, base_height + BASE_BOX_LIFT),
                    tile_box(variant.sloped_box_height),
                ),
            );
        }
        base_height += HALF_STEP;
    }

    if draw_flat_cap && (!variant.flat_cap_needs_steps || height_steps > 0) {
        sink.draw(
            images.flat,
            CoordsXyz::new(0, 0, base_height - FLAT_CAP_DROP),
            CoordsXyz::new(32, 32, 0),
        );
    }

    stack_posts(
        &mut sink,
        images.half,
        images.full,
        height_steps,
        &mut base_height,
        state.water_height,
    );

    if let Some(row) = transition {
        draw_curve(&mut sink, catalog, kind, row, base_height);
    }

    sink.drawn()
}

/// Stacks `height_steps` half steps worth of posts, starting at `base_height` and leaving it at
/// the top of the stack.
///
/// Half posts are used to get back onto a full step boundary, for the last step, and so that the
/// post directly under the water surface ends exactly at it.
pub(crate) fn stack_posts<S: PaintSink + ?Sized>(
    sink: &mut TrackingSink<'_, S>,
    half_image: u32,
    full_image: u32,
    mut height_steps: i32,
    base_height: &mut i32,
    water_height: i32,
) {
    while height_steps > 0 {
        let z = *base_height;
        let half = z & HALF_STEP != 0 || height_steps == 1 || z + WATER_HEIGHT_STEP == water_height;
        if half {
            let box_height = if height_steps == 1 { 7 } else { 12 };
            sink.draw(half_image, CoordsXyz::new(0, 0, z), tile_box(box_height));
            *base_height += HALF_STEP;
            height_steps -= 1;
        } else {
            let box_height = if height_steps == 2 { 23 } else { 28 };
            sink.draw(full_image, CoordsXyz::new(0, 0, z), tile_box(box_height));
            *base_height += FULL_STEP;
            height_steps -= 2;
        }
    }
}

fn draw_curve<S: PaintSink + ?Sized>(
    sink: &mut TrackingSink<'_, S>,
    catalog: &SpriteCatalog,
    kind: WoodenSupportKind,
    row: TransitionRow,
    base_height: i32,
) {
    let descriptor = &WOODEN_TRANSITIONS[row.index()];
    let sprite = match tables::curve_sprites(kind) {
        Some(curves) => curves[row.index()],
        None => CurveSprite::None,
    };
    let index = match sprite {
        CurveSprite::None => {
            log::trace!("wooden {:?} has no curve for row {}", kind, row.index());
            return;
        }
        CurveSprite::Legacy(index) => index,
        CurveSprite::Extended(offset) => catalog.extended_support_base + offset,
    };
    if !descriptor.allows_curve {
        return;
    }
    sink.draw_transition(
        index,
        CoordsXyz::new(0, 0, base_height),
        descriptor.bound_box.raised(base_height),
        descriptor.prepend,
    );
}
