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

//! Metal pole supports.
//!
//! A metal support stands on one tile segment and reaches from that segment's ledger height up to
//! the structure. If the structure is lower than what is already on the segment, a short stub is
//! drawn instead, hanging from a crossbeam to a neighbouring segment that is still low enough.

use serde::{Deserialize, Serialize};

use crate::constants::heights::{
    BEAM_CHUNK, BEAM_SEAM_PERIOD, MAX_CROSSBEAM_HOPS, METAL_BASE_CLEARANCE,
};
use crate::constants::SEGMENT_HEIGHT_BLOCKED;
use crate::coordinates::{floor2, BoundBoxXyz, CoordsXy, CoordsXyz, Direction};
use crate::image::ImageTemplate;
use crate::ledger::SegmentLedger;
use crate::session::{PaintSink, TileSupportState, TrackingSink};
use crate::support_types::{MetalExtension, MetalSupportType, TileSegment};
use crate::tables::{
    self, MetalSupportImages, CROSSBEAM_LENGTHS, CROSSBEAM_OFFSETS, METAL_CAP_IMAGES,
    METAL_CROSSBEAM_IMAGES, METAL_SLOPE_IMAGE_OFFSETS, METAL_SUPPORT_IMAGES,
};

/// A request to draw a metal support. The segment is passed separately, since the side by side
/// placement draws the same support on two segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetalColumn {
    pub support_type: MetalSupportType,
    pub height: i32,
    #[serde(default)]
    pub template: ImageTemplate,
    #[serde(default)]
    pub extension: Option<MetalExtension>,
}
impl MetalColumn {
    pub fn new(support_type: MetalSupportType, height: i32, template: ImageTemplate) -> Self {
        Self {
            support_type,
            height,
            template,
            extension: None,
        }
    }
    pub fn with_extension(mut self, extension: MetalExtension) -> Self {
        self.extension = Some(extension);
        self
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct MetalVariant {
    /// After drawing a crossbeam, continue the stub on the partner segment
    follow_crossbeam: bool,
    /// Crossbeams with an index at or above this end the placement
    crossbeam_limit: usize,
    extension_images: &'static [MetalSupportImages; MetalSupportType::COUNT],
    /// A lowered extension starts one unit down. Otherwise it is skipped.
    lowered_extension_drawn: bool,
}

pub(crate) const METAL_A: MetalVariant = MetalVariant {
    follow_crossbeam: true,
    crossbeam_limit: tables::CROSSBEAM_KINDS,
    extension_images: &METAL_CAP_IMAGES,
    lowered_extension_drawn: true,
};
pub(crate) const METAL_B: MetalVariant = MetalVariant {
    follow_crossbeam: false,
    crossbeam_limit: 4,
    extension_images: &METAL_SUPPORT_IMAGES,
    lowered_extension_drawn: false,
};

/// Draws a metal support on `segment` and marks that segment (or the segment the stub ended up
/// on) as finished. Returns whether any sprite was emitted.
pub(crate) fn place_metal<S: PaintSink + ?Sized>(
    variant: &MetalVariant,
    state: &mut TileSupportState,
    sink: &mut S,
    segment: TileSegment,
    column: &MetalColumn,
) -> bool {
    let template = match state.effective_template(column.template) {
        Some(template) => template,
        None => return false,
    };
    let mut sink = TrackingSink::new(sink, template);
    let support_type = column.support_type;
    let images = &METAL_SUPPORT_IMAGES[support_type as usize];

    let mut top = column.height;
    let mut working_segment = segment;
    let mut ledger_height = SEGMENT_HEIGHT_BLOCKED;

    if column.height < state.segments.get(segment).height as i32 {
        top = column.height - support_type.step_height();
        if top < 0 {
            return false;
        }
        ledger_height = column.height as u16;

        let (partner, crossbeam) =
            match find_crossbeam_partner(&state.segments, segment, state.rotation, top) {
                Some(found) => found,
                None => {
                    log::debug!(
                        "metal {:?} on {:?}: no segment below {} to hang a stub from",
                        support_type,
                        segment,
                        top
                    );
                    return false;
                }
            };
        if crossbeam >= variant.crossbeam_limit {
            log::trace!("metal {:?}: crossbeam {} not drawable", support_type, crossbeam);
            return false;
        }
        let offset = (segment.anchor() + CROSSBEAM_OFFSETS[crossbeam]).with_z(top);
        sink.draw(
            METAL_CROSSBEAM_IMAGES[support_type as usize][crossbeam],
            offset,
            CROSSBEAM_LENGTHS[crossbeam].with_z(1),
        );
        if variant.follow_crossbeam {
            working_segment = partner;
        }
    }

    let record = state.segments.get(working_segment);
    let anchor = working_segment.anchor();
    let record_height = record.height as i32;
    let start = if record.has_flat_cap()
        || top - record_height < METAL_BASE_CLEARANCE
        || images.base == 0
    {
        record_height
    } else {
        let base = images.base + METAL_SLOPE_IMAGE_OFFSETS[record.surface_slope()] as u32;
        sink.draw(base, anchor.with_z(record_height), CoordsXyz::new(0, 0, 5));
        record_height + METAL_BASE_CLEARANCE
    };
    stack_beams(&mut sink, images.beam, anchor, start, top);

    state.segments.finalize(working_segment, ledger_height);

    if let Some(extension) = column.extension {
        let mut start = column.height;
        if extension.lowered {
            if !variant.lowered_extension_drawn {
                return sink.drawn();
            }
            start -= 1;
        }
        let beam = variant.extension_images[support_type as usize].beam;
        let anchor = segment.anchor();
        run_extension(
            &mut sink,
            beam,
            anchor,
            start,
            extension.length as i32,
            Some(anchor.with_z(start)),
        );
    }

    sink.drawn()
}

/// Looks outward from `segment` for the first crossbeam partner that is lower than `height`.
fn find_crossbeam_partner(
    ledger: &SegmentLedger,
    segment: TileSegment,
    rotation: Direction,
    height: i32,
) -> Option<(TileSegment, usize)> {
    (0..MAX_CROSSBEAM_HOPS)
        .map(|hop| tables::crossbeam_partner(hop, segment, rotation))
        .find(|(partner, _)| height > ledger.get(*partner).height as i32)
}

/// Stacks beams from `start` to `top` and returns the height reached.
///
/// The first beam only reaches the next 16 unit boundary. After that, beams are up to 16 units
/// long, and every fourth one uses the seam sprite if it is full length.
pub(crate) fn stack_beams<S: PaintSink + ?Sized>(
    sink: &mut TrackingSink<'_, S>,
    beam_image: u32,
    anchor: CoordsXy,
    start: i32,
    top: i32,
) -> i32 {
    let mut z = start;
    let partial = floor2(z + BEAM_CHUNK, BEAM_CHUNK).min(top) - z;
    if partial > 0 {
        sink.draw(
            beam_image + (partial - 1) as u32,
            anchor.with_z(z),
            CoordsXyz::new(0, 0, partial - 1),
        );
        z += partial;
    }

    let mut chunk = 0;
    loop {
        let length = (z + BEAM_CHUNK).min(top) - z;
        if length <= 0 {
            break;
        }
        chunk += 1;
        let mut image = beam_image + (length - 1) as u32;
        if chunk % BEAM_SEAM_PERIOD == 0 && length == BEAM_CHUNK {
            image += 1;
        }
        sink.draw(image, anchor.with_z(z), CoordsXyz::new(0, 0, length - 1));
        z += length;
    }
    z
}

/// Draws `length` units of plain beam from `start`, without touching the ledger.
///
/// The beams get flat boxes, all at `shared_box` if given, otherwise each at its own sprite.
pub(crate) fn run_extension<S: PaintSink + ?Sized>(
    sink: &mut TrackingSink<'_, S>,
    beam_image: u32,
    anchor: CoordsXy,
    start: i32,
    length: i32,
    shared_box: Option<CoordsXyz>,
) {
    let top = start + length;
    let mut z = start;
    loop {
        let piece = (z + BEAM_CHUNK).min(top) - z;
        if piece <= 0 {
            break;
        }
        let offset = anchor.with_z(z);
        sink.draw_boxed(
            beam_image + (piece - 1) as u32,
            offset,
            BoundBoxXyz::new(shared_box.unwrap_or(offset), CoordsXyz::default()),
        );
        z += piece;
    }
}

/// The two segments a double-wide diagonal piece is held up from.
pub(crate) fn side_by_side_segments(direction: Direction) -> [TileSegment; 2] {
    if direction.is_odd() {
        [TileSegment::TopRightSide, TileSegment::BottomLeftSide]
    } else {
        [TileSegment::TopLeftSide, TileSegment::BottomRightSide]
    }
}

#[cfg(test)]
mod tests;
