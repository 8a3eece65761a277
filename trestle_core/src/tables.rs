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

//! Sprite and geometry tables for support drawing.
//!
//! Every table that describes something per support type, segment or rotation has its length
//! set by the `COUNT` of the enum that indexes it, so adding a variant without adding a row
//! fails to compile.

use crate::constants::{heights::MAX_CROSSBEAM_HOPS, PATH_TRANSITION_ROWS, WOODEN_TRANSITION_ROWS};
use crate::coordinates::{BoundBoxXyz, CoordsXy, CoordsXyz, Direction};
use crate::support_types::{
    MetalSupportType, TileSegment, WoodenSupportKind, WoodenSupportSubType, WoodenSupportType,
};

/// Where a support standing on each segment is anchored within the tile.
#[rustfmt::skip]
pub(crate) const SEGMENT_ANCHORS: [CoordsXy; TileSegment::COUNT] = [
    CoordsXy::new( 4,  4),
    CoordsXy::new(28,  4),
    CoordsXy::new( 4, 28),
    CoordsXy::new(28, 28),
    CoordsXy::new(16, 16),
    CoordsXy::new(16,  4),
    CoordsXy::new( 4, 16),
    CoordsXy::new(28, 16),
    CoordsXy::new(16, 28),
];

/// Crossbeam partners. Indexed by [hop][segment], each row holds (neighbour, crossbeam index)
/// pairs for rotations 0 to 3. A backfilled metal support tries hop 0 first and moves further
/// out while the candidate is already taller than the stub.
#[rustfmt::skip]
const SEGMENT_ADJACENCY: [[[u8; 2 * Direction::COUNT]; TileSegment::COUNT]; MAX_CROSSBEAM_HOPS] = [
    [
        [5, 2, 5, 2, 5, 2, 5, 2],
        [7, 1, 7, 1, 7, 1, 7, 1],
        [6, 3, 6, 3, 6, 3, 6, 3],
        [8, 0, 8, 0, 8, 0, 8, 0],
        [5, 3, 6, 0, 8, 1, 7, 2],
        [1, 2, 1, 2, 1, 2, 1, 2],
        [0, 3, 0, 3, 0, 3, 0, 3],
        [3, 1, 3, 1, 3, 1, 3, 1],
        [2, 0, 2, 0, 2, 0, 2, 0],
    ],
    [
        [6, 1, 6, 1, 6, 1, 6, 1],
        [5, 0, 5, 0, 5, 0, 5, 0],
        [8, 2, 8, 2, 8, 2, 8, 2],
        [7, 3, 7, 3, 7, 3, 7, 3],
        [6, 0, 8, 1, 7, 2, 5, 3],
        [0, 0, 0, 0, 0, 0, 0, 0],
        [2, 1, 2, 1, 2, 1, 2, 1],
        [1, 3, 1, 3, 1, 3, 1, 3],
        [3, 2, 3, 2, 3, 2, 3, 2],
    ],
    [
        [1, 6, 1, 6, 1, 6, 1, 6],
        [3, 5, 3, 5, 3, 5, 3, 5],
        [0, 7, 0, 7, 0, 7, 0, 7],
        [2, 4, 2, 4, 2, 4, 2, 4],
        [8, 1, 7, 2, 5, 3, 6, 0],
        [4, 1, 4, 1, 4, 1, 4, 1],
        [4, 2, 4, 2, 4, 2, 4, 2],
        [4, 0, 4, 0, 4, 0, 4, 0],
        [4, 3, 4, 3, 4, 3, 4, 3],
    ],
    [
        [2, 5, 2, 5, 2, 5, 2, 5],
        [0, 4, 0, 4, 0, 4, 0, 4],
        [3, 6, 3, 6, 3, 6, 3, 6],
        [1, 7, 1, 7, 1, 7, 1, 7],
        [7, 2, 5, 3, 6, 0, 8, 1],
        [8, 5, 8, 5, 8, 5, 8, 5],
        [7, 6, 7, 6, 7, 6, 7, 6],
        [6, 4, 6, 4, 6, 4, 6, 4],
        [5, 7, 5, 7, 5, 7, 5, 7],
    ],
];

/// Number of distinct crossbeam shapes.
pub(crate) const CROSSBEAM_KINDS: usize = 8;

/// The `hop`th crossbeam partner of `segment` under `rotation`, and which crossbeam connects them.
pub(crate) fn crossbeam_partner(
    hop: usize,
    segment: TileSegment,
    rotation: Direction,
) -> (TileSegment, usize) {
    let row = &SEGMENT_ADJACENCY[hop][segment.index()];
    let column = rotation.index() * 2;
    (
        TileSegment::ALL[row[column] as usize],
        row[column + 1] as usize,
    )
}

/// Sprite offset of each crossbeam, relative to the anchor of the segment it starts from.
#[rustfmt::skip]
pub(crate) const CROSSBEAM_OFFSETS: [CoordsXy; CROSSBEAM_KINDS] = [
    CoordsXy::new(-15,  -1),
    CoordsXy::new(  0,  -2),
    CoordsXy::new( -2,  -1),
    CoordsXy::new( -1, -15),
    CoordsXy::new(-26,  -1),
    CoordsXy::new(  0,  -2),
    CoordsXy::new( -2,  -1),
    CoordsXy::new( -1, -26),
];

/// Bounding box footprint of each crossbeam. The height is always 1.
#[rustfmt::skip]
pub(crate) const CROSSBEAM_LENGTHS: [CoordsXy; CROSSBEAM_KINDS] = [
    CoordsXy::new(18,  3),
    CoordsXy::new( 3, 18),
    CoordsXy::new(18,  3),
    CoordsXy::new( 3, 18),
    CoordsXy::new(32,  3),
    CoordsXy::new( 3, 32),
    CoordsXy::new(32,  3),
    CoordsXy::new( 3, 32),
];

#[rustfmt::skip]
pub(crate) const METAL_CROSSBEAM_IMAGES: [[u32; CROSSBEAM_KINDS]; MetalSupportType::COUNT] = [
    [3370, 3371, 3370, 3371, 3372, 3373, 3372, 3373], // Tubes
    [3374, 3375, 3374, 3375, 3376, 3377, 3376, 3377], // Fork
    [3374, 3375, 3374, 3375, 3376, 3377, 3376, 3377], // ForkAlt
    [3370, 3371, 3370, 3371, 3372, 3373, 3372, 3373], // Boxed
    [3374, 3375, 3374, 3375, 3376, 3377, 3376, 3377], // Stick
    [3374, 3375, 3374, 3375, 3376, 3377, 3376, 3377], // StickAlt
    [3378, 3383, 3378, 3383, 3380, 3385, 3380, 3385], // ThickCentred
    [3378, 3383, 3378, 3383, 3380, 3385, 3380, 3385], // Thick
    [3382, 3379, 3382, 3379, 3384, 3381, 3384, 3381], // ThickAlt
    [3382, 3379, 3382, 3379, 3384, 3381, 3384, 3381], // ThickAltCentred
    [3378, 3379, 3378, 3379, 3380, 3381, 3380, 3381], // Truss
    [3386, 3387, 3386, 3387, 3388, 3389, 3388, 3389], // TubesInverted
    [3370, 3371, 3370, 3371, 3372, 3373, 3372, 3373], // BoxedCoated
];

#[rustfmt::skip]
pub(crate) const METAL_STEP_HEIGHTS: [u8; MetalSupportType::COUNT] = [
    6, // Tubes
    3, // Fork
    3, // ForkAlt
    6, // Boxed
    3, // Stick
    3, // StickAlt
    6, // ThickCentred
    6, // Thick
    6, // ThickAlt
    6, // ThickAltCentred
    4, // Truss
    3, // TubesInverted
    6, // BoxedCoated
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MetalSupportImages {
    /// First shaped base sprite, or 0 if this type has none
    pub(crate) base: u32,
    /// Beam sprites start here, indexed by beam length - 1
    pub(crate) beam: u32,
}
const fn msi(base: u32, beam: u32) -> MetalSupportImages {
    MetalSupportImages { base, beam }
}

#[rustfmt::skip]
pub(crate) const METAL_SUPPORT_IMAGES: [MetalSupportImages; MetalSupportType::COUNT] = [
    msi(3243, 3209), // Tubes
    msi(3279, 3262), // Fork
    msi(3298, 3262), // ForkAlt
    msi(3334, 3317), // Boxed
    msi(   0, 3658), // Stick
    msi(   0, 3658), // StickAlt
    msi(   0, 3141), // ThickCentred
    msi(   0, 3158), // Thick
    msi(   0, 3175), // ThickAlt
    msi(   0, 3192), // ThickAltCentred
    msi(   0, 3124), // Truss
    msi(3243, 3209), // TubesInverted
    msi(3334, 3353), // BoxedCoated
];

/// Same layout as [METAL_SUPPORT_IMAGES]; used for the extension run on top of a support.
/// Only the tube beams differ.
#[rustfmt::skip]
pub(crate) const METAL_CAP_IMAGES: [MetalSupportImages; MetalSupportType::COUNT] = [
    msi(3243, 3226), // Tubes
    msi(3279, 3262), // Fork
    msi(3298, 3262), // ForkAlt
    msi(3334, 3317), // Boxed
    msi(   0, 3658), // Stick
    msi(   0, 3658), // StickAlt
    msi(   0, 3141), // ThickCentred
    msi(   0, 3158), // Thick
    msi(   0, 3175), // ThickAlt
    msi(   0, 3192), // ThickAltCentred
    msi(   0, 3124), // Truss
    msi(3243, 3226), // TubesInverted
    msi(3334, 3353), // BoxedCoated
];

/// Slope byte (masked) to shaped-base sprite offset, for metal and per-segment path supports.
#[rustfmt::skip]
pub(crate) const METAL_SLOPE_IMAGE_OFFSETS: [u8; 32] = [
     0,  1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14,  0,
     0,  0,  0,  0,  0,  0,  0, 15,  0,  0,  0, 16,  0, 17, 18,  0,
];

/// Slope byte (masked) to shaped-base sprite offset, for wooden and path column supports.
#[rustfmt::skip]
pub(crate) const WOODEN_SLOPE_IMAGE_OFFSETS: [u32; 32] = [
     0,  0,  1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13,  0,
     0,  0,  0,  0,  0,  0,  0, 14,  0,  0,  0, 17,  0, 16, 15,  0,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WoodenSupportImages {
    pub(crate) full: u32,
    pub(crate) half: u32,
    pub(crate) flat: u32,
    /// First shaped base sprite, or 0 if this kind falls back to a flat cap
    pub(crate) slope: u32,
}
const fn wsi(full: u32, half: u32, flat: u32, slope: u32) -> WoodenSupportImages {
    WoodenSupportImages {
        full,
        half,
        flat,
        slope,
    }
}

#[rustfmt::skip]
const WOODEN_SUPPORT_IMAGES: [[WoodenSupportImages; WoodenSupportSubType::COUNT]; WoodenSupportType::COUNT] = [
    // Truss
    [
        wsi(3392, 3393, 3394, 3536),
        wsi(3390, 3391, 3394, 3514),
        wsi(3558, 3559, 3560, 3570),
        wsi(3561, 3562, 3563, 3592),
        wsi(3564, 3565, 3566, 3614),
        wsi(3567, 3568, 3569, 3636),
    ],
    // Mine
    [
        wsi(3677, 3678, 3680, 3739),
        wsi(3675, 3676, 3679, 3717),
        wsi(3761, 3762, 3763, 3773),
        wsi(3764, 3765, 3766, 3795),
        wsi(3767, 3768, 3769, 3817),
        wsi(3770, 3771, 3772, 3839),
    ],
];

pub(crate) fn wooden_support_images(kind: WoodenSupportKind) -> &'static WoodenSupportImages {
    &WOODEN_SUPPORT_IMAGES[kind.support_type as usize][kind.sub_type as usize]
}

/// A curved transition sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CurveSprite {
    None,
    /// A fixed legacy sprite index
    Legacy(u32),
    /// Offset into the catalog's extended support range
    Extended(u32),
}

/// Rows covered by the legacy curve sprites; rows after this only exist in the extended range.
const LEGACY_CURVE_ROWS: usize = 49;

const fn curve_table(first_legacy: u32, extended: bool) -> [CurveSprite; WOODEN_TRANSITION_ROWS] {
    let mut table = [CurveSprite::None; WOODEN_TRANSITION_ROWS];
    let mut row = 0;
    while row < LEGACY_CURVE_ROWS {
        table[row] = CurveSprite::Legacy(first_legacy + row as u32);
        row += 1;
    }
    if extended {
        while row < WOODEN_TRANSITION_ROWS {
            table[row] = CurveSprite::Extended((row - LEGACY_CURVE_ROWS) as u32);
            row += 1;
        }
    }
    table
}

const TRUSS_CURVES: [CurveSprite; WOODEN_TRANSITION_ROWS] = curve_table(3465, true);
const MINE_CURVES: [CurveSprite; WOODEN_TRANSITION_ROWS] = curve_table(3681, false);

/// Curve artwork only exists for the straight (non-corner) sub-types.
pub(crate) fn curve_sprites(
    kind: WoodenSupportKind,
) -> Option<&'static [CurveSprite; WOODEN_TRANSITION_ROWS]> {
    use WoodenSupportSubType::*;
    match (kind.support_type, kind.sub_type) {
        (WoodenSupportType::Truss, NeSw | NwSe) => Some(&TRUSS_CURVES),
        (WoodenSupportType::Mine, NeSw | NwSe) => Some(&MINE_CURVES),
        (_, Corner0 | Corner1 | Corner2 | Corner3) => None,
    }
}

/// How a transition sprite is boxed, and where it goes in the paint tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TransitionDescriptor {
    /// Relative to the top of the support column
    pub(crate) bound_box: BoundBoxXyz,
    /// Draw beneath the session's prepend target rather than as a normal child
    pub(crate) prepend: bool,
    /// Set on every row of the shipped tables. Still checked so that a table without it
    /// suppresses curves rather than drawing them.
    pub(crate) allows_curve: bool,
}
const fn td(
    offset: (i32, i32, i32),
    length: (i32, i32, i32),
    prepend: bool,
) -> TransitionDescriptor {
    TransitionDescriptor {
        bound_box: BoundBoxXyz::new(
            CoordsXyz::new(offset.0, offset.1, offset.2),
            CoordsXyz::new(length.0, length.1, length.2),
        ),
        prepend,
        allows_curve: true,
    }
}

const TD_PLAIN: TransitionDescriptor = td((0, 0, 0), (1, 1, 8), false);
const TD_LOW: TransitionDescriptor = td((0, 0, 0), (1, 1, 4), false);

#[rustfmt::skip]
pub(crate) const WOODEN_TRANSITIONS: [TransitionDescriptor; WOODEN_TRANSITION_ROWS] = [
    // Flat to gentle
    TD_PLAIN, TD_PLAIN, TD_PLAIN, TD_PLAIN,
    // Gentle to flat
    TD_PLAIN, TD_PLAIN, TD_PLAIN, TD_PLAIN,
    // Gentle
    TD_PLAIN, TD_PLAIN, TD_PLAIN, TD_PLAIN,
    // Gentle to steep
    TD_PLAIN,
    td((10, 0, 0), (10, 32, 44), true),
    td((0, 10, 0), (32, 10, 44), true),
    TD_PLAIN,
    // Steep to gentle
    TD_PLAIN,
    td((10, 0, 0), (10, 32, 44), true),
    td((0, 10, 0), (32, 10, 44), true),
    TD_PLAIN,
    // Steep
    TD_PLAIN,
    td((10, 0, 2), (10, 32, 76), true),
    td((0, 10, 2), (32, 10, 76), true),
    TD_PLAIN,
    // Gentle, railway
    TD_LOW, TD_LOW, TD_LOW, TD_LOW,
    // Flat to steep
    TD_PLAIN, TD_PLAIN, TD_PLAIN, TD_PLAIN,
    // Steep to flat
    TD_PLAIN, TD_PLAIN, TD_PLAIN, TD_PLAIN,
    // Groups 9 to 11, unnamed
    TD_PLAIN, TD_PLAIN, TD_PLAIN, TD_PLAIN,
    TD_PLAIN, TD_PLAIN, TD_PLAIN, TD_PLAIN,
    TD_PLAIN, TD_PLAIN, TD_PLAIN, TD_PLAIN,
    // Scenery, all directions
    td((2, 2, 1), (28, 28, 2), false),
    // Flat to steep, long base 0..3
    TD_PLAIN, TD_PLAIN, TD_PLAIN, TD_PLAIN,
    TD_PLAIN, TD_PLAIN, TD_PLAIN, TD_PLAIN,
    TD_PLAIN, TD_PLAIN, TD_PLAIN, TD_PLAIN,
    TD_PLAIN,
    td((10, 0, 2), (10, 32, 52), true),
    td((0, 10, 2), (32, 10, 52), true),
    TD_PLAIN,
    // Steep to flat, long base 0..3
    TD_PLAIN,
    td((10, 0, 2), (10, 32, 76), true),
    td((0, 10, 2), (32, 10, 76), true),
    TD_PLAIN,
    TD_PLAIN, TD_PLAIN, TD_PLAIN, TD_PLAIN,
    TD_PLAIN, TD_PLAIN, TD_PLAIN, TD_PLAIN,
    TD_PLAIN, TD_PLAIN, TD_PLAIN, TD_PLAIN,
];

pub(crate) const PATH_TRANSITIONS: [TransitionDescriptor; PATH_TRANSITION_ROWS] =
    [TD_LOW, TD_LOW, TD_LOW, TD_LOW];

#[rustfmt::skip]
pub(crate) const ROTATED_WOODEN_SUB_TYPES: [[WoodenSupportSubType; Direction::COUNT]; WoodenSupportSubType::COUNT] = {
    use WoodenSupportSubType::*;
    [
        [NeSw,    NwSe,    NeSw,    NwSe],
        [NwSe,    NeSw,    NwSe,    NeSw],
        [Corner0, Corner1, Corner2, Corner3],
        [Corner1, Corner2, Corner3, Corner0],
        [Corner2, Corner3, Corner0, Corner1],
        [Corner3, Corner0, Corner1, Corner2],
    ]
};

#[rustfmt::skip]
pub(crate) const ROTATED_METAL_SUPPORTS: [[MetalSupportType; Direction::COUNT]; MetalSupportType::COUNT] = {
    use MetalSupportType::*;
    [
        [Tubes,           Tubes,           Tubes,           Tubes],
        [Fork,            ForkAlt,         Fork,            ForkAlt],
        [ForkAlt,         Fork,            ForkAlt,         Fork],
        [Boxed,           Boxed,           Boxed,           Boxed],
        [Stick,           StickAlt,        Stick,           StickAlt],
        [StickAlt,        Stick,           StickAlt,        Stick],
        [ThickCentred,    ThickAltCentred, Thick,           ThickAlt],
        [Thick,           ThickAlt,        ThickCentred,    ThickAltCentred],
        [ThickAlt,        ThickCentred,    ThickAltCentred, Thick],
        [ThickAltCentred, Thick,           ThickAlt,        ThickCentred],
        [Truss,           Truss,           Truss,           Truss],
        [TubesInverted,   TubesInverted,   TubesInverted,   TubesInverted],
        [BoxedCoated,     BoxedCoated,     BoxedCoated,     BoxedCoated],
    ]
};
