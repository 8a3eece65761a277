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
use thiserror::Error;

use crate::constants::WOODEN_TRANSITION_ROWS;
use crate::coordinates::Direction;
use crate::tables;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SupportError {
    #[error("Wooden support index {0} out of range (max is 11)")]
    WoodenIndexOutOfRange(u8),
    #[error("Wooden support sub-type {0} out of range (max is 5)")]
    WoodenSubTypeOutOfRange(u8),
    #[error("Metal support type {0} out of range (max is 12)")]
    MetalTypeOutOfRange(u8),
    #[error("Tile segment {0} out of range (max is 8)")]
    SegmentOutOfRange(u8),
    #[error("Transition type {0} is not a known transition")]
    UnknownTransition(u8),
    #[error("Transition row {0} out of range (max is {1})")]
    TransitionRowOutOfRange(usize, usize),
    #[error("Extended support sprites at {0} would overlap the legacy support sprites (ending at {1})")]
    ExtendedRangeOverlapsLegacy(u32, u32),
    #[error("Extended support sprites at {0} run past the end of the sprite index space")]
    ExtendedRangeOverflows(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WoodenSupportType {
    Truss = 0,
    Mine = 1,
}
impl WoodenSupportType {
    pub const COUNT: usize = 2;
    pub const ALL: [WoodenSupportType; Self::COUNT] =
        [WoodenSupportType::Truss, WoodenSupportType::Mine];
}

/// Which way a wooden support beam runs across the tile, or which corner it sits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WoodenSupportSubType {
    NeSw = 0,
    NwSe = 1,
    Corner0 = 2,
    Corner1 = 3,
    Corner2 = 4,
    Corner3 = 5,
}
impl WoodenSupportSubType {
    pub const COUNT: usize = 6;
    pub const ALL: [WoodenSupportSubType; Self::COUNT] = [
        WoodenSupportSubType::NeSw,
        WoodenSupportSubType::NwSe,
        WoodenSupportSubType::Corner0,
        WoodenSupportSubType::Corner1,
        WoodenSupportSubType::Corner2,
        WoodenSupportSubType::Corner3,
    ];

    /// Converts an object-space sub-type to screen space for the given view direction.
    pub fn rotated(self, direction: Direction) -> WoodenSupportSubType {
        tables::ROTATED_WOODEN_SUB_TYPES[self as usize][direction.index()]
    }
}
impl TryFrom<u8> for WoodenSupportSubType {
    type Error = SupportError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(SupportError::WoodenSubTypeOutOfRange(value))
    }
}

/// A wooden support type together with its sub-type. This is one row of the wooden sprite tables.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WoodenSupportKind {
    pub support_type: WoodenSupportType,
    pub sub_type: WoodenSupportSubType,
}
impl WoodenSupportKind {
    pub const COUNT: usize = WoodenSupportType::COUNT * WoodenSupportSubType::COUNT;

    pub const fn new(support_type: WoodenSupportType, sub_type: WoodenSupportSubType) -> Self {
        Self {
            support_type,
            sub_type,
        }
    }
    /// The legacy row index, `type * 6 + sub_type`.
    #[inline]
    pub const fn legacy_index(&self) -> usize {
        self.support_type as usize * WoodenSupportSubType::COUNT + self.sub_type as usize
    }
    pub fn from_legacy_index(index: u8) -> Result<Self, SupportError> {
        let support_type = WoodenSupportType::ALL
            .get(index as usize / WoodenSupportSubType::COUNT)
            .copied()
            .ok_or(SupportError::WoodenIndexOutOfRange(index))?;
        let sub_type = WoodenSupportSubType::ALL[index as usize % WoodenSupportSubType::COUNT];
        Ok(Self::new(support_type, sub_type))
    }
}
impl Debug for WoodenSupportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:?}/{:?}", self.support_type, self.sub_type))
    }
}

/// The shape of track (or scenery) a wooden support has to transition into.
///
/// The discriminants are the group numbers of the transition tables: each group has four rows,
/// one per direction, except for [WoodenSupportTransitionType::Scenery], which has one.
/// Groups 9 to 11 have table rows but no named transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WoodenSupportTransitionType {
    FlatToUp25Deg = 0,
    Up25DegToFlat = 1,
    Up25Deg = 2,
    Up25DegToUp60Deg = 3,
    Up60DegToUp25Deg = 4,
    Up60Deg = 5,
    Up25DegRailway = 6,
    FlatToUp60Deg = 7,
    Up60DegToFlat = 8,
    Scenery = 12,
    FlatToUp60DegLongBaseSeq0 = 13,
    FlatToUp60DegLongBaseSeq1 = 14,
    FlatToUp60DegLongBaseSeq2 = 15,
    FlatToUp60DegLongBaseSeq3 = 16,
    Up60DegToFlatLongBaseSeq0 = 17,
    Up60DegToFlatLongBaseSeq1 = 18,
    Up60DegToFlatLongBaseSeq2 = 19,
    Up60DegToFlatLongBaseSeq3 = 20,
}
impl WoodenSupportTransitionType {
    pub const ALL: [WoodenSupportTransitionType; 18] = [
        Self::FlatToUp25Deg,
        Self::Up25DegToFlat,
        Self::Up25Deg,
        Self::Up25DegToUp60Deg,
        Self::Up60DegToUp25Deg,
        Self::Up60Deg,
        Self::Up25DegRailway,
        Self::FlatToUp60Deg,
        Self::Up60DegToFlat,
        Self::Scenery,
        Self::FlatToUp60DegLongBaseSeq0,
        Self::FlatToUp60DegLongBaseSeq1,
        Self::FlatToUp60DegLongBaseSeq2,
        Self::FlatToUp60DegLongBaseSeq3,
        Self::Up60DegToFlatLongBaseSeq0,
        Self::Up60DegToFlatLongBaseSeq1,
        Self::Up60DegToFlatLongBaseSeq2,
        Self::Up60DegToFlatLongBaseSeq3,
    ];
}
impl TryFrom<u8> for WoodenSupportTransitionType {
    type Error = SupportError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .find(|t| **t as u8 == value)
            .copied()
            .ok_or(SupportError::UnknownTransition(value))
    }
}

/// A row in a transition descriptor table (wooden curves, or path transitions).
///
/// Older drawing code passes this around as a "special" code: the row plus one, with zero
/// meaning "no transition". [TransitionRow::from_special_code] and [TransitionRow::to_special_code]
/// are the only places that encoding is handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransitionRow(u8);
impl TransitionRow {
    pub fn new(row: usize) -> Result<Self, SupportError> {
        if row >= WOODEN_TRANSITION_ROWS {
            return Err(SupportError::TransitionRowOutOfRange(
                row,
                WOODEN_TRANSITION_ROWS - 1,
            ));
        }
        Ok(TransitionRow(row as u8))
    }
    pub const fn from_transition(
        transition: WoodenSupportTransitionType,
        direction: Direction,
    ) -> TransitionRow {
        let group = transition as usize;
        let scenery = WoodenSupportTransitionType::Scenery as usize;
        let row = if group < scenery {
            group * Direction::COUNT + direction.index()
        } else if group == scenery {
            // Scenery has a single row that applies to every direction
            group * Direction::COUNT
        } else {
            // ...so every group after it is shifted back by the three rows it doesn't have
            group * Direction::COUNT + direction.index() - 3
        };
        TransitionRow(row as u8)
    }
    /// Decodes a legacy special code. Zero means no transition.
    pub const fn from_special_code(code: u16) -> Option<TransitionRow> {
        if code == 0 || code as usize > WOODEN_TRANSITION_ROWS {
            None
        } else {
            Some(TransitionRow((code - 1) as u8))
        }
    }
    pub const fn to_special_code(self) -> u16 {
        self.0 as u16 + 1
    }
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The material/style of a metal support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetalSupportType {
    Tubes = 0,
    Fork = 1,
    ForkAlt = 2,
    Boxed = 3,
    Stick = 4,
    StickAlt = 5,
    ThickCentred = 6,
    Thick = 7,
    ThickAlt = 8,
    ThickAltCentred = 9,
    Truss = 10,
    TubesInverted = 11,
    BoxedCoated = 12,
}
impl MetalSupportType {
    pub const COUNT: usize = 13;
    pub const ALL: [MetalSupportType; Self::COUNT] = [
        MetalSupportType::Tubes,
        MetalSupportType::Fork,
        MetalSupportType::ForkAlt,
        MetalSupportType::Boxed,
        MetalSupportType::Stick,
        MetalSupportType::StickAlt,
        MetalSupportType::ThickCentred,
        MetalSupportType::Thick,
        MetalSupportType::ThickAlt,
        MetalSupportType::ThickAltCentred,
        MetalSupportType::Truss,
        MetalSupportType::TubesInverted,
        MetalSupportType::BoxedCoated,
    ];

    /// The variant to draw when the piece is viewed from `direction`.
    pub fn rotated(self, direction: Direction) -> MetalSupportType {
        tables::ROTATED_METAL_SUPPORTS[self as usize][direction.index()]
    }
    /// How far below the target height a backfilled support stub ends.
    pub fn step_height(self) -> i32 {
        tables::METAL_STEP_HEIGHTS[self as usize] as i32
    }
}
impl TryFrom<u8> for MetalSupportType {
    type Error = SupportError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(SupportError::MetalTypeOutOfRange(value))
    }
}

/// One of the nine logical areas of a tile. Metal and per-segment path supports stand on one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileSegment {
    TopCorner = 0,
    LeftCorner = 1,
    RightCorner = 2,
    BottomCorner = 3,
    Centre = 4,
    TopLeftSide = 5,
    TopRightSide = 6,
    BottomLeftSide = 7,
    BottomRightSide = 8,
}
impl TileSegment {
    pub const COUNT: usize = 9;
    pub const ALL: [TileSegment; Self::COUNT] = [
        TileSegment::TopCorner,
        TileSegment::LeftCorner,
        TileSegment::RightCorner,
        TileSegment::BottomCorner,
        TileSegment::Centre,
        TileSegment::TopLeftSide,
        TileSegment::TopRightSide,
        TileSegment::BottomLeftSide,
        TileSegment::BottomRightSide,
    ];
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
    /// Where sprites standing on this segment are anchored.
    #[inline]
    pub fn anchor(self) -> crate::coordinates::CoordsXy {
        tables::SEGMENT_ANCHORS[self as usize]
    }
}
impl TryFrom<u8> for TileSegment {
    type Error = SupportError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(SupportError::SegmentOutOfRange(value))
    }
}

/// An extra run of beam drawn on top of a metal support, for pieces that sit higher than the
/// height the ledger tracks (e.g. the raised end of a slope).
///
/// Legacy code passes this as a signed integer; a negative value means the run starts one
/// unit lower. [MetalExtension::from_special] and [MetalExtension::to_special] convert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetalExtension {
    pub length: u16,
    #[serde(default)]
    pub lowered: bool,
}
impl MetalExtension {
    pub const fn new(length: u16) -> Self {
        Self {
            length,
            lowered: false,
        }
    }
    pub const fn lowered(length: u16) -> Self {
        Self {
            length,
            lowered: true,
        }
    }
    pub fn from_special(special: i32) -> Option<Self> {
        match special {
            0 => None,
            s if s < 0 => Some(Self::lowered(s.unsigned_abs().min(u16::MAX as u32) as u16)),
            s => Some(Self::new(s.min(u16::MAX as i32) as u16)),
        }
    }
    pub fn to_special(self) -> i32 {
        if self.lowered {
            -(self.length as i32)
        } else {
            self.length as i32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orderings_match_ordinals() {
        for (i, t) in MetalSupportType::ALL.iter().enumerate() {
            assert_eq!(*t as usize, i);
        }
        for (i, t) in TileSegment::ALL.iter().enumerate() {
            assert_eq!(*t as usize, i);
        }
        for (i, t) in WoodenSupportSubType::ALL.iter().enumerate() {
            assert_eq!(*t as usize, i);
        }
        for (i, t) in WoodenSupportType::ALL.iter().enumerate() {
            assert_eq!(*t as usize, i);
        }
    }

    #[test]
    fn wooden_legacy_index_roundtrip() {
        for index in 0..WoodenSupportKind::COUNT as u8 {
            let kind = WoodenSupportKind::from_legacy_index(index).unwrap();
            assert_eq!(kind.legacy_index(), index as usize);
        }
        let mine_corner = WoodenSupportKind::from_legacy_index(9).unwrap();
        assert_eq!(mine_corner.support_type, WoodenSupportType::Mine);
        assert_eq!(mine_corner.sub_type, WoodenSupportSubType::Corner1);
        assert_eq!(
            WoodenSupportKind::from_legacy_index(12),
            Err(SupportError::WoodenIndexOutOfRange(12))
        );
    }

    #[test]
    fn transition_rows() {
        use WoodenSupportTransitionType as T;
        assert_eq!(TransitionRow::from_transition(T::FlatToUp25Deg, Direction::West).index(), 0);
        assert_eq!(TransitionRow::from_transition(T::Up25DegToUp60Deg, Direction::North).index(), 13);
        assert_eq!(TransitionRow::from_transition(T::Up60Deg, Direction::East).index(), 22);
        // Scenery ignores direction
        for d in Direction::ALL {
            assert_eq!(TransitionRow::from_transition(T::Scenery, d).index(), 48);
        }
        assert_eq!(
            TransitionRow::from_transition(T::FlatToUp60DegLongBaseSeq0, Direction::West).index(),
            49
        );
        assert_eq!(
            TransitionRow::from_transition(T::Up60DegToFlatLongBaseSeq3, Direction::South).index(),
            80
        );
    }

    #[test]
    fn transition_rows_in_range_for_every_transition() {
        for t in WoodenSupportTransitionType::ALL {
            for d in Direction::ALL {
                assert!(TransitionRow::from_transition(t, d).index() < WOODEN_TRANSITION_ROWS);
            }
        }
    }

    #[test]
    fn special_codes() {
        assert_eq!(TransitionRow::from_special_code(0), None);
        assert_eq!(TransitionRow::from_special_code(82), None);
        let row = TransitionRow::from_special_code(14).unwrap();
        assert_eq!(row.index(), 13);
        assert_eq!(row.to_special_code(), 14);
        assert!(TransitionRow::new(81).is_err());
    }

    #[test]
    fn metal_extension_codes() {
        assert_eq!(MetalExtension::from_special(0), None);
        assert_eq!(MetalExtension::from_special(8), Some(MetalExtension::new(8)));
        assert_eq!(MetalExtension::from_special(-8), Some(MetalExtension::lowered(8)));
        assert_eq!(MetalExtension::lowered(8).to_special(), -8);
        assert_eq!(MetalExtension::new(12).to_special(), 12);
    }

    #[test]
    fn raw_conversions() {
        assert_eq!(MetalSupportType::try_from(10), Ok(MetalSupportType::Truss));
        assert_eq!(
            MetalSupportType::try_from(13),
            Err(SupportError::MetalTypeOutOfRange(13))
        );
        assert_eq!(TileSegment::try_from(4), Ok(TileSegment::Centre));
        assert!(TileSegment::try_from(9).is_err());
        assert_eq!(
            WoodenSupportTransitionType::try_from(12),
            Ok(WoodenSupportTransitionType::Scenery)
        );
        assert_eq!(
            WoodenSupportTransitionType::try_from(10),
            Err(SupportError::UnknownTransition(10))
        );
    }
}
