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

//! Per-segment record of how high supports already reach on the tile being painted.

use std::fmt::Debug;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use serde::{Deserialize, Serialize};

use crate::constants::{slope, SEGMENT_HEIGHT_BLOCKED};
use crate::support_types::TileSegment;

/// The top of whatever a support column would stand on, and its shape.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupportHeight {
    pub height: u16,
    pub slope: u8,
}
impl SupportHeight {
    pub const fn new(height: u16, slope: u8) -> Self {
        Self { height, slope }
    }
    /// Flat ground at height 0.
    pub const GROUND: SupportHeight = SupportHeight::new(0, slope::FLAT);
    /// Nothing may be stacked here any more.
    pub const FINALIZED: SupportHeight =
        SupportHeight::new(SEGMENT_HEIGHT_BLOCKED, slope::FLAT_CAP);

    #[inline]
    pub const fn is_blocked(&self) -> bool {
        self.height == SEGMENT_HEIGHT_BLOCKED
    }
    #[inline]
    pub const fn has_flat_cap(&self) -> bool {
        self.slope & slope::FLAT_CAP != 0
    }
    /// The slope bits that select a shaped base sprite.
    #[inline]
    pub const fn surface_slope(&self) -> usize {
        (self.slope & slope::SURFACE_SLOPE_MASK) as usize
    }
}
impl Default for SupportHeight {
    fn default() -> Self {
        Self::GROUND
    }
}
impl Debug for SupportHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_blocked() {
            f.write_fmt(format_args!("blocked/{:#04x}", self.slope))
        } else {
            f.write_fmt(format_args!("{}/{:#04x}", self.height, self.slope))
        }
    }
}

/// A set of tile segments.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentMask(u16);
impl SegmentMask {
    pub const NONE: SegmentMask = SegmentMask(0);
    pub const ALL: SegmentMask = SegmentMask((1 << TileSegment::COUNT) - 1);
    pub const CORNERS: SegmentMask = SegmentMask(0b0_0000_1111);
    pub const CENTRE: SegmentMask = SegmentMask(0b0_0001_0000);
    pub const SIDES: SegmentMask = SegmentMask(0b1_1110_0000);

    #[inline]
    pub const fn of(segment: TileSegment) -> SegmentMask {
        SegmentMask(1 << segment as u16)
    }
    #[inline]
    pub const fn contains(self, segment: TileSegment) -> bool {
        self.0 & (1 << segment as u16) != 0
    }
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
    pub fn iter(self) -> impl Iterator<Item = TileSegment> {
        TileSegment::ALL
            .into_iter()
            .filter(move |segment| self.contains(*segment))
    }
}
impl From<TileSegment> for SegmentMask {
    fn from(segment: TileSegment) -> Self {
        SegmentMask::of(segment)
    }
}
impl FromIterator<TileSegment> for SegmentMask {
    fn from_iter<T: IntoIterator<Item = TileSegment>>(iter: T) -> Self {
        iter.into_iter()
            .fold(SegmentMask::NONE, |mask, segment| mask | segment.into())
    }
}
impl Debug for SegmentMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

macro_rules! delegate_mask_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait for SegmentMask {
            type Output = Self;
            #[inline]
            fn $method(self, rhs: Self) -> Self::Output {
                SegmentMask(self.0 $op rhs.0)
            }
        }
        impl $assign_trait for SegmentMask {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                self.0 = self.0 $op rhs.0;
            }
        }
    };
}
delegate_mask_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
delegate_mask_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);

impl Not for SegmentMask {
    type Output = Self;
    #[inline]
    fn not(self) -> Self::Output {
        SegmentMask(!self.0 & SegmentMask::ALL.0)
    }
}

/// Support heights for the nine segments of one tile.
///
/// This is reset at the start of every tile and must never be shared between tiles.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentLedger {
    segments: [SupportHeight; TileSegment::COUNT],
}
impl SegmentLedger {
    pub const fn new() -> Self {
        Self {
            segments: [SupportHeight::GROUND; TileSegment::COUNT],
        }
    }
    /// A ledger where every segment is blocked, which is how a tile starts before its surface
    /// has been painted.
    pub const fn blocked() -> Self {
        Self {
            segments: [SupportHeight::FINALIZED; TileSegment::COUNT],
        }
    }

    #[inline]
    pub fn get(&self, segment: TileSegment) -> SupportHeight {
        self.segments[segment.index()]
    }
    #[inline]
    pub fn set(&mut self, segment: TileSegment, record: SupportHeight) {
        self.segments[segment.index()] = record;
    }
    /// Marks a segment as done. `height` is normally [SEGMENT_HEIGHT_BLOCKED], but a backfilled
    /// metal stub records the height it was drawn up to instead.
    pub fn finalize(&mut self, segment: TileSegment, height: u16) {
        self.set(segment, SupportHeight::new(height, slope::FLAT_CAP));
    }
    pub fn reset(&mut self) {
        *self = Self::new();
    }
    pub fn set_segments(&mut self, mask: SegmentMask, height: u16, slope: u8) {
        for segment in mask.iter() {
            self.set(segment, SupportHeight::new(height, slope));
        }
    }
    pub fn iter(&self) -> impl Iterator<Item = (TileSegment, SupportHeight)> + '_ {
        TileSegment::ALL.into_iter().zip(self.segments.iter().copied())
    }
}
impl Default for SegmentLedger {
    fn default() -> Self {
        Self::new()
    }
}
impl Debug for SegmentLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_groups_partition_the_tile() {
        assert_eq!(SegmentMask::CORNERS | SegmentMask::CENTRE | SegmentMask::SIDES, SegmentMask::ALL);
        assert!((SegmentMask::CORNERS & SegmentMask::SIDES).is_empty());
        assert_eq!(SegmentMask::ALL.iter().count(), TileSegment::COUNT);
        assert_eq!(
            SegmentMask::CENTRE.iter().collect::<Vec<_>>(),
            vec![TileSegment::Centre]
        );
        assert_eq!(!SegmentMask::CENTRE, SegmentMask::CORNERS | SegmentMask::SIDES);
        assert!(SegmentMask::SIDES.contains(TileSegment::BottomLeftSide));
        assert!(!SegmentMask::SIDES.contains(TileSegment::TopCorner));
    }

    #[test]
    fn mask_from_segments() {
        let mask: SegmentMask = [TileSegment::TopCorner, TileSegment::Centre].into_iter().collect();
        assert!(mask.contains(TileSegment::TopCorner));
        assert!(mask.contains(TileSegment::Centre));
        assert_eq!(mask.iter().count(), 2);
    }

    #[test]
    fn set_and_finalize() {
        let mut ledger = SegmentLedger::new();
        ledger.set_segments(SegmentMask::SIDES, 48, slope::FLAT);
        assert_eq!(ledger.get(TileSegment::TopLeftSide).height, 48);
        assert_eq!(ledger.get(TileSegment::Centre).height, 0);

        ledger.finalize(TileSegment::TopLeftSide, SEGMENT_HEIGHT_BLOCKED);
        let record = ledger.get(TileSegment::TopLeftSide);
        assert!(record.is_blocked());
        assert!(record.has_flat_cap());

        ledger.reset();
        assert_eq!(ledger, SegmentLedger::new());
        assert!(SegmentLedger::blocked().iter().all(|(_, r)| r.is_blocked()));
    }

    #[test]
    fn surface_slope_drops_flat_cap_bit() {
        let record = SupportHeight::new(16, slope::FLAT_CAP | 0x0B);
        assert_eq!(record.surface_slope(), 0x0B);
        let steep = SupportHeight::new(16, slope::DOUBLE_HEIGHT | 0x0B);
        assert_eq!(steep.surface_slope(), 0x1B);
    }
}
