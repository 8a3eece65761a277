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
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A 2D offset within a tile, in tile-local units (a tile is 32 units wide).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CoordsXy {
    pub x: i32,
    pub y: i32,
}
impl CoordsXy {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
    #[inline]
    pub const fn with_z(self, z: i32) -> CoordsXyz {
        CoordsXyz {
            x: self.x,
            y: self.y,
            z,
        }
    }
}
impl Debug for CoordsXy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[{}, {}]", self.x, self.y))
    }
}
impl Add for CoordsXy {
    type Output = CoordsXy;

    fn add(self, rhs: Self) -> Self::Output {
        CoordsXy::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// A 3D offset. Z is height, in the same units the support ledger uses (16 per half step).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CoordsXyz {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}
impl CoordsXyz {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}
impl Debug for CoordsXyz {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[{}, {}, {}]", self.x, self.y, self.z))
    }
}

/// A bounding box used for occlusion sorting of a single sprite.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BoundBoxXyz {
    pub offset: CoordsXyz,
    pub length: CoordsXyz,
}
impl BoundBoxXyz {
    pub const fn new(offset: CoordsXyz, length: CoordsXyz) -> Self {
        Self { offset, length }
    }
    /// A box that starts at the sprite's own offset.
    #[inline]
    pub const fn at(offset: CoordsXyz, length: CoordsXyz) -> Self {
        Self { offset, length }
    }
    /// Returns this box raised by `dz`.
    #[inline]
    pub const fn raised(self, dz: i32) -> Self {
        BoundBoxXyz {
            offset: CoordsXyz::new(self.offset.x, self.offset.y, self.offset.z + dz),
            length: self.length,
        }
    }
}
impl Debug for BoundBoxXyz {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:?}+{:?}", self.offset, self.length))
    }
}

/// One of the four orthogonal view rotations.
///
/// Note that rotation tables in this crate are all indexed by [Direction::index], so the order
/// of these variants must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    West = 0,
    North = 1,
    East = 2,
    South = 3,
}
impl Direction {
    pub const COUNT: usize = 4;
    pub const ALL: [Direction; Direction::COUNT] = [
        Direction::West,
        Direction::North,
        Direction::East,
        Direction::South,
    ];

    /// Interprets the lowest two bits of `rotation`, wrapping larger values.
    pub const fn from_rotation(rotation: u8) -> Direction {
        Self::ALL[(rotation & 3) as usize]
    }
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
    #[inline]
    pub const fn is_odd(self) -> bool {
        (self as u8) & 1 == 1
    }
    /// Rotates clockwise by `quarter_turns`.
    pub const fn rotate(self, quarter_turns: u8) -> Direction {
        Self::from_rotation((self as u8).wrapping_add(quarter_turns))
    }
}

/// Rounds `value` down to a multiple of `step`, which must be a power of two.
#[inline]
pub const fn floor2(value: i32, step: i32) -> i32 {
    value & !(step - 1)
}

/// Rounds `value` up to a multiple of `step`, which must be a power of two.
#[inline]
pub const fn ceil2(value: i32, step: i32) -> i32 {
    (value + (step - 1)) & !(step - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding() {
        assert_eq!(floor2(0, 16), 0);
        assert_eq!(floor2(15, 16), 0);
        assert_eq!(floor2(16, 16), 16);
        assert_eq!(floor2(47, 16), 32);
        assert_eq!(ceil2(0, 16), 0);
        assert_eq!(ceil2(1, 16), 16);
        assert_eq!(ceil2(16, 16), 16);
        assert_eq!(ceil2(17, 16), 32);
        // ceil2 is floor2 after adding step - 1
        for v in 0..200 {
            assert_eq!(ceil2(v, 16), floor2(v + 15, 16));
        }
    }

    #[test]
    fn direction_wraps() {
        assert_eq!(Direction::from_rotation(5), Direction::North);
        assert_eq!(Direction::South.rotate(1), Direction::West);
        assert!(Direction::North.is_odd());
        assert!(!Direction::East.is_odd());
        for (i, d) in Direction::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
        }
    }

    #[test]
    fn bound_box_raise() {
        let b = BoundBoxXyz::new(CoordsXyz::new(10, 0, 2), CoordsXyz::new(10, 32, 76));
        assert_eq!(b.raised(48).offset, CoordsXyz::new(10, 0, 50));
        assert_eq!(b.raised(48).length, b.length);
    }
}
