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

//! The parts of a paint session that support placement reads and writes.
//!
//! The renderer owns one [TileSupportState] per tile being painted and hands it to every placement
//! call for that tile, together with a [PaintSink] that receives the sprites.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::constants::slope;
use crate::coordinates::{BoundBoxXyz, CoordsXyz, Direction};
use crate::image::{ImageId, ImageTemplate};
use crate::ledger::{SegmentLedger, SegmentMask, SupportHeight};

/// Viewport options that affect support drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewFlags(u8);
impl ViewFlags {
    pub const NONE: ViewFlags = ViewFlags(0);
    /// Supports are see-through, or skipped entirely if [ViewFlags::INVISIBLE_SUPPORTS] is also set
    pub const HIDE_SUPPORTS: ViewFlags = ViewFlags(1 << 0);
    /// Only meaningful together with [ViewFlags::HIDE_SUPPORTS]
    pub const INVISIBLE_SUPPORTS: ViewFlags = ViewFlags(1 << 1);

    #[inline]
    pub const fn contains(self, other: ViewFlags) -> bool {
        self.0 & other.0 == other.0
    }
}
impl BitOr for ViewFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        ViewFlags(self.0 | rhs.0)
    }
}

/// Support-related state of the tile currently being painted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSupportState {
    /// Whether the tile's surface has been painted yet. Supports need ground to stand on.
    pub passed_surface: bool,
    pub view_flags: ViewFlags,
    pub rotation: Direction,
    /// Height of the water surface on this tile, or 0 if there is none
    pub water_height: i32,
    /// Top of the general (whole-tile) support column, used by wooden and path column supports
    pub support: SupportHeight,
    /// Per-segment tops, used by metal and per-segment path supports
    pub segments: SegmentLedger,
}
impl Default for TileSupportState {
    fn default() -> Self {
        Self {
            passed_surface: false,
            view_flags: ViewFlags::NONE,
            rotation: Direction::West,
            water_height: 0,
            support: SupportHeight::GROUND,
            segments: SegmentLedger::new(),
        }
    }
}
impl TileSupportState {
    /// State for a tile whose surface is flat ground at height 0 and has already been painted.
    pub fn on_flat_ground(rotation: Direction) -> Self {
        Self {
            passed_surface: true,
            rotation,
            ..Default::default()
        }
    }

    /// Resets everything that is tracked per tile. View flags and rotation carry over.
    pub fn begin_tile(&mut self) {
        self.passed_surface = false;
        self.water_height = 0;
        self.support = SupportHeight::GROUND;
        self.segments.reset();
    }

    /// Raises the general support column to `height`. Lower heights are ignored.
    pub fn set_general_support_height(&mut self, height: u16) {
        if self.support.height < height {
            self.support = SupportHeight::new(height, slope::FLAT_CAP);
        }
    }
    /// Overwrites the general support column, including its slope.
    pub fn force_general_support_height(&mut self, height: u16, slope: u8) {
        self.support = SupportHeight::new(height, slope);
    }

    pub fn set_segment_support_height(&mut self, mask: SegmentMask, height: u16, slope: u8) {
        self.segments.set_segments(mask, height, slope);
    }

    /// The template sprites should actually be drawn with, or None if supports must not be
    /// drawn at all.
    pub(crate) fn effective_template(&self, template: ImageTemplate) -> Option<ImageTemplate> {
        if !self.passed_surface {
            return None;
        }
        if self.view_flags.contains(ViewFlags::HIDE_SUPPORTS) {
            if self.view_flags.contains(ViewFlags::INVISIBLE_SUPPORTS) {
                return None;
            }
            return Some(ImageTemplate::darkened());
        }
        Some(template)
    }
}

/// Handle to a node in the paint tree, as returned by [PaintSink::add_image_as_orphan].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaintNodeId(pub u32);

/// Receives the sprites placed by support drawing. Implemented by the renderer's paint session.
pub trait PaintSink {
    /// Adds a sprite as a normal node, sorted against everything else on the tile.
    fn add_image_as_parent(&mut self, image: ImageId, offset: CoordsXyz, bound_box: BoundBoxXyz);

    /// Adds a sprite that isn't attached anywhere yet. Returns None if the session is out of
    /// space for nodes.
    fn add_image_as_orphan(
        &mut self,
        image: ImageId,
        offset: CoordsXyz,
        bound_box: BoundBoxXyz,
    ) -> Option<PaintNodeId>;

    /// The node that transition sprites which must render underneath the current structure get
    /// attached to, if the caller has set one.
    fn prepend_target(&self) -> Option<PaintNodeId>;

    /// Makes `child` a child of `parent`.
    fn attach_child(&mut self, parent: PaintNodeId, child: PaintNodeId);
}

impl<T: PaintSink + ?Sized> PaintSink for &mut T {
    fn add_image_as_parent(&mut self, image: ImageId, offset: CoordsXyz, bound_box: BoundBoxXyz) {
        (**self).add_image_as_parent(image, offset, bound_box)
    }
    fn add_image_as_orphan(
        &mut self,
        image: ImageId,
        offset: CoordsXyz,
        bound_box: BoundBoxXyz,
    ) -> Option<PaintNodeId> {
        (**self).add_image_as_orphan(image, offset, bound_box)
    }
    fn prepend_target(&self) -> Option<PaintNodeId> {
        (**self).prepend_target()
    }
    fn attach_child(&mut self, parent: PaintNodeId, child: PaintNodeId) {
        (**self).attach_child(parent, child)
    }
}

/// Wraps a sink to remember whether anything was drawn through it.
pub(crate) struct TrackingSink<'a, S: PaintSink + ?Sized> {
    inner: &'a mut S,
    template: ImageTemplate,
    drawn: bool,
}
impl<'a, S: PaintSink + ?Sized> TrackingSink<'a, S> {
    pub(crate) fn new(inner: &'a mut S, template: ImageTemplate) -> Self {
        Self {
            inner,
            template,
            drawn: false,
        }
    }
    #[inline]
    pub(crate) fn drawn(&self) -> bool {
        self.drawn
    }
    #[inline]
    pub(crate) fn image(&self, index: u32) -> ImageId {
        self.template.with_index(index)
    }

    /// Draws `index` with a box that starts at the sprite's own offset.
    pub(crate) fn draw(&mut self, index: u32, offset: CoordsXyz, length: CoordsXyz) {
        self.draw_boxed(index, offset, BoundBoxXyz::at(offset, length));
    }
    pub(crate) fn draw_boxed(&mut self, index: u32, offset: CoordsXyz, bound_box: BoundBoxXyz) {
        let image = self.image(index);
        log::trace!("support sprite {:?} at {:?}, box {:?}", image, offset, bound_box);
        self.inner.add_image_as_parent(image, offset, bound_box);
        self.drawn = true;
    }
    /// Draws a transition sprite, beneath the sink's prepend target if `prepend` is set and
    /// there is one.
    pub(crate) fn draw_transition(
        &mut self,
        index: u32,
        offset: CoordsXyz,
        bound_box: BoundBoxXyz,
        prepend: bool,
    ) {
        let target = if prepend {
            self.inner.prepend_target()
        } else {
            None
        };
        match target {
            Some(target) => {
                let image = self.image(index);
                if let Some(node) = self.inner.add_image_as_orphan(image, offset, bound_box) {
                    self.inner.attach_child(target, node);
                }
                // The attempt counts even if the session had no room for the node
                self.drawn = true;
            }
            None => self.draw_boxed(index, offset, bound_box),
        }
    }
}
