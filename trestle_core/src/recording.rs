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

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::coordinates::{BoundBoxXyz, CoordsXyz};
use crate::image::ImageId;
use crate::session::{PaintNodeId, PaintSink};

/// One sprite placement, as seen by a [RecordingSink].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PaintCommand {
    pub node: PaintNodeId,
    pub image: ImageId,
    pub offset: CoordsXyz,
    pub bound_box: BoundBoxXyz,
    /// Added detached from the normal draw order
    pub orphan: bool,
}
impl PaintCommand {
    /// The height this sprite's box reaches up to.
    pub fn box_top(&self) -> i32 {
        self.bound_box.offset.z + self.bound_box.length.z
    }
}

/// A [PaintSink] that keeps every placement in memory, for tests and tooling.
#[derive(Debug, Default)]
pub struct RecordingSink {
    commands: Vec<PaintCommand>,
    children: FxHashMap<PaintNodeId, Vec<PaintNodeId>>,
    prepend_target: Option<PaintNodeId>,
    orphan_limit: Option<usize>,
    next_node: u32,
}
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves a node that stands in for the structure transition sprites get attached under.
    pub fn with_prepend_target(mut self) -> Self {
        let node = self.allocate();
        self.prepend_target = Some(node);
        self
    }
    /// Makes the sink refuse orphans once `limit` have been added, the way a full session does.
    pub fn with_orphan_limit(mut self, limit: usize) -> Self {
        self.orphan_limit = Some(limit);
        self
    }

    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }
    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        self.children.clear();
        std::mem::take(&mut self.commands)
    }
    pub fn image_indices(&self) -> Vec<u32> {
        self.commands.iter().map(|c| c.image.index).collect()
    }
    pub fn children_of(&self, node: PaintNodeId) -> &[PaintNodeId] {
        self.children.get(&node).map(|v| v.as_slice()).unwrap_or(&[])
    }
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    fn allocate(&mut self) -> PaintNodeId {
        let node = PaintNodeId(self.next_node);
        self.next_node += 1;
        node
    }
    fn record(
        &mut self,
        image: ImageId,
        offset: CoordsXyz,
        bound_box: BoundBoxXyz,
        orphan: bool,
    ) -> PaintNodeId {
        let node = self.allocate();
        self.commands.push(PaintCommand {
            node,
            image,
            offset,
            bound_box,
            orphan,
        });
        node
    }
}
impl PaintSink for RecordingSink {
    fn add_image_as_parent(&mut self, image: ImageId, offset: CoordsXyz, bound_box: BoundBoxXyz) {
        self.record(image, offset, bound_box, false);
    }

    fn add_image_as_orphan(
        &mut self,
        image: ImageId,
        offset: CoordsXyz,
        bound_box: BoundBoxXyz,
    ) -> Option<PaintNodeId> {
        if let Some(limit) = self.orphan_limit {
            if self.commands.iter().filter(|c| c.orphan).count() >= limit {
                return None;
            }
        }
        Some(self.record(image, offset, bound_box, true))
    }

    fn prepend_target(&self) -> Option<PaintNodeId> {
        self.prepend_target
    }

    fn attach_child(&mut self, parent: PaintNodeId, child: PaintNodeId) {
        self.children.entry(parent).or_default().push(child);
    }
}
