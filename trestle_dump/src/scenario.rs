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

//! Tile scenario files: a starting tile state and a list of placements to run against it.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use trestle_core::{
    coordinates::Direction,
    ledger::{SegmentLedger, SegmentMask},
    recording::{PaintCommand, RecordingSink},
    support_types::TileSegment,
    BridgeSprites, MetalColumn, PathColumn, PathSegmentColumn, SupportRenderer, TileSupportState,
    WoodenColumn,
};

#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub tile: TileSupportState,
    /// Needed by path placements only
    #[serde(default)]
    pub bridge: Option<BridgeSprites>,
    /// Give the sink a node that transition sprites can be attached under
    #[serde(default)]
    pub prepend_target: bool,
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, Deserialize)]
pub enum Step {
    BeginTile,
    /// Marks the tile surface as painted
    PassSurface,
    GeneralHeight(u16),
    SegmentHeights {
        segments: Vec<TileSegment>,
        height: u16,
        #[serde(default)]
        slope: u8,
    },
    WoodenA(WoodenColumn),
    WoodenB(WoodenColumn),
    WoodenARotated(WoodenColumn),
    WoodenBRotated(WoodenColumn),
    MetalA {
        segment: TileSegment,
        column: MetalColumn,
    },
    MetalB {
        segment: TileSegment,
        column: MetalColumn,
    },
    MetalARotated {
        segment: TileSegment,
        direction: Direction,
        column: MetalColumn,
    },
    SideBySide {
        direction: Direction,
        column: MetalColumn,
    },
    PathA(PathColumn),
    PathB {
        segment: TileSegment,
        column: PathSegmentColumn,
    },
}
impl Step {
    fn bridge<'a>(&self, bridge: &'a Option<BridgeSprites>) -> Result<&'a BridgeSprites> {
        bridge
            .as_ref()
            .with_context(|| format!("{:?} needs a bridge in the scenario", self))
    }
}

/// What one step did.
#[derive(Clone, Debug, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub label: String,
    pub drawn: bool,
    pub underground: bool,
    pub commands: Vec<PaintCommand>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ScenarioReport {
    pub steps: Vec<StepReport>,
    pub final_segments: SegmentLedger,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Scenario> {
        log::info!("Loading scenario from {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Scenario::parse(&text).with_context(|| format!("In {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Scenario> {
        ron::from_str(text).context("Failed to parse scenario")
    }

    pub fn run(&self, renderer: &SupportRenderer) -> Result<ScenarioReport> {
        let mut state = self.tile.clone();
        let mut sink = RecordingSink::new();
        if self.prepend_target {
            sink = sink.with_prepend_target();
        }

        let mut reports = Vec::with_capacity(self.steps.len());
        for (i, step) in self.steps.iter().enumerate() {
            let mut underground = false;
            let drawn = match step {
                Step::BeginTile => {
                    state.begin_tile();
                    false
                }
                Step::PassSurface => {
                    state.passed_surface = true;
                    false
                }
                Step::GeneralHeight(height) => {
                    state.set_general_support_height(*height);
                    false
                }
                Step::SegmentHeights {
                    segments,
                    height,
                    slope,
                } => {
                    let mask: SegmentMask = segments.iter().copied().collect();
                    state.set_segment_support_height(mask, *height, *slope);
                    false
                }
                Step::WoodenA(column) => renderer.wooden_a(&state, &mut sink, column),
                Step::WoodenB(column) => renderer.wooden_b(&state, &mut sink, column),
                Step::WoodenARotated(column) => {
                    renderer.wooden_a_rotated(&state, &mut sink, column)
                }
                Step::WoodenBRotated(column) => {
                    renderer.wooden_b_rotated(&state, &mut sink, column)
                }
                Step::MetalA { segment, column } => {
                    renderer.metal_a(&mut state, &mut sink, *segment, column)
                }
                Step::MetalB { segment, column } => {
                    renderer.metal_b(&mut state, &mut sink, *segment, column)
                }
                Step::MetalARotated {
                    segment,
                    direction,
                    column,
                } => renderer.metal_a_rotated(&mut state, &mut sink, *segment, *direction, column),
                Step::SideBySide { direction, column } => {
                    renderer.supports_side_by_side(&mut state, &mut sink, *direction, column)
                }
                Step::PathA(column) => {
                    let bridge = step.bridge(&self.bridge)?;
                    let outcome = renderer.path_a(&state, &mut sink, bridge, column);
                    underground = outcome.underground;
                    outcome.drawn
                }
                Step::PathB { segment, column } => {
                    let bridge = step.bridge(&self.bridge)?;
                    renderer.path_b(&mut state, &mut sink, bridge, *segment, column)
                }
            };
            let commands = sink.take_commands();
            log::debug!("step {}: drawn={} ({} sprites)", i, drawn, commands.len());
            reports.push(StepReport {
                step: i,
                label: step_label(step),
                drawn,
                underground,
                commands,
            });
        }

        Ok(ScenarioReport {
            steps: reports,
            final_segments: state.segments,
        })
    }
}

fn step_label(step: &Step) -> String {
    let debug = format!("{:?}", step);
    match debug.find(|c: char| c == '(' || c == ' ') {
        Some(end) => debug[..end].to_string(),
        None => debug,
    }
}
