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

pub mod config;
pub mod constants;
pub mod coordinates;
pub mod image;
pub mod ledger;
pub mod metal;
pub mod path;
pub mod recording;
pub mod renderer;
pub mod session;
pub mod support_types;
pub mod tables;
pub mod wooden;

pub use config::SupportsConfig;
pub use metal::MetalColumn;
pub use path::{BridgeSprites, PathColumn, PathSegmentColumn, PathSupportOutcome};
pub use renderer::SupportRenderer;
pub use session::{PaintSink, TileSupportState};
pub use wooden::WoodenColumn;

#[cfg(test)]
#[ctor::ctor]
fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
