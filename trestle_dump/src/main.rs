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

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use trestle_core::{SupportRenderer, SupportsConfig};

use crate::scenario::{Scenario, ScenarioReport};

mod scenario;

#[derive(Parser, Debug, Clone)]
struct DumpArgs {
    /// The tile scenario to run, in RON
    #[arg(short, long, value_name = "SCENARIO")]
    scenario: PathBuf,

    /// Supports config (sprite catalog settings). Defaults are used if not given.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print one line per step instead of every sprite
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Print the full report as RON
    #[arg(long, default_value_t = false)]
    ron: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = DumpArgs::parse();
    let config = match &args.config {
        Some(path) => SupportsConfig::load_from_path(path)?,
        None => SupportsConfig::default(),
    };
    let renderer = SupportRenderer::new(config);
    let scenario = Scenario::load(&args.scenario)?;
    let report = scenario.run(&renderer)?;

    if args.ron {
        let text = ron::ser::to_string_pretty(&report, ron::ser::PrettyConfig::default())
            .context("Failed to serialize report")?;
        println!("{}", text);
    } else {
        print_report(&report, args.summary);
    }
    Ok(())
}

fn print_report(report: &ScenarioReport, summary: bool) {
    for step in &report.steps {
        let underground = if step.underground { " underground" } else { "" };
        println!(
            "#{} {}: drawn={}{} ({} sprites)",
            step.step,
            step.label,
            step.drawn,
            underground,
            step.commands.len()
        );
        if summary {
            continue;
        }
        for command in &step.commands {
            let orphan = if command.orphan { " orphan" } else { "" };
            println!(
                "    {:?} at {:?} box {:?}{}",
                command.image, command.offset, command.bound_box, orphan
            );
        }
    }
    println!("segments: {:?}", report.final_segments);
}
