//! Scenario scripts: ordered user and media actions replayed against the
//! simulated page.

use crate::sim::{Simulation, Snapshot};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Load,
    Wait {
        ms: u64,
    },
    ScrollTo {
        top: f32,
    },
    ScrollBy {
        delta: f32,
    },
    ClickIndicator {
        target: String,
    },
    ClickAdvance,
    LoadMetadata {
        section: String,
    },
    LoadData {
        section: String,
    },
    BlockAutoplay {
        section: String,
        #[serde(default = "default_blocked")]
        blocked: bool,
    },
    Snapshot {
        #[serde(default)]
        label: Option<String>,
    },
}

fn default_blocked() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Load the page, let it settle for a second and capture it.
    pub fn settle() -> Self {
        Scenario {
            steps: vec![
                Step::Load,
                Step::Wait { ms: 1000 },
                Step::Snapshot { label: None },
            ],
        }
    }
}

pub fn parse_scenario(contents: &str) -> Result<Scenario> {
    toml::from_str(contents).context("parsing scenario")
}

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario {}", path.display()))?;
    let scenario =
        parse_scenario(&data).with_context(|| format!("Invalid scenario {}", path.display()))?;
    info!(path = %path.display(), steps = scenario.steps.len(), "Loaded scenario");
    Ok(scenario)
}

/// Replay `scenario`, handing every snapshot to `emit` as it is taken.
pub fn run_scenario<F>(sim: &mut Simulation, scenario: &Scenario, mut emit: F) -> Result<()>
where
    F: FnMut(Snapshot) -> Result<()>,
{
    for (idx, step) in scenario.steps.iter().enumerate() {
        debug!(step = idx, ?step, "Running step");
        run_step(sim, step).with_context(|| format!("scenario step {}", idx + 1))?;
        if let Step::Snapshot { label } = step {
            emit(sim.snapshot(label.clone()))?;
        }
    }
    Ok(())
}

fn run_step(sim: &mut Simulation, step: &Step) -> Result<()> {
    match step {
        Step::Load => sim.load(),
        Step::Wait { ms } => sim.advance_ms(*ms),
        Step::ScrollTo { top } => sim.scroll_to(*top),
        Step::ScrollBy { delta } => sim.scroll_by(*delta),
        Step::ClickIndicator { target } => sim.click_indicator(target)?,
        Step::ClickAdvance => sim.click_advance(),
        Step::LoadMetadata { section } => {
            let idx = sim.section_index(section)?;
            sim.load_metadata(idx);
        }
        Step::LoadData { section } => {
            let idx = sim.section_index(section)?;
            sim.load_data(idx);
        }
        Step::BlockAutoplay { section, blocked } => {
            let idx = sim.section_index(section)?;
            sim.block_autoplay(idx, *blocked);
        }
        Step::Snapshot { .. } => {}
    }
    Ok(())
}
