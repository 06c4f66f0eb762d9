//! Page manifest loading.
//!
//! A manifest describes the page the controller drives: the ordered
//! sections, their optional videos, the indicator row, the intro overlay and
//! whether an advance control exists. The simulated host builds its layout
//! and media from it; the controller only reads identifiers and presence.

use crate::geometry::ScrollContext;
use crate::media::ReadyState;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageManifest {
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,
    #[serde(default)]
    pub scroll_context: ScrollContext,
    #[serde(default)]
    pub advance_control: bool,
    #[serde(default)]
    pub intro: Option<IntroSpec>,
    /// Indicator targets in display order; one per section when omitted.
    #[serde(default)]
    pub indicators: Option<Vec<String>>,
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SectionSpec {
    pub id: String,
    /// Height in pixels; the viewport height when omitted.
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub video: Option<VideoSpec>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VideoSpec {
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default = "default_ready_state")]
    pub ready_state: ReadyState,
    #[serde(default)]
    pub seekable_start: Option<f64>,
    #[serde(default)]
    pub autoplay_blocked: bool,
    #[serde(default)]
    pub seekable_fails: bool,
}

impl Default for VideoSpec {
    fn default() -> Self {
        VideoSpec {
            duration: default_duration(),
            ready_state: default_ready_state(),
            seekable_start: None,
            autoplay_blocked: false,
            seekable_fails: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntroSpec {
    /// Identifier of the section whose video drives the reveal.
    pub section: String,
    /// Whether the title overlay exists on the page.
    #[serde(default = "default_true")]
    pub title: bool,
}

fn default_viewport_height() -> f32 {
    800.0
}

fn default_duration() -> f64 {
    8.0
}

fn default_ready_state() -> ReadyState {
    ReadyState::HaveEnoughData
}

fn default_true() -> bool {
    true
}

impl PageManifest {
    /// Indicator targets, defaulting to one per section in order.
    pub fn indicator_targets(&self) -> Vec<String> {
        match &self.indicators {
            Some(targets) => targets.clone(),
            None => self.sections.iter().map(|s| s.id.clone()).collect(),
        }
    }

    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Section index of the intro video, present only when both the video
    /// and the title overlay exist.
    pub fn intro_section(&self) -> Option<usize> {
        let intro = self.intro.as_ref().filter(|intro| intro.title)?;
        let idx = self.section_index(&intro.section)?;
        self.sections[idx].video.as_ref().map(|_| idx)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                bail!("section identifiers must not be empty");
            }
            if !seen.insert(section.id.as_str()) {
                bail!("duplicate section identifier `{}`", section.id);
            }
            if let Some(height) = section.height {
                if !height.is_finite() || height <= 0.0 {
                    bail!("section `{}` has invalid height {height}", section.id);
                }
            }
        }
        if !self.viewport_height.is_finite() || self.viewport_height <= 0.0 {
            bail!("viewport height must be positive");
        }
        Ok(())
    }
}

/// Parse and validate a manifest from TOML text.
pub fn parse_manifest(contents: &str) -> Result<PageManifest> {
    let manifest: PageManifest = toml::from_str(contents).context("parsing page manifest")?;
    manifest.validate()?;
    debug!(
        sections = manifest.sections.len(),
        advance_control = manifest.advance_control,
        "Parsed page manifest"
    );
    Ok(manifest)
}

/// Load a manifest from disk.
pub fn load_manifest(path: &Path) -> Result<PageManifest> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read page manifest {}", path.display()))?;
    let manifest = parse_manifest(&data)
        .with_context(|| format!("Invalid page manifest {}", path.display()))?;
    info!(
        path = %path.display(),
        sections = manifest.sections.len(),
        "Loaded page manifest"
    );
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE: &str = r#"
        advance_control = true

        [intro]
        section = "s1"

        [[sections]]
        id = "s1"
        [sections.video]
        duration = 2.0

        [[sections]]
        id = "s2"
        [sections.video]
        ready_state = "have-nothing"
        seekable_start = 0.5

        [[sections]]
        id = "s3"
    "#;

    #[test]
    fn parses_sections_and_defaults() {
        let manifest = parse_manifest(THREE).expect("manifest parses");
        assert_eq!(manifest.sections.len(), 3);
        assert_eq!(manifest.viewport_height, 800.0);
        assert_eq!(manifest.scroll_context, ScrollContext::Container);
        let s2 = manifest.sections[1].video.as_ref().expect("s2 video");
        assert_eq!(s2.ready_state, ReadyState::HaveNothing);
        assert_eq!(s2.seekable_start, Some(0.5));
        assert!(manifest.sections[2].video.is_none());
        assert_eq!(manifest.indicator_targets(), vec!["s1", "s2", "s3"]);
        assert_eq!(manifest.intro_section(), Some(0));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = parse_manifest(
            r#"
            [[sections]]
            id = "a"
            [[sections]]
            id = "a"
            "#,
        )
        .expect_err("duplicates are rejected");
        assert!(format!("{err:#}").contains("duplicate"));
    }

    #[test]
    fn intro_without_video_is_ignored() {
        let manifest = parse_manifest(
            r#"
            [intro]
            section = "s1"
            [[sections]]
            id = "s1"
            "#,
        )
        .expect("manifest parses");
        assert_eq!(manifest.intro_section(), None);
    }

    #[test]
    fn intro_without_title_is_ignored() {
        let manifest = parse_manifest(
            r#"
            [intro]
            section = "s1"
            title = false
            [[sections]]
            id = "s1"
            [sections.video]
            "#,
        )
        .expect("manifest parses");
        assert_eq!(manifest.intro_section(), None);
    }
}
