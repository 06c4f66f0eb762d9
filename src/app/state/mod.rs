mod intro;
mod section;
mod snap;

use super::update::Effect;
use crate::config::AppConfig;

pub(in crate::app) use intro::IntroState;
pub(in crate::app) use section::{IndicatorState, SectionState, VideoFlags};
pub(in crate::app) use snap::SnapGuard;

/// Work deferred to the next animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::app) enum FrameTask {
    Play(usize),
    ResetToStart(usize),
    TakeRecords,
}

/// Load-time bookkeeping.
#[derive(Debug, Default)]
pub(in crate::app) struct StartupState {
    pub(in crate::app) loaded: bool,
    /// The first video is waiting for "data loaded" or "can play".
    pub(in crate::app) prime_on_data: bool,
}

/// Controller state composed of sub-models.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) sections: Vec<SectionState>,
    pub(super) indicators: Vec<IndicatorState>,
    pub(super) location: Option<String>,
    pub(super) snap: SnapGuard,
    pub(super) intro: Option<IntroState>,
    pub(super) startup: StartupState,
    pub(super) frame_queue: Vec<FrameTask>,
    pub(super) advance_control: bool,
}

impl App {
    pub(super) fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|section| section.id == id)
    }

    pub(super) fn video_flags_mut(&mut self, section: usize) -> Option<&mut VideoFlags> {
        self.sections
            .get_mut(section)
            .and_then(|section| section.video.as_mut())
    }

    pub(super) fn is_marked_playing(&self, section: usize) -> bool {
        self.sections
            .get(section)
            .and_then(|section| section.video.as_ref())
            .map(|flags| flags.playing)
            .unwrap_or(false)
    }

    /// Mark exactly one section active.
    pub(super) fn set_active_section(&mut self, active: usize) {
        for (idx, section) in self.sections.iter_mut().enumerate() {
            section.active = idx == active;
        }
    }

    /// Mark every indicator pointing at `target` active and the rest inactive.
    pub(super) fn set_active_indicator(&mut self, target: &str) {
        for indicator in &mut self.indicators {
            indicator.active = indicator.target == target;
        }
    }

    /// Queue `task` for the next animation frame, requesting one if needed.
    pub(super) fn schedule_frame(&mut self, task: FrameTask, effects: &mut Vec<Effect>) {
        if self.frame_queue.is_empty() {
            effects.push(Effect::RequestFrame);
        }
        self.frame_queue.push(task);
    }
}
