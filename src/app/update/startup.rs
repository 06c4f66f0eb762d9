use super::super::host::Host;
use super::super::messages::TimerKind;
use super::super::state::{
    App, FrameTask, IndicatorState, IntroState, SectionState, SnapGuard, StartupState,
};
use super::Effect;
use crate::config::AppConfig;
use crate::manifest::PageManifest;
use crate::media::MediaElement;
use tracing::{debug, info};

const FIRST: usize = 0;

impl App {
    /// Build the controller for `manifest` and arm the timers that run from
    /// setup rather than from load.
    pub fn bootstrap<H: Host>(manifest: &PageManifest, config: AppConfig, host: &mut H) -> App {
        let config = config.sanitized();
        let sections = manifest
            .sections
            .iter()
            .map(|section| SectionState::new(section.id.clone(), section.video.is_some()))
            .collect();
        let indicators = manifest
            .indicator_targets()
            .into_iter()
            .map(IndicatorState::new)
            .collect();

        let mut app = App {
            sections,
            indicators,
            location: None,
            snap: SnapGuard::default(),
            intro: manifest.intro_section().map(IntroState::new),
            startup: StartupState::default(),
            frame_queue: Vec::new(),
            advance_control: manifest.advance_control,
            config,
        };

        let mut effects = Vec::new();
        if let Some(intro) = &app.intro {
            debug!(section = intro.section, "Intro fallback armed");
            effects.push(Effect::StartTimer {
                timer: TimerKind::IntroFallback,
                delay: app.config.intro_fallback(),
            });
        }
        app.apply_effects(effects, host);

        info!(
            sections = app.sections.len(),
            indicators = app.indicators.len(),
            intro = app.intro.is_some(),
            advance = app.advance_control,
            "Initialized controller"
        );
        app
    }

    pub(super) fn handle_page_loaded<H: Host>(&mut self, host: &H, effects: &mut Vec<Effect>) {
        if self.startup.loaded {
            return;
        }
        self.startup.loaded = true;

        let Some(first_id) = self.sections.first().map(|section| section.id.clone()) else {
            return;
        };

        self.set_active_indicator(&first_id);
        effects.push(Effect::ScrollTo {
            top: self.config.startup_nudge_px,
        });
        self.set_active_section(FIRST);

        if self.sections[FIRST].video.is_some() {
            let ready = host
                .video(FIRST)
                .map(|video| video.ready_state().has_current_data())
                .unwrap_or(false);
            if ready {
                self.prime_first_video(effects);
            } else {
                debug!("First video not ready; priming on first data");
                self.startup.prime_on_data = true;
            }
        }

        self.schedule_frame(FrameTask::TakeRecords, effects);
        info!(section = %first_id, "Page loaded");
    }

    /// One-shot continuation for a first video that was not ready at load.
    pub(super) fn handle_first_video_data(&mut self, section: usize, effects: &mut Vec<Effect>) {
        if section != FIRST || !std::mem::take(&mut self.startup.prime_on_data) {
            return;
        }
        let below_threshold = self.sections[FIRST]
            .video
            .as_ref()
            .is_some_and(|flags| flags.intersecting == Some(false));
        if below_threshold {
            debug!("First section left the viewport; skipping deferred start");
            return;
        }
        self.prime_first_video(effects);
    }

    fn prime_first_video(&mut self, effects: &mut Vec<Effect>) {
        effects.push(Effect::ResetToStart(FIRST));
        if let Some(flags) = self.video_flags_mut(FIRST) {
            flags.playing = true;
        }
        effects.push(Effect::Play(FIRST));
    }
}
