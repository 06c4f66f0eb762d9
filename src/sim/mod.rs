//! Deterministic page host.
//!
//! Drives the controller the way a browser would: one millisecond at a time,
//! firing due timers, advancing playing videos and running a frame every
//! `frame_interval_ms`. Within a frame the smooth-scroll tween moves first,
//! then the scroll event, the animation-frame callback and finally the
//! threshold observer's batch.

mod observer;
mod page;
mod video;

pub use page::SimPage;
pub use video::{MediaView, SimVideo};

use crate::app::{App, Host, Message, PresentationView, TimerKind};
use crate::config::AppConfig;
use crate::manifest::PageManifest;
use crate::media::ReadyState;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const TICK: Duration = Duration::from_millis(1);

/// Host-side and controller-side state at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub label: Option<String>,
    pub time_ms: u64,
    pub scroll_top: f32,
    pub location: Option<String>,
    pub active_section: Option<String>,
    pub replace_count: usize,
    pub history_length: usize,
    pub pending_timers: Vec<TimerKind>,
    pub view: PresentationView,
    pub media: Vec<Option<MediaView>>,
}

pub struct Simulation {
    app: App,
    page: SimPage,
    section_ids: Vec<String>,
    indicator_targets: Vec<String>,
    frame_interval_ms: u64,
}

impl Simulation {
    pub fn new(manifest: &PageManifest, config: AppConfig) -> Result<Self> {
        let config = config.sanitized();
        let mut page = SimPage::new(manifest, &config).context("Failed to lay out page")?;
        let frame_interval_ms = config.frame_interval_ms;
        let app = App::bootstrap(manifest, config, &mut page);
        Ok(Simulation {
            app,
            page,
            section_ids: manifest.sections.iter().map(|s| s.id.clone()).collect(),
            indicator_targets: manifest.indicator_targets(),
            frame_interval_ms,
        })
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn page(&self) -> &SimPage {
        &self.page
    }

    #[cfg(test)]
    pub fn page_mut(&mut self) -> &mut SimPage {
        &mut self.page
    }

    /// Deliver one event to the controller.
    pub fn dispatch(&mut self, message: Message) {
        self.app.update(message, &mut self.page);
    }

    pub fn load(&mut self) {
        self.dispatch(Message::PageLoaded);
    }

    pub fn advance_ms(&mut self, ms: u64) {
        for _ in 0..ms {
            self.step();
        }
    }

    /// Instant user scroll to an absolute offset.
    pub fn scroll_to(&mut self, top: f32) {
        self.page.scroll_to(top);
    }

    pub fn scroll_by(&mut self, delta: f32) {
        let top = self.page.scroll_top() + delta;
        self.page.scroll_to(top);
    }

    /// Click the first indicator pointing at `target`.
    pub fn click_indicator(&mut self, target: &str) -> Result<()> {
        let Some(indicator) = self.indicator_targets.iter().position(|t| t == target) else {
            bail!("no indicator targets `{target}`");
        };
        self.dispatch(Message::IndicatorClicked(indicator));
        Ok(())
    }

    pub fn click_advance(&mut self) {
        self.dispatch(Message::AdvanceRequested);
    }

    pub fn section_index(&self, id: &str) -> Result<usize> {
        self.section_ids
            .iter()
            .position(|section| section == id)
            .with_context(|| format!("unknown section `{id}`"))
    }

    pub fn load_metadata(&mut self, section: usize) {
        self.raise_ready_state(section, ReadyState::HaveMetadata);
    }

    pub fn load_data(&mut self, section: usize) {
        self.raise_ready_state(section, ReadyState::HaveEnoughData);
    }

    pub fn block_autoplay(&mut self, section: usize, blocked: bool) {
        if let Some(video) = self.page.video_mut(section) {
            video.set_autoplay_blocked(blocked);
        }
    }

    pub fn snapshot(&self, label: Option<String>) -> Snapshot {
        let page = self.page();
        let app = self.app();
        let pending_timers = [
            TimerKind::SnapDebounce,
            TimerKind::SnapSettle,
            TimerKind::IntroFallback,
        ]
        .into_iter()
        .filter(|kind| page.pending_timers(*kind) > 0)
        .collect();

        Snapshot {
            label,
            time_ms: page.now_ms(),
            scroll_top: page.scroll_top(),
            location: page.location().map(str::to_string),
            active_section: app.active_section().map(str::to_string),
            replace_count: page.replace_count(),
            history_length: page.history_length(),
            pending_timers,
            view: app.view(),
            media: page.videos().map(|v| v.map(SimVideo::view)).collect(),
        }
    }

    fn raise_ready_state(&mut self, section: usize, to: ReadyState) {
        let Some(video) = self.page.video_mut(section) else {
            return;
        };
        for signal in video.advance_ready_state(to) {
            self.dispatch(Message::Media { section, signal });
        }
    }

    fn step(&mut self) {
        self.page.advance_clock(1);

        while let Some(timer) = self.page.pop_due_timer() {
            debug!(?timer, at = self.page.now_ms(), "Timer fired");
            self.dispatch(Message::TimerFired(timer));
        }

        for (section, signal) in self.page.tick_videos(TICK) {
            self.dispatch(Message::Media { section, signal });
        }

        if self.page.now_ms() % self.frame_interval_ms == 0 {
            self.frame();
        }
    }

    fn frame(&mut self) {
        self.page.step_tween();
        if self.page.take_scroll_change() {
            self.dispatch(Message::Scrolled);
        }
        if self.page.take_frame_request() {
            self.dispatch(Message::AnimationFrame);
        }
        let records = self.page.take_records();
        if !records.is_empty() {
            self.dispatch(Message::Intersections(records));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::parse_manifest;
    use crate::media::MediaElement;

    const THREE_VIDEOS: &str = r#"
        viewport_height = 800

        [[sections]]
        id = "s1"
        [sections.video]

        [[sections]]
        id = "s2"
        [sections.video]

        [[sections]]
        id = "s3"
        [sections.video]
    "#;

    fn loaded() -> Simulation {
        let manifest = parse_manifest(THREE_VIDEOS).expect("manifest");
        let mut sim = Simulation::new(&manifest, AppConfig::default()).expect("sim");
        sim.load();
        sim.advance_ms(1000);
        sim
    }

    fn assert_exclusive(sim: &Simulation, current: usize) {
        let view = sim.app().view();
        let active: Vec<&str> = view
            .indicators
            .iter()
            .filter(|i| i.active)
            .map(|i| i.target.as_str())
            .collect();
        let id = view.sections[current].id.as_str();
        assert_eq!(active, vec![id]);
        assert_eq!(sim.page().location(), Some(id));
        assert_eq!(sim.app().active_section(), Some(id));

        for (idx, section) in view.sections.iter().enumerate() {
            let flags = section.video.expect("video");
            let video = sim.page().video(idx).expect("video");
            if idx == current {
                assert!(flags.playing, "{} should be playing", section.id);
                assert!(!video.paused(), "{} should be running", section.id);
            } else {
                assert!(!flags.playing, "{} should be idle", section.id);
                assert!(video.paused(), "{} should be paused", section.id);
                assert_eq!(video.current_time(), 0.0, "{} should be rewound", section.id);
            }
        }
    }

    #[test]
    fn load_settles_on_the_first_section() {
        let sim = loaded();
        assert_eq!(sim.page().scroll_top(), 0.0);
        assert!(!sim.app().view().snap_in_flight);
        assert_exclusive(&sim, 0);
    }

    #[test]
    fn only_the_second_section_above_threshold() {
        let mut sim = loaded();
        sim.scroll_to(800.0);
        sim.advance_ms(1000);

        assert_eq!(sim.page().scroll_top(), 800.0);
        assert_exclusive(&sim, 1);
    }

    #[test]
    fn indicator_click_scrolls_and_confirms() {
        let mut sim = loaded();
        let replaced = sim.page().replace_count();
        sim.click_indicator("s3").expect("indicator");

        // The click only scrolls; the observer drives every flag.
        assert_eq!(sim.page().location(), Some("s1"));
        assert_eq!(sim.page().replace_count(), replaced);
        assert_eq!(sim.app().active_section(), Some("s1"));

        sim.advance_ms(1000);
        assert_eq!(sim.page().scroll_top(), 1600.0);
        assert_exclusive(&sim, 2);
        assert_eq!(sim.page().history_length(), 1);
    }

    #[test]
    fn advance_walks_forward_and_stops_at_the_end() {
        let manifest = parse_manifest(&format!("advance_control = true\n{THREE_VIDEOS}"))
            .expect("manifest");
        let mut sim = Simulation::new(&manifest, AppConfig::default()).expect("sim");
        sim.load();
        sim.advance_ms(1000);

        sim.click_advance();
        sim.advance_ms(1000);
        assert_exclusive(&sim, 1);

        sim.click_advance();
        sim.advance_ms(1000);
        assert_exclusive(&sim, 2);

        sim.click_advance();
        sim.advance_ms(1000);
        assert_eq!(sim.page().scroll_top(), 1600.0);
        assert_exclusive(&sim, 2);
    }

    #[test]
    fn fast_scrolling_leaves_no_stray_playback() {
        let mut sim = loaded();
        for top in [300.0, 900.0, 1500.0, 700.0, 1100.0] {
            sim.scroll_to(top);
            sim.advance_ms(16);
        }
        sim.advance_ms(1500);

        let current = sim
            .app()
            .view()
            .sections
            .iter()
            .position(|s| s.active)
            .expect("active section");
        assert_eq!(sim.page().scroll_top(), current as f32 * 800.0);
        assert_exclusive(&sim, current);
    }

    #[test]
    fn unknown_indicator_is_an_error() {
        let mut sim = loaded();
        assert!(sim.click_indicator("nowhere").is_err());
        assert!(sim.section_index("nowhere").is_err());
    }

    #[test]
    fn snapshot_serializes() {
        let sim = loaded();
        let json = serde_json::to_value(sim.snapshot(Some("settled".into()))).expect("json");
        assert_eq!(json["label"], "settled");
        assert_eq!(json["location"], "s1");
        assert_eq!(json["history_length"], 1);
        assert_eq!(json["view"]["sections"][0]["active"], true);
        assert_eq!(json["media"][1]["paused"], true);
    }
}
