use super::observer::ThresholdObserver;
use super::video::SimVideo;
use crate::app::{Crossing, Host, MediaSignal, TimerKind};
use crate::config::AppConfig;
use crate::geometry::{Rect, ScrollContext};
use crate::manifest::PageManifest;
use anyhow::{Result, bail};
use std::time::Duration;
use tracing::trace;

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: f32,
    to: f32,
    start_ms: u64,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    due_ms: u64,
    seq: u64,
    kind: TimerKind,
}

/// Browser-free page: layout, scroll position, timers, frames and videos on
/// a virtual millisecond clock.
#[derive(Debug)]
pub struct SimPage {
    viewport_height: f32,
    scroll_context: ScrollContext,
    offsets: Vec<f32>,
    heights: Vec<f32>,
    content_height: f32,
    scroll_top: f32,
    reported_top: f32,
    tween: Option<Tween>,
    smooth_scroll_ms: u64,
    videos: Vec<Option<SimVideo>>,
    observer: ThresholdObserver,
    timers: Vec<PendingTimer>,
    next_seq: u64,
    now_ms: u64,
    frame_requested: bool,
    location: Option<String>,
    replace_count: usize,
}

impl SimPage {
    pub fn new(manifest: &PageManifest, config: &AppConfig) -> Result<Self> {
        if !(manifest.viewport_height.is_finite() && manifest.viewport_height > 0.0) {
            bail!("viewport height must be positive");
        }

        let mut offsets = Vec::with_capacity(manifest.sections.len());
        let mut heights = Vec::with_capacity(manifest.sections.len());
        let mut cursor = 0.0;
        for section in &manifest.sections {
            let height = section.height.unwrap_or(manifest.viewport_height);
            if !(height.is_finite() && height > 0.0) {
                bail!("section `{}` must have a positive height", section.id);
            }
            offsets.push(cursor);
            heights.push(height);
            cursor += height;
        }

        let timeupdate = Duration::from_millis(config.timeupdate_interval_ms);
        let videos = manifest
            .sections
            .iter()
            .map(|section| {
                section
                    .video
                    .as_ref()
                    .map(|spec| SimVideo::from_spec(spec, timeupdate))
            })
            .collect();

        Ok(SimPage {
            viewport_height: manifest.viewport_height,
            scroll_context: manifest.scroll_context,
            offsets,
            heights,
            content_height: cursor,
            scroll_top: 0.0,
            reported_top: 0.0,
            tween: None,
            smooth_scroll_ms: config.smooth_scroll_ms,
            videos,
            observer: ThresholdObserver::new(
                manifest.sections.len(),
                config.threshold,
                config.root_margin_px,
            ),
            timers: Vec::new(),
            next_seq: 0,
            now_ms: 0,
            frame_requested: false,
            location: None,
            replace_count: 0,
        })
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Number of in-place location replacements.
    pub fn replace_count(&self) -> usize {
        self.replace_count
    }

    /// Location updates only replace, so history never grows past the
    /// initial entry.
    pub fn history_length(&self) -> usize {
        1
    }

    pub fn pending_timers(&self, kind: TimerKind) -> usize {
        self.timers.iter().filter(|timer| timer.kind == kind).count()
    }

    pub fn video(&self, section: usize) -> Option<&SimVideo> {
        self.videos.get(section).and_then(Option::as_ref)
    }

    pub fn video_mut(&mut self, section: usize) -> Option<&mut SimVideo> {
        self.videos.get_mut(section).and_then(Option::as_mut)
    }

    pub fn videos(&self) -> impl Iterator<Item = Option<&SimVideo>> {
        self.videos.iter().map(Option::as_ref)
    }

    pub(super) fn advance_clock(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    /// Remove and return the earliest timer due by now; creation order breaks
    /// ties.
    pub(super) fn pop_due_timer(&mut self) -> Option<TimerKind> {
        let (idx, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due_ms <= self.now_ms)
            .min_by_key(|(_, timer)| (timer.due_ms, timer.seq))?;
        Some(self.timers.remove(idx).kind)
    }

    pub(super) fn tick_videos(&mut self, elapsed: Duration) -> Vec<(usize, MediaSignal)> {
        let mut signals = Vec::new();
        for (section, video) in self.videos.iter_mut().enumerate() {
            if let Some(video) = video {
                signals.extend(video.tick(elapsed).into_iter().map(|signal| (section, signal)));
            }
        }
        signals
    }

    pub(super) fn step_tween(&mut self) {
        let Some(tween) = self.tween else {
            return;
        };
        let elapsed = self.now_ms.saturating_sub(tween.start_ms) as f32;
        let progress = if self.smooth_scroll_ms == 0 {
            1.0
        } else {
            (elapsed / self.smooth_scroll_ms as f32).min(1.0)
        };
        if progress >= 1.0 {
            self.scroll_top = tween.to;
            self.tween = None;
        } else {
            let eased = progress * progress * (3.0 - 2.0 * progress);
            self.scroll_top = tween.from + (tween.to - tween.from) * eased;
        }
    }

    /// Whether the position moved since the last reported scroll event.
    pub(super) fn take_scroll_change(&mut self) -> bool {
        if self.scroll_top == self.reported_top {
            return false;
        }
        self.reported_top = self.scroll_top;
        true
    }

    pub(super) fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    /// Run the threshold observer against the current layout.
    pub(super) fn observe(&mut self) {
        let root = self.container_rect();
        let rects: Vec<(usize, Rect)> = (0..self.offsets.len())
            .filter_map(|idx| self.section_rect(idx).map(|rect| (idx, rect)))
            .collect();
        self.observer.observe(root, rects);
    }

    fn clamp_scroll(&self, top: f32) -> f32 {
        if top.is_finite() {
            top.clamp(0.0, self.max_scroll())
        } else {
            self.scroll_top
        }
    }
}

impl Host for SimPage {
    type Video = SimVideo;

    fn container_rect(&self) -> Rect {
        Rect::new(0.0, self.viewport_height)
    }

    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    fn scroll_context(&self) -> ScrollContext {
        self.scroll_context
    }

    fn section_rect(&self, section: usize) -> Option<Rect> {
        let offset = self.offsets.get(section)?;
        let height = self.heights.get(section)?;
        Some(Rect::new(offset - self.scroll_top, *height))
    }

    fn video(&self, section: usize) -> Option<&SimVideo> {
        SimPage::video(self, section)
    }

    fn video_mut(&mut self, section: usize) -> Option<&mut SimVideo> {
        SimPage::video_mut(self, section)
    }

    fn scroll_to(&mut self, top: f32) {
        self.tween = None;
        self.scroll_top = self.clamp_scroll(top);
    }

    fn scroll_into_view(&mut self, section: usize) {
        let Some(offset) = self.offsets.get(section).copied() else {
            return;
        };
        let to = self.clamp_scroll(offset);
        if self.tween.is_none() && to == self.scroll_top {
            return;
        }
        trace!(section, from = self.scroll_top, to, "Smooth scroll started");
        self.tween = Some(Tween {
            from: self.scroll_top,
            to,
            start_ms: self.now_ms,
        });
    }

    fn replace_location(&mut self, fragment: &str) {
        self.location = Some(fragment.to_string());
        self.replace_count += 1;
    }

    fn start_timer(&mut self, timer: TimerKind, delay: Duration) {
        let due_ms = self.now_ms + delay.as_millis() as u64;
        self.timers.push(PendingTimer {
            due_ms,
            seq: self.next_seq,
            kind: timer,
        });
        self.next_seq += 1;
    }

    fn cancel_timer(&mut self, timer: TimerKind) {
        self.timers.retain(|pending| pending.kind != timer);
    }

    fn request_animation_frame(&mut self) {
        self.frame_requested = true;
    }

    fn take_records(&mut self) -> Vec<Crossing> {
        self.observe();
        self.observer.take_records()
    }
}
