use crate::app::MediaSignal;
use crate::manifest::VideoSpec;
use crate::media::{MediaElement, ReadyState};
use anyhow::{Result, bail};
use serde::Serialize;
use std::time::Duration;

/// Deterministic stand-in for a page video element.
#[derive(Debug, Clone)]
pub struct SimVideo {
    duration: f64,
    current_time: f64,
    paused: bool,
    ended: bool,
    ready_state: ReadyState,
    seekable_start: Option<f64>,
    autoplay_blocked: bool,
    seekable_fails: bool,
    timeupdate_interval: Duration,
    since_timeupdate: Duration,
    seek_count: usize,
}

/// Serializable playback state for snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MediaView {
    pub ready_state: ReadyState,
    pub current_time: f64,
    pub paused: bool,
    pub ended: bool,
}

impl SimVideo {
    pub fn from_spec(spec: &VideoSpec, timeupdate_interval: Duration) -> Self {
        SimVideo {
            duration: spec.duration,
            current_time: 0.0,
            paused: true,
            ended: false,
            ready_state: spec.ready_state,
            seekable_start: spec.seekable_start,
            autoplay_blocked: spec.autoplay_blocked,
            seekable_fails: spec.seekable_fails,
            timeupdate_interval,
            since_timeupdate: Duration::ZERO,
            seek_count: 0,
        }
    }

    #[cfg(test)]
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Number of position writes performed so far.
    #[cfg(test)]
    pub fn seek_count(&self) -> usize {
        self.seek_count
    }

    pub fn set_autoplay_blocked(&mut self, blocked: bool) {
        self.autoplay_blocked = blocked;
    }

    /// Raise the ready state, returning the lifecycle signals crossed on the
    /// way. Lowering is ignored.
    pub fn advance_ready_state(&mut self, to: ReadyState) -> Vec<MediaSignal> {
        let from = self.ready_state;
        if to <= from {
            return Vec::new();
        }
        self.ready_state = to;

        let mut signals = Vec::new();
        if !from.has_metadata() && to.has_metadata() {
            signals.push(MediaSignal::MetadataLoaded);
        }
        if !from.has_current_data() && to.has_current_data() {
            signals.push(MediaSignal::DataLoaded);
        }
        if !from.can_advance() && to.can_advance() {
            signals.push(MediaSignal::CanPlay);
        }
        signals
    }

    /// Advance playback by `elapsed`, returning position and end signals.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<MediaSignal> {
        if self.paused || self.ended || !self.ready_state.can_advance() {
            return Vec::new();
        }

        self.current_time += elapsed.as_secs_f64();
        self.since_timeupdate += elapsed;
        if self.current_time >= self.duration {
            self.current_time = self.duration;
            self.ended = true;
            self.paused = true;
            self.since_timeupdate = Duration::ZERO;
            return vec![MediaSignal::TimeUpdate, MediaSignal::Ended];
        }
        if self.since_timeupdate >= self.timeupdate_interval {
            self.since_timeupdate = Duration::ZERO;
            return vec![MediaSignal::TimeUpdate];
        }
        Vec::new()
    }

    pub fn view(&self) -> MediaView {
        MediaView {
            ready_state: self.ready_state,
            current_time: self.current_time,
            paused: self.paused,
            ended: self.ended,
        }
    }
}

impl MediaElement for SimVideo {
    fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    fn seekable_start(&self) -> Result<Option<f64>> {
        if self.seekable_fails {
            bail!("seekable ranges unavailable");
        }
        if !self.ready_state.has_metadata() {
            return Ok(None);
        }
        Ok(Some(self.seekable_start.unwrap_or(0.0)))
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) -> Result<()> {
        if !seconds.is_finite() {
            bail!("non-finite position {seconds}");
        }
        self.current_time = seconds.clamp(0.0, self.duration);
        self.ended = false;
        self.seek_count += 1;
        Ok(())
    }

    fn duration(&self) -> Option<f64> {
        self.ready_state.has_metadata().then_some(self.duration)
    }

    fn play(&mut self) -> Result<()> {
        if self.autoplay_blocked {
            bail!("play() rejected: autoplay blocked");
        }
        if self.ended {
            self.current_time = 0.0;
            self.ended = false;
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.paused = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(ready_state: ReadyState) -> SimVideo {
        let spec = VideoSpec {
            duration: 1.0,
            ready_state,
            ..VideoSpec::default()
        };
        SimVideo::from_spec(&spec, Duration::from_millis(250))
    }

    #[test]
    fn ladder_emits_each_signal_once() {
        let mut v = video(ReadyState::HaveNothing);
        assert_eq!(
            v.advance_ready_state(ReadyState::HaveCurrentData),
            vec![MediaSignal::MetadataLoaded, MediaSignal::DataLoaded]
        );
        assert_eq!(
            v.advance_ready_state(ReadyState::HaveEnoughData),
            vec![MediaSignal::CanPlay]
        );
        assert!(v.advance_ready_state(ReadyState::HaveMetadata).is_empty());
    }

    #[test]
    fn playback_reports_time_and_end() {
        let mut v = video(ReadyState::HaveEnoughData);
        v.play().expect("play");
        let step = Duration::from_millis(250);
        assert_eq!(v.tick(step), vec![MediaSignal::TimeUpdate]);
        assert_eq!(v.tick(step), vec![MediaSignal::TimeUpdate]);
        assert_eq!(v.tick(step), vec![MediaSignal::TimeUpdate]);
        assert_eq!(v.tick(step), vec![MediaSignal::TimeUpdate, MediaSignal::Ended]);
        assert!(v.view().ended && v.paused());

        v.play().expect("replay");
        assert_eq!(v.current_time(), 0.0);
    }

    #[test]
    fn stalls_without_future_data() {
        let mut v = video(ReadyState::HaveCurrentData);
        v.play().expect("play");
        assert!(v.tick(Duration::from_millis(500)).is_empty());
        assert_eq!(v.current_time(), 0.0);
    }

    #[test]
    fn duration_needs_metadata() {
        let v = video(ReadyState::HaveNothing);
        assert_eq!(v.duration(), None);
        assert_eq!(v.seekable_start().expect("ranges"), None);
    }
}
