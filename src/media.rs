//! Media element contract and the rewind-to-start utility.
//!
//! The controller never owns decoders; it drives whatever the host exposes
//! through [`MediaElement`]. Fallible calls return `anyhow::Result` and the
//! callers here treat every failure as best-effort.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Readiness ladder reported by a media element.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReadyState {
    #[default]
    HaveNothing,
    HaveMetadata,
    HaveCurrentData,
    HaveFutureData,
    HaveEnoughData,
}

impl ReadyState {
    /// Duration and seekable ranges are known.
    pub fn has_metadata(self) -> bool {
        self >= ReadyState::HaveMetadata
    }

    /// The frame at the current position is decoded.
    pub fn has_current_data(self) -> bool {
        self >= ReadyState::HaveCurrentData
    }

    /// Enough data is buffered for the position to advance.
    pub fn can_advance(self) -> bool {
        self >= ReadyState::HaveFutureData
    }
}

/// Playback surface of one video element.
pub trait MediaElement {
    fn ready_state(&self) -> ReadyState;

    /// Start of the first seekable range, `None` when no range exists.
    fn seekable_start(&self) -> Result<Option<f64>>;

    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, seconds: f64) -> Result<()>;

    /// Total length in seconds, `None` while unknown.
    fn duration(&self) -> Option<f64>;

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;
}

/// Result of a rewind request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResetOutcome {
    /// Position was set to this start bound.
    Applied(f64),
    /// Metadata is missing; the caller must retry once it arrives.
    Deferred,
}

/// Rewind `video` to its true start, or report that metadata is pending.
///
/// Never fails: any error while probing ranges or seeking forces position 0.
pub fn reset_to_start<M: MediaElement + ?Sized>(video: &mut M) -> ResetOutcome {
    if !video.ready_state().has_metadata() {
        return ResetOutcome::Deferred;
    }
    ResetOutcome::Applied(apply_start_bound(video))
}

/// Seek to the first seekable range start (or 0) and return the bound used.
pub fn apply_start_bound<M: MediaElement + ?Sized>(video: &mut M) -> f64 {
    let attempt = video.seekable_start().and_then(|start| {
        let bound = start.filter(|s| s.is_finite() && *s > 0.0).unwrap_or(0.0);
        video.set_current_time(bound).map(|()| bound)
    });
    match attempt {
        Ok(bound) => bound,
        Err(err) => {
            trace!("Seek to start bound failed, forcing 0: {err:#}");
            if let Err(err) = video.set_current_time(0.0) {
                trace!("Forced seek to 0 failed: {err:#}");
            }
            0.0
        }
    }
}

/// Ask `video` to pause, swallowing rejections.
pub fn pause_quietly<M: MediaElement + ?Sized>(video: &mut M) {
    if let Err(err) = video.pause() {
        trace!("Pause rejected: {err:#}");
    }
}

/// Ask `video` to play, swallowing rejections such as autoplay blocking.
pub fn play_quietly<M: MediaElement + ?Sized>(video: &mut M) -> bool {
    match video.play() {
        Ok(()) => true,
        Err(err) => {
            trace!("Play rejected: {err:#}");
            false
        }
    }
}
