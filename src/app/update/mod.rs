use super::messages::TimerKind;
use std::time::Duration;

mod advance;
mod core;
mod intro;
mod navigation;
mod playback;
mod snap;
mod startup;

/// Describes work that must be performed against the host outside the pure
/// reducer.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Effect {
    /// Request playback; rejections are swallowed.
    Play(usize),
    /// Pause; rejections are swallowed.
    Pause(usize),
    /// Rewind to the true start, deferring until metadata if needed.
    ResetToStart(usize),
    /// Rewind once metadata has arrived (the deferred half of `ResetToStart`).
    ApplyStartBound(usize),
    ScrollTo {
        top: f32,
    },
    ScrollIntoView(usize),
    ReplaceLocation(String),
    StartTimer {
        timer: TimerKind,
        delay: Duration,
    },
    CancelTimer(TimerKind),
    RequestFrame,
    TakeRecords,
}
