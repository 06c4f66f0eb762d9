use serde::Serialize;

/// Events delivered to the controller by its host.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// The page and its media resources finished loading.
    PageLoaded,
    /// One batch of threshold crossings, in detection order.
    Intersections(Vec<Crossing>),
    /// The scroll container moved.
    Scrolled,
    TimerFired(TimerKind),
    AnimationFrame,
    Media {
        section: usize,
        signal: MediaSignal,
    },
    IndicatorClicked(usize),
    AdvanceRequested,
}

/// A section's overlap with the container moved across the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub section: usize,
    /// `true` when the section is now at or above the threshold.
    pub intersecting: bool,
}

/// Lifecycle signals a video element reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSignal {
    MetadataLoaded,
    DataLoaded,
    CanPlay,
    TimeUpdate,
    Ended,
}

/// Named timers the controller arms through its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerKind {
    SnapDebounce,
    SnapSettle,
    IntroFallback,
}
