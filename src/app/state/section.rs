/// Per-section presentation model.
pub struct SectionState {
    pub(in crate::app) id: String,
    /// Caption visibility.
    pub(in crate::app) active: bool,
    pub(in crate::app) video: Option<VideoFlags>,
}

impl SectionState {
    pub(in crate::app) fn new(id: String, has_video: bool) -> Self {
        Self {
            id,
            active: false,
            video: has_video.then(VideoFlags::default),
        }
    }
}

/// UI flags and pending one-shot listeners for a section's video.
#[derive(Debug, Default)]
pub struct VideoFlags {
    /// Intended playback state, used for visual transitions.
    pub(in crate::app) playing: bool,
    pub(in crate::app) dimmed: bool,
    /// A rewind is waiting for metadata.
    pub(in crate::app) reset_on_metadata: bool,
    /// Side of the threshold last reported by the observer; `None` before
    /// the first batch.
    pub(in crate::app) intersecting: Option<bool>,
}

pub struct IndicatorState {
    pub(in crate::app) target: String,
    pub(in crate::app) active: bool,
}

impl IndicatorState {
    pub(in crate::app) fn new(target: String) -> Self {
        Self {
            target,
            active: false,
        }
    }
}
