//! Read-only projection of the controller's UI flags.
//!
//! Styling consumes these flags; nothing here feeds back into the reducer.

use super::state::App;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationView {
    pub location: Option<String>,
    pub sections: Vec<SectionView>,
    pub indicators: Vec<IndicatorView>,
    /// `None` when the page has no intro overlay.
    pub intro_title_shown: Option<bool>,
    pub snap_in_flight: bool,
    pub snap_pending: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub id: String,
    pub active: bool,
    pub video: Option<VideoView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VideoView {
    pub playing: bool,
    pub dimmed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorView {
    pub target: String,
    pub active: bool,
}

impl App {
    pub fn view(&self) -> PresentationView {
        PresentationView {
            location: self.location.clone(),
            sections: self
                .sections
                .iter()
                .map(|section| SectionView {
                    id: section.id.clone(),
                    active: section.active,
                    video: section.video.as_ref().map(|flags| VideoView {
                        playing: flags.playing,
                        dimmed: flags.dimmed,
                    }),
                })
                .collect(),
            indicators: self
                .indicators
                .iter()
                .map(|indicator| IndicatorView {
                    target: indicator.target.clone(),
                    active: indicator.active,
                })
                .collect(),
            intro_title_shown: self.intro.as_ref().map(|intro| intro.title_shown),
            snap_in_flight: self.snap.in_flight,
            snap_pending: self.snap.debounce_armed,
        }
    }

    /// Identifier of the single active section, if exactly one is active.
    pub fn active_section(&self) -> Option<&str> {
        let mut active = self.sections.iter().filter(|section| section.active);
        let first = active.next()?;
        active.next().is_none().then_some(first.id.as_str())
    }
}
