//! Vertical layout math shared by the controller and the simulated page.
//!
//! Sections span the full width of the scroll container, so only the
//! vertical axis matters: a `Rect` is a top edge plus a height, expressed in
//! client coordinates (relative to the page viewport).

use serde::{Deserialize, Serialize};

/// A vertical band in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub top: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(top: f32, height: f32) -> Self {
        Self {
            top,
            height: if height.is_finite() { height.max(0.0) } else { 0.0 },
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }

    /// Grow the band by `margin` pixels above and below.
    pub fn expanded(&self, margin: f32) -> Rect {
        let margin = if margin.is_finite() { margin } else { 0.0 };
        Rect::new(self.top - margin, self.height + margin * 2.0)
    }
}

/// Which element drives scrolling for center lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollContext {
    /// A dedicated scroll container hosts the sections.
    #[default]
    Container,
    /// The document itself scrolls; centers are measured against the viewport.
    Viewport,
}

/// Fraction of `target` that overlaps `root` once the root is grown by
/// `root_margin` on the vertical axis.
pub fn intersection_ratio(target: Rect, root: Rect, root_margin: f32) -> f32 {
    if target.height <= f32::EPSILON {
        return 0.0;
    }
    let root = root.expanded(root_margin);
    let overlap = target.bottom().min(root.bottom()) - target.top.max(root.top);
    (overlap.max(0.0) / target.height).clamp(0.0, 1.0)
}

/// Index of the rect whose center is closest to `center_y`.
///
/// Ties keep the first candidate in iteration order.
pub fn nearest_to_center<I>(center_y: f32, rects: I) -> Option<usize>
where
    I: IntoIterator<Item = (usize, Rect)>,
{
    let mut best: Option<(usize, f32)> = None;
    for (idx, rect) in rects {
        let distance = (rect.center_y() - center_y).abs();
        if !distance.is_finite() {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((idx, distance)),
        }
    }
    best.map(|(idx, _)| idx)
}
