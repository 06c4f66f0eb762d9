use super::super::host::Host;
use super::super::state::App;
use super::Effect;
use crate::geometry::{ScrollContext, nearest_to_center};
use tracing::{debug, info};

impl App {
    pub(super) fn handle_advance_requested<H: Host>(&mut self, host: &H, effects: &mut Vec<Effect>) {
        if !self.advance_control || self.sections.is_empty() {
            return;
        }

        let center = match host.scroll_context() {
            ScrollContext::Container => host.container_rect().center_y(),
            ScrollContext::Viewport => host.viewport_height() / 2.0,
        };
        let rects = (0..self.sections.len())
            .filter_map(|idx| host.section_rect(idx).map(|rect| (idx, rect)));
        let current = nearest_to_center(center, rects).unwrap_or(0);
        let next = (current + 1).min(self.sections.len() - 1);

        if next == current {
            debug!(section = current, "Already at the last section");
            return;
        }
        info!(from = current, to = next, "Advancing");
        effects.push(Effect::ScrollIntoView(next));
    }
}
