use super::super::messages::Crossing;
use super::super::state::App;
use super::Effect;
use tracing::{debug, info};

impl App {
    pub(super) fn handle_navigation_crossings(
        &mut self,
        batch: &[Crossing],
        effects: &mut Vec<Effect>,
    ) {
        for crossing in batch.iter().filter(|crossing| crossing.intersecting) {
            let Some(id) = self
                .sections
                .get(crossing.section)
                .map(|section| section.id.clone())
            else {
                continue;
            };

            self.set_active_indicator(&id);
            self.set_active_section(crossing.section);
            if self.location.as_deref() != Some(id.as_str()) {
                info!(section = %id, "Section became current");
                effects.push(Effect::ReplaceLocation(id.clone()));
            }
            self.location = Some(id);
        }
    }

    pub(super) fn handle_indicator_clicked(&mut self, indicator: usize, effects: &mut Vec<Effect>) {
        let Some(target) = self.indicators.get(indicator).map(|i| i.target.as_str()) else {
            return;
        };
        match self.section_index(target) {
            Some(section) => {
                debug!(indicator, section, "Indicator clicked");
                effects.push(Effect::ScrollIntoView(section));
            }
            None => debug!(indicator, target, "Indicator targets an unknown section"),
        }
    }
}
