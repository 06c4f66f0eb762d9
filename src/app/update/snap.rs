use super::super::host::Host;
use super::super::messages::TimerKind;
use super::super::state::App;
use super::Effect;
use crate::geometry::nearest_to_center;
use tracing::{debug, info};

impl App {
    pub(super) fn handle_scrolled(&mut self, effects: &mut Vec<Effect>) {
        if self.snap.in_flight {
            return;
        }
        effects.push(Effect::CancelTimer(TimerKind::SnapDebounce));
        effects.push(Effect::StartTimer {
            timer: TimerKind::SnapDebounce,
            delay: self.config.snap_debounce(),
        });
        self.snap.debounce_armed = true;
    }

    pub(super) fn handle_snap_debounce<H: Host>(&mut self, host: &H, effects: &mut Vec<Effect>) {
        self.snap.debounce_armed = false;
        if self.snap.in_flight {
            debug!("Snap already in flight; correction dropped");
            return;
        }

        let center = host.container_rect().center_y();
        let rects = (0..self.sections.len())
            .filter_map(|idx| host.section_rect(idx).map(|rect| (idx, rect)));
        let Some(target) = nearest_to_center(center, rects) else {
            return;
        };

        info!(section = %self.sections[target].id, center, "Snapping to nearest section");
        self.snap.in_flight = true;
        effects.push(Effect::ScrollIntoView(target));
        effects.push(Effect::StartTimer {
            timer: TimerKind::SnapSettle,
            delay: self.config.snap_settle(),
        });
    }

    pub(super) fn handle_snap_settled(&mut self) {
        if self.snap.in_flight {
            debug!("Snap settled");
        }
        self.snap.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use crate::app::{Message, TimerKind};
    use crate::config::AppConfig;
    use crate::manifest::{PageManifest, SectionSpec};
    use crate::sim::Simulation;

    fn page() -> PageManifest {
        PageManifest {
            viewport_height: 800.0,
            scroll_context: Default::default(),
            advance_control: false,
            intro: None,
            indicators: None,
            sections: ["s1", "s2", "s3"]
                .into_iter()
                .map(|id| SectionSpec {
                    id: id.to_string(),
                    height: None,
                    video: None,
                })
                .collect(),
        }
    }

    #[test]
    fn scroll_arms_the_debounce_once() {
        let mut sim = Simulation::new(&page(), AppConfig::default()).expect("sim");
        sim.dispatch(Message::Scrolled);
        sim.dispatch(Message::Scrolled);

        assert!(sim.app().view().snap_pending);
        assert_eq!(sim.page().pending_timers(TimerKind::SnapDebounce), 1);
    }

    #[test]
    fn snaps_to_nearest_center_then_settles() {
        let mut sim = Simulation::new(&page(), AppConfig::default()).expect("sim");
        sim.scroll_to(500.0);
        sim.advance_ms(200);

        assert!(sim.app().view().snap_in_flight);
        sim.advance_ms(500);
        assert_eq!(sim.page().scroll_top(), 800.0);
        assert_eq!(sim.app().active_section(), Some("s2"));

        sim.advance_ms(200);
        assert!(!sim.app().view().snap_in_flight);
    }

    #[test]
    fn ties_resolve_to_the_earlier_section() {
        let mut sim = Simulation::new(&page(), AppConfig::default()).expect("sim");
        sim.scroll_to(400.0);
        sim.advance_ms(1000);

        assert_eq!(sim.page().scroll_top(), 0.0);
        assert_eq!(sim.app().active_section(), Some("s1"));
    }

    #[test]
    fn scrolling_during_flight_does_not_rearm() {
        let mut sim = Simulation::new(&page(), AppConfig::default()).expect("sim");
        sim.scroll_to(300.0);
        sim.advance_ms(150);
        assert!(sim.app().view().snap_in_flight);

        sim.dispatch(Message::Scrolled);
        assert!(!sim.app().view().snap_pending);
        assert_eq!(sim.page().pending_timers(TimerKind::SnapDebounce), 0);
    }

    #[test]
    fn late_debounce_during_flight_is_dropped() {
        let mut sim = Simulation::new(&page(), AppConfig::default()).expect("sim");
        sim.scroll_to(1200.0);
        sim.advance_ms(150);
        assert!(sim.app().view().snap_in_flight);

        sim.dispatch(Message::TimerFired(TimerKind::SnapDebounce));
        sim.advance_ms(1000);
        assert_eq!(sim.page().scroll_top(), 800.0);
    }

    #[test]
    fn scrolling_after_settle_rearms_the_debounce() {
        let mut sim = Simulation::new(&page(), AppConfig::default()).expect("sim");
        sim.scroll_to(300.0);
        sim.advance_ms(150);
        assert!(sim.app().view().snap_in_flight);

        sim.dispatch(Message::TimerFired(TimerKind::SnapSettle));
        assert!(!sim.app().view().snap_in_flight);

        sim.dispatch(Message::Scrolled);
        assert!(sim.app().view().snap_pending);
        assert_eq!(sim.page().pending_timers(TimerKind::SnapDebounce), 1);
    }
}
