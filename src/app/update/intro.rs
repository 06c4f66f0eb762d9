use super::super::host::Host;
use super::super::state::App;
use crate::media::MediaElement;
use tracing::{debug, info};

impl App {
    pub(super) fn handle_intro_time_update<H: Host>(&mut self, section: usize, host: &H) {
        let lead = self.config.intro_reveal_lead_secs;
        let Some(intro) = self.intro.as_mut() else {
            return;
        };
        if intro.section != section || intro.pre_shown {
            return;
        }
        let Some(video) = host.video(section) else {
            return;
        };
        let Some(duration) = video.duration().filter(|d| d.is_finite() && *d > 0.0) else {
            return;
        };
        let remaining = duration - video.current_time();
        if remaining < lead {
            intro.pre_shown = true;
            debug!(remaining, "Intro near its end");
            self.reveal_intro("near-end");
        }
    }

    pub(super) fn handle_intro_ended(&mut self, section: usize) {
        if self.intro.as_ref().is_some_and(|intro| intro.section == section) {
            self.reveal_intro("ended");
        }
    }

    pub(super) fn handle_intro_fallback(&mut self) {
        self.reveal_intro("fallback");
    }

    fn reveal_intro(&mut self, trigger: &'static str) {
        let Some(intro) = self.intro.as_mut() else {
            return;
        };
        if intro.title_shown {
            return;
        }
        intro.title_shown = true;
        let section = intro.section;
        if let Some(flags) = self.video_flags_mut(section) {
            flags.dimmed = true;
        }
        info!(section, trigger, "Intro title revealed");
    }
}

#[cfg(test)]
mod tests {
    use crate::app::{MediaSignal, Message, TimerKind};
    use crate::config::AppConfig;
    use crate::manifest::{IntroSpec, PageManifest, SectionSpec, VideoSpec};
    use crate::media::MediaElement;
    use crate::sim::Simulation;

    fn intro_page(title: bool) -> PageManifest {
        PageManifest {
            viewport_height: 800.0,
            scroll_context: Default::default(),
            advance_control: false,
            intro: Some(IntroSpec {
                section: "intro".into(),
                title,
            }),
            indicators: None,
            sections: vec![
                SectionSpec {
                    id: "intro".into(),
                    height: None,
                    video: Some(VideoSpec {
                        duration: 2.0,
                        ..VideoSpec::default()
                    }),
                },
                SectionSpec {
                    id: "next".into(),
                    height: None,
                    video: None,
                },
            ],
        }
    }

    fn revealed(sim: &Simulation) -> (Option<bool>, bool) {
        let view = sim.app().view();
        (
            view.intro_title_shown,
            view.sections[0].video.expect("video").dimmed,
        )
    }

    #[test]
    fn near_end_position_reveals() {
        let mut sim = Simulation::new(&intro_page(true), AppConfig::default()).expect("sim");
        sim.page_mut()
            .video_mut(0)
            .expect("video")
            .set_current_time(1.7)
            .expect("seek");
        sim.dispatch(Message::Media {
            section: 0,
            signal: MediaSignal::TimeUpdate,
        });

        assert_eq!(revealed(&sim), (Some(true), true));
    }

    #[test]
    fn early_position_does_not_reveal() {
        let mut sim = Simulation::new(&intro_page(true), AppConfig::default()).expect("sim");
        sim.page_mut()
            .video_mut(0)
            .expect("video")
            .set_current_time(0.5)
            .expect("seek");
        sim.dispatch(Message::Media {
            section: 0,
            signal: MediaSignal::TimeUpdate,
        });

        assert_eq!(revealed(&sim), (Some(false), false));
    }

    #[test]
    fn playback_reaches_the_reveal_before_the_fallback() {
        let mut sim = Simulation::new(&intro_page(true), AppConfig::default()).expect("sim");
        sim.load();
        sim.advance_ms(2100);

        assert_eq!(revealed(&sim), (Some(true), true));
        assert_eq!(sim.page().pending_timers(TimerKind::IntroFallback), 1);
    }

    #[test]
    fn fallback_reveals_a_stalled_intro() {
        let mut config = AppConfig::default();
        config.intro_fallback_ms = 500;
        let mut sim = Simulation::new(&intro_page(true), config).expect("sim");
        sim.advance_ms(499);
        assert_eq!(revealed(&sim), (Some(false), false));

        sim.advance_ms(1);
        assert_eq!(revealed(&sim), (Some(true), true));
    }

    #[test]
    fn every_trigger_after_the_first_is_a_no_op() {
        let mut sim = Simulation::new(&intro_page(true), AppConfig::default()).expect("sim");
        sim.dispatch(Message::Media {
            section: 0,
            signal: MediaSignal::Ended,
        });
        sim.dispatch(Message::TimerFired(TimerKind::IntroFallback));
        sim.dispatch(Message::TimerFired(TimerKind::IntroFallback));
        sim.dispatch(Message::Media {
            section: 0,
            signal: MediaSignal::Ended,
        });

        assert_eq!(revealed(&sim), (Some(true), true));
    }

    #[test]
    fn missing_title_disables_the_reveal() {
        let mut sim = Simulation::new(&intro_page(false), AppConfig::default()).expect("sim");
        sim.dispatch(Message::Media {
            section: 0,
            signal: MediaSignal::Ended,
        });

        assert_eq!(revealed(&sim), (None, false));
        assert_eq!(sim.page().pending_timers(TimerKind::IntroFallback), 0);
    }
}
