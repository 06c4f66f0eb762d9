use super::super::super::host::Host;
use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use crate::media::{self, ResetOutcome};
use tracing::{debug, trace};

impl App {
    pub(super) fn run_effect<H: Host>(&mut self, effect: Effect, host: &mut H) -> Option<Message> {
        match effect {
            Effect::Play(section) => {
                if let Some(video) = host.video_mut(section) {
                    media::play_quietly(video);
                }
                None
            }
            Effect::Pause(section) => {
                if let Some(video) = host.video_mut(section) {
                    media::pause_quietly(video);
                }
                None
            }
            Effect::ResetToStart(section) => {
                match host.video_mut(section).map(media::reset_to_start) {
                    Some(ResetOutcome::Applied(bound)) => trace!(section, bound, "Rewound"),
                    Some(ResetOutcome::Deferred) => {
                        if let Some(flags) = self.video_flags_mut(section) {
                            if !flags.reset_on_metadata {
                                debug!(section, "Rewind deferred until metadata loads");
                            }
                            flags.reset_on_metadata = true;
                        }
                    }
                    None => {}
                }
                None
            }
            Effect::ApplyStartBound(section) => {
                if let Some(video) = host.video_mut(section) {
                    let bound = media::apply_start_bound(video);
                    debug!(section, bound, "Applied deferred rewind");
                }
                None
            }
            Effect::ScrollTo { top } => {
                host.scroll_to(top);
                None
            }
            Effect::ScrollIntoView(section) => {
                host.scroll_into_view(section);
                None
            }
            Effect::ReplaceLocation(fragment) => {
                host.replace_location(&fragment);
                None
            }
            Effect::StartTimer { timer, delay } => {
                host.start_timer(timer, delay);
                None
            }
            Effect::CancelTimer(timer) => {
                host.cancel_timer(timer);
                None
            }
            Effect::RequestFrame => {
                host.request_animation_frame();
                None
            }
            Effect::TakeRecords => {
                let records = host.take_records();
                if records.is_empty() {
                    None
                } else {
                    debug!(count = records.len(), "Flushing queued crossings");
                    Some(Message::Intersections(records))
                }
            }
        }
    }
}
