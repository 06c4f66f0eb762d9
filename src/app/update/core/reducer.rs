use super::super::super::host::Host;
use super::super::super::messages::{MediaSignal, Message, TimerKind};
use super::super::super::state::{App, FrameTask};
use super::super::Effect;
use tracing::debug;

impl App {
    pub(super) fn reduce<H: Host>(&mut self, message: Message, host: &H) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::PageLoaded => self.handle_page_loaded(host, &mut effects),
            Message::Intersections(batch) => {
                // Both synchronizers see the whole batch; their mutations are disjoint.
                self.handle_playback_crossings(&batch, &mut effects);
                self.handle_navigation_crossings(&batch, &mut effects);
            }
            Message::Scrolled => self.handle_scrolled(&mut effects),
            Message::TimerFired(TimerKind::SnapDebounce) => {
                self.handle_snap_debounce(host, &mut effects);
            }
            Message::TimerFired(TimerKind::SnapSettle) => self.handle_snap_settled(),
            Message::TimerFired(TimerKind::IntroFallback) => self.handle_intro_fallback(),
            Message::AnimationFrame => self.handle_animation_frame(&mut effects),
            Message::Media { section, signal } => {
                self.handle_media_signal(section, signal, host, &mut effects);
            }
            Message::IndicatorClicked(indicator) => {
                self.handle_indicator_clicked(indicator, &mut effects);
            }
            Message::AdvanceRequested => self.handle_advance_requested(host, &mut effects),
        }

        effects
    }

    fn handle_media_signal<H: Host>(
        &mut self,
        section: usize,
        signal: MediaSignal,
        host: &H,
        effects: &mut Vec<Effect>,
    ) {
        match signal {
            MediaSignal::MetadataLoaded => self.handle_metadata_loaded(section, effects),
            MediaSignal::DataLoaded | MediaSignal::CanPlay => {
                self.handle_first_video_data(section, effects);
            }
            MediaSignal::TimeUpdate => self.handle_intro_time_update(section, host),
            MediaSignal::Ended => self.handle_intro_ended(section),
        }
    }

    fn handle_animation_frame(&mut self, effects: &mut Vec<Effect>) {
        for task in std::mem::take(&mut self.frame_queue) {
            match task {
                FrameTask::Play(section) => {
                    // A leave since scheduling cleared the intent; playing now would
                    // leave an off-screen video running.
                    if self.is_marked_playing(section) {
                        effects.push(Effect::Play(section));
                    } else {
                        debug!(section, "Dropping stale play request");
                    }
                }
                FrameTask::ResetToStart(section) => effects.push(Effect::ResetToStart(section)),
                FrameTask::TakeRecords => effects.push(Effect::TakeRecords),
            }
        }
    }
}
