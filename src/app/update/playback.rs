use super::super::messages::Crossing;
use super::super::state::{App, FrameTask};
use super::Effect;
use tracing::debug;

impl App {
    pub(super) fn handle_playback_crossings(
        &mut self,
        batch: &[Crossing],
        effects: &mut Vec<Effect>,
    ) {
        for crossing in batch {
            let section = crossing.section;
            let Some(flags) = self.video_flags_mut(section) else {
                continue;
            };
            flags.intersecting = Some(crossing.intersecting);

            if crossing.intersecting {
                flags.playing = true;
                debug!(section, "Section entered; play scheduled");
                self.schedule_frame(FrameTask::Play(section), effects);
            } else {
                flags.playing = false;
                effects.push(Effect::Pause(section));
                effects.push(Effect::ResetToStart(section));
                // Second rewind on the next frame catches writes lost while
                // the element was still busy with the pause.
                self.schedule_frame(FrameTask::ResetToStart(section), effects);
            }
        }
    }

    /// Completes a rewind that was requested before metadata existed.
    pub(super) fn handle_metadata_loaded(&mut self, section: usize, effects: &mut Vec<Effect>) {
        let Some(flags) = self.video_flags_mut(section) else {
            return;
        };
        if std::mem::take(&mut flags.reset_on_metadata) {
            effects.push(Effect::ApplyStartBound(section));
        }
    }
}
