mod reducer;
mod runtime;

use super::super::host::Host;
use super::super::messages::Message;
use super::super::state::App;
use super::Effect;
use std::collections::VecDeque;

impl App {
    /// Reduce one host event and apply the resulting effects.
    ///
    /// Effects that yield further events (draining pending crossings) are
    /// processed before returning, in order.
    pub fn update<H: Host>(&mut self, message: Message, host: &mut H) {
        let mut queue = VecDeque::from([message]);
        while let Some(message) = queue.pop_front() {
            let effects = self.reduce(message, &*host);
            for effect in effects {
                queue.extend(self.run_effect(effect, host));
            }
        }
    }

    pub(in crate::app::update) fn apply_effects<H: Host>(
        &mut self,
        effects: Vec<Effect>,
        host: &mut H,
    ) {
        let follow_ups: Vec<Message> = effects
            .into_iter()
            .filter_map(|effect| self.run_effect(effect, host))
            .collect();
        for message in follow_ups {
            self.update(message, host);
        }
    }
}
