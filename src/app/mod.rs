//! Scroll-to-media synchronization controller.
//!
//! The controller is a reducer: hosts feed it typed [`Message`]s, it updates
//! its UI flags and emits effects that it then applies through the
//! [`Host`] trait. Every transition sets state rather than toggling it, so
//! duplicated or reordered events converge on the same result.

mod host;
mod messages;
mod state;
mod update;
mod view;

pub use host::Host;
pub use messages::{Crossing, MediaSignal, Message, TimerKind};
pub use state::App;
pub use view::PresentationView;
