use super::messages::{Crossing, TimerKind};
use crate::geometry::{Rect, ScrollContext};
use crate::media::MediaElement;
use std::time::Duration;

/// The page surface the controller reads layout from and writes effects to.
///
/// Implementations deliver events back through [`super::App::update`]; none
/// of these calls may re-enter the controller synchronously.
pub trait Host {
    type Video: MediaElement;

    /// Client rect of the scroll container.
    fn container_rect(&self) -> Rect;

    /// Height of the page viewport.
    fn viewport_height(&self) -> f32;

    fn scroll_context(&self) -> ScrollContext;

    /// Client rect of a section, `None` when the index is unknown.
    fn section_rect(&self, section: usize) -> Option<Rect>;

    fn video(&self, section: usize) -> Option<&Self::Video>;

    fn video_mut(&mut self, section: usize) -> Option<&mut Self::Video>;

    /// Jump the container to an absolute offset.
    fn scroll_to(&mut self, top: f32);

    /// Smooth-scroll so the section's top aligns with the container's top.
    fn scroll_into_view(&mut self, section: usize);

    /// Replace the location fragment without adding a history entry.
    fn replace_location(&mut self, fragment: &str);

    fn start_timer(&mut self, timer: TimerKind, delay: Duration);

    fn cancel_timer(&mut self, timer: TimerKind);

    /// Ask for one `Message::AnimationFrame` before the next paint.
    fn request_animation_frame(&mut self);

    /// Drain crossings detected but not yet delivered.
    fn take_records(&mut self) -> Vec<Crossing>;
}
