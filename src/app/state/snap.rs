/// Cooperative lock around programmatic snaps.
#[derive(Debug, Default)]
pub struct SnapGuard {
    /// A snap scroll is animating; new corrections are dropped.
    pub(in crate::app) in_flight: bool,
    /// The debounce timer is armed.
    pub(in crate::app) debounce_armed: bool,
}
