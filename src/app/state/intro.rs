/// Reveal bookkeeping for the intro section's title overlay.
#[derive(Debug)]
pub struct IntroState {
    pub(in crate::app) section: usize,
    /// The title's `show` flag.
    pub(in crate::app) title_shown: bool,
    /// The near-end position check already fired.
    pub(in crate::app) pre_shown: bool,
}

impl IntroState {
    pub(in crate::app) fn new(section: usize) -> Self {
        Self {
            section,
            title_shown: false,
            pre_shown: false,
        }
    }
}
