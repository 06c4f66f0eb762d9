pub(crate) fn default_threshold() -> f32 {
    0.65
}

pub(crate) fn default_root_margin_px() -> f32 {
    1.0
}

pub(crate) fn default_snap_debounce_ms() -> u64 {
    120
}

pub(crate) fn default_snap_settle_ms() -> u64 {
    600
}

pub(crate) fn default_startup_nudge_px() -> f32 {
    10.0
}

pub(crate) fn default_intro_fallback_ms() -> u64 {
    3000
}

pub(crate) fn default_intro_reveal_lead_secs() -> f64 {
    0.4
}

pub(crate) fn default_frame_interval_ms() -> u64 {
    16
}

pub(crate) fn default_timeupdate_interval_ms() -> u64 {
    250
}

pub(crate) fn default_smooth_scroll_ms() -> u64 {
    300
}

pub(crate) fn default_log_level() -> super::models::LogLevel {
    super::models::LogLevel::Debug
}
