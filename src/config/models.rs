use serde::Deserialize;
use std::time::Duration;

/// Tunables for the controller and the simulated page.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default = "crate::config::defaults::default_threshold")]
    pub threshold: f32,
    #[serde(default = "crate::config::defaults::default_root_margin_px")]
    pub root_margin_px: f32,
    #[serde(default = "crate::config::defaults::default_snap_debounce_ms")]
    pub snap_debounce_ms: u64,
    #[serde(default = "crate::config::defaults::default_snap_settle_ms")]
    pub snap_settle_ms: u64,
    #[serde(default = "crate::config::defaults::default_startup_nudge_px")]
    pub startup_nudge_px: f32,
    #[serde(default = "crate::config::defaults::default_intro_fallback_ms")]
    pub intro_fallback_ms: u64,
    #[serde(default = "crate::config::defaults::default_intro_reveal_lead_secs")]
    pub intro_reveal_lead_secs: f64,
    #[serde(default = "crate::config::defaults::default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    #[serde(default = "crate::config::defaults::default_timeupdate_interval_ms")]
    pub timeupdate_interval_ms: u64,
    #[serde(default = "crate::config::defaults::default_smooth_scroll_ms")]
    pub smooth_scroll_ms: u64,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            threshold: crate::config::defaults::default_threshold(),
            root_margin_px: crate::config::defaults::default_root_margin_px(),
            snap_debounce_ms: crate::config::defaults::default_snap_debounce_ms(),
            snap_settle_ms: crate::config::defaults::default_snap_settle_ms(),
            startup_nudge_px: crate::config::defaults::default_startup_nudge_px(),
            intro_fallback_ms: crate::config::defaults::default_intro_fallback_ms(),
            intro_reveal_lead_secs: crate::config::defaults::default_intro_reveal_lead_secs(),
            frame_interval_ms: crate::config::defaults::default_frame_interval_ms(),
            timeupdate_interval_ms: crate::config::defaults::default_timeupdate_interval_ms(),
            smooth_scroll_ms: crate::config::defaults::default_smooth_scroll_ms(),
            log_level: crate::config::defaults::default_log_level(),
        }
    }
}

impl AppConfig {
    /// Replace out-of-range values with defaults so timers and the observer
    /// always have something usable.
    pub fn sanitized(mut self) -> Self {
        if !(self.threshold.is_finite() && self.threshold > 0.0 && self.threshold <= 1.0) {
            self.threshold = crate::config::defaults::default_threshold();
        }
        if !self.root_margin_px.is_finite() || self.root_margin_px < 0.0 {
            self.root_margin_px = crate::config::defaults::default_root_margin_px();
        }
        if !self.startup_nudge_px.is_finite() || self.startup_nudge_px < 1.0 {
            self.startup_nudge_px = crate::config::defaults::default_startup_nudge_px();
        }
        if !self.intro_reveal_lead_secs.is_finite() || self.intro_reveal_lead_secs < 0.0 {
            self.intro_reveal_lead_secs = crate::config::defaults::default_intro_reveal_lead_secs();
        }
        if self.frame_interval_ms == 0 {
            self.frame_interval_ms = crate::config::defaults::default_frame_interval_ms();
        }
        if self.timeupdate_interval_ms == 0 {
            self.timeupdate_interval_ms = crate::config::defaults::default_timeupdate_interval_ms();
        }
        self
    }

    pub fn snap_debounce(&self) -> Duration {
        Duration::from_millis(self.snap_debounce_ms)
    }

    pub fn snap_settle(&self) -> Duration {
        Duration::from_millis(self.snap_settle_ms)
    }

    pub fn intro_fallback(&self) -> Duration {
        Duration::from_millis(self.intro_fallback_ms)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
