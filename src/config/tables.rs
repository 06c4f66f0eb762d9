use super::defaults;
use super::models::{AppConfig, LogLevel};
use serde::Deserialize;

/// On-disk layout of `conf/config.toml`, grouped by concern.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    observer: ObserverConfig,
    #[serde(default)]
    snap: SnapConfig,
    #[serde(default)]
    startup: StartupConfig,
    #[serde(default)]
    intro: IntroConfig,
    #[serde(default)]
    simulation: SimulationConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            threshold: tables.observer.threshold,
            root_margin_px: tables.observer.root_margin_px,
            snap_debounce_ms: tables.snap.debounce_ms,
            snap_settle_ms: tables.snap.settle_ms,
            startup_nudge_px: tables.startup.nudge_px,
            intro_fallback_ms: tables.intro.fallback_ms,
            intro_reveal_lead_secs: tables.intro.reveal_lead_secs,
            frame_interval_ms: tables.simulation.frame_interval_ms,
            timeupdate_interval_ms: tables.simulation.timeupdate_interval_ms,
            smooth_scroll_ms: tables.simulation.smooth_scroll_ms,
            log_level: tables.logging.log_level,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            observer: ObserverConfig {
                threshold: config.threshold,
                root_margin_px: config.root_margin_px,
            },
            snap: SnapConfig {
                debounce_ms: config.snap_debounce_ms,
                settle_ms: config.snap_settle_ms,
            },
            startup: StartupConfig {
                nudge_px: config.startup_nudge_px,
            },
            intro: IntroConfig {
                fallback_ms: config.intro_fallback_ms,
                reveal_lead_secs: config.intro_reveal_lead_secs,
            },
            simulation: SimulationConfig {
                frame_interval_ms: config.frame_interval_ms,
                timeupdate_interval_ms: config.timeupdate_interval_ms,
                smooth_scroll_ms: config.smooth_scroll_ms,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ObserverConfig {
    #[serde(default = "defaults::default_threshold")]
    threshold: f32,
    #[serde(default = "defaults::default_root_margin_px")]
    root_margin_px: f32,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        ObserverConfig {
            threshold: defaults::default_threshold(),
            root_margin_px: defaults::default_root_margin_px(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct SnapConfig {
    #[serde(default = "defaults::default_snap_debounce_ms")]
    debounce_ms: u64,
    #[serde(default = "defaults::default_snap_settle_ms")]
    settle_ms: u64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        SnapConfig {
            debounce_ms: defaults::default_snap_debounce_ms(),
            settle_ms: defaults::default_snap_settle_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct StartupConfig {
    #[serde(default = "defaults::default_startup_nudge_px")]
    nudge_px: f32,
}

impl Default for StartupConfig {
    fn default() -> Self {
        StartupConfig {
            nudge_px: defaults::default_startup_nudge_px(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct IntroConfig {
    #[serde(default = "defaults::default_intro_fallback_ms")]
    fallback_ms: u64,
    #[serde(default = "defaults::default_intro_reveal_lead_secs")]
    reveal_lead_secs: f64,
}

impl Default for IntroConfig {
    fn default() -> Self {
        IntroConfig {
            fallback_ms: defaults::default_intro_fallback_ms(),
            reveal_lead_secs: defaults::default_intro_reveal_lead_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct SimulationConfig {
    #[serde(default = "defaults::default_frame_interval_ms")]
    frame_interval_ms: u64,
    #[serde(default = "defaults::default_timeupdate_interval_ms")]
    timeupdate_interval_ms: u64,
    #[serde(default = "defaults::default_smooth_scroll_ms")]
    smooth_scroll_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            frame_interval_ms: defaults::default_frame_interval_ms(),
            timeupdate_interval_ms: defaults::default_timeupdate_interval_ms(),
            smooth_scroll_ms: defaults::default_smooth_scroll_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}
