use super::models::AppConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            AppConfig::default()
        }
    }
}

/// Parse the grouped TOML layout into a sanitized `AppConfig`.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let tables: ConfigTables = toml::from_str(contents).context("parsing config tables")?;
    Ok(AppConfig::from(tables).sanitized())
}

/// Render `config` in the grouped TOML layout.
pub fn serialize_config(config: &AppConfig) -> Result<String> {
    toml::to_string(&ConfigTables::from(config)).context("serializing config tables")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::LogLevel;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = parse_config("").expect("empty config parses");
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.threshold, 0.65);
        assert_eq!(cfg.snap_debounce_ms, 120);
        assert_eq!(cfg.snap_settle_ms, 600);
        assert_eq!(cfg.intro_fallback_ms, 3000);
    }

    #[test]
    fn reads_grouped_tables() {
        let cfg = parse_config(
            r#"
            [observer]
            threshold = 0.6

            [snap]
            debounce_ms = 200

            [logging]
            log_level = "warn"
            "#,
        )
        .expect("grouped config parses");
        assert_eq!(cfg.threshold, 0.6);
        assert_eq!(cfg.snap_debounce_ms, 200);
        assert_eq!(cfg.snap_settle_ms, 600);
        assert_eq!(cfg.log_level, LogLevel::Warn);
    }

    #[test]
    fn out_of_range_values_are_replaced() {
        let cfg = parse_config(
            r#"
            [observer]
            threshold = 1.7

            [simulation]
            frame_interval_ms = 0
            "#,
        )
        .expect("config parses");
        assert_eq!(cfg.threshold, 0.65);
        assert_eq!(cfg.frame_interval_ms, 16);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(parse_config("[observer\nthreshold = ").is_err());
    }

    #[test]
    fn serialized_config_reads_back() {
        let mut cfg = AppConfig::default();
        cfg.snap_settle_ms = 450;
        cfg.log_level = LogLevel::Info;
        let text = serialize_config(&cfg).expect("serializes");
        assert_eq!(parse_config(&text).expect("parses"), cfg);
    }

    #[test]
    fn missing_file_falls_back() {
        let cfg = load_config(Path::new("/nonexistent/scroll-reel/config.toml"));
        assert_eq!(cfg, AppConfig::default());
    }
}
