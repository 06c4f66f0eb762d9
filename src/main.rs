//! Entry point for the scroll-reel page simulator.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load configuration from `conf/config.toml` (or `--config`).
//! - Load the page manifest and an optional scenario.
//! - Replay the scenario and print each snapshot as one JSON line.

mod app;
mod config;
mod geometry;
mod manifest;
mod media;
mod script;
mod sim;

use crate::config::{load_config, serialize_config};
use crate::manifest::load_manifest;
use crate::script::{Scenario, load_scenario, run_scenario};
use crate::sim::Simulation;
use anyhow::{Context, Result, anyhow};
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const USAGE: &str =
    "Usage: scroll-reel [--config <config.toml>] [--print-config] <page.toml> [scenario.toml]";

#[derive(Debug)]
struct Args {
    config: PathBuf,
    print_config: bool,
    page: Option<PathBuf>,
    scenario: Option<PathBuf>,
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    let config = load_config(&args.config);
    set_log_level(reload_handle, config.log_level.as_filter_str());

    if args.print_config {
        print!("{}", serialize_config(&config)?);
        if args.page.is_none() {
            return Ok(());
        }
    }

    let page_path = args.page.as_deref().ok_or_else(|| anyhow!(USAGE))?;
    ensure_exists(page_path)?;
    let manifest = load_manifest(page_path)?;
    let scenario = match &args.scenario {
        Some(path) => {
            ensure_exists(path)?;
            load_scenario(path)?
        }
        None => Scenario::settle(),
    };

    info!(
        page = %page_path.display(),
        steps = scenario.steps.len(),
        threshold = config.threshold,
        level = %config.log_level,
        "Starting simulation"
    );

    let mut sim = Simulation::new(&manifest, config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_scenario(&mut sim, &scenario, |snapshot| {
        let line = serde_json::to_string(&snapshot).context("Failed to encode snapshot")?;
        writeln!(out, "{line}").context("Failed to write snapshot")
    })?;
    out.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn parse_args<I>(raw: I) -> Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut args = Args {
        config: PathBuf::from("conf/config.toml"),
        print_config: false,
        page: None,
        scenario: None,
    };
    let mut raw = raw.into_iter();
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--config" => {
                let path = raw
                    .next()
                    .ok_or_else(|| anyhow!("--config needs a path\n{USAGE}"))?;
                args.config = PathBuf::from(path);
            }
            "--print-config" => args.print_config = true,
            "-h" | "--help" => return Err(anyhow!(USAGE)),
            flag if flag.starts_with("--") => {
                return Err(anyhow!("Unknown flag {flag}\n{USAGE}"));
            }
            _ if args.page.is_none() => args.page = Some(PathBuf::from(&arg)),
            _ if args.scenario.is_none() => args.scenario = Some(PathBuf::from(&arg)),
            _ => return Err(anyhow!("Unexpected argument {arg}\n{USAGE}")),
        }
    }
    if args.page.is_none() && !args.print_config {
        return Err(anyhow!(USAGE));
    }
    Ok(args)
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }
    Ok(())
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    if env::var_os("RUST_LOG").is_some() {
        info!(%level, "RUST_LOG set; keeping environment filter");
        return;
    }
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
