use anyhow::{Context, Result};
use log::LevelFilter;

use crate::config::LoggingConfig;

/// Level to run at, or `None` when logging is off. Each `-v` raises the
/// level past the configured one and turns logging on.
pub fn effective_level(config: &LoggingConfig, verbose: u8) -> Option<LevelFilter> {
    match verbose {
        0 if !config.enabled => None,
        0 => config.level_filter(),
        1 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

pub fn init(config: &LoggingConfig, verbose: u8) -> Result<()> {
    let Some(level) = effective_level(config, verbose) else {
        return Ok(());
    };

    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .level_for("ureq", LevelFilter::Warn)
        .level_for("ureq_proto", LevelFilter::Warn);

    let dispatch = match &config.file {
        Some(path) => dispatch.chain(
            fern::log_file(path).with_context(|| format!("Failed to open log file {}", path.display()))?,
        ),
        None => dispatch.chain(std::io::stderr()),
    };

    dispatch.apply().context("Logger already initialised")?;
    Ok(())
}
