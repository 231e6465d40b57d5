//! This crate collects the terminal-facing elements of the simulation CLI:
//! logging, progress reporting and parsing of user-friendly values.

use indicatif::{ProgressBar, ProgressFinish, ProgressStyle};
use log::LevelFilter;
use render::Color;
use std::{borrow::Cow, time::Duration};
use syslog::Facility;

/// Enable logging to syslog, or to stderr if syslog is not reachable
pub fn init_syslog() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(error) = syslog::init(Facility::default(), level, None) {
        // Logger may already have been set by an earlier call, ignore that
        let _ = env_logger::Builder::new().filter_level(level).try_init();
        log::warn!("Syslog is unavailable ({error}), logging to stderr instead");
    }
}

/// Set up a progress bar over some number of steps
pub fn init_progress_reporting(
    message: impl Into<Cow<'static, str>>,
    num_steps: usize,
) -> ProgressBar {
    let progress = ProgressBar::new(num_steps as u64)
        .with_message(message)
        .with_style(
            ProgressStyle::with_template("{msg} {pos}/{len} {wide_bar} {elapsed}/~{duration}")
                .expect("Failed to parse style"),
        )
        .with_finish(ProgressFinish::AndClear);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

/// Parse a color given as "R,G,B" with decimal 8-bit channels
pub fn parse_color(s: &str) -> Result<Color, String> {
    let channels = s
        .split(',')
        .map(|channel| {
            channel
                .trim()
                .parse::<u8>()
                .map_err(|e| format!("invalid color channel {channel:?}: {e}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let rgb: [u8; 3] = channels
        .try_into()
        .map_err(|_| format!("expected three comma-separated channels, got {s:?}"))?;
    Ok(Color::from(rgb))
}
