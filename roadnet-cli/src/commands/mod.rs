//! Command implementations for the roadnet CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod enrich;
pub mod graph;
pub mod list;
pub mod run;

use crate::constants::{SPINNER_TICKS, SPINNER_TICK_MS};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for progress display.
///
/// Hidden when `quiet` is set; indicatif also hides it when stderr is not a terminal.
pub(crate) fn create_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars(SPINNER_TICKS)
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    spinner
}

/// Format a duration as milliseconds for display.
pub(crate) fn format_ms(ms: u128) -> String {
    if ms >= 1000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}ms", ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ms() {
        assert_eq!(format_ms(42), "42ms");
        assert_eq!(format_ms(1500), "1.50s");
    }

    #[test]
    fn test_quiet_spinner_is_hidden() {
        assert!(create_spinner(true).is_hidden());
    }
}
