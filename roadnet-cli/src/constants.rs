//! Shared constants for the roadnet CLI.

/// Spinner tick interval in milliseconds.
pub const SPINNER_TICK_MS: u64 = 100;

/// Spinner frames.
pub const SPINNER_TICKS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
