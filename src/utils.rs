//! Utility functions
//!
//! Common helper functions used throughout the project.

use std::time::Duration;

/// Format a duration for progress reporting
///
/// Durations of a minute or more print as "M min S sec", shorter ones as
/// fractional seconds.
pub fn format_duration(dur: Duration) -> String {
    let secs = dur.as_secs();
    if secs >= 60 {
        format!("{} min {} sec", secs / 60, secs % 60)
    } else {
        format!("{:.1} sec", dur.as_secs_f64())
    }
}
