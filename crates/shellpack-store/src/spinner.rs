//! Cosmetic console spinner around blocking calls.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

/// Run `task` on the calling thread while a spinner ticks on indicatif's
/// background thread. The spinner is finished before this returns.
pub fn with_spinner<T>(quiet: bool, message: &str, task: impl FnOnce() -> T) -> T {
    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(TICK);

    let out = task();

    pb.finish_and_clear();
    out
}
