//! Progress reporting using indicatif.

use indicatif::{ProgressBar, ProgressStyle};

/// Style templates for progress bars.
pub mod styles {
    use super::*;

    /// Progress bar style for the per-repository pass.
    pub fn repository_progress() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
    }
}

/// A progress tracker shared by the rayon workers loading READMEs.
#[derive(Clone)]
pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    /// Create a visible progress tracker with the given total count.
    pub fn new(total: usize, message: &str) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(styles::repository_progress());
        bar.set_message(message.to_string());
        Self { bar }
    }

    /// Create a hidden progress tracker (for non-TTY output).
    pub fn hidden(total: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total as u64);
        Self { bar }
    }

    /// Visible on a TTY when `enabled`, hidden otherwise.
    pub fn for_terminal(total: usize, message: &str, enabled: bool) -> Self {
        if enabled && is_tty() {
            Self::new(total, message)
        } else {
            Self::hidden(total)
        }
    }

    /// Advance by one repository.
    pub fn inc(&self) {
        self.bar.inc(1);
    }

    /// Finish and clear the progress bar.
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Check if stderr is a TTY.
pub fn is_tty() -> bool {
    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}
