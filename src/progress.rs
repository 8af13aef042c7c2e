//! Progress bar display while staging bundle contents

use indicatif::{ProgressBar, ProgressStyle};

const MESSAGE_WIDTH: usize = 50;

/// Progress display for copying resources into a staged bundle
///
/// Draws to stderr and stays hidden when stderr is not a terminal.
pub struct ProgressDisplay {
    pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display over `total` copy steps
    pub fn new(total: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("  [{bar:40.green/yellow}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ");

        let pb = ProgressBar::new(total);
        pb.set_style(style);
        Self { pb }
    }

    /// Advance by one step, showing `path`
    pub fn update(&self, path: &str) {
        self.pb
            .set_message(console::truncate_str(path, MESSAGE_WIDTH, "...").into_owned());
        self.pb.inc(1);
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.pb.abandon();
    }
}
