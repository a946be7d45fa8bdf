//! Progress bar utilities for archive operations

use kdam::{Animation, Bar, BarExt};

/// Configuration for creating a progress bar
pub struct ProgressBarConfig {
    pub total: usize,
    pub desc: &'static str,
    pub animation: Animation,
}

impl ProgressBarConfig {
    pub fn new(total: usize, desc: &'static str, animation: Animation) -> Self {
        Self {
            total,
            desc,
            animation,
        }
    }
}

/// Create a progress bar with the given configuration
pub fn create_progress_bar(config: ProgressBarConfig) -> Bar {
    kdam::tqdm!(
        total = config.total,
        desc = config.desc,
        animation = config.animation,
        unit = " entries"
    )
}

/// Optional bar: `None` when not verbose, so callers can update unconditionally.
pub struct EntryProgress {
    bar: Option<Bar>,
}

impl EntryProgress {
    pub fn new(show: bool, total: usize, desc: &'static str) -> Self {
        let bar = show.then(|| {
            create_progress_bar(ProgressBarConfig::new(total, desc, Animation::Classic))
        });
        Self { bar }
    }

    pub fn tick(&mut self) {
        if let Some(bar) = self.bar.as_mut() {
            let _ = bar.update(1);
        }
    }

    /// Close the bar line so following output starts fresh.
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.as_mut() {
            let _ = bar.refresh();
            eprintln!();
        }
    }
}
