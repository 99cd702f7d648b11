//! Progress reporting

use crate::config::ProgressMode;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

/// Receives copy-pass progress from the reconciler
///
/// Pure side-effect sink; reconciliation never depends on what it does.
pub trait ProgressSink {
    /// Copy pass begins over `total` source files
    fn start(&mut self, total: u64);

    /// `processed` source files have been visited so far
    fn update(&mut self, processed: u64);

    /// Reconciliation pass finished (after the delete pass)
    fn stop(&mut self);
}

/// Pick a sink for the configured mode
pub fn progress_for(mode: ProgressMode) -> Box<dyn ProgressSink> {
    match mode {
        ProgressMode::Bar => Box::new(BarProgress::new()),
        ProgressMode::Percent => Box::new(PercentProgress::new(Term::stderr())),
        ProgressMode::Off => Box::new(NoProgress),
        ProgressMode::Auto => {
            if Term::stderr().features().is_attended() {
                Box::new(BarProgress::new())
            } else {
                Box::new(NoProgress)
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn start(&mut self, _total: u64) {}
    fn update(&mut self, _processed: u64) {}
    fn stop(&mut self) {}
}

/// Terminal progress bar, cleared when the pass completes
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) =
            ProgressStyle::with_template("{bar:40.cyan/blue} {percent}% | {pos}/{len} files | ETA {eta}")
        {
            bar.set_style(style.progress_chars("█░ "));
        }
        Self { bar }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for BarProgress {
    fn start(&mut self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
    }

    fn update(&mut self, processed: u64) {
        self.bar.set_position(processed);
    }

    fn stop(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Plain `Progress: N%` line, rewritten in place
pub struct PercentProgress {
    term: Term,
    total: u64,
    last_percent: Option<u64>,
}

impl PercentProgress {
    pub fn new(term: Term) -> Self {
        Self {
            term,
            total: 0,
            last_percent: None,
        }
    }

    fn percent(&self, processed: u64) -> u64 {
        percent_of(processed, self.total)
    }
}

impl ProgressSink for PercentProgress {
    fn start(&mut self, total: u64) {
        self.total = total;
        self.last_percent = None;
    }

    fn update(&mut self, processed: u64) {
        let percent = self.percent(processed);
        if self.last_percent == Some(percent) {
            return;
        }
        self.last_percent = Some(percent);
        // Progress output is best effort.
        let _ = self.term.clear_line();
        let _ = self.term.write_str(&format!("Progress: {}%", percent));
    }

    fn stop(&mut self) {
        if self.last_percent.is_some() {
            let _ = self.term.write_line("");
        }
    }
}

/// Integer percentage, 100 for an empty pass
fn percent_of(processed: u64, total: u64) -> u64 {
    if total == 0 {
        return 100;
    }
    processed.min(total) * 100 / total
}
