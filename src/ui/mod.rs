//! Terminal presentation

mod progress;

pub use progress::{progress_for, BarProgress, NoProgress, PercentProgress, ProgressSink};
