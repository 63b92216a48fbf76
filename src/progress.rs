use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

const BAR_TEMPLATE: &str =
    "{bar:40.cyan} | {percent}% | {pos}/{len} files | {elapsed} | ETA: {eta} | {msg}";

/// receives per-file progress from the copy loop
pub trait ProgressSink {
    fn start(&mut self, total: usize);
    fn advance(&mut self, label: &str);
    fn stop(&mut self);
    /// seconds since `start`
    fn elapsed_secs(&self) -> f64;

    /// run `write` with the bar hidden so terminal output doesn't tear it
    fn suspend(&mut self, write: &mut dyn FnMut());
}

/// terminal progress bar
#[derive(Default)]
pub struct BarProgress {
    bar: Option<ProgressBar>,
    started: Option<Instant>,
}

impl ProgressSink for BarProgress {
    fn start(&mut self, total: usize) {
        let bar = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
            bar.set_style(style.progress_chars("█░"));
        }
        bar.set_message("initialising...");
        self.bar = Some(bar);
        self.started = Some(Instant::now());
    }

    fn advance(&mut self, label: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(label.to_string());
            bar.inc(1);
        }
    }

    fn stop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }

    fn elapsed_secs(&self) -> f64 {
        self.started
            .map(|started| started.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn suspend(&mut self, write: &mut dyn FnMut()) {
        match &self.bar {
            Some(bar) => bar.suspend(|| write()),
            None => write(),
        }
    }
}
