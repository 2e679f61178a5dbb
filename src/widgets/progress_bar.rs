use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{Render, lock};

/// A shared counter rendered as a progress bar.
///
/// ```rust,ignore
/// let bar = ProgressBar::new(100).width(30).with_message("my_task");
/// bar.set(45);
/// // => my_task [█████████████░░░░░░░░░░░░░░░░░]  45%
/// ```
#[derive(Debug)]
pub struct ProgressBar {
    done: AtomicU64,
    total: AtomicU64,
    width: usize,
    filled: char,
    empty: char,
    message: Mutex<String>,
}

impl ProgressBar {
    pub fn new(total: u64) -> Self {
        Self {
            done: AtomicU64::new(0),
            total: AtomicU64::new(total),
            width: 20,
            filled: '█',
            empty: '░',
            message: Mutex::new(String::new()),
        }
    }

    pub fn width(mut self, w: usize) -> Self {
        self.width = w;
        self
    }

    pub fn chars(mut self, filled: char, empty: char) -> Self {
        self.filled = filled;
        self.empty = empty;
        self
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        self.set_message(message);
        self
    }

    pub fn set_message(&self, message: impl Into<String>) {
        *lock(&self.message) = message.into();
    }

    pub fn set(&self, done: u64) {
        self.done.store(done, Ordering::Relaxed);
    }

    pub fn inc(&self, delta: u64) {
        self.done.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn set_total(&self, total: u64) {
        self.total.store(total, Ordering::Relaxed);
    }

    pub fn position(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// Completed fraction in `0.0..=1.0`. An empty total counts as no progress.
    pub fn ratio(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.position() as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        let total = self.total();
        total > 0 && self.position() >= total
    }
}

impl std::fmt::Display for ProgressBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = lock(&self.message);
        if !message.is_empty() {
            write!(f, "{} ", message)?;
        }
        let ratio = self.ratio();
        let filled = (ratio * self.width as f64) as usize;
        let empty = self.width - filled;
        write!(
            f,
            "[{}{}] {:3.0}%",
            std::iter::repeat_n(self.filled, filled).collect::<String>(),
            std::iter::repeat_n(self.empty, empty).collect::<String>(),
            ratio * 100.0,
        )
    }
}

impl Render for ProgressBar {
    fn render(&self) -> String {
        self.to_string()
    }
}
