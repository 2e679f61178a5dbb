use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::trace;

use crate::{Render, lock};

/// A frame-based spinner that animates itself.
///
/// [`Spinner::start`] spawns a thread that advances the frame every
/// [`interval`](Spinner::interval). The renderer calls [`Render::stop`] on
/// every item before painting its final frame, which halts and joins that
/// thread so the last frame it reads is the one left on screen.
///
/// Without `start`, the spinner only moves when [`Spinner::tick`] is called.
///
/// ```rust,ignore
/// let spinner = Arc::new(Spinner::dots().with_message("compiling"));
/// spinner.start();
/// renderer.add(spinner.clone());
/// // => ⠙ compiling
/// ```
pub struct Spinner {
    frames: &'static [&'static str],
    index: AtomicUsize,
    interval: Duration,
    message: Mutex<String>,
    stopped: AtomicBool,
    animation: Mutex<Option<Animation>>,
}

struct Animation {
    stop: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl Spinner {
    /// Braille dot spinner (the most common choice).
    pub fn dots() -> Self {
        Self::custom(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
    }

    /// Classic line spinner.
    pub fn line() -> Self {
        Self::custom(&["|", "/", "-", "\\"])
    }

    /// Arrow spinner.
    pub fn arrow() -> Self {
        Self::custom(&["←", "↖", "↑", "↗", "→", "↘", "↓", "↙"])
    }

    /// Custom frames.
    pub fn custom(frames: &'static [&'static str]) -> Self {
        Self {
            frames,
            index: AtomicUsize::new(0),
            interval: Duration::from_millis(80),
            message: Mutex::new(String::new()),
            stopped: AtomicBool::new(false),
            animation: Mutex::new(None),
        }
    }

    /// Text shown after the frame.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        self.set_message(message);
        self
    }

    /// Time between frames once started.
    pub fn interval(mut self, d: Duration) -> Self {
        self.interval = d.max(Duration::from_millis(1));
        self
    }

    pub fn set_message(&self, message: impl Into<String>) {
        *lock(&self.message) = message.into();
    }

    /// Advance to the next frame. Ignored once stopped.
    pub fn tick(&self) {
        if self.is_stopped() || self.frames.is_empty() {
            return;
        }
        let len = self.frames.len();
        let _ = self
            .index
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |i| Some((i + 1) % len));
    }

    /// Current frame string.
    pub fn frame(&self) -> &'static str {
        self.frames
            .get(self.index.load(Ordering::Relaxed))
            .copied()
            .unwrap_or("")
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Starts animating on a background thread.
    ///
    /// No-op if the spinner is already animating or has been stopped. The
    /// thread only holds a weak reference and exits once every `Arc` to the
    /// spinner is gone.
    pub fn start(self: &Arc<Self>) {
        let mut animation = lock(&self.animation);
        if animation.is_some() || self.is_stopped() {
            return;
        }

        let (tx, rx) = mpsc::channel::<()>();
        let spinner = Arc::downgrade(self);
        let interval = self.interval;
        let handle = std::thread::spawn(move || {
            while let Err(RecvTimeoutError::Timeout) = rx.recv_timeout(interval) {
                match spinner.upgrade() {
                    Some(spinner) => spinner.tick(),
                    None => break,
                }
            }
        });
        *animation = Some(Animation { stop: tx, handle });
        trace!(frames = self.frames.len(), "spinner started");
    }
}

impl Render for Spinner {
    fn render(&self) -> String {
        let message = lock(&self.message);
        if message.is_empty() {
            return self.frame().to_string();
        }
        format!("{} {}", self.frame(), message)
    }

    /// Freezes the current frame and joins the animation thread, if any.
    fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
        let animation = lock(&self.animation).take();
        if let Some(Animation { stop, handle }) = animation {
            drop(stop);
            let _ = handle.join();
            trace!("spinner stopped");
        }
    }
}

impl std::fmt::Display for Spinner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.frame())
    }
}

impl std::fmt::Debug for Spinner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spinner")
            .field("frame", &self.frame())
            .field("interval", &self.interval)
            .field("stopped", &self.is_stopped())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_cycles_frames() {
        let spinner = Spinner::line();
        let seen: Vec<_> = (0..5)
            .map(|_| {
                let frame = spinner.frame();
                spinner.tick();
                frame
            })
            .collect();
        assert_eq!(seen, ["|", "/", "-", "\\", "|"]);
    }

    #[test]
    fn render_includes_message() {
        let spinner = Spinner::line().with_message("working");
        assert_eq!(spinner.render(), "| working");
        spinner.set_message("");
        assert_eq!(spinner.render(), "|");
    }

    #[test]
    fn empty_frames_render_blank() {
        let spinner = Spinner::custom(&[]);
        spinner.tick();
        assert_eq!(spinner.frame(), "");
    }

    #[test]
    fn stop_freezes_frame() {
        let spinner = Spinner::arrow();
        spinner.tick();
        Render::stop(&spinner);
        let frozen = spinner.render();
        spinner.tick();
        assert_eq!(spinner.render(), frozen);
        assert!(spinner.is_stopped());
    }

    #[test]
    fn started_spinner_animates_until_stopped() {
        let spinner = Arc::new(Spinner::dots().interval(Duration::from_millis(2)));
        spinner.start();
        spinner.start();

        let first = spinner.frame();
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while spinner.frame() == first && std::time::Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(1));
        }
        assert_ne!(spinner.frame(), first);

        Render::stop(&*spinner);
        Render::stop(&*spinner);
        let frozen = spinner.render();
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(spinner.render(), frozen);
    }

    #[test]
    fn start_after_stop_is_ignored() {
        let spinner = Arc::new(Spinner::line().interval(Duration::from_millis(1)));
        Render::stop(&*spinner);
        spinner.start();
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(spinner.frame(), "|");
    }
}
