#![doc = include_str!("../README.md")]

pub(crate) mod frame;
pub(crate) mod renderer;
pub mod widgets;


/// Re-exports of all public types and traits.
pub mod prelude {
    pub use crate::Render;
    pub use crate::renderer::{Builder, DEFAULT_INTERVAL, Renderer};
    pub use crate::widgets::{ProgressBar, Spinner, Text};
}

pub use crate::prelude::*;

/// A single status line tracked by a [`Renderer`].
///
/// [`render`] is called on every repaint, from the ticker thread, while the
/// item may be updated concurrently by its owner. It must be cheap, free of
/// side effects and return the same text as long as the item's state is
/// unchanged. The returned text must not contain newlines.
///
/// Items that animate on their own (see [`Spinner`]) override [`stop`] so the
/// renderer can freeze them before it paints its final frame. Everything else
/// keeps the no-op default.
///
/// ```rust,ignore
/// struct Counter(AtomicUsize);
///
/// impl Render for Counter {
///     fn render(&self) -> String {
///         format!("processed {}", self.0.load(Ordering::Relaxed))
///     }
/// }
/// ```
///
/// [`render`]: Render::render
/// [`stop`]: Render::stop
pub trait Render: Send + Sync {
    /// Current display text of this item.
    fn render(&self) -> String;

    /// Halts any animation the item drives independently of the renderer.
    /// Must be idempotent.
    fn stop(&self) {}
}

impl Render for String {
    fn render(&self) -> String {
        self.clone()
    }
}

impl Render for &'static str {
    fn render(&self) -> String {
        (*self).to_string()
    }
}

/// Locks `mutex`, recovering the data if another thread panicked while
/// holding it. Every state guarded here stays consistent between writes.
pub(crate) fn lock<T: ?Sized>(mutex: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
