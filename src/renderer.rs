use std::io::Write;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::frame::Frame;
use crate::{Render, lock};

/// Repaint interval used by [`Renderer::new`].
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Configures a [`Renderer`] before its ticker starts.
///
/// ```rust,ignore
/// let renderer = Renderer::builder()
///     .interval(Duration::from_millis(50))
///     .build(std::io::stderr());
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    interval: Duration,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the repaint interval. Zero is clamped to one millisecond.
    pub fn interval(mut self, d: Duration) -> Self {
        self.interval = d.max(MIN_INTERVAL);
        self
    }

    /// Creates the renderer and starts repainting to `target`.
    pub fn build<W: Write + Send + 'static>(self, target: W) -> Renderer {
        let state = Arc::new(Mutex::new(State {
            frame: Frame::new(Box::new(target)),
            items: Vec::new(),
            ticker: None,
        }));

        // The ticker blocks on this lock until its handle is stored, so it can
        // never observe a renderer that looks stopped.
        {
            let mut guard = lock(&state);
            let (tx, rx) = mpsc::channel();
            let shared = Arc::clone(&state);
            let interval = self.interval;
            let handle = std::thread::spawn(move || run(shared, rx, interval));
            guard.ticker = Some(Ticker { stop: tx, handle });
        }

        debug!(interval_ms = self.interval.as_millis() as u64, "renderer started");
        Renderer { state }
    }
}

struct Ticker {
    stop: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

struct State {
    frame: Frame,
    // Append-only: display order is insertion order and nothing is ever removed.
    items: Vec<Arc<dyn Render>>,
    // `None` once stopped.
    ticker: Option<Ticker>,
}

impl State {
    fn repaint(&mut self) -> Result<(), std::io::Error> {
        self.frame.repaint(&self.items);
        trace!(lines = self.frame.pos(), "repaint");
        self.frame.finish()
    }
}

/// Fixed-rate ticker loop. Exits when the stop channel closes or the
/// renderer has been marked stopped.
fn run(state: Arc<Mutex<State>>, stop: mpsc::Receiver<()>, interval: Duration) {
    let mut deadline = Instant::now() + interval;
    loop {
        let timeout = deadline.saturating_duration_since(Instant::now());
        match stop.recv_timeout(timeout) {
            Err(RecvTimeoutError::Timeout) => {}
            _ => break,
        }

        let mut guard = lock(&state);
        if guard.ticker.is_none() {
            break;
        }
        // A failed write costs one frame; the next tick tries again.
        if let Err(error) = guard.repaint() {
            warn!(%error, "repaint failed");
        }
        drop(guard);

        deadline += interval;
        let now = Instant::now();
        if deadline < now {
            // Fell behind (slow sink or a long lock hold), skip missed ticks.
            deadline = now + interval;
        }
    }
    trace!("ticker exited");
}

/// Repaints an ordered list of status lines in place on a background ticker.
///
/// The renderer starts ticking as soon as it is created and keeps going until
/// [`stop`] or [`stop_and_clear`] is called (or it is dropped). All methods
/// take `&self`, wrap it in an [`Arc`] to share it between threads.
///
/// Items are append-only: they are drawn in the order they were added and are
/// never removed. Adding an item after the renderer stopped is accepted but
/// the item is never drawn.
///
/// [`stop`]: Renderer::stop
/// [`stop_and_clear`]: Renderer::stop_and_clear
pub struct Renderer {
    state: Arc<Mutex<State>>,
}

impl Renderer {
    /// Starts a renderer on `target` with the [`DEFAULT_INTERVAL`].
    pub fn new<W: Write + Send + 'static>(target: W) -> Self {
        Builder::default().build(target)
    }

    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Appends `item` below the existing lines.
    ///
    /// Any `Arc<T>` with `T: Render` coerces, so callers keep their own handle
    /// to update the item while it is displayed.
    pub fn add(&self, item: Arc<dyn Render>) {
        let mut state = lock(&self.state);
        state.items.push(item);
    }

    /// Number of tracked items, including ones added after stopping.
    pub fn len(&self) -> usize {
        lock(&self.state).items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` until the renderer has been stopped.
    pub fn is_running(&self) -> bool {
        lock(&self.state).ticker.is_some()
    }

    /// Repaints immediately instead of waiting for the next tick.
    ///
    /// Does nothing once the renderer has stopped.
    pub fn render(&self) -> Result<(), std::io::Error> {
        let mut state = lock(&self.state);
        if state.ticker.is_none() {
            return Ok(());
        }
        state.repaint()
    }

    /// Stops ticking and paints a final frame followed by a newline, so later
    /// output starts below the status lines.
    ///
    /// Returns `false`, without writing anything, if already stopped.
    pub fn stop(&self) -> bool {
        self.shutdown(false)
    }

    /// Like [`Renderer::stop`], then erases every line the final frame drew,
    /// leaving the cursor where the first status line started. The cursor
    /// stays hidden for the whole operation.
    pub fn stop_and_clear(&self) -> bool {
        self.shutdown(true)
    }

    fn shutdown(&self, clear: bool) -> bool {
        // Marking the renderer stopped and taking the snapshot happen together,
        // so anything added later is an add-after-stop: never stopped, never drawn.
        let (ticker, items) = {
            let mut state = lock(&self.state);
            let Some(ticker) = state.ticker.take() else {
                return false;
            };
            (ticker, state.items.clone())
        };
        drop(ticker.stop);

        // Freeze self-animating items before the final frame reads them. Their
        // stop may join a thread, so it runs outside the lock.
        for item in &items {
            item.stop();
        }

        let mut state = lock(&self.state);
        let frame = &mut state.frame;
        if clear {
            frame.hide_cursor();
        }
        frame.repaint(&items);
        // An empty final frame has nothing to step past or erase.
        if !clear || frame.pos() > 0 {
            frame.newline();
        }
        if clear {
            frame.clear();
            frame.show_cursor();
        }
        if let Err(error) = frame.finish() {
            warn!(%error, "final repaint failed");
        }
        drop(state);

        // An in-flight tick may be waiting on the lock; it sees the missing
        // ticker and exits without writing.
        if ticker.handle.join().is_err() {
            warn!("ticker thread panicked");
        }
        debug!(items = items.len(), cleared = clear, "renderer stopped");
        true
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("Renderer")
            .field("items", &state.items.len())
            .field("frame", &state.frame)
            .field("running", &state.ticker.is_some())
            .finish()
    }
}
