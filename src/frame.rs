use std::io::Write;
use std::sync::Arc;

use crate::Render;

pub(crate) const HIDE_CURSOR: &str = "\x1b[?25l";
pub(crate) const SHOW_CURSOR: &str = "\x1b[?25h";
pub(crate) const CURSOR_UP: &str = "\x1b[A";
pub(crate) const ERASE_LINE: &str = "\x1b[2K";
pub(crate) const COLUMN_ONE: &str = "\x1b[1G";

/// Write target that remembers how many lines the last repaint produced.
///
/// After a repaint the cursor sits at the end of the last line it wrote, so
/// the next repaint erases the current line first and then walks up `pos - 1`
/// times. Writes are best-effort: a failing write never stops the sequence,
/// the first error is kept and surfaced by [`Frame::finish`].
pub(crate) struct Frame {
    target: Box<dyn Write + Send>,
    pos: usize,
    hidden: usize,
    error: Option<std::io::Error>,
}

impl Frame {
    pub(crate) fn new(target: Box<dyn Write + Send>) -> Self {
        Self {
            target,
            pos: 0,
            hidden: 0,
            error: None,
        }
    }

    /// Lines written by the most recent repaint.
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    fn emit(&mut self, text: &str) {
        if let Err(error) = self.target.write_all(text.as_bytes()) {
            self.error.get_or_insert(error);
        }
    }

    /// Hides the cursor. Nested calls only write on the outermost one.
    pub(crate) fn hide_cursor(&mut self) {
        if self.hidden == 0 {
            self.emit(HIDE_CURSOR);
        }
        self.hidden += 1;
    }

    /// Undoes one [`Frame::hide_cursor`]; the cursor reappears when the
    /// outermost one is undone.
    pub(crate) fn show_cursor(&mut self) {
        if self.hidden == 0 {
            return;
        }
        self.hidden -= 1;
        if self.hidden == 0 {
            self.emit(SHOW_CURSOR);
        }
    }

    pub(crate) fn newline(&mut self) {
        self.emit("\n");
    }

    /// Erases the previous frame and draws one line per item.
    pub(crate) fn repaint(&mut self, items: &[Arc<dyn Render>]) {
        self.hide_cursor();

        // The cursor already sits on the last drawn line.
        for i in 0..self.pos {
            if i > 0 {
                self.emit(CURSOR_UP);
            }
            self.emit(ERASE_LINE);
            self.emit(COLUMN_ONE);
        }

        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.emit("\n");
            }
            self.emit(&item.render());
        }
        self.pos = items.len();

        self.show_cursor();
    }

    /// Erases every line of the previous frame, starting from the line below
    /// it (where the cursor lands after the trailing newline of a stop).
    pub(crate) fn clear(&mut self) {
        while self.pos > 0 {
            self.emit(CURSOR_UP);
            self.emit(ERASE_LINE);
            self.emit(COLUMN_ONE);
            self.pos -= 1;
        }
    }

    /// Flushes the target and reports the first write failure since the last
    /// call, if any.
    pub(crate) fn finish(&mut self) -> Result<(), std::io::Error> {
        let flushed = self.target.flush();
        match self.error.take() {
            Some(error) => Err(error),
            None => flushed,
        }
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("pos", &self.pos)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}
