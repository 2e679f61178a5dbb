//! Ready-made [`Render`](crate::Render) items.
//!
//! # Progress bar
//!
//! [`ProgressBar`] renders a counter as an inline bar with percentage. Keep
//! an [`Arc`](std::sync::Arc) to it and update it from any thread:
//!
//! ```rust,ignore
//! let bar = Arc::new(ProgressBar::new(100).width(30).with_message("fetch"));
//! renderer.add(bar.clone());
//! bar.inc(45);
//! // => fetch [█████████████░░░░░░░░░░░░░░░░░]  45%
//!
//! // Custom fill characters:
//! let bar = ProgressBar::new(10).chars('#', '.');
//! // => [######..............]  30%
//! ```
//!
//! # Spinner
//!
//! [`Spinner`] cycles through animation frames on its own thread once
//! [`started`](Spinner::start). The renderer stops it before its final frame:
//!
//! ```rust,ignore
//! let spinner = Arc::new(Spinner::dots().with_message("working..."));
//! spinner.start();
//! renderer.add(spinner.clone());
//!
//! // Other presets:
//! let s = Spinner::line();  // | / - \
//! let s = Spinner::arrow(); // ← ↖ ↑ ↗ → ↘ ↓ ↙
//!
//! // Custom frames:
//! let s = Spinner::custom(&["🌑", "🌒", "🌓", "🌔", "🌕"]);
//! ```
//!
//! # Text
//!
//! [`Text`] is a plain status line that can be replaced at any time:
//!
//! ```rust,ignore
//! let status = Arc::new(Text::new("waiting"));
//! renderer.add(status.clone());
//! status.set("connected");
//! ```

mod progress_bar;
mod spinner;
mod text;

pub use progress_bar::*;
pub use spinner::*;
pub use text::*;
