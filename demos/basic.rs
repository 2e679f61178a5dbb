//! A spinner, two progress bars and a status line updated from worker
//! threads while the renderer repaints them in place.
//!
//! Status lines go to stdout; diagnostics from the renderer go to stderr.
//! Run with `cargo run --example basic`.

use std::sync::Arc;
use std::time::Duration;

use owo_colors::OwoColorize;
use tally_lines::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let renderer = Renderer::new(std::io::stdout());

    let spinner = Arc::new(Spinner::dots().with_message("resolving dependencies"));
    spinner.start();
    renderer.add(spinner.clone());

    let status = Arc::new(Text::new(format!("{}", "waiting".dimmed())));
    renderer.add(status.clone());

    let workers: Vec<_> = [("download", 120u64, 15u64), ("extract", 60, 40)]
        .into_iter()
        .map(|(name, total, pause)| {
            let bar = Arc::new(ProgressBar::new(total).width(30).with_message(name));
            renderer.add(bar.clone());
            std::thread::spawn(move || {
                while !bar.is_finished() {
                    bar.inc(1);
                    std::thread::sleep(Duration::from_millis(pause));
                }
            })
        })
        .collect();

    status.set(format!("{}", "working".yellow()));
    for worker in workers {
        let _ = worker.join();
    }
    spinner.set_message("dependencies resolved");
    status.set(format!("{}", "done".green()));

    renderer.stop();
    println!("{}", "finished".bold());

    let transient = Renderer::new(std::io::stdout());
    transient.add(Arc::new("this line disappears"));
    std::thread::sleep(Duration::from_millis(500));
    transient.stop_and_clear();
}
