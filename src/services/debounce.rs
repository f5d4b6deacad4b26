//! Debounce stage for rapidly changing input (e.g. search-box keystrokes).

use std::time::Duration;
use tokio::sync::mpsc;

/// Delay after the last keystroke before a search is issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(350);

/// Forward only values that stay unchanged for `delay`.
///
/// Every new value restarts the timer, so a burst collapses into its last
/// value. A value still pending when `input` closes is dropped.
pub fn debounce<T: Send + 'static>(
    mut input: mpsc::UnboundedReceiver<T>,
    delay: Duration,
) -> mpsc::UnboundedReceiver<T> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut pending: Option<T> = None;
        loop {
            let Some(value) = pending.take() else {
                match input.recv().await {
                    Some(value) => pending = Some(value),
                    None => break,
                }
                continue;
            };

            tokio::select! {
                next = input.recv() => match next {
                    Some(newer) => pending = Some(newer),
                    None => break,
                },
                _ = tokio::time::sleep(delay) => {
                    if tx.send(value).is_err() {
                        break;
                    }
                }
            }
        }
    });

    rx
}
