//! Drive an async task while draining its event channel.
//!
//! The CLI uses this to render progress from pipeline events without the
//! pipeline knowing anything about terminals.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

/// Maximum time to drain leftover events after the task completes, in case
/// a detached task is still holding a sender clone.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Run `task` to completion, calling `on_event` for every event received on
/// `event_rx` along the way. Remaining events are drained (with a timeout)
/// after the task finishes, then its result is returned.
pub async fn run_with_events<F, E, R>(
    task: F,
    mut event_rx: mpsc::UnboundedReceiver<E>,
    mut on_event: impl FnMut(E),
) -> R
where
    F: Future<Output = R>,
{
    tokio::pin!(task);
    let mut result = None;

    loop {
        tokio::select! {
            r = &mut task, if result.is_none() => {
                result = Some(r);
                break;
            }
            event = event_rx.recv() => {
                match event {
                    Some(e) => on_event(e),
                    // Channel closed before the task finished (unusual but safe)
                    None => break,
                }
            }
        }
    }

    if result.is_some() {
        let deadline = Instant::now() + DRAIN_TIMEOUT;
        loop {
            match tokio::time::timeout_at(deadline, event_rx.recv()).await {
                Ok(Some(e)) => on_event(e),
                Ok(None) => break,
                Err(_) => {
                    log::warn!(
                        "event drain timed out after {}s; a sender was likely leaked",
                        DRAIN_TIMEOUT.as_secs()
                    );
                    break;
                }
            }
        }
    }

    match result {
        Some(r) => r,
        None => task.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_all_events_and_result() {
        let (tx, rx) = mpsc::unbounded_channel::<u32>();

        let task = async move {
            for i in 0..5 {
                tx.send(i).unwrap();
                tokio::task::yield_now().await;
            }
            "done"
        };

        let mut seen = Vec::new();
        let result = run_with_events(task, rx, |e| seen.push(e)).await;

        assert_eq!(result, "done");
        seen.sort();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }
}
