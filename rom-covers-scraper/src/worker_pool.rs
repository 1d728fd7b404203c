//! Fixed-size worker pool used by both pipeline stages.
//!
//! N persistent tokio tasks pull work from a bounded async-channel; results
//! go to an unbounded channel drained by the caller. `async-channel`'s
//! `Receiver` is `Clone`, so each worker holds its own handle and items are
//! distributed by the queue itself — no lock, and no two workers ever hold
//! the same item.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A pool of worker tasks processing items concurrently.
///
/// Every submitted item produces exactly one result — the pool never drops
/// work on the floor. Deadlines are the caller's concern: the process
/// closure owns its item and records a timeout on it as an ordinary
/// outcome, so a stalled collaborator still shows up in the results.
///
/// Dropping the work sender after submission closes the queue; workers drain
/// the remaining items and exit, which closes the result channel. `recv()`
/// returning `None` is therefore the stage's completion barrier.
pub struct WorkerPool<R: Send + 'static> {
    result_rx: mpsc::UnboundedReceiver<R>,
    _handles: Vec<JoinHandle<()>>,
}

impl<R: Send + 'static> WorkerPool<R> {
    /// Spawn `n` workers over `items` and return a handle for receiving
    /// results as they complete (no inter-item ordering).
    ///
    /// Each worker fully processes one item before taking the next.
    /// Submission runs in a background task so the caller can start
    /// receiving immediately without deadlocking on the bounded queue.
    pub fn start<W, F, Fut>(n: usize, items: Vec<W>, process_fn: F) -> Self
    where
        W: Send + 'static,
        F: Fn(W) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let (work_tx, work_rx) = async_channel::bounded::<W>(n.max(1));
        let (result_tx, result_rx) = mpsc::unbounded_channel::<R>();
        let process_fn = Arc::new(process_fn);

        let handles: Vec<JoinHandle<()>> = (0..n.max(1))
            .map(|_| {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                let process_fn = process_fn.clone();
                tokio::spawn(async move {
                    while let Ok(item) = work_rx.recv().await {
                        if result_tx.send(process_fn(item).await).is_err() {
                            break; // receiver dropped
                        }
                    }
                    // queue closed and drained → worker exits
                })
            })
            .collect();

        // Close the result channel once every worker has finished
        drop(result_tx);

        tokio::spawn(async move {
            for item in items {
                if work_tx.send(item).await.is_err() {
                    break;
                }
            }
            // work_tx dropped here → queue closes → workers drain then stop
        });

        Self {
            result_rx,
            _handles: handles,
        }
    }

    /// Receive the next result; `None` once all items are processed and all
    /// workers have shut down.
    pub async fn recv(&mut self) -> Option<R> {
        self.result_rx.recv().await
    }

    /// Drain the pool to completion, collecting every result.
    pub async fn collect(mut self) -> Vec<R> {
        let mut out = Vec::new();
        while let Some(r) = self.recv().await {
            out.push(r);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::Duration;

    #[tokio::test]
    async fn processes_every_item_exactly_once() {
        let items: Vec<usize> = (0..37).collect();
        let pool = WorkerPool::start(4, items, |i| async move { i * 2 });
        let mut results = pool.collect().await;
        results.sort();
        assert_eq!(results, (0..37).map(|i| i * 2).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn concurrency_never_exceeds_pool_size() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let items: Vec<usize> = (0..20).collect();
        let pool = {
            let in_flight = in_flight.clone();
            let peak = peak.clone();
            WorkerPool::start(3, items, move |i| {
                let in_flight = in_flight.clone();
                let peak = peak.clone();
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    i
                }
            })
        };

        let results = pool.collect().await;
        assert_eq!(results.len(), 20);
        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_items_still_produce_results() {
        let pool = WorkerPool::start(2, vec![1, 2, 3], |i| async move {
            tokio::time::sleep(Duration::from_secs(600)).await;
            i
        });
        let mut results = pool.collect().await;
        results.sort();
        assert_eq!(results, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn zero_workers_is_clamped_to_one() {
        let pool = WorkerPool::start(0, vec![1, 2, 3], |i| async move { i });
        assert_eq!(pool.collect().await.len(), 3);
    }
}
