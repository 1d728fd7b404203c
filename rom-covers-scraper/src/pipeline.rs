//! The two-stage cover pipeline.
//!
//! Lookup resolves every discovered item's name to a cover-art URL; only
//! after the whole lookup pool drains does the download pool start, and it
//! consumes only items that resolved cleanly. Errors are recorded on the
//! item that hit them — one bad ROM never aborts the batch.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;
use tokio::time::{Duration, timeout};

use crate::client::CoverSource;
use crate::download;
use crate::error::ItemError;
use crate::scanner::RomItem;
use crate::worker_pool::WorkerPool;

/// Default worker count per stage.
pub const DEFAULT_WORKERS: usize = 4;

/// Hard per-item deadline within a stage. Covers the disk work that sits
/// outside the HTTP client's own timeout; expiry is recorded on the item as
/// an ordinary error, so a stalled item still reaches the report.
pub const ITEM_TIMEOUT: Duration = Duration::from_secs(90);

/// Options for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Directory covers are written into. Not created by the pipeline; an
    /// unwritable destination is a per-item error.
    pub output_dir: PathBuf,
    /// Concurrent workers per stage.
    pub workers: usize,
}

impl PipelineOptions {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            workers: DEFAULT_WORKERS,
        }
    }
}

/// Progress events emitted during a run, consumed by the CLI.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// An item was handed to a lookup worker.
    LookupStarted { index: usize, name: String },
    /// Lookup resolved a cover URL.
    LookupSucceeded { index: usize, name: String },
    /// Lookup failed (not found or transport); non-fatal.
    LookupFailed {
        index: usize,
        name: String,
        reason: String,
    },
    /// An item was handed to a download worker.
    DownloadStarted { index: usize, name: String },
    /// Cover fully written to disk.
    Downloaded { index: usize, name: String },
    /// Download failed; non-fatal.
    DownloadFailed {
        index: usize,
        name: String,
        reason: String,
    },
}

/// Run both stages over `items`, returning them in discovery order with
/// exactly one of `cover_url` / `error` set on every item.
pub async fn run_pipeline(
    source: Arc<dyn CoverSource>,
    items: Vec<RomItem>,
    options: &PipelineOptions,
    cancel: Arc<AtomicBool>,
    events: mpsc::UnboundedSender<PipelineEvent>,
) -> Vec<RomItem> {
    log::info!("looking up {} ROMs...", items.len());
    let items = lookup_stage(
        source.clone(),
        items,
        options.workers,
        cancel.clone(),
        events.clone(),
    )
    .await;

    let pending = items.iter().filter(|i| i.error.is_none()).count();
    log::info!("downloading {} covers...", pending);
    download_stage(
        source,
        items,
        options.output_dir.clone(),
        options.workers,
        cancel,
        events,
    )
    .await
}

/// Resolve cover URLs for every item without a prior error.
///
/// Returns only when every worker has drained the queue — the barrier the
/// download stage relies on. Output is re-sorted into discovery order.
pub async fn lookup_stage(
    source: Arc<dyn CoverSource>,
    items: Vec<RomItem>,
    workers: usize,
    cancel: Arc<AtomicBool>,
    events: mpsc::UnboundedSender<PipelineEvent>,
) -> Vec<RomItem> {
    let (pending, mut done): (Vec<_>, Vec<_>) =
        items.into_iter().partition(|i| i.error.is_none());

    let pool = WorkerPool::start(workers, pending, move |mut item: RomItem| {
        let source = source.clone();
        let events = events.clone();
        let cancel = cancel.clone();
        async move {
            if cancel.load(Ordering::Relaxed) {
                item.error = Some(ItemError::Cancelled);
                return item;
            }

            let _ = events.send(PipelineEvent::LookupStarted {
                index: item.index,
                name: item.name.clone(),
            });

            match timeout(ITEM_TIMEOUT, source.lookup_cover(item.platform, &item.name)).await {
                Ok(Ok(url)) => {
                    item.cover_url = Some(url);
                    let _ = events.send(PipelineEvent::LookupSucceeded {
                        index: item.index,
                        name: item.name.clone(),
                    });
                }
                Ok(Err(e)) => {
                    log::debug!("lookup failed for '{}': {}", item.name, e);
                    let _ = events.send(PipelineEvent::LookupFailed {
                        index: item.index,
                        name: item.name.clone(),
                        reason: e.to_string(),
                    });
                    item.error = Some(e.into());
                }
                Err(_) => {
                    let e = ItemError::Timeout(ITEM_TIMEOUT.as_secs());
                    log::warn!("lookup for '{}' {}", item.name, e);
                    let _ = events.send(PipelineEvent::LookupFailed {
                        index: item.index,
                        name: item.name.clone(),
                        reason: e.to_string(),
                    });
                    item.error = Some(e);
                }
            }
            item
        }
    });

    done.extend(pool.collect().await);
    done.sort_unstable_by_key(|i| i.index);
    done
}

/// Download and persist the cover for every item that resolved a URL and
/// carries no error. Same pool discipline and barrier as the lookup stage.
pub async fn download_stage(
    source: Arc<dyn CoverSource>,
    items: Vec<RomItem>,
    output_dir: PathBuf,
    workers: usize,
    cancel: Arc<AtomicBool>,
    events: mpsc::UnboundedSender<PipelineEvent>,
) -> Vec<RomItem> {
    let (pending, mut done): (Vec<_>, Vec<_>) = items
        .into_iter()
        .partition(|i| i.error.is_none() && i.cover_url.is_some());

    let pool = WorkerPool::start(workers, pending, move |mut item: RomItem| {
        let source = source.clone();
        let events = events.clone();
        let cancel = cancel.clone();
        let output_dir = output_dir.clone();
        async move {
            if cancel.load(Ordering::Relaxed) {
                item.cover_url = None;
                item.error = Some(ItemError::Cancelled);
                return item;
            }

            let _ = events.send(PipelineEvent::DownloadStarted {
                index: item.index,
                name: item.name.clone(),
            });

            let dest = download::cover_path(&output_dir, &item.name);
            // partition() guarantees cover_url is present here
            let url = item.cover_url.as_deref().unwrap_or_default().to_string();

            match timeout(
                ITEM_TIMEOUT,
                download::download_cover(source.as_ref(), &url, &dest),
            )
            .await
            {
                Ok(Ok(())) => {
                    let _ = events.send(PipelineEvent::Downloaded {
                        index: item.index,
                        name: item.name.clone(),
                    });
                }
                Ok(Err(e)) => {
                    log::debug!("download failed for '{}': {}", item.name, e);
                    let _ = events.send(PipelineEvent::DownloadFailed {
                        index: item.index,
                        name: item.name.clone(),
                        reason: e.to_string(),
                    });
                    // Keep cover_url and error mutually exclusive: a failed
                    // item reports its error, nothing else.
                    item.cover_url = None;
                    item.error = Some(e);
                }
                Err(_) => {
                    // The transfer was abandoned mid-flight; sweep up the
                    // scratch file it may have left behind.
                    download::remove_scratch(&dest).await;
                    let e = ItemError::Timeout(ITEM_TIMEOUT.as_secs());
                    log::warn!("download for '{}' {}", item.name, e);
                    let _ = events.send(PipelineEvent::DownloadFailed {
                        index: item.index,
                        name: item.name.clone(),
                        reason: e.to_string(),
                    });
                    item.cover_url = None;
                    item.error = Some(e);
                }
            }
            item
        }
    });

    done.extend(pool.collect().await);
    done.sort_unstable_by_key(|i| i.index);
    done
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
