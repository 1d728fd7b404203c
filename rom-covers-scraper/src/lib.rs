pub mod async_util;
pub mod client;
pub mod download;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod scanner;
pub mod types;
pub mod worker_pool;

pub use client::{CoverSource, DEFAULT_REQUEST_TIMEOUT, RetroCatalogClient};
pub use download::{COVER_EXTENSION, cover_path};
pub use error::{FetchError, ItemError, LookupError};
pub use pipeline::{DEFAULT_WORKERS, ITEM_TIMEOUT, PipelineEvent, PipelineOptions, run_pipeline};
pub use report::{format_report, item_line, item_prefix, outcome_text};
pub use scanner::{RomItem, scan_rom_items};
pub use worker_pool::WorkerPool;
