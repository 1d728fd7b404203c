//! rom-covers CLI
//!
//! Scans a directory of ROM files, resolves each one against the remote
//! catalog, and downloads its cover art.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_covers_core::{Platform, PlatformEntry, PlatformTable};
use rom_covers_scraper::{
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_WORKERS, PipelineEvent, PipelineOptions, RetroCatalogClient,
    RomItem, async_util, report, run_pipeline, scan_rom_items,
};

#[derive(Parser)]
#[command(name = "rom-covers")]
#[command(about = "Fetch cover art for a directory of ROM files", long_about = None)]
struct Cli {
    /// Directory containing ROM files (scanned one level deep)
    rom_dir: PathBuf,

    /// Directory cover images are written into (must exist)
    output_dir: PathBuf,

    /// Only scan for these platforms (e.g. nes,snes,n64)
    #[arg(short, long, value_delimiter = ',')]
    platforms: Option<Vec<Platform>>,

    /// Concurrent workers per pipeline stage
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    timeout: u64,

    /// Only print the final report and warnings
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    log::info!(
        "Gathering ROMs in: {}",
        cli.rom_dir.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    let table = match &cli.platforms {
        Some(list) => PlatformTable::new(
            list.iter()
                .map(|&p| PlatformEntry::new(p, p.default_extensions()))
                .collect(),
        ),
        None => PlatformTable::default(),
    };
    let items = match scan_rom_items(&cli.rom_dir, &table) {
        Ok(items) => items,
        Err(e) => {
            log::error!(
                "{} Could not read {}: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                cli.rom_dir.display(),
                e,
            );
            std::process::exit(1);
        }
    };

    if items.is_empty() {
        log::warn!("No ROM files found in {}", cli.rom_dir.display());
        return;
    }
    log::info!("Found {} ROMs", items.len());

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let items = rt.block_on(run(&cli, items));

    for item in &items {
        let prefix = report::item_prefix(item);
        let outcome = report::outcome_text(item);
        if item.error.is_none() {
            println!(
                "{} - {}",
                prefix,
                outcome.if_supports_color(Stdout, |t| t.green()),
            );
        } else {
            println!(
                "{} - {}",
                prefix,
                outcome.if_supports_color(Stdout, |t| t.red()),
            );
        }
    }

    let failed = items.iter().filter(|i| i.error.is_some()).count();
    log::info!(
        "{} {} covers downloaded",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        items.len() - failed,
    );
    if failed > 0 {
        log::warn!(
            "{} {} failed",
            "\u{2718}".if_supports_color(Stdout, |t| t.yellow()),
            failed,
        );
    }
    // Per-item failures do not change the exit code; only usage and
    // discovery errors do.
}

/// Run the pipeline with a progress spinner and Ctrl-C cancellation.
async fn run(cli: &Cli, items: Vec<RomItem>) -> Vec<RomItem> {
    let client = match RetroCatalogClient::new(std::time::Duration::from_secs(cli.timeout)) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Interrupted, remaining items will be reported as cancelled");
                cancel.store(true, Ordering::Relaxed);
            }
        });
    }

    let pb = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("/-\\|"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    };

    let total = items.len();
    let options = PipelineOptions {
        output_dir: cli.output_dir.clone(),
        workers: cli.workers,
    };
    let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel::<PipelineEvent>();

    let pipeline = run_pipeline(Arc::new(client), items, &options, cancel, event_tx);

    let mut done = 0usize;
    let items = async_util::run_with_events(pipeline, event_rx, |event| match event {
        PipelineEvent::LookupStarted { name, .. } => {
            pb.set_message(format!("Looking up {}", name));
        }
        PipelineEvent::LookupSucceeded { .. } | PipelineEvent::LookupFailed { .. } => {
            done += 1;
            pb.set_message(format!("Looked up {}/{}", done, total));
        }
        PipelineEvent::DownloadStarted { name, .. } => {
            pb.set_message(format!("Downloading cover for {}", name));
        }
        PipelineEvent::Downloaded { name, .. } => {
            pb.set_message(format!("Downloaded {}", name));
        }
        PipelineEvent::DownloadFailed { name, reason, .. } => {
            pb.set_message(format!("Failed {}: {}", name, reason));
        }
    })
    .await;

    pb.finish_and_clear();
    items
}
