//! Directory scanner for ROM collections.
//!
//! Builds the work-item list the pipeline consumes: one item per top-level
//! file whose extension is registered in the platform table. Non-recursive.

use std::path::{Path, PathBuf};

use rom_covers_core::{Platform, PlatformTable};

use crate::error::ItemError;

/// One ROM moving through the pipeline.
///
/// `platform`, `source_path`, and `name` are fixed at discovery. `cover_url`
/// is written at most once by the lookup stage; `error` at most once by
/// whichever stage first fails. Once `error` is set the item is skipped by
/// later stages but kept for the report.
#[derive(Debug)]
pub struct RomItem {
    /// Position in discovery order; restores report order after the
    /// unordered concurrent stages.
    pub index: usize,
    pub platform: Platform,
    pub source_path: PathBuf,
    /// Search/display name: the filename with its extension stripped.
    pub name: String,
    pub cover_url: Option<String>,
    pub error: Option<ItemError>,
}

impl RomItem {
    fn new(index: usize, platform: Platform, source_path: PathBuf, name: String) -> Self {
        Self {
            index,
            platform,
            source_path,
            name,
            cover_url: None,
            error: None,
        }
    }
}

/// Scan a directory and return one item per registered ROM file.
///
/// Iterates the platform table in order, then directory entries in sorted
/// order, so identical inputs produce the same item list. A file matching
/// two table entries is attributed to the first. Failure to enumerate the
/// root is fatal to the whole run and propagates to the caller.
pub fn scan_rom_items(root: &Path, table: &PlatformTable) -> std::io::Result<Vec<RomItem>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(root)?
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    let mut items = Vec::new();
    for entry in table.entries() {
        for path in &files {
            let Some(ext) = extension_lowercase(path) else {
                continue;
            };
            if !entry.extensions.iter().any(|x| *x == ext) {
                continue;
            }
            // Attribute to the first matching table entry only
            if table.platform_for_extension(&ext) != Some(entry.platform) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                log::warn!("skipping non-UTF-8 filename: {}", path.display());
                continue;
            };
            items.push(RomItem::new(
                items.len(),
                entry.platform,
                path.clone(),
                name.to_string(),
            ));
        }
    }

    Ok(items)
}

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
